//! Layout Module - where grid columns land on screen.
//!
//! Column widths go through [Taffy](https://github.com/DioxusLabs/taffy) as a
//! single flex row; text is measured and fitted in terminal cells.
//!
//! ```ignore
//! use spark_grid::layout::compute_column_spans;
//! use spark_grid::user_columns;
//!
//! let spans = compute_column_spans(&user_columns(), 100);
//! assert_eq!(spans[0].width, 25);
//! ```

mod taffy_bridge;
mod text_measure;

pub use taffy_bridge::{compute_column_spans, ColumnSpan, AUTO_MIN_WIDTH, COLUMN_GAP};
pub use text_measure::{fit_text, string_width, truncate_text};
