//! Renderer - grid state to terminal cells.
//!
//! [`render_grid`] draws a [`Grid`](crate::Grid) into a [`Frame`];
//! [`DiffRenderer`] writes the cells that changed since the last frame;
//! [`TerminalGuard`] holds raw mode and the alternate screen until dropped.
//!
//! ```ignore
//! let _terminal = TerminalGuard::enter(std::io::stdout())?;
//! let mut renderer = DiffRenderer::new(std::io::stdout());
//! renderer.render(&render_grid(&grid, width, height))?;
//! ```

mod frame;
mod terminal;
mod view;

pub use frame::{Frame, CONTINUATION};
pub use terminal::{DiffRenderer, TerminalGuard};
pub use view::render_grid;
