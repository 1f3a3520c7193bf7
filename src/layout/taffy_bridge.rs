//! Taffy Bridge - column widths through the Taffy layout engine
//!
//! The grid row is a flex row with a one-cell gap. Each column becomes a
//! leaf: `Cells(n)` is a fixed length, `Percent(p)` a share of the row, and
//! `Auto` grows into whatever is left (never narrower than its minimum).

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection, LengthPercentage, NodeId,
    Size, Style, TaffyResult, TaffyTree,
};
use tracing::warn;

use crate::columns::Column;
use crate::types::Dimension;

use super::text_measure::string_width;

/// Narrowest an `Auto` column gets; fits "Save  Cancel".
pub const AUTO_MIN_WIDTH: u16 = 14;

/// Cells between adjacent columns.
pub const COLUMN_GAP: u16 = 1;

/// Horizontal placement of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSpan {
    pub x: u16,
    pub width: u16,
}

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn column_style(column: &Column) -> Style {
    match column.width {
        Dimension::Auto => {
            let min = string_width(&column.title).max(AUTO_MIN_WIDTH);
            Style {
                flex_grow: 1.0,
                min_size: Size {
                    width: TaffyDimension::Length(min as f32),
                    height: TaffyDimension::Auto,
                },
                ..Style::default()
            }
        }
        width => Style {
            flex_shrink: 1.0,
            size: Size {
                width: to_taffy_dimension(width),
                height: TaffyDimension::Length(1.0),
            },
            ..Style::default()
        },
    }
}

fn run_layout(columns: &[Column], total_width: u16) -> TaffyResult<Vec<ColumnSpan>> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let leaves = columns
        .iter()
        .map(|column| tree.new_leaf(column_style(column)))
        .collect::<TaffyResult<Vec<NodeId>>>()?;

    let row = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            gap: Size {
                width: LengthPercentage::Length(COLUMN_GAP as f32),
                height: LengthPercentage::Length(0.0),
            },
            size: Size {
                width: TaffyDimension::Length(total_width as f32),
                height: TaffyDimension::Length(1.0),
            },
            ..Style::default()
        },
        &leaves,
    )?;

    tree.compute_layout(
        row,
        Size {
            width: AvailableSpace::Definite(total_width as f32),
            height: AvailableSpace::Definite(1.0),
        },
    )?;

    leaves
        .iter()
        .map(|&leaf| -> TaffyResult<ColumnSpan> {
            let layout = tree.layout(leaf)?;
            Ok(ColumnSpan {
                x: layout.location.x.max(0.0).round() as u16,
                width: layout.size.width.max(0.0).round() as u16,
            })
        })
        .collect()
}

/// Even split used when the layout engine refuses the tree.
fn even_spans(count: usize, total_width: u16) -> Vec<ColumnSpan> {
    if count == 0 {
        return Vec::new();
    }
    let gaps = COLUMN_GAP.saturating_mul(count.saturating_sub(1) as u16);
    let width = total_width.saturating_sub(gaps) / count as u16;
    (0..count)
        .map(|i| ColumnSpan {
            x: (i as u16).saturating_mul(width + COLUMN_GAP),
            width,
        })
        .collect()
}

/// Place `columns` across a row `total_width` cells wide.
///
/// Spans are clipped so none reaches past the row.
pub fn compute_column_spans(columns: &[Column], total_width: u16) -> Vec<ColumnSpan> {
    let spans = run_layout(columns, total_width).unwrap_or_else(|err| {
        warn!(%err, "column layout failed, splitting evenly");
        even_spans(columns.len(), total_width)
    });

    spans
        .into_iter()
        .map(|span| {
            let x = span.x.min(total_width);
            ColumnSpan {
                x,
                width: span.width.min(total_width - x),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::user_columns;
    use crate::types::Field;

    #[test]
    fn test_dimension_conversion() {
        assert_eq!(to_taffy_dimension(Dimension::Auto), TaffyDimension::Auto);
        assert_eq!(to_taffy_dimension(Dimension::Cells(7)), TaffyDimension::Length(7.0));
        assert_eq!(to_taffy_dimension(Dimension::Percent(25.0)), TaffyDimension::Percent(0.25));
    }

    #[test]
    fn test_user_columns_at_100() {
        let spans = compute_column_spans(&user_columns(), 100);
        assert_eq!(
            spans,
            vec![
                ColumnSpan { x: 0, width: 25 },
                ColumnSpan { x: 26, width: 15 },
                ColumnSpan { x: 42, width: 40 },
                ColumnSpan { x: 83, width: 17 },
            ]
        );
    }

    #[test]
    fn test_fixed_columns() {
        let columns = vec![
            Column::field("a", Field::Name).width(Dimension::Cells(10)),
            Column::field("b", Field::Age).width(Dimension::Cells(5)),
        ];
        let spans = compute_column_spans(&columns, 40);
        assert_eq!(spans[0], ColumnSpan { x: 0, width: 10 });
        assert_eq!(spans[1], ColumnSpan { x: 11, width: 5 });
    }

    #[test]
    fn test_spans_stay_inside_narrow_row() {
        for width in [0u16, 5, 20, 37] {
            for span in compute_column_spans(&user_columns(), width) {
                assert!(span.x + span.width <= width, "{span:?} overflows {width}");
            }
        }
    }

    #[test]
    fn test_even_spans() {
        assert_eq!(
            even_spans(2, 21),
            vec![ColumnSpan { x: 0, width: 10 }, ColumnSpan { x: 11, width: 10 }]
        );
        assert!(even_spans(0, 10).is_empty());
    }
}
