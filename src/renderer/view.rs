//! Grid view - draws a [`Grid`] into a [`Frame`].
//!
//! ```text
//! name          age    address              operation
//! ─────────────────────────────────────────────────────
//! Ann           30     X                    Edit Delete
//! Bo            41     Y                    Save Cancel
//!   ! Please input name!
//!
//! Page 1/3  23 records
//! ↑↓ move  Enter edit  d delete  [ ] page  q quit
//! ```
//!
//! Rows past the frame height are not drawn; the footer always is.

use crate::grid::Grid;
use crate::layout::{compute_column_spans, fit_text, ColumnSpan};
use crate::primitives::{bind_cell, Affordances, CellView};
use crate::state::{GridMode, LoadState};
use crate::types::{Attr, Record};

use super::frame::Frame;

/// Pager and status lines.
const FOOTER_LINES: u16 = 2;
/// Header and rule.
const HEADER_LINES: u16 = 2;

/// Draw the whole grid into a fresh `width` x `height` frame.
pub fn render_grid(grid: &Grid, width: u16, height: u16) -> Frame {
    let mut frame = Frame::new(width, height);
    if width == 0 || height == 0 {
        return frame;
    }

    let spans = compute_column_spans(grid.columns(), width);
    draw_header(&mut frame, grid, &spans);

    let body_end = height.saturating_sub(FOOTER_LINES);
    let mut y = HEADER_LINES;
    let records = grid.visible_records();

    if records.is_empty() {
        if y < body_end {
            let message = empty_message(grid);
            frame.draw_text(0, y, &fit_text(&message, width), Attr::DIM);
        }
    } else {
        let cursor = grid.cursor();
        let highlight = grid.mode() == GridMode::View;
        for (i, record) in records.iter().enumerate() {
            if y >= body_end {
                break;
            }
            draw_row(&mut frame, grid, record, &spans, y);
            if highlight && i == cursor {
                frame.add_attrs(0, y, width, Attr::INVERSE);
            }
            y += 1;

            if grid.is_editing(record) && !grid.errors().is_empty() && y < body_end {
                let line = format!("  ! {}", grid.errors());
                frame.draw_text(0, y, &fit_text(&line, width), Attr::BOLD);
                y += 1;
            }
        }
    }

    if height >= FOOTER_LINES {
        draw_pager(&mut frame, grid, height - FOOTER_LINES);
    }
    draw_status(&mut frame, grid, height - 1);
    frame
}

fn empty_message(grid: &Grid) -> String {
    match grid.store().load_state() {
        LoadState::Pending => "Loading…".to_string(),
        LoadState::Loaded => "No data".to_string(),
        LoadState::Failed(_) => "No data".to_string(),
    }
}

fn draw_header(frame: &mut Frame, grid: &Grid, spans: &[ColumnSpan]) {
    for (column, span) in grid.columns().iter().zip(spans) {
        frame.draw_text(span.x, 0, &fit_text(&column.title, span.width), Attr::BOLD);
    }
    if frame.height() > 1 {
        frame.draw_hline(0, 1, frame.width(), '─', Attr::DIM);
    }
}

fn draw_row(frame: &mut Frame, grid: &Grid, record: &Record, spans: &[ColumnSpan], y: u16) {
    let session = grid.session();
    let draft = grid.draft();
    let errors = grid.errors();

    for (column, span) in grid.columns().iter().zip(spans) {
        match bind_cell(record, column, session, draft.as_ref(), &errors) {
            CellView::Value(text) => {
                frame.draw_text(span.x, y, &fit_text(&text, span.width), Attr::NONE);
            }
            CellView::Input { field, value, cursor, focused, error, .. } => {
                let (text, cursor_col) = draft
                    .as_ref()
                    .and_then(|d| d.input(field))
                    .map(|input| input.visible(span.width as usize))
                    .unwrap_or((value, cursor));
                let mut attrs = Attr::UNDERLINE;
                if error.is_some() {
                    attrs |= Attr::BOLD;
                }
                frame.draw_text(span.x, y, &fit_text(&text, span.width), attrs);
                if focused && (cursor_col as u16) < span.width {
                    frame.add_attrs(span.x + cursor_col as u16, y, 1, Attr::INVERSE);
                }
            }
            CellView::Operations(affordances) => {
                let label = operations_label(affordances);
                let attrs = if affordances.contains(Affordances::DISABLED) {
                    Attr::DIM
                } else {
                    Attr::NONE
                };
                frame.draw_text(span.x, y, &fit_text(&label, span.width), attrs);
            }
        }
    }
}

fn operations_label(affordances: Affordances) -> String {
    [
        (Affordances::EDIT, "Edit"),
        (Affordances::DELETE, "Delete"),
        (Affordances::SAVE, "Save"),
        (Affordances::CANCEL, "Cancel"),
    ]
    .into_iter()
    .filter(|(flag, _)| affordances.contains(*flag))
    .map(|(_, label)| label)
    .collect::<Vec<_>>()
    .join(" ")
}

fn draw_pager(frame: &mut Frame, grid: &Grid, y: u16) {
    let total = grid.store().len();
    let pager = grid.pager();
    let line = format!(
        "Page {}/{}  {} records",
        pager.current() + 1,
        pager.page_count(total),
        total
    );
    frame.draw_text(0, y, &fit_text(&line, frame.width()), Attr::NONE);
}

fn draw_status(frame: &mut Frame, grid: &Grid, y: u16) {
    let (line, attrs) = if let Some(prompt) = grid.prompt() {
        (format!("{} (y/n)", prompt.question()), Attr::BOLD)
    } else if let LoadState::Failed(message) = grid.store().load_state() {
        (format!("Failed to load records: {message}"), Attr::BOLD)
    } else if let Some(status) = grid.status() {
        (status, Attr::NONE)
    } else {
        (hints(grid.mode()).to_string(), Attr::DIM)
    };
    frame.draw_text(0, y, &fit_text(&line, frame.width()), attrs);
}

fn hints(mode: GridMode) -> &'static str {
    match mode {
        GridMode::View => "↑↓ move  Enter edit  d delete  [ ] page  q quit",
        GridMode::Edit => "Tab next field  Enter save  Esc cancel",
        GridMode::Confirm => "y confirm  n dismiss",
    }
}
