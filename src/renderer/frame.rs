//! Frame - a 2D grid of terminal cells.
//!
//! Row-major storage. A wide glyph occupies its own cell plus a continuation
//! cell holding `'\0'` that the terminal writer skips.

use unicode_width::UnicodeWidthChar;

use crate::types::{Attr, Cell};

/// Marks the second half of a wide glyph.
pub const CONTINUATION: char = '\0';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    /// Create a blank frame.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Add attributes to `len` cells starting at (x, y).
    pub fn add_attrs(&mut self, x: u16, y: u16, len: u16, attrs: Attr) {
        for dx in 0..len {
            if let Some(cell) = self.get_mut(x.saturating_add(dx), y) {
                cell.attrs |= attrs;
            }
        }
    }

    /// Draw `text` at (x, y), clipped at the right edge. Returns cells used.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, attrs: Attr) -> u16 {
        if y >= self.height {
            return 0;
        }
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > self.width {
                break;
            }
            let idx = self.index(col, y);
            self.cells[idx] = Cell { ch, attrs };
            if w == 2 {
                self.cells[idx + 1] = Cell { ch: CONTINUATION, attrs };
            }
            col += w;
        }
        col - x
    }

    /// Fill a row segment with one character.
    pub fn draw_hline(&mut self, x: u16, y: u16, len: u16, ch: char, attrs: Attr) {
        for dx in 0..len {
            if let Some(cell) = self.get_mut(x.saturating_add(dx), y) {
                *cell = Cell { ch, attrs };
            }
        }
    }

    /// The text of row `y` with continuation cells dropped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|cell| cell.ch != CONTINUATION)
            .map(|cell| cell.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_blank() {
        let frame = Frame::new(4, 2);
        assert_eq!(frame.row_text(0), "    ");
        assert_eq!(frame.get(4, 0), None);
    }

    #[test]
    fn test_draw_text_clips() {
        let mut frame = Frame::new(5, 1);
        let used = frame.draw_text(2, 0, "hello", Attr::BOLD);
        assert_eq!(used, 3);
        assert_eq!(frame.row_text(0), "  hel");
        assert_eq!(frame.get(2, 0).unwrap().attrs, Attr::BOLD);
    }

    #[test]
    fn test_wide_glyph_takes_two_cells() {
        let mut frame = Frame::new(5, 1);
        assert_eq!(frame.draw_text(0, 0, "日本語", Attr::NONE), 4);
        assert_eq!(frame.get(1, 0).unwrap().ch, CONTINUATION);
        assert_eq!(frame.row_text(0), "日本 ");
    }

    #[test]
    fn test_add_attrs() {
        let mut frame = Frame::new(3, 1);
        frame.draw_text(0, 0, "abc", Attr::BOLD);
        frame.add_attrs(1, 0, 5, Attr::INVERSE);
        assert_eq!(frame.get(0, 0).unwrap().attrs, Attr::BOLD);
        assert_eq!(frame.get(2, 0).unwrap().attrs, Attr::BOLD | Attr::INVERSE);
    }
}
