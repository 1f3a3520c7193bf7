//! Field Input Primitive - single-line input for one editable cell.
//!
//! The input capability an editable column presents while its row is being
//! edited. Two kinds, declared on the column:
//!
//! - `Text` accepts any printable character
//! - `Numeric` accepts digits, sign, decimal point and exponent characters
//!
//! # Features
//!
//! - Cursor navigation (arrows, home, end)
//! - Text editing (backspace, delete, ctrl+w word delete)
//! - Horizontal scrolling to keep the cursor visible
//! - Required-value validation at commit time

use unicode_width::UnicodeWidthChar;

use crate::error::ValidationError;
use crate::state::keyboard::KeyboardEvent;
use crate::types::{Field, FieldValue, InputKind};

// =============================================================================
// Word Boundary Helpers
// =============================================================================

/// Find the start of the word before the given position.
/// A word is a run of alphanumeric characters.
fn find_word_start(chars: &[char], pos: usize) -> usize {
    let mut i = pos.min(chars.len());

    // Skip whitespace/punctuation going backward
    while i > 0 && !chars[i - 1].is_alphanumeric() {
        i -= 1;
    }

    // Skip word characters going backward
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }

    i
}

fn accepts(kind: InputKind, ch: char) -> bool {
    if ch.is_control() {
        return false;
    }
    match kind {
        InputKind::Text => true,
        InputKind::Numeric => ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E'),
    }
}

// =============================================================================
// Field Input
// =============================================================================

/// Editable value of one field, with a cursor measured in characters.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput {
    kind: InputKind,
    chars: Vec<char>,
    cursor: usize,
}

impl FieldInput {
    /// Create an input seeded with `value`, cursor at the end.
    pub fn new(kind: InputKind, value: &str) -> Self {
        let chars: Vec<char> = value.chars().collect();
        let cursor = chars.len();
        Self { kind, chars, cursor }
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value, moving the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.chars = value.chars().collect();
        self.cursor = self.chars.len();
    }

    /// Insert a character at the cursor. Returns false if the kind rejects it.
    pub fn insert(&mut self, ch: char) -> bool {
        if !accepts(self.kind, ch) {
            return false;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Delete the character after the cursor.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    /// Delete from the start of the previous word to the cursor.
    pub fn delete_word_backward(&mut self) -> bool {
        let start = find_word_start(&self.chars, self.cursor);
        if start == self.cursor {
            return false;
        }
        self.chars.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.chars.len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Apply an editing key. Returns true if the event was consumed.
    ///
    /// Enter, Escape and Tab are never consumed; they belong to the grid.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        if !event.is_actionable() {
            return false;
        }
        if event.modifiers.ctrl && event.key == "w" {
            self.delete_word_backward();
            return true;
        }
        match event.key.as_str() {
            "Backspace" => {
                self.delete_backward();
                true
            }
            "Delete" => {
                self.delete_forward();
                true
            }
            "ArrowLeft" => {
                self.move_cursor(-1);
                true
            }
            "ArrowRight" => {
                self.move_cursor(1);
                true
            }
            "Home" => {
                self.home();
                true
            }
            "End" => {
                self.end();
                true
            }
            _ => match event.char() {
                Some(ch) => {
                    self.insert(ch);
                    true
                }
                None => false,
            },
        }
    }

    /// Validate the current value for `field`.
    ///
    /// Empty (after trimming) is a required-field failure; a numeric input
    /// must parse to a finite number.
    pub fn validate(&self, field: Field, title: &str) -> Result<FieldValue, ValidationError> {
        let value = self.value();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::required(field, title));
        }
        match self.kind {
            InputKind::Text => Ok(FieldValue::Text(value)),
            InputKind::Numeric => trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number)
                .ok_or_else(|| ValidationError::not_a_number(field, title)),
        }
    }

    /// The slice of the value that fits in `width` cells, scrolled so the
    /// cursor stays visible, and the cursor's column within that slice.
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        // Scroll start: walk back from the cursor until the window is full,
        // keeping one cell for the cursor itself.
        let mut start = self.cursor;
        let mut used = 1;
        while start > 0 {
            let w = self.chars[start - 1].width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            start -= 1;
        }

        let mut out = String::new();
        let mut cols = 0;
        let mut cursor_col = 0;
        for (i, ch) in self.chars.iter().enumerate().skip(start) {
            if i == self.cursor {
                cursor_col = cols;
            }
            let w = ch.width().unwrap_or(0);
            if cols + w > width {
                break;
            }
            out.push(*ch);
            cols += w;
        }
        if self.cursor >= self.chars.len() {
            cursor_col = cols.min(width - 1);
        }
        (out, cursor_col)
    }
}

// =============================================================================
// Tests
// =============================================================================
