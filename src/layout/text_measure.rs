//! Text Measurement
//!
//! Display widths in terminal cells via `unicode-width`: ASCII is 1 cell,
//! CJK and most emoji are 2, combining marks and controls are 0.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(s)).unwrap_or(u16::MAX)
}

fn char_width(c: char) -> u16 {
    UnicodeWidthChar::width(c).unwrap_or(0) as u16
}

/// Truncate `text` to at most `width` cells, ending with `…` when cut.
pub fn truncate_text(text: &str, width: u16) -> String {
    if width == 0 {
        return String::new();
    }
    if string_width(text) <= width {
        return text.to_string();
    }

    let target = width - 1;
    let mut result = String::new();
    let mut used = 0u16;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > target {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}

/// Truncate then right-pad with spaces to exactly `width` cells.
///
/// A wide glyph that would straddle the edge is replaced by padding.
pub fn fit_text(text: &str, width: u16) -> String {
    let mut fitted = truncate_text(text, width);
    let used = string_width(&fitted);
    for _ in used..width {
        fitted.push(' ');
    }
    fitted
}
