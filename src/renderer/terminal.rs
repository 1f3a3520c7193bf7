//! Differential terminal writer.
//!
//! Compares each frame with the previous one and emits only changed cells,
//! inside a synchronized update so the terminal never shows a half frame.
//! Attribute changes and cursor moves are skipped when already in effect.

use std::io::{self, Write};

use crossterm::{
    cursor,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};

use super::frame::{Frame, CONTINUATION};
use crate::types::{Attr, Cell};

pub struct DiffRenderer<W: Write> {
    out: W,
    previous: Option<Frame>,
    /// Where the terminal cursor sits after the last print.
    position: Option<(u16, u16)>,
    attrs: Option<Attr>,
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
            position: None,
            attrs: None,
        }
    }

    /// Render `frame`, writing only cells that changed.
    ///
    /// Returns true if anything was written.
    pub fn render(&mut self, frame: &Frame) -> io::Result<bool> {
        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == frame.width() && prev.height() == frame.height());
        if !same_size {
            self.previous = None;
        }

        queue!(self.out, terminal::BeginSynchronizedUpdate)?;
        if self.previous.is_none() {
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
            self.position = None;
        }

        let mut changed = false;
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let Some(cell) = frame.get(x, y) else {
                    continue;
                };
                let unchanged = self
                    .previous
                    .as_ref()
                    .and_then(|prev| prev.get(x, y))
                    .is_some_and(|prev| prev == cell);
                if unchanged || cell.ch == CONTINUATION {
                    continue;
                }
                self.write_cell(x, y, cell)?;
                changed = true;
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset), terminal::EndSynchronizedUpdate)?;
        self.attrs = None;
        self.out.flush()?;

        self.previous = Some(frame.clone());
        Ok(changed)
    }

    fn write_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.position != Some((x, y)) {
            queue!(self.out, cursor::MoveTo(x, y))?;
        }
        if self.attrs != Some(cell.attrs) {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            for attribute in attributes(cell.attrs) {
                queue!(self.out, SetAttribute(attribute))?;
            }
            self.attrs = Some(cell.attrs);
        }
        queue!(self.out, Print(cell.ch))?;

        let advance = unicode_width::UnicodeWidthChar::width(cell.ch).unwrap_or(1) as u16;
        self.position = Some((x.saturating_add(advance), y));
        Ok(())
    }

    /// Forget the previous frame; the next render redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

// =============================================================================
// Terminal Guard
// =============================================================================

/// Raw mode plus the alternate screen, held for as long as the guard lives.
///
/// Dropping the guard restores the terminal, including when the event loop
/// returns an error or unwinds from a panic.
pub struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Enable raw mode, switch to the alternate screen and hide the cursor.
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on a failure drops the guard, which undoes the raw mode.
        let mut guard = Self { out, raw_mode: true };
        guard.enter_screen()?;
        Ok(guard)
    }

    #[cfg(test)]
    fn screen_only(out: W) -> io::Result<Self> {
        let mut guard = Self { out, raw_mode: false };
        guard.enter_screen()?;
        Ok(guard)
    }

    fn enter_screen(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::EnterAlternateScreen, cursor::Hide)?;
        self.out.flush()
    }

    fn restore(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        // Best effort: there is nowhere left to report a failure.
        let _ = self.restore();
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

fn attributes(attrs: Attr) -> Vec<Attribute> {
    [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
    ]
    .into_iter()
    .filter(|(flag, _)| attrs.contains(*flag))
    .map(|(_, attribute)| attribute)
    .collect()
}
