//! Keyboard Module - keyboard event types and terminal event conversion.
//!
//! Bridges crossterm's event system to the grid's own `KeyboardEvent`, which
//! names keys by string ("a", "Enter", "ArrowUp") so the keymap and field
//! inputs stay independent of the terminal backend.
//!
//! # Example
//!
//! ```ignore
//! use spark_grid::state::keyboard::{poll_event, InputEvent};
//! use std::time::Duration;
//!
//! if let Ok(Some(InputEvent::Key(event))) = poll_event(Duration::from_millis(50)) {
//!     grid.handle_key(&event);
//! }
//! ```

use std::time::Duration;

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers,
};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press and repeat both count as input; release does not.
    pub fn is_actionable(&self) -> bool {
        self.state != KeyState::Release
    }

    /// The typed character, for single-character keys without ctrl/alt.
    pub fn char(&self) -> Option<char> {
        if self.modifiers.ctrl || self.modifiers.alt {
            return None;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// Unified terminal event
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyboardEvent),
    /// Terminal resize (new width, height)
    Resize(u16, u16),
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Name of a non-character key, or None for keys the grid ignores.
fn key_name(code: KeyCode) -> Option<&'static str> {
    Some(match code {
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Esc => "Escape",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        _ => return None,
    })
}

impl From<KeyEventKind> for KeyState {
    fn from(kind: KeyEventKind) -> Self {
        match kind {
            KeyEventKind::Press => KeyState::Press,
            KeyEventKind::Repeat => KeyState::Repeat,
            KeyEventKind::Release => KeyState::Release,
        }
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Modifiers {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// Convert a crossterm key event. Function keys, media keys and the like
/// have no grid meaning and convert to None.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyboardEvent> {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        code => key_name(code)?.to_string(),
    };
    Some(KeyboardEvent {
        key,
        modifiers: event.modifiers.into(),
        state: event.kind.into(),
    })
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout. Returns None if nothing arrived.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(convert_key_event(key).map_or(InputEvent::None, InputEvent::Key)),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}
