//! Keymap - keyboard events to grid actions.
//!
//! Which keys mean what depends on the grid mode:
//!
//! | Mode    | Keys                                                        |
//! |---------|-------------------------------------------------------------|
//! | View    | ↑/k ↓/j move, Enter/e edit, d/Delete delete, PgUp/[ PgDn/] page, q quit |
//! | Edit    | Tab/BackTab focus, Enter save, Escape cancel, rest → field  |
//! | Confirm | y/Enter confirm, n/Escape dismiss                           |
//! | Any     | Ctrl+C quit                                                 |

use super::keyboard::KeyboardEvent;

/// Interaction mode of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    View,
    Edit,
    /// A yes/no prompt is pending.
    Confirm,
}

/// What a key asks the grid to do.
#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    CursorUp,
    CursorDown,
    Edit,
    Delete,
    PrevPage,
    NextPage,
    Quit,
    Save,
    RequestCancel,
    FocusNext,
    FocusPrev,
    /// Forwarded to the focused field input.
    FieldKey(KeyboardEvent),
    Confirm,
    Dismiss,
}

/// Resolve `event` in `mode`. Releases and unbound keys resolve to None.
pub fn resolve(event: &KeyboardEvent, mode: GridMode) -> Option<GridAction> {
    if !event.is_actionable() {
        return None;
    }
    // Ctrl+C quits from every mode.
    if event.modifiers.ctrl && event.key == "c" {
        return Some(GridAction::Quit);
    }
    match mode {
        GridMode::View => resolve_view(event),
        GridMode::Edit => Some(resolve_edit(event)),
        GridMode::Confirm => resolve_confirm(event),
    }
}

fn resolve_view(event: &KeyboardEvent) -> Option<GridAction> {
    let action = match event.key.as_str() {
        "ArrowUp" | "k" => GridAction::CursorUp,
        "ArrowDown" | "j" => GridAction::CursorDown,
        "Enter" | "e" => GridAction::Edit,
        "Delete" | "d" => GridAction::Delete,
        "PageUp" | "[" => GridAction::PrevPage,
        "PageDown" | "]" => GridAction::NextPage,
        "q" => GridAction::Quit,
        _ => return None,
    };
    Some(action)
}

fn resolve_edit(event: &KeyboardEvent) -> GridAction {
    match event.key.as_str() {
        "Enter" => GridAction::Save,
        "Escape" => GridAction::RequestCancel,
        "BackTab" => GridAction::FocusPrev,
        "Tab" if event.modifiers.shift => GridAction::FocusPrev,
        "Tab" => GridAction::FocusNext,
        _ => GridAction::FieldKey(event.clone()),
    }
}

fn resolve_confirm(event: &KeyboardEvent) -> Option<GridAction> {
    match event.key.as_str() {
        "y" | "Y" | "Enter" => Some(GridAction::Confirm),
        "n" | "N" | "Escape" => Some(GridAction::Dismiss),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyboard::{KeyState, Modifiers};

    #[test]
    fn test_view_keys() {
        assert_eq!(resolve(&KeyboardEvent::new("e"), GridMode::View), Some(GridAction::Edit));
        assert_eq!(resolve(&KeyboardEvent::new("Delete"), GridMode::View), Some(GridAction::Delete));
        assert_eq!(resolve(&KeyboardEvent::new("]"), GridMode::View), Some(GridAction::NextPage));
        assert_eq!(resolve(&KeyboardEvent::new("x"), GridMode::View), None);
        assert_eq!(
            resolve(&KeyboardEvent::with_modifiers("c", Modifiers::ctrl()), GridMode::View),
            Some(GridAction::Quit)
        );
    }

    #[test]
    fn test_edit_keys_forward_to_field() {
        assert_eq!(resolve(&KeyboardEvent::new("Enter"), GridMode::Edit), Some(GridAction::Save));
        assert_eq!(
            resolve(&KeyboardEvent::new("Escape"), GridMode::Edit),
            Some(GridAction::RequestCancel)
        );
        assert_eq!(
            resolve(&KeyboardEvent::with_modifiers("Tab", Modifiers::shift()), GridMode::Edit),
            Some(GridAction::FocusPrev)
        );
        // View bindings do not apply while editing
        assert_eq!(
            resolve(&KeyboardEvent::new("q"), GridMode::Edit),
            Some(GridAction::FieldKey(KeyboardEvent::new("q")))
        );
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(resolve(&KeyboardEvent::new("y"), GridMode::Confirm), Some(GridAction::Confirm));
        assert_eq!(resolve(&KeyboardEvent::new("Escape"), GridMode::Confirm), Some(GridAction::Dismiss));
        assert_eq!(resolve(&KeyboardEvent::new("e"), GridMode::Confirm), None);
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let ctrl_c = KeyboardEvent::with_modifiers("c", Modifiers::ctrl());
        for mode in [GridMode::View, GridMode::Edit, GridMode::Confirm] {
            assert_eq!(resolve(&ctrl_c, mode), Some(GridAction::Quit), "{mode:?}");
        }
        // Plain `c` is still typed into the field
        assert_eq!(
            resolve(&KeyboardEvent::new("c"), GridMode::Edit),
            Some(GridAction::FieldKey(KeyboardEvent::new("c")))
        );
    }

    #[test]
    fn test_release_ignored() {
        let mut event = KeyboardEvent::new("e");
        event.state = KeyState::Release;
        assert_eq!(resolve(&event, GridMode::View), None);
    }
}
