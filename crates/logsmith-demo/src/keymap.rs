#![forbid(unsafe_code)]

//! Key and mouse bindings.
//!
//! [`map_key`] is a pure function from a crossterm key event and the
//! current [`InputMode`] to an [`Action`]. The event loop applies actions to
//! the engine; nothing here touches the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_ROWS: isize = 3;

/// Whether keystrokes go to the list or to the filter prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate the list.
    #[default]
    Browse,
    /// Printable keys edit the filter text.
    Filter,
}

/// What a key asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scroll by this many rows.
    ScrollRows(isize),
    /// Scroll by this many pages.
    Page(isize),
    /// Jump to the first row.
    Home,
    /// Jump to the last row.
    End,
    /// Start editing the filter.
    FocusFilter,
    /// Stop editing the filter, keeping its text.
    Blur,
    /// Append a character to the filter.
    InsertChar(char),
    /// Remove the last filter character.
    DeleteChar,
    /// Empty the filter and return to browsing.
    ClearFilter,
    /// Leave the viewer.
    Quit,
}

/// Map a key press to an action. Releases and unbound keys map to `None`.
#[must_use]
pub fn map_key(key: &KeyEvent, mode: InputMode) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') if mode == InputMode::Filter => Some(Action::ClearFilter),
            _ => None,
        };
    }

    let shared = match key.code {
        KeyCode::Up => Some(Action::ScrollRows(-1)),
        KeyCode::Down => Some(Action::ScrollRows(1)),
        KeyCode::PageUp => Some(Action::Page(-1)),
        KeyCode::PageDown => Some(Action::Page(1)),
        KeyCode::Home => Some(Action::Home),
        KeyCode::End => Some(Action::End),
        KeyCode::Esc => Some(Action::ClearFilter),
        _ => None,
    };
    if shared.is_some() {
        return shared;
    }

    match mode {
        InputMode::Browse => match key.code {
            KeyCode::Char('k') => Some(Action::ScrollRows(-1)),
            KeyCode::Char('j') => Some(Action::ScrollRows(1)),
            KeyCode::Char(' ') => Some(Action::Page(1)),
            KeyCode::Char('g') => Some(Action::Home),
            KeyCode::Char('G') => Some(Action::End),
            KeyCode::Char('/') => Some(Action::FocusFilter),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        InputMode::Filter => match key.code {
            KeyCode::Char(c) => Some(Action::InsertChar(c)),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Enter | KeyCode::Tab => Some(Action::Blur),
            _ => None,
        },
    }
}

/// Map a mouse wheel event to a scroll action.
#[must_use]
pub fn map_mouse(event: &MouseEvent) -> Option<Action> {
    match event.kind {
        MouseEventKind::ScrollUp => Some(Action::ScrollRows(-WHEEL_ROWS)),
        MouseEventKind::ScrollDown => Some(Action::ScrollRows(WHEEL_ROWS)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn browse_navigation() {
        let m = InputMode::Browse;
        assert_eq!(map_key(&press(KeyCode::Down), m), Some(Action::ScrollRows(1)));
        assert_eq!(map_key(&press(KeyCode::Char('k')), m), Some(Action::ScrollRows(-1)));
        assert_eq!(map_key(&press(KeyCode::PageDown), m), Some(Action::Page(1)));
        assert_eq!(map_key(&press(KeyCode::Char(' ')), m), Some(Action::Page(1)));
        assert_eq!(map_key(&press(KeyCode::Char('G')), m), Some(Action::End));
        assert_eq!(map_key(&press(KeyCode::Home), m), Some(Action::Home));
        assert_eq!(map_key(&press(KeyCode::Char('/')), m), Some(Action::FocusFilter));
        assert_eq!(map_key(&press(KeyCode::Char('q')), m), Some(Action::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('x')), m), None);
    }

    #[test]
    fn filter_mode_captures_printable_keys() {
        let m = InputMode::Filter;
        assert_eq!(map_key(&press(KeyCode::Char('q')), m), Some(Action::InsertChar('q')));
        assert_eq!(map_key(&press(KeyCode::Char('j')), m), Some(Action::InsertChar('j')));
        assert_eq!(map_key(&press(KeyCode::Backspace), m), Some(Action::DeleteChar));
        assert_eq!(map_key(&press(KeyCode::Enter), m), Some(Action::Blur));
        assert_eq!(map_key(&press(KeyCode::Down), m), Some(Action::ScrollRows(1)));
        assert_eq!(map_key(&ctrl('u'), m), Some(Action::ClearFilter));
    }

    #[test]
    fn escape_and_ctrl_c_work_everywhere() {
        for m in [InputMode::Browse, InputMode::Filter] {
            assert_eq!(map_key(&press(KeyCode::Esc), m), Some(Action::ClearFilter));
            assert_eq!(map_key(&ctrl('c'), m), Some(Action::Quit));
        }
        assert_eq!(map_key(&ctrl('u'), InputMode::Browse), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Down);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(&key, InputMode::Browse), None);
    }

    #[test]
    fn wheel_scrolls() {
        let wheel = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_mouse(&wheel(MouseEventKind::ScrollDown)),
            Some(Action::ScrollRows(WHEEL_ROWS))
        );
        assert_eq!(map_mouse(&wheel(MouseEventKind::Moved)), None);
    }
}
