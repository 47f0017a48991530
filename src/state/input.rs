//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with our mouse and keyboard types.
//!
//! # API
//!
//! - `convert_mouse_event` - Convert crossterm MouseEvent to our MouseEvent
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent,
    MouseEventKind, poll, read,
};
use std::time::Duration;

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};
use super::mouse::{MouseAction, MouseButton, MouseEvent, ScrollDirection, ScrollInfo};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse event (click, scroll, move, etc.)
    Mouse(MouseEvent),
    /// Keyboard event (key press, release, etc.)
    Key(KeyboardEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert crossterm MouseEvent to our MouseEvent
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> MouseEvent {
    let (action, button) = match event.kind {
        MouseEventKind::Down(btn) => (MouseAction::Down, convert_mouse_button(btn)),
        MouseEventKind::Up(btn) => (MouseAction::Up, convert_mouse_button(btn)),
        MouseEventKind::Drag(btn) => (MouseAction::Drag, convert_mouse_button(btn)),
        MouseEventKind::Moved => (MouseAction::Move, MouseButton::None),
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => (MouseAction::Scroll, MouseButton::None),
    };

    let direction = match event.kind {
        MouseEventKind::ScrollUp => Some(ScrollDirection::Up),
        MouseEventKind::ScrollDown => Some(ScrollDirection::Down),
        MouseEventKind::ScrollLeft => Some(ScrollDirection::Left),
        MouseEventKind::ScrollRight => Some(ScrollDirection::Right),
        _ => None,
    };

    MouseEvent {
        action,
        button,
        x: event.column,
        y: event.row,
        modifiers: convert_modifiers(event.modifiers),
        scroll: direction.map(|direction| ScrollInfo { direction, delta: 1 }),
    }
}

/// Convert crossterm MouseButton to our MouseButton
fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Name of a non-character key, in the DOM `KeyboardEvent.key` style.
///
/// Keys the form has no use for (function keys, paging) map to None.
fn named_key(code: KeyCode) -> Option<&'static str> {
    Some(match code {
        KeyCode::Enter => "Enter",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Esc => "Escape",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        _ => return None,
    })
}

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let mut modifiers = convert_modifiers(event.modifiers);
    // Shift+Tab arrives as its own code on most terminals.
    if event.code == KeyCode::BackTab {
        modifiers.shift = true;
    }

    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        code => named_key(code).unwrap_or_default().to_string(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent { key, modifiers, state }
}

// =============================================================================
// MODIFIER CONVERSION
// =============================================================================

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::META) || mods.contains(KeyModifiers::SUPER),
    }
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => InputEvent::Mouse(convert_mouse_event(mouse)),
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_mouse_down() {
        let crossterm_event = CrosstermMouseEvent {
            kind: MouseEventKind::Down(CrosstermMouseButton::Left),
            column: 10,
            row: 5,
            modifiers: KeyModifiers::empty(),
        };

        let event = convert_mouse_event(crossterm_event);

        assert_eq!(event.action, MouseAction::Down);
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!(event.x, 10);
        assert_eq!(event.y, 5);
        assert!(event.is_left_click());
        assert!(event.scroll.is_none());
    }

    #[test]
    fn test_convert_mouse_scroll_directions() {
        let directions = [
            (MouseEventKind::ScrollUp, ScrollDirection::Up),
            (MouseEventKind::ScrollDown, ScrollDirection::Down),
            (MouseEventKind::ScrollLeft, ScrollDirection::Left),
            (MouseEventKind::ScrollRight, ScrollDirection::Right),
        ];

        for (kind, expected_dir) in directions {
            let event = convert_mouse_event(CrosstermMouseEvent {
                kind,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::empty(),
            });
            assert_eq!(event.action, MouseAction::Scroll);
            assert_eq!(event.scroll.map(|s| s.direction), Some(expected_dir));
        }
    }

    #[test]
    fn test_convert_key_char() {
        let event = convert_key_event(key(KeyCode::Char('a'), KeyModifiers::empty()));
        assert_eq!(event.key, "a");
        assert_eq!(event.state, KeyState::Press);
        assert!(!event.modifiers.ctrl);
    }

    #[test]
    fn test_convert_key_navigation() {
        let nav_keys = [
            (KeyCode::Home, "Home"),
            (KeyCode::End, "End"),
            (KeyCode::Delete, "Delete"),
            (KeyCode::Backspace, "Backspace"),
            (KeyCode::Tab, "Tab"),
            (KeyCode::Esc, "Escape"),
            (KeyCode::Up, "ArrowUp"),
            (KeyCode::Left, "ArrowLeft"),
        ];

        for (code, expected) in nav_keys {
            let event = convert_key_event(key(code, KeyModifiers::empty()));
            assert_eq!(event.key, expected);
        }
    }

    #[test]
    fn test_back_tab_becomes_shift_tab() {
        let event = convert_key_event(key(KeyCode::BackTab, KeyModifiers::empty()));
        assert_eq!(event.key, "Tab");
        assert!(event.modifiers.shift);
    }

    #[test]
    fn test_unused_keys_have_empty_name() {
        let event = convert_key_event(key(KeyCode::F(5), KeyModifiers::empty()));
        assert_eq!(event.key, "");
        assert_eq!(event.typed_char(), None);
    }

    #[test]
    fn test_convert_key_with_ctrl() {
        let event = convert_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(event.key, "c");
        assert!(event.modifiers.ctrl);
        assert!(!event.modifiers.alt);
    }

    #[test]
    fn test_convert_key_states() {
        let states = [
            (KeyEventKind::Press, KeyState::Press),
            (KeyEventKind::Repeat, KeyState::Repeat),
            (KeyEventKind::Release, KeyState::Release),
        ];

        for (kind, expected) in states {
            let event = convert_key_event(CrosstermKeyEvent {
                kind,
                ..key(KeyCode::Char('a'), KeyModifiers::empty())
            });
            assert_eq!(event.state, expected);
        }
    }

    #[test]
    fn test_convert_resize_and_other() {
        assert_eq!(convert_event(CrosstermEvent::Resize(80, 24)), InputEvent::Resize(80, 24));
        assert_eq!(convert_event(CrosstermEvent::FocusGained), InputEvent::None);
    }
}
