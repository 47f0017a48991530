//! Mouse Module - Mouse event types
//!
//! The form only cares about left clicks (focus an input, press a button)
//! and the wheel (scroll the form).

use super::keyboard::Modifiers;

/// Mouse action type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Move,
    Drag,
    Scroll,
}

/// Mouse button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Scroll direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Scroll info attached to scroll events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollInfo {
    pub direction: ScrollDirection,
    pub delta: u16,
}

/// Mouse event
#[derive(Clone, Debug, PartialEq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
    pub scroll: Option<ScrollInfo>,
}

impl MouseEvent {
    /// Create a button-down event.
    pub fn down(button: MouseButton, x: u16, y: u16) -> Self {
        Self {
            action: MouseAction::Down,
            button,
            x,
            y,
            modifiers: Modifiers::default(),
            scroll: None,
        }
    }

    /// Create a scroll event.
    pub fn scroll(direction: ScrollDirection, x: u16, y: u16) -> Self {
        Self {
            action: MouseAction::Scroll,
            button: MouseButton::None,
            x,
            y,
            modifiers: Modifiers::default(),
            scroll: Some(ScrollInfo { direction, delta: 1 }),
        }
    }

    /// True for a left-button press.
    pub fn is_left_click(&self) -> bool {
        self.action == MouseAction::Down && self.button == MouseButton::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_click() {
        assert!(MouseEvent::down(MouseButton::Left, 1, 2).is_left_click());
        assert!(!MouseEvent::down(MouseButton::Right, 1, 2).is_left_click());
        assert!(!MouseEvent::scroll(ScrollDirection::Down, 0, 0).is_left_click());
    }
}
