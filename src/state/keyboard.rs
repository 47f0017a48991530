//! Keyboard Module - Keyboard event types
//!
//! Framework-level keyboard events, independent of the terminal backend.
//! Conversion from crossterm lives in the input module; routing to the form
//! lives in the pipeline controller.
//!
//! Keys are named the way a browser names them: `"a"`, `"Enter"`,
//! `"ArrowUp"`, `"Backspace"`, `"Tab"`.

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with alt
    pub fn alt() -> Self {
        Self { alt: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
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
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
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

    /// Press or auto-repeat. Releases are ignored by the form.
    pub fn is_press(&self) -> bool {
        matches!(self.state, KeyState::Press | KeyState::Repeat)
    }

    /// The typed character, for single-character keys without ctrl/alt.
    pub fn typed_char(&self) -> Option<char> {
        if self.modifiers.ctrl || self.modifiers.alt {
            return None;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    /// True for Ctrl+`letter` (case-insensitive).
    pub fn is_ctrl(&self, letter: char) -> bool {
        self.modifiers.ctrl && self.key.eq_ignore_ascii_case(letter.encode_utf8(&mut [0; 4]))
    }
}

// =============================================================================
// TESTS
// =============================================================================
