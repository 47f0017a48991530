//! Theme System
//!
//! Semantic color definitions with support for ANSI and RGB colors. ANSI
//! colors respect the user's terminal scheme; the `terminal` preset uses
//! nothing else.
//!
//! # Color Types
//!
//! - `ThemeColor::Default` - Uses terminal's default color
//! - `ThemeColor::Ansi(n)` - ANSI palette index (0-255)
//! - `ThemeColor::Rgb(rgba)` - Explicit RGB color
//!
//! # Example
//!
//! ```rust
//! use registration_tui::theme::get_preset;
//!
//! let nord = get_preset("nord").unwrap();
//! let palette = nord.palette();
//! assert!(!palette.error.is_terminal_default());
//! ```

use crate::types::Rgba;

pub mod presets;

pub use presets::{get_preset, preset_names};

// =============================================================================
// ThemeColor
// =============================================================================

/// A color that is either the terminal default, an ANSI index or RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeColor {
    #[default]
    Default,
    /// ANSI palette index (0-255).
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    Ansi(u8),
    Rgb(Rgba),
}

impl ThemeColor {
    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
        }
    }
}

/// `u8` is an ANSI index.
impl From<u8> for ThemeColor {
    fn from(index: u8) -> Self {
        Self::Ansi(index)
    }
}

/// `u32` is an RGB integer (0xRRGGBB).
impl From<u32> for ThemeColor {
    fn from(rgb: u32) -> Self {
        Self::Rgb(Rgba::from_rgb_int(rgb))
    }
}

// =============================================================================
// Theme
// =============================================================================

/// The semantic colors the form draws with.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub description: &'static str,

    /// Focused borders, buttons, title.
    pub primary: ThemeColor,
    /// Invalid field borders and helper text.
    pub error: ThemeColor,
    /// Confirmation notice.
    pub success: ThemeColor,

    pub text: ThemeColor,
    /// Labels of unfocused inputs.
    pub text_muted: ThemeColor,
    /// The remove button while disabled.
    pub text_disabled: ThemeColor,

    pub background: ThemeColor,
    /// Notice box fill.
    pub surface: ThemeColor,

    pub border: ThemeColor,
    pub border_focus: ThemeColor,
}

impl Theme {
    /// Resolve every slot to a concrete color.
    pub fn palette(&self) -> Palette {
        Palette {
            primary: self.primary.resolve(),
            error: self.error.resolve(),
            success: self.success.resolve(),
            text: self.text.resolve(),
            text_muted: self.text_muted.resolve(),
            text_disabled: self.text_disabled.resolve(),
            background: self.background.resolve(),
            surface: self.surface.resolve(),
            border: self.border.resolve(),
            border_focus: self.border_focus.resolve(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        presets::terminal()
    }
}

/// A theme with every color resolved, as the view uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgba,
    pub error: Rgba,
    pub success: Rgba,
    pub text: Rgba,
    pub text_muted: Rgba,
    pub text_disabled: Rgba,
    pub background: Rgba,
    pub surface: Rgba,
    pub border: Rgba,
    pub border_focus: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Theme::default().palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert!(ThemeColor::Default.resolve().is_terminal_default());
        assert_eq!(ThemeColor::Ansi(1).resolve(), Rgba::ansi(1));
        assert_eq!(ThemeColor::from(0xff0000u32).resolve(), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_default_is_terminal() {
        let theme = Theme::default();
        assert_eq!(theme.name, "terminal");
        assert_eq!(theme.palette().error, Rgba::ansi(1));
    }
}
