//! Theme presets.
//!
//! - terminal (default - ANSI colors only)
//! - dracula
//! - nord

use super::{Theme, ThemeColor};
use crate::types::Rgba;

const fn hex(rgb: u32) -> ThemeColor {
    ThemeColor::Rgb(Rgba::from_rgb_int(rgb))
}

/// Terminal theme - uses ANSI colors to respect the user's terminal theme.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal",
        description: "Uses terminal default colors",
        primary: ThemeColor::Ansi(12), // bright blue
        error: ThemeColor::Ansi(1),    // red
        success: ThemeColor::Ansi(2),  // green
        text: ThemeColor::Default,
        text_muted: ThemeColor::Ansi(8),
        text_disabled: ThemeColor::Ansi(8),
        background: ThemeColor::Default,
        surface: ThemeColor::Default,
        border: ThemeColor::Ansi(7),
        border_focus: ThemeColor::Ansi(12),
    }
}

/// Dracula - dark theme with vivid colors.
pub fn dracula() -> Theme {
    Theme {
        name: "dracula",
        description: "Dracula dark theme",
        primary: hex(0xbd93f9),
        error: hex(0xff5555),
        success: hex(0x50fa7b),
        text: hex(0xf8f8f2),
        text_muted: hex(0x6272a4),
        text_disabled: hex(0x44475a),
        background: hex(0x282a36),
        surface: hex(0x44475a),
        border: hex(0x6272a4),
        border_focus: hex(0xbd93f9),
    }
}

/// Nord - arctic, bluish colors.
pub fn nord() -> Theme {
    Theme {
        name: "nord",
        description: "Nord arctic theme",
        primary: hex(0x88c0d0),
        error: hex(0xbf616a),
        success: hex(0xa3be8c),
        text: hex(0xd8dee9),
        text_muted: hex(0x4c566a),
        text_disabled: hex(0x3b4252),
        background: hex(0x2e3440),
        surface: hex(0x434c5e),
        border: hex(0x4c566a),
        border_focus: hex(0x88c0d0),
    }
}

/// Names of all presets.
pub fn preset_names() -> &'static [&'static str] {
    &["terminal", "dracula", "nord"]
}

/// Look up a preset by name.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "terminal" => Some(terminal()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        _ => None,
    }
}
