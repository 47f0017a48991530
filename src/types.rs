//! Core types for registration-tui.
//!
//! These types define what the renderer understands: colors, attributes,
//! cells and rectangles. Everything above the renderer produces them.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Special values: r=-1 means "terminal default", r=-2 means ANSI palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    /// Transparent color.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an ANSI palette color (0-255).
    ///
    /// Uses special marker: r=-2, g=palette_index.
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    /// Create from 0xRRGGBB integer format.
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if this is an ANSI palette color.
    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha blend src over dst (Porter-Duff "over").
    ///
    /// Terminal default and ANSI colors are treated as opaque.
    #[inline]
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() || src.is_terminal_default() || src.is_ansi() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }

        // Special colors as dst are treated as opaque black
        let (dr, dg, db, da) = if dst.is_terminal_default() || dst.is_ansi() {
            (0i32, 0i32, 0i32, 255i32)
        } else {
            (dst.r as i32, dst.g as i32, dst.b as i32, dst.a as i32)
        };

        let sa = src.a as i32;
        let inv_sa = 255 - sa;
        let out_a = sa + (da * inv_sa) / 255;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        let channel = |s: i16, d: i32| ((s as i32 * sa) + (d * da * inv_sa / 255)) / out_a;

        Self {
            r: channel(src.r, dr).clamp(0, 255) as i16,
            g: channel(src.g, dg).clamp(0, 255) as i16,
            b: channel(src.b, db).clamp(0, 255) as i16,
            a: out_a.clamp(0, 255) as i16,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space, 0 for a wide-char continuation).
    pub char: u32,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// A screen rectangle, used both for clipping and for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    /// Create a new clip rect.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && (x as u32) < self.x as u32 + self.width as u32
            && y >= self.y
            && (y as u32) < self.y as u32 + self.height as u32
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x.saturating_add(self.width).min(other.x.saturating_add(other.width));
        let y2 = self.y.saturating_add(self.height).min(other.y.saturating_add(other.height));

        if x2 > x1 && y2 > y1 {
            Some(ClipRect {
                x: x1,
                y: y1,
                width: x2 - x1,
                height: y2 - y1,
            })
        } else {
            None
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border styles used by form inputs, the section frame and the notice box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    #[default]
    None = 0,
    /// ─ │ ┌ ┐ └ ┘
    Single = 1,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double = 2,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 3,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold = 4,
    /// - | + + + +
    Ascii = 5,
}

impl BorderStyle {
    /// Get the border characters for this style.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_special_markers() {
        assert!(Rgba::TERMINAL_DEFAULT.is_terminal_default());
        assert!(Rgba::ansi(12).is_ansi());
        assert_eq!(Rgba::ansi(12).ansi_index(), 12);
        assert!(!Rgba::WHITE.is_ansi());
    }

    #[test]
    fn test_from_rgb_int() {
        assert_eq!(Rgba::from_rgb_int(0xff8000), Rgba::rgb(255, 128, 0));
    }

    #[test]
    fn test_blend_opaque_and_transparent() {
        assert_eq!(Rgba::blend(Rgba::RED, Rgba::WHITE), Rgba::RED);
        assert_eq!(Rgba::blend(Rgba::TRANSPARENT, Rgba::WHITE), Rgba::WHITE);

        let half_red = Rgba::new(255, 0, 0, 128);
        let out = Rgba::blend(half_red, Rgba::BLACK);
        assert!(out.r > 100 && out.r < 160);
        assert_eq!(out.a, 255);
    }

    #[test]
    fn test_clip_rect_contains_and_intersect() {
        let a = ClipRect::new(0, 0, 10, 10);
        let b = ClipRect::new(5, 5, 10, 10);
        assert!(a.contains(9, 9));
        assert!(!a.contains(10, 0));
        assert_eq!(a.intersect(&b), Some(ClipRect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&ClipRect::new(20, 20, 2, 2)), None);
    }

    #[test]
    fn test_border_chars() {
        let (h, v, tl, ..) = BorderStyle::Rounded.chars();
        assert_eq!((h, v, tl), ('─', '│', '╭'));
    }
}
