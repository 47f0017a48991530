//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. All drawing operations work on this buffer.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Clipping**: drawing functions accept an optional `ClipRect`.
//! - **Alpha blending**: translucent backgrounds blend with existing cells.
//! - **Wide characters**: CJK and emoji occupy two cells; the second holds
//!   a continuation marker (`char == 0`).

use crate::layout::text_measure::{char_width, string_width};
use crate::types::{Attr, BorderStyle, Cell, ClipRect, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Rgba::TERMINAL_DEFAULT)
    }

    /// Create a new buffer with a specific background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let cell = Cell { bg, ..Cell::default() };
        Self {
            width,
            height,
            cells: vec![cell; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    /// Get a mutable cell reference (None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Raw cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The characters of row `y` as a string, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| cell.char != 0)
            .filter_map(|cell| char::from_u32(cell.char))
            .collect()
    }

    /// Whether `needle` appears anywhere on screen, row by row.
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    #[allow(clippy::too_many_arguments)]
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        char: u32,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) || clip.is_some_and(|c| !c.contains(x, y)) {
            return false;
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.char = char;
        cell.fg = fg;
        cell.bg = Rgba::blend(bg, cell.bg);
        cell.attrs = attrs;
        true
    }

    /// Fill a rectangle with a background color, clearing its content.
    pub fn fill_rect(&mut self, rect: ClipRect, bg: Rgba, clip: Option<&ClipRect>) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        let area = match clip {
            Some(clip) => match area.intersect(clip) {
                Some(area) => area,
                None => return,
            },
            None => area,
        };

        for row in area.y..area.y + area.height {
            let start = self.index(area.x, row);
            for cell in &mut self.cells[start..start + area.width as usize] {
                cell.bg = Rgba::blend(bg, cell.bg);
                cell.char = b' ' as u32;
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Draw a single character, keeping the existing background.
    pub fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        self.set_cell(x, y, ch as u32, fg, Rgba::TRANSPARENT, attrs, clip)
    }

    /// Draw text at a position.
    ///
    /// Returns the number of cells used.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let bg = bg.unwrap_or(Rgba::TRANSPARENT);
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            let w = char_width(ch);
            if w == 0 {
                continue;
            }

            if self.set_cell(col, y, ch as u32, fg, bg, attrs, clip) && w == 2 {
                self.set_cell(col + 1, y, 0, fg, bg, attrs, clip);
            }
            col = col.saturating_add(w);
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within `width` cells starting at `x`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let offset = width.saturating_sub(string_width(text)) / 2;
        self.draw_text(x + offset, y, text, fg, bg, attrs, clip)
    }

    /// Draw a border around a rectangle.
    pub fn draw_border(
        &mut self,
        rect: ClipRect,
        style: BorderStyle,
        color: Rgba,
        clip: Option<&ClipRect>,
    ) {
        let ClipRect { x, y, width, height } = rect;
        if width < 2 || height < 2 || style == BorderStyle::None {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let x2 = x + width - 1;
        let y2 = y + height - 1;

        self.draw_char(x, y, tl, color, Attr::NONE, clip);
        self.draw_char(x2, y, tr, color, Attr::NONE, clip);
        self.draw_char(x2, y2, br, color, Attr::NONE, clip);
        self.draw_char(x, y2, bl, color, Attr::NONE, clip);

        for col in (x + 1)..x2 {
            self.draw_char(col, y, horiz, color, Attr::NONE, clip);
            self.draw_char(col, y2, horiz, color, Attr::NONE, clip);
        }
        for row in (y + 1)..y2 {
            self.draw_char(x, row, vert, color, Attr::NONE, clip);
            self.draw_char(x2, row, vert, color, Attr::NONE, clip);
        }
    }

    /// Copy `src` rows starting at `src_y` into this buffer at `dest_y`,
    /// as many rows as fit in `rows`.
    pub fn blit_rows(&mut self, src: &FrameBuffer, src_y: u16, dest_y: u16, rows: u16) {
        let width = self.width.min(src.width) as usize;
        for i in 0..rows {
            let (sy, dy) = (src_y.saturating_add(i), dest_y.saturating_add(i));
            if sy >= src.height || dy >= self.height {
                break;
            }
            let s = src.index(0, sy);
            let d = self.index(0, dy);
            self.cells[d..d + width].copy_from_slice(&src.cells[s..s + width]);
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
    fn test_new_buffer_is_blank() {
        let buf = FrameBuffer::new(4, 2);
        assert_eq!(buf.cells().len(), 8);
        assert_eq!(buf.row_text(0), "    ");
        assert!(buf.get(4, 0).is_none());
    }

    #[test]
    fn test_draw_text_and_clip() {
        let mut buf = FrameBuffer::new(10, 1);
        let clip = ClipRect::new(0, 0, 3, 1);
        let used = buf.draw_text(0, 0, "hello", Rgba::WHITE, None, Attr::NONE, Some(&clip));
        assert_eq!(used, 5);
        assert_eq!(buf.row_text(0), "hel       ");
    }

    #[test]
    fn test_wide_char_continuation() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.draw_text(0, 0, "日a", Rgba::WHITE, None, Attr::NONE, None);
        assert_eq!(buf.get(1, 0).map(|c| c.char), Some(0));
        assert_eq!(buf.row_text(0), "日a ");
    }

    #[test]
    fn test_draw_text_centered() {
        let mut buf = FrameBuffer::new(10, 1);
        buf.draw_text_centered(0, 0, 10, "ab", Rgba::WHITE, None, Attr::BOLD, None);
        assert_eq!(buf.row_text(0), "    ab    ");
        assert_eq!(buf.get(4, 0).map(|c| c.attrs), Some(Attr::BOLD));
    }

    #[test]
    fn test_draw_border() {
        let mut buf = FrameBuffer::new(4, 3);
        buf.draw_border(ClipRect::new(0, 0, 4, 3), BorderStyle::Rounded, Rgba::GRAY, None);
        assert_eq!(buf.row_text(0), "╭──╮");
        assert_eq!(buf.row_text(1), "│  │");
        assert_eq!(buf.row_text(2), "╰──╯");
    }

    #[test]
    fn test_fill_rect_sets_background() {
        let mut buf = FrameBuffer::new(4, 2);
        buf.fill_rect(ClipRect::new(1, 0, 2, 5), Rgba::RED, None);
        assert_eq!(buf.get(1, 1).map(|c| c.bg), Some(Rgba::RED));
        assert_eq!(buf.get(0, 0).map(|c| c.bg), Some(Rgba::TERMINAL_DEFAULT));
    }

    #[test]
    fn test_blit_rows() {
        let mut src = FrameBuffer::new(3, 3);
        src.draw_text(0, 2, "xyz", Rgba::WHITE, None, Attr::NONE, None);
        let mut dest = FrameBuffer::new(3, 1);
        dest.blit_rows(&src, 2, 0, 5);
        assert_eq!(dest.row_text(0), "xyz");
    }
}
