//! Output buffering and stateful cell rendering.
//!
//! - Writes are batched into one buffer and flushed once per frame
//! - Terminal state is tracked to avoid redundant escape codes
//! - Escape codes come from crossterm commands, queued into the buffer

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// OutputBuffer
// =============================================================================

/// A buffer that accumulates output for batch writing.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear the buffer without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Write everything accumulated to `writer` and flush it.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The accumulated data as a string (lossy).
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Color / attribute conversion
// =============================================================================

/// Map our color to crossterm's.
pub fn to_crossterm_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

fn queue_attrs<W: Write>(out: &mut W, attrs: Attr) -> io::Result<()> {
    const MAPPING: [(Attr, Attribute); 5] = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
    ];
    for (flag, attribute) in MAPPING {
        if attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Renders cells while tracking terminal state to minimize output.
///
/// Tracks the last cursor position, colors and attributes; a cell only
/// emits escape codes for what changed.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_pos: Option<(u16, u16)>,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_pos: None,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Reset all tracked state. Call at the start of each frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Render a single cell, emitting only changed state.
    pub fn render_cell<W: Write>(&mut self, out: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Continuation cells were already covered by the wide char before them.
        if cell.char == 0 {
            self.last_pos = Some((x, y));
            return Ok(());
        }

        let sequential = self
            .last_pos
            .is_some_and(|(lx, ly)| ly == y && lx.checked_add(1) == Some(x));
        if !sequential {
            queue!(out, MoveTo(x, y))?;
        }

        if cell.attrs != self.last_attrs {
            queue!(out, SetAttribute(Attribute::Reset))?;
            queue_attrs(out, cell.attrs)?;
            // Reset clears colors too.
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_crossterm_color(cell.fg)))?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_crossterm_color(cell.bg)))?;
            self.last_bg = Some(cell.bg);
        }

        if let Some(ch) = char::from_u32(cell.char) {
            queue!(out, Print(ch))?;
        }
        self.last_pos = Some((x, y));
        Ok(())
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
