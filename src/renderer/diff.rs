//! Differential renderer for fullscreen mode.
//!
//! Compares the current frame to the previous one and only outputs cells
//! that changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If the previous frame has the same size and the cell is unchanged: skip
//!    - Otherwise: render the cell with StatefulCellRenderer
//! 3. Place (or hide) the hardware cursor
//! 4. Flush the output buffer in one write
//! 5. Store the frame as previous for the next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

/// Differential renderer for fullscreen mode.
pub struct DiffRenderer {
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous: None,
        }
    }

    /// Render a frame to `writer`, outputting only changed cells.
    ///
    /// `cursor` is where the hardware cursor should blink, if anywhere.
    /// Returns the number of cells written.
    pub fn render<W: Write>(
        &mut self,
        buffer: &FrameBuffer,
        cursor: Option<(u16, u16)>,
        writer: &mut W,
    ) -> io::Result<usize> {
        queue!(self.output, BeginSynchronizedUpdate, Hide)?;
        self.cell_renderer.reset();

        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        let mut changed = 0;
        for (i, cell) in buffer.cells().iter().enumerate() {
            if previous.is_some_and(|prev| prev.cells()[i] == *cell) {
                continue;
            }
            let x = (i % buffer.width() as usize) as u16;
            let y = (i / buffer.width() as usize) as u16;
            self.cell_renderer.render_cell(&mut self.output, x, y, cell)?;
            changed += 1;
        }

        queue!(self.output, SetAttribute(Attribute::Reset))?;
        if let Some((x, y)) = cursor {
            queue!(self.output, MoveTo(x, y), Show)?;
        }
        queue!(self.output, EndSynchronizedUpdate)?;
        self.output.flush_to(writer)?;

        self.previous = Some(buffer.clone());
        Ok(changed)
    }

    /// Forget the previous frame; the next render is a full redraw.
    ///
    /// Use after a terminal resize or when the screen was drawn over.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Rgba};

    fn frame(text: &str) -> FrameBuffer {
        let mut buffer = FrameBuffer::new(5, 1);
        buffer.draw_text(0, 0, text, Rgba::WHITE, None, Attr::NONE, None);
        buffer
    }

    #[test]
    fn test_diff_renderer_creation() {
        let renderer = DiffRenderer::new();
        assert!(!renderer.has_previous());
    }

    #[test]
    fn test_first_frame_is_full() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();
        let changed = renderer.render(&frame("hi"), None, &mut out).unwrap();
        assert_eq!(changed, 5);
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_second_frame_only_changes() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();
        renderer.render(&frame("hi"), None, &mut out).unwrap();

        out.clear();
        let changed = renderer.render(&frame("ho"), Some((2, 0)), &mut out).unwrap();
        assert_eq!(changed, 1);
        let text = String::from_utf8_lossy(&out);
        // Only the second column is revisited; escape sequences carry 'h' too,
        // so check cursor moves rather than letters.
        assert!(text.contains("\x1b[1;2H"));
        assert!(!text.contains("\x1b[1;1H"));
        let after_move = &text[text.find("\x1b[1;2H").unwrap()..];
        assert!(after_move.contains('o'));
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();
        renderer.render(&frame("hi"), None, &mut out).unwrap();
        renderer.invalidate();
        assert!(!renderer.has_previous());
        assert_eq!(renderer.render(&frame("hi"), None, &mut out).unwrap(), 5);
    }
}
