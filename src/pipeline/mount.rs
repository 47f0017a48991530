//! Mount - application lifecycle and event loop.
//!
//! Enters the terminal, then alternates between waiting for input and
//! rendering. A frame is only rendered when an event changed something.
//!
//! ```ignore
//! use registration_tui::{AppConfig, pipeline::mount};
//!
//! mount::run(&AppConfig::default())?;
//! ```

use std::io;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::form::{FormValues, SubmissionSink, log_submission};
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::state::input::{InputEvent, poll_event, read_event};
use crate::theme::Palette;

use super::controller::{Flow, FormController};
use super::terminal::Terminal;
use super::view::draw_notice;

// =============================================================================
// Event Loop
// =============================================================================

/// Run the form until Ctrl+C.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let palette = config.resolve_theme()?.palette();
    let mut terminal = Terminal::enter(config.mouse)?;
    let mut renderer = DiffRenderer::new();
    let mut controller =
        FormController::new(config.validation_mode, config.max_width, terminal.size()?)?;

    tracing::info!(
        theme = %config.theme,
        mode = ?config.validation_mode,
        "registration form mounted"
    );

    let mut frame = controller.frame(&palette);
    renderer.render(&frame.buffer, frame.cursor, terminal.writer())?;

    loop {
        let Some(event) = poll_event(config.poll_interval)? else {
            continue;
        };
        if matches!(event, InputEvent::None) {
            continue;
        }

        let mut sink = TerminalSink::new(&mut terminal, &mut renderer, &frame.buffer, &palette);
        let flow = controller.handle_event(event, &mut sink)?;
        let pending_resize = sink.pending_resize.take();
        if let Some((width, height)) = pending_resize {
            controller.resize(width, height)?;
        }

        if flow == Flow::Quit {
            break;
        }

        frame = controller.frame(&palette);
        renderer.render(&frame.buffer, frame.cursor, terminal.writer())?;
    }

    terminal.restore()?;
    tracing::info!("registration form unmounted");
    Ok(())
}

// =============================================================================
// Notice modal
// =============================================================================

/// Logs submissions and shows the confirmation as a blocking modal.
///
/// The modal is drawn over the last rendered frame and stays up until the
/// user dismisses it.
pub struct TerminalSink<'a> {
    terminal: &'a mut Terminal,
    renderer: &'a mut DiffRenderer,
    backdrop: &'a FrameBuffer,
    palette: &'a Palette,
    /// A resize that arrived while the modal was up.
    pub pending_resize: Option<(u16, u16)>,
}

impl<'a> TerminalSink<'a> {
    pub fn new(
        terminal: &'a mut Terminal,
        renderer: &'a mut DiffRenderer,
        backdrop: &'a FrameBuffer,
        palette: &'a Palette,
    ) -> Self {
        Self {
            terminal,
            renderer,
            backdrop,
            palette,
            pending_resize: None,
        }
    }

    fn show_notice(&mut self, message: &str) -> io::Result<()> {
        let mut size = (self.backdrop.width(), self.backdrop.height());
        loop {
            let buffer = notice_frame(self.backdrop, size, self.palette, message);
            self.renderer.render(&buffer, None, self.terminal.writer())?;

            match read_event()? {
                InputEvent::Resize(width, height) => {
                    size = (width, height);
                    self.pending_resize = Some(size);
                }
                event if dismisses_notice(&event) => break,
                _ => {}
            }
        }
        // The form is redrawn in full underneath.
        self.renderer.invalidate();
        Ok(())
    }
}

impl SubmissionSink for TerminalSink<'_> {
    fn record(&mut self, values: &FormValues) {
        log_submission(values);
    }

    fn notify(&mut self, message: &str) {
        tracing::info!(target: "registration_tui::notice", "{message}");
        if let Err(err) = self.show_notice(message) {
            tracing::error!(error = %err, "failed to show notice");
        }
    }
}

/// The backdrop resized to `size` with the notice box on top.
fn notice_frame(
    backdrop: &FrameBuffer,
    size: (u16, u16),
    palette: &Palette,
    message: &str,
) -> FrameBuffer {
    let mut buffer = FrameBuffer::with_background(size.0, size.1, palette.background);
    let rows = backdrop.height().min(size.1);
    buffer.blit_rows(backdrop, 0, 0, rows);
    draw_notice(&mut buffer, palette, message);
    buffer
}

/// Enter, Space, Escape, Ctrl+C or a left click close the notice.
fn dismisses_notice(event: &InputEvent) -> bool {
    match event {
        InputEvent::Key(key) if key.is_press() => {
            matches!(key.key.as_str(), "Enter" | " " | "Escape") || key.is_ctrl('c')
        }
        InputEvent::Mouse(mouse) => mouse.is_left_click(),
        _ => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
