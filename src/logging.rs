//! Tracing setup.
//!
//! The alternate screen owns the terminal while the form runs, so log
//! lines written to stderr would smear across the frame. When stderr is a
//! terminal, lines are held in memory and written out by [`LogGuard`]
//! after the screen has been restored. Piped stderr gets them live.
//!
//! The filter defaults to `registration_tui=info` and follows `RUST_LOG`.

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "registration_tui=info";

/// In-memory log sink shared with the fmt layer.
#[derive(Debug, Clone, Default)]
pub struct HeldLogs(Arc<Mutex<Vec<u8>>>);

impl HeldLogs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        // A panic mid-write leaves the bytes usable.
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything captured so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Drain the captured bytes into `writer`.
    pub fn drain_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let bytes = std::mem::take(&mut *self.lock());
        writer.write_all(&bytes)?;
        writer.flush()
    }
}

impl Write for HeldLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for HeldLogs {
    type Writer = HeldLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Writes held log lines to stderr when flushed or dropped.
#[derive(Debug, Default)]
pub struct LogGuard {
    held: Option<HeldLogs>,
}

impl LogGuard {
    /// Write out anything held so far.
    pub fn flush(&self) {
        if let Some(held) = &self.held {
            let _ = held.drain_to(&mut io::stderr());
        }
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Install the global subscriber. Keep the guard alive until the terminal
/// has been restored.
pub fn init_tracing() -> LogGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let held = io::stderr().is_terminal().then(HeldLogs::new);
    let result = match &held {
        Some(held) => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(held.clone())
                    .with_ansi(false),
            )
            .try_init(),
        None => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(false),
            )
            .try_init(),
    };
    if let Err(err) = result {
        eprintln!("tracing already initialized: {err}");
    }

    LogGuard { held }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_logs_capture_and_drain() {
        let mut held = HeldLogs::new();
        writeln!(held, "first line").unwrap();
        held.make_writer().write_all(b"second line\n").unwrap();

        assert_eq!(held.contents(), "first line\nsecond line\n");

        let mut out = Vec::new();
        held.drain_to(&mut out).unwrap();
        assert_eq!(out, b"first line\nsecond line\n");
        assert!(held.contents().is_empty());
    }

    #[test]
    fn test_held_logs_as_subscriber_writer() {
        let held = HeldLogs::new();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(held.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "registration_tui::submit", "Form submitted with data: {{}}");
        });

        assert!(held.contents().contains("Form submitted with data: {}"));
    }
}
