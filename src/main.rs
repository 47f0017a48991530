//! Registration form in the terminal.
//!
//! Tab / Shift+Tab move between inputs, Enter submits, Ctrl+C quits.

use anyhow::{Context, Result};
use registration_tui::{AppConfig, logging, pipeline};

fn main() -> Result<()> {
    let logs = logging::init_tracing();

    let result = pipeline::run(&AppConfig::default());
    if let Err(err) = &result {
        tracing::error!(error = %err, "registration form exited with an error");
    }

    // The terminal is restored by now; print what was held.
    logs.flush();
    result.context("registration form failed")
}
