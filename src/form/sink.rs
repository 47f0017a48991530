//! Where a successful submission goes.
//!
//! The form hands the submitted record to a logging sink and then raises a
//! confirmation notice. Both are behind [`SubmissionSink`] so the terminal
//! host can show a modal while tests just collect what arrived.

use super::values::FormValues;

/// Text of the confirmation notice.
pub const CONFIRMATION: &str = "Form submitted successfully!";

/// Receives the outcome of a successful submit.
pub trait SubmissionSink {
    /// Log the submitted record.
    fn record(&mut self, values: &FormValues);

    /// Show a confirmation notice. May block until the user dismisses it.
    fn notify(&mut self, message: &str);
}

/// Logs submissions through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn record(&mut self, values: &FormValues) {
        log_submission(values);
    }

    fn notify(&mut self, message: &str) {
        tracing::info!(target: "registration_tui::notice", "{message}");
    }
}

/// Write the submitted record to the log.
pub fn log_submission(values: &FormValues) {
    match values.to_json() {
        Ok(payload) => tracing::info!(
            target: "registration_tui::submit",
            experiences = values.work_experiences.len(),
            "Form submitted with data: {payload}"
        ),
        Err(e) => tracing::error!(
            target: "registration_tui::submit",
            error = %e,
            "Form submitted but the payload could not be serialized"
        ),
    }
}

/// Keeps every submission and notice in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub records: Vec<FormValues>,
    pub notices: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_record(&self) -> Option<&FormValues> {
        self.records.last()
    }
}

impl SubmissionSink for MemorySink {
    fn record(&mut self, values: &FormValues) {
        self.records.push(values.clone());
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for &mut S {
    fn record(&mut self, values: &FormValues) {
        (**self).record(values);
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message);
    }
}

// =============================================================================
// Tests
// =============================================================================
