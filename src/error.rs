//! Error types.
//!
//! Validation failures are not errors of this kind: they live in
//! [`crate::form::ValidationError`] and stay inside the form.

use thiserror::Error;

use crate::form::ExperienceId;

/// Structural misuse of the form API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The list must keep at least one work-experience row.
    #[error("cannot remove the only work experience entry")]
    LastExperience,

    #[error("work experience index {index} out of range (len {len})")]
    ExperienceIndexOutOfRange { index: usize, len: usize },

    #[error("no work experience entry with id {0}")]
    UnknownExperience(ExperienceId),
}

/// Errors from the terminal host.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown theme preset '{0}'")]
    UnknownTheme(String),

    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error(transparent)]
    Form(#[from] FormError),
}
