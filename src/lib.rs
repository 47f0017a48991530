//! # registration-tui
//!
//! A registration form rendered in the terminal.
//!
//! The form collects a first and last name, a phone number, an email
//! address, a date of birth and a list of work experiences. Phone and
//! email are validated inline; the work-experience list grows and shrinks
//! but always keeps at least one row. A valid submit logs the record as
//! JSON, shows a confirmation and resets the form.
//!
//! ## Architecture
//!
//! State changes are explicit and rendering only reads:
//! ```text
//! input event → FormController → compute_form_layout (taffy) → view::render → DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`form`] - values, validation, submit/reset (no terminal involved)
//! - [`state`] - input events, focus order, text editing
//! - [`layout`] - flexbox layout of the form via Taffy
//! - [`renderer`] - cell buffer and diffed terminal output
//! - [`theme`] - color presets
//! - [`pipeline`] - controller, view, terminal guard, event loop
//! - [`config`], [`logging`], [`error`] - ambient setup

pub mod config;
pub mod error;
pub mod form;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, FormError};
pub use types::{Attr, BorderStyle, Cell, ClipRect, Rgba};

pub use form::{
    CONFIRMATION, ExperienceField, ExperienceId, FieldKey, FormValues, MemorySink,
    RegistrationForm, ScalarField, SubmissionSink, SubmitOutcome, TracingSink, ValidationError,
    ValidationMode, WorkExperience,
};

pub use layout::{FormLayout, compute_form_layout};
pub use pipeline::{Flow, FormController, Frame, run};
pub use renderer::{DiffRenderer, FrameBuffer};
pub use state::{FocusState, FocusTarget, InputEvent, KeyboardEvent, Modifiers};
pub use theme::{Palette, Theme, get_preset, preset_names};
