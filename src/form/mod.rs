//! The registration form: values, rows, rules and the component itself.
//!
//! - [`values`] - `FormValues` / `WorkExperience` records
//! - [`experience`] - identity-preserving row list
//! - [`field`] - field keys, labels, input kinds
//! - [`validation`] - phone and email rules, field state
//! - [`sink`] - where a successful submission goes
//! - [`registration`] - `RegistrationForm`, the component state

pub mod experience;
pub mod field;
pub mod registration;
pub mod sink;
pub mod validation;
pub mod values;

pub use experience::{ExperienceId, ExperienceList};
pub use field::{ExperienceField, FieldKey, InputKind, ScalarField};
pub use registration::{RegistrationForm, SubmitOutcome};
pub use sink::{CONFIRMATION, MemorySink, SubmissionSink, TracingSink, log_submission};
pub use validation::{
    FieldStatus, ValidationError, ValidationMode, validate_email, validate_phone,
};
pub use values::{FormValues, WorkExperience};
