//! RegistrationForm - the one component.
//!
//! Owns the value record and the validation state of its rule-bearing
//! fields. Every change goes through an explicit update method; rendering
//! only ever reads.
//!
//! # Example
//!
//! ```
//! use registration_tui::form::{MemorySink, RegistrationForm, ScalarField, SubmitOutcome};
//!
//! let mut form = RegistrationForm::new();
//! form.set_value(ScalarField::PhoneNumber, "5551234567").unwrap();
//! form.set_value(ScalarField::Email, "ada@example.com").unwrap();
//!
//! let mut sink = MemorySink::new();
//! assert!(matches!(form.submit(&mut sink), SubmitOutcome::Submitted(_)));
//! assert_eq!(sink.notices, ["Form submitted successfully!"]);
//! ```

use std::collections::BTreeMap;

use super::experience::ExperienceId;
use super::field::{FieldKey, ScalarField};
use super::sink::{CONFIRMATION, SubmissionSink};
use super::validation::{FieldStatus, ValidationError, ValidationMode, rule_for};
use super::values::{FormValues, WorkExperience};
use crate::error::FormError;

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; this snapshot was logged and the form was reset.
    Submitted(FormValues),
    /// Validation failed; nothing was read, logged or reset.
    Blocked(Vec<ValidationError>),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// State of the registration form.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    values: FormValues,
    statuses: BTreeMap<ScalarField, FieldStatus>,
    mode: ValidationMode,
    submit_attempted: bool,
}

impl RegistrationForm {
    /// A fresh form with default values, validating on every change.
    pub fn new() -> Self {
        Self::with_mode(ValidationMode::default())
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        let statuses = ScalarField::ALL
            .into_iter()
            .filter(|field| rule_for(*field).is_some())
            .map(|field| (field, FieldStatus::Pristine))
            .collect();

        Self {
            values: FormValues::default(),
            statuses,
            mode,
            submit_attempted: false,
        }
    }

    // =========================================================================
    // Reading
    // =========================================================================

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Current value of a field; None if it names a removed row.
    pub fn value(&self, key: impl Into<FieldKey>) -> Option<&str> {
        self.values.get(key.into())
    }

    /// Validation state of a scalar field. Fields without a rule are
    /// always Pristine.
    pub fn status(&self, field: ScalarField) -> FieldStatus {
        self.statuses.get(&field).copied().unwrap_or_default()
    }

    /// Inline error message for a field, if it is Invalid.
    pub fn error(&self, key: FieldKey) -> Option<ValidationError> {
        match key {
            FieldKey::Scalar(field) => self.status(field).error(),
            FieldKey::Experience(..) => None,
        }
    }

    pub fn experience_count(&self) -> usize {
        self.values.work_experiences.len()
    }

    /// Whether the remove control is enabled.
    pub fn can_remove_experience(&self) -> bool {
        self.values.work_experiences.can_remove()
    }

    // =========================================================================
    // Updating
    // =========================================================================

    /// Set one field's value, then re-evaluate its rule if the mode says so.
    pub fn set_value(
        &mut self,
        key: impl Into<FieldKey>,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        match key.into() {
            FieldKey::Scalar(field) => {
                *self.values.scalar_mut(field) = value.into();
                if self.revalidates_on_change() {
                    self.validate_field(field);
                }
            }
            FieldKey::Experience(id, field) => {
                let entry = self
                    .values
                    .work_experiences
                    .get_mut(id)
                    .ok_or(FormError::UnknownExperience(id))?;
                *entry.field_mut(field) = value.into();
            }
        }
        Ok(())
    }

    fn revalidates_on_change(&self) -> bool {
        match self.mode {
            ValidationMode::OnChange => true,
            ValidationMode::OnSubmit => self.submit_attempted,
        }
    }

    /// Append one blank work-experience row.
    pub fn append_experience(&mut self) -> ExperienceId {
        let id = self.values.work_experiences.append();
        tracing::debug!(%id, len = self.experience_count(), "work experience appended");
        id
    }

    /// Remove the row at `index`. Fails when it is the only row.
    pub fn remove_experience(&mut self, index: usize) -> Result<WorkExperience, FormError> {
        let removed = self.values.work_experiences.remove(index)?;
        tracing::debug!(index, len = self.experience_count(), "work experience removed");
        Ok(removed)
    }

    /// Remove the row with `id`. Fails when it is the only row.
    pub fn remove_experience_id(&mut self, id: ExperienceId) -> Result<WorkExperience, FormError> {
        let removed = self.values.work_experiences.remove_id(id)?;
        tracing::debug!(%id, len = self.experience_count(), "work experience removed");
        Ok(removed)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn validate_field(&mut self, field: ScalarField) -> Option<ValidationError> {
        let rule = rule_for(field)?;
        let status = FieldStatus::from_result(rule(self.values.scalar(field)));
        self.statuses.insert(field, status);
        status.error()
    }

    /// Run every registered rule and store the results.
    ///
    /// Returns the failures in field order.
    pub fn validate(&mut self) -> Vec<ValidationError> {
        ScalarField::ALL
            .into_iter()
            .filter_map(|field| self.validate_field(field))
            .collect()
    }

    // =========================================================================
    // Submit / reset
    // =========================================================================

    /// Validate, and on success log the snapshot, notify, then reset.
    pub fn submit<S: SubmissionSink>(&mut self, mut sink: S) -> SubmitOutcome {
        self.submit_attempted = true;

        let errors = self.validate();
        if !errors.is_empty() {
            let fields: Vec<&str> = errors.iter().map(|e| e.field().name()).collect();
            tracing::warn!(
                target: "registration_tui::submit",
                fields = ?fields,
                "submission blocked by validation"
            );
            return SubmitOutcome::Blocked(errors);
        }

        let snapshot = self.values.clone();
        sink.record(&snapshot);
        sink.notify(CONFIRMATION);
        self.reset();
        SubmitOutcome::Submitted(snapshot)
    }

    /// Back to defaults: blank values, one blank row, every field Pristine.
    pub fn reset(&mut self) {
        self.values.reset();
        for status in self.statuses.values_mut() {
            *status = FieldStatus::Pristine;
        }
        self.submit_attempted = false;
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
