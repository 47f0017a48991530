//! Focus System - Keyboard navigation and focus state
//!
//! The focus order is derived from the form on every move, so appending or
//! removing rows never leaves a stale ring behind:
//!
//! 1. First Name, Last Name, Phone Number, Email, Date of Birth
//! 2. per work-experience row: Company Name, Role/Position, Years of
//!    Experience, Remove (skipped while disabled), Add
//! 3. Submit
//!
//! # Example
//!
//! ```
//! use registration_tui::form::{RegistrationForm, ScalarField};
//! use registration_tui::state::focus::{FocusState, FocusTarget};
//!
//! let form = RegistrationForm::new();
//! let mut focus = FocusState::new();
//!
//! focus.focus_next(&form);
//! assert_eq!(focus.focused(), FocusTarget::Field(ScalarField::LastName.into()));
//! ```

use std::fmt;

use crate::form::{ExperienceField, ExperienceId, FieldKey, RegistrationForm, ScalarField};

// =============================================================================
// TARGETS
// =============================================================================

/// Anything that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// A text input.
    Field(FieldKey),
    /// The remove button of a work-experience row.
    Remove(ExperienceId),
    /// The add button of a work-experience row.
    Add(ExperienceId),
    /// The form's submit button.
    Submit,
}

/// Which control of a row a target is, ignoring the row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowControl {
    Field(ExperienceField),
    Remove,
    Add,
}

impl FocusTarget {
    /// The row this target lives in, if any.
    pub fn experience_id(&self) -> Option<ExperienceId> {
        match self {
            Self::Field(key) => key.experience_id(),
            Self::Remove(id) | Self::Add(id) => Some(*id),
            Self::Submit => None,
        }
    }

    /// The row-relative control kind, if this target lives in a row.
    pub fn row_control(&self) -> Option<RowControl> {
        match self {
            Self::Field(FieldKey::Experience(_, field)) => Some(RowControl::Field(*field)),
            Self::Remove(_) => Some(RowControl::Remove),
            Self::Add(_) => Some(RowControl::Add),
            _ => None,
        }
    }

    /// The text input behind this target.
    pub fn field(&self) -> Option<FieldKey> {
        match self {
            Self::Field(key) => Some(*key),
            _ => None,
        }
    }

    pub fn is_button(&self) -> bool {
        !matches!(self, Self::Field(_))
    }
}

impl RowControl {
    fn in_row(self, id: ExperienceId) -> FocusTarget {
        match self {
            Self::Field(field) => FocusTarget::Field(FieldKey::Experience(id, field)),
            Self::Remove => FocusTarget::Remove(id),
            Self::Add => FocusTarget::Add(id),
        }
    }
}

impl From<FieldKey> for FocusTarget {
    fn from(key: FieldKey) -> Self {
        Self::Field(key)
    }
}

impl From<ScalarField> for FocusTarget {
    fn from(field: ScalarField) -> Self {
        Self::Field(field.into())
    }
}

impl fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(key) => write!(f, "{key}"),
            Self::Remove(id) => write!(f, "remove{id}"),
            Self::Add(id) => write!(f, "add{id}"),
            Self::Submit => f.write_str("submit"),
        }
    }
}

// =============================================================================
// FOCUSABLE QUERIES
// =============================================================================

/// All focusable targets of `form`, in tab order.
pub fn focus_order(form: &RegistrationForm) -> Vec<FocusTarget> {
    let rows = &form.values().work_experiences;
    let can_remove = form.can_remove_experience();

    let mut order: Vec<FocusTarget> = ScalarField::ALL.into_iter().map(FocusTarget::from).collect();
    for &id in rows.ids() {
        order.extend(
            ExperienceField::ALL
                .into_iter()
                .map(|field| FocusTarget::Field(FieldKey::Experience(id, field))),
        );
        if can_remove {
            order.push(FocusTarget::Remove(id));
        }
        order.push(FocusTarget::Add(id));
    }
    order.push(FocusTarget::Submit);
    order
}

/// Whether `target` is currently focusable in `form`.
pub fn is_focusable(form: &RegistrationForm, target: FocusTarget) -> bool {
    match target {
        FocusTarget::Field(FieldKey::Scalar(_)) | FocusTarget::Submit => true,
        FocusTarget::Field(FieldKey::Experience(id, _)) | FocusTarget::Add(id) => {
            form.values().work_experiences.contains(id)
        }
        FocusTarget::Remove(id) => {
            form.can_remove_experience() && form.values().work_experiences.contains(id)
        }
    }
}

// =============================================================================
// FOCUS STATE
// =============================================================================

/// The single focused target. Always something; the form has no
/// "nothing focused" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    focused: FocusTarget,
}

impl FocusState {
    /// Focus starts on the first input.
    pub fn new() -> Self {
        Self {
            focused: FocusTarget::from(ScalarField::FirstName),
        }
    }

    pub fn focused(&self) -> FocusTarget {
        self.focused
    }

    pub fn is_focused(&self, target: FocusTarget) -> bool {
        self.focused == target
    }

    /// Focus a specific target. Returns false if it is not focusable.
    pub fn focus(&mut self, form: &RegistrationForm, target: FocusTarget) -> bool {
        if !is_focusable(form, target) {
            return false;
        }
        self.set(target);
        true
    }

    /// Move focus to the next target, wrapping.
    pub fn focus_next(&mut self, form: &RegistrationForm) -> FocusTarget {
        self.step(form, 1)
    }

    /// Move focus to the previous target, wrapping.
    pub fn focus_previous(&mut self, form: &RegistrationForm) -> FocusTarget {
        self.step(form, -1)
    }

    fn step(&mut self, form: &RegistrationForm, direction: isize) -> FocusTarget {
        let order = focus_order(form);
        let len = order.len() as isize;
        let next = match order.iter().position(|t| *t == self.focused) {
            Some(pos) => order[(pos as isize + direction).rem_euclid(len) as usize],
            None if direction > 0 => order[0],
            None => order[order.len() - 1],
        };
        self.set(next);
        next
    }

    /// Re-home focus after the form's rows changed.
    ///
    /// `removed_index` is the display index of a row that was just removed
    /// (if any). A target in a vanished row moves to the same control of the
    /// row now at that index, or of the last row when the index ran off the
    /// end. A disabled remove button hands focus to its row's add button.
    pub fn repair(&mut self, form: &RegistrationForm, removed_index: Option<usize>) {
        if is_focusable(form, self.focused) {
            return;
        }

        let rows = &form.values().work_experiences;
        let next = match (self.focused.row_control(), rows.len()) {
            (Some(control), len) if len > 0 => {
                let index = removed_index.unwrap_or(0).min(len - 1);
                let target = rows.id_at(index).map(|id| control.in_row(id));
                match target {
                    Some(FocusTarget::Remove(id)) if !form.can_remove_experience() => {
                        FocusTarget::Add(id)
                    }
                    Some(target) => target,
                    None => FocusTarget::Submit,
                }
            }
            _ => FocusTarget::from(ScalarField::FirstName),
        };
        self.set(next);
    }

    fn set(&mut self, target: FocusTarget) {
        if self.focused != target {
            tracing::debug!(from = %self.focused, to = %target, "focus moved");
            self.focused = target;
        }
    }
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
