//! Field validation rules and per-field validation state.
//!
//! Only `phoneNumber` and `email` carry rules. Each rule is "required" plus
//! a pattern; the first failing check decides the message.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::field::ScalarField;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII digits only; `\d` would admit other Unicode digits.
    Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

// =============================================================================
// ValidationError
// =============================================================================

/// A per-field error with a fixed user-facing message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Phone number is required")]
    PhoneRequired,

    #[error("Please enter a valid 10-digit phone number")]
    PhoneFormat,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    EmailFormat,
}

impl ValidationError {
    /// The field this error belongs to.
    pub const fn field(&self) -> ScalarField {
        match self {
            Self::PhoneRequired | Self::PhoneFormat => ScalarField::PhoneNumber,
            Self::EmailRequired | Self::EmailFormat => ScalarField::Email,
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

/// Phone number: required, exactly 10 digits.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::PhoneRequired);
    }
    if !PHONE_PATTERN.is_match(value) {
        return Err(ValidationError::PhoneFormat);
    }
    Ok(())
}

/// Email: required, `local@domain.tld`.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(ValidationError::EmailFormat);
    }
    Ok(())
}

/// A registered field rule.
pub type Rule = fn(&str) -> Result<(), ValidationError>;

/// The rule registered for `field`, if it has one.
pub fn rule_for(field: ScalarField) -> Option<Rule> {
    match field {
        ScalarField::PhoneNumber => Some(validate_phone as Rule),
        ScalarField::Email => Some(validate_email as Rule),
        _ => None,
    }
}

// =============================================================================
// Field state
// =============================================================================

/// Validation state of one rule-bearing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Not evaluated since the form was created or reset.
    #[default]
    Pristine,
    Valid,
    Invalid(ValidationError),
}

impl FieldStatus {
    pub fn from_result(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(e) => Self::Invalid(e),
        }
    }

    pub fn error(&self) -> Option<ValidationError> {
        match self {
            Self::Invalid(e) => Some(*e),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// When a rule-bearing field is re-evaluated while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// On every change.
    #[default]
    OnChange,
    /// Only once a submit has been attempted; every change after that.
    OnSubmit,
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Exactly ten ASCII digits always pass.
        #[test]
        fn ten_digits_pass(phone in "[0-9]{10}") {
            prop_assert_eq!(validate_phone(&phone), Ok(()));
        }

        /// Any other non-empty digit run is a format error.
        #[test]
        fn wrong_length_digits_fail(phone in "[0-9]{1,9}|[0-9]{11,20}") {
            prop_assert_eq!(validate_phone(&phone), Err(ValidationError::PhoneFormat));
        }

        /// Anything containing a non-digit is a format error.
        #[test]
        fn non_digit_phone_fails(prefix in "[0-9]{0,9}", bad in "[a-zA-Z +().-]", suffix in "[0-9]{0,9}") {
            let phone = format!("{prefix}{bad}{suffix}");
            prop_assert_eq!(validate_phone(&phone), Err(ValidationError::PhoneFormat));
        }

        /// Well-formed addresses pass.
        #[test]
        fn well_formed_emails_pass(
            local in "[a-zA-Z0-9._%+-]{1,16}",
            domain in "[a-zA-Z0-9-]{1,12}",
            tld in "[a-zA-Z]{2,6}",
        ) {
            let email = format!("{local}@{domain}.{tld}");
            prop_assert_eq!(validate_email(&email), Ok(()));
        }

        /// Without an `@` an address never passes.
        #[test]
        fn emails_without_at_fail(text in "[a-zA-Z0-9._-]{1,30}") {
            prop_assert_eq!(validate_email(&text), Err(ValidationError::EmailFormat));
        }
    }
}
