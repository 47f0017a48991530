//! Field identities for the registration form.
//!
//! A field is either one of the five scalar fields or one of the three
//! fields of a work-experience row. Rows are addressed by their stable
//! [`ExperienceId`], never by position.

use std::fmt;

use super::experience::ExperienceId;

// =============================================================================
// Input kinds
// =============================================================================

/// How an input accepts characters. Mirrors the HTML input types the form
/// was designed around: free text, a date, a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    /// `YYYY-MM-DD`: digits and dashes, at most 10 characters.
    Date,
    /// Characters a browser number input lets through.
    Number,
}

impl InputKind {
    /// Maximum length in characters (None = unlimited).
    pub const fn max_length(&self) -> Option<usize> {
        match self {
            Self::Date => Some(10),
            _ => None,
        }
    }

    /// Whether `ch` may be typed into an input of this kind.
    pub fn accepts(&self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self {
            Self::Text => true,
            Self::Date => ch.is_ascii_digit() || ch == '-',
            Self::Number => ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E'),
        }
    }
}

// =============================================================================
// Scalar fields
// =============================================================================

/// The top-level fields of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarField {
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    DateOfBirth,
}

impl ScalarField {
    /// All scalar fields in display order.
    pub const ALL: [ScalarField; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::PhoneNumber,
        Self::Email,
        Self::DateOfBirth,
    ];

    /// Property name in the submitted payload.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::PhoneNumber => "phoneNumber",
            Self::Email => "email",
            Self::DateOfBirth => "dateOfBirth",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::PhoneNumber => "Phone Number",
            Self::Email => "Email",
            Self::DateOfBirth => "Date of Birth",
        }
    }

    pub const fn kind(&self) -> InputKind {
        match self {
            Self::DateOfBirth => InputKind::Date,
            _ => InputKind::Text,
        }
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Work-experience fields
// =============================================================================

/// The fields of one work-experience row, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperienceField {
    CompanyName,
    Role,
    YearsOfExperience,
}

impl ExperienceField {
    pub const ALL: [ExperienceField; 3] = [Self::CompanyName, Self::Role, Self::YearsOfExperience];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::Role => "role",
            Self::YearsOfExperience => "yearsOfExperience",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::Role => "Role/Position",
            Self::YearsOfExperience => "Years of Experience",
        }
    }

    pub const fn kind(&self) -> InputKind {
        match self {
            Self::YearsOfExperience => InputKind::Number,
            _ => InputKind::Text,
        }
    }

    /// Relative width of the column inside a row (company 3, role 3, years 4;
    /// the row's buttons take the remaining 2 of 12).
    pub const fn grow(&self) -> f32 {
        match self {
            Self::CompanyName | Self::Role => 3.0,
            Self::YearsOfExperience => 4.0,
        }
    }
}

impl fmt::Display for ExperienceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// FieldKey
// =============================================================================

/// Identifies any single input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Scalar(ScalarField),
    Experience(ExperienceId, ExperienceField),
}

impl FieldKey {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scalar(f) => f.label(),
            Self::Experience(_, f) => f.label(),
        }
    }

    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Scalar(f) => f.kind(),
            Self::Experience(_, f) => f.kind(),
        }
    }

    /// The row this field belongs to, if any.
    pub const fn experience_id(&self) -> Option<ExperienceId> {
        match self {
            Self::Scalar(_) => None,
            Self::Experience(id, _) => Some(*id),
        }
    }
}

impl From<ScalarField> for FieldKey {
    fn from(field: ScalarField) -> Self {
        Self::Scalar(field)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(field) => write!(f, "{field}"),
            Self::Experience(id, field) => write!(f, "workExperiences[{id}].{field}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
