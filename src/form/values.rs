//! The form's value record.

use serde::Serialize;

use super::experience::ExperienceList;
use super::field::{ExperienceField, FieldKey, ScalarField};

/// One entry of the repeatable work-history list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company_name: String,
    pub role: String,
    /// Collected as typed; no range or format check.
    pub years_of_experience: String,
}

impl WorkExperience {
    pub fn field(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::CompanyName => &self.company_name,
            ExperienceField::Role => &self.role,
            ExperienceField::YearsOfExperience => &self.years_of_experience,
        }
    }

    pub fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::CompanyName => &mut self.company_name,
            ExperienceField::Role => &mut self.role,
            ExperienceField::YearsOfExperience => &mut self.years_of_experience,
        }
    }
}

/// Complete in-memory record of every field of one form instance.
///
/// Serializes to the submitted payload shape:
/// `{ firstName, lastName, phoneNumber, email, dateOfBirth, workExperiences: [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub date_of_birth: String,
    pub work_experiences: ExperienceList,
}

impl FormValues {
    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::FirstName => &self.first_name,
            ScalarField::LastName => &self.last_name,
            ScalarField::PhoneNumber => &self.phone_number,
            ScalarField::Email => &self.email,
            ScalarField::DateOfBirth => &self.date_of_birth,
        }
    }

    pub fn scalar_mut(&mut self, field: ScalarField) -> &mut String {
        match field {
            ScalarField::FirstName => &mut self.first_name,
            ScalarField::LastName => &mut self.last_name,
            ScalarField::PhoneNumber => &mut self.phone_number,
            ScalarField::Email => &mut self.email,
            ScalarField::DateOfBirth => &mut self.date_of_birth,
        }
    }

    /// Current value of any field; None for a row that no longer exists.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        match key {
            FieldKey::Scalar(field) => Some(self.scalar(field)),
            FieldKey::Experience(id, field) => {
                self.work_experiences.get(id).map(|entry| entry.field(field))
            }
        }
    }

    /// Mutable slot of any field; None for a row that no longer exists.
    pub fn get_mut(&mut self, key: FieldKey) -> Option<&mut String> {
        match key {
            FieldKey::Scalar(field) => Some(self.scalar_mut(field)),
            FieldKey::Experience(id, field) => self
                .work_experiences
                .get_mut(id)
                .map(|entry| entry.field_mut(field)),
        }
    }

    /// Return every field to its default, keeping the row id counter.
    pub fn reset(&mut self) {
        for field in ScalarField::ALL {
            self.scalar_mut(field).clear();
        }
        self.work_experiences.reset();
    }

    /// The payload as pretty JSON, as handed to the logging sink.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_shape() {
        let values = FormValues::default();
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!({
                "firstName": "",
                "lastName": "",
                "phoneNumber": "",
                "email": "",
                "dateOfBirth": "",
                "workExperiences": [
                    { "companyName": "", "role": "", "yearsOfExperience": "" }
                ]
            })
        );
    }

    #[test]
    fn test_get_and_get_mut() {
        let mut values = FormValues::default();
        let id = values.work_experiences.id_at(0).unwrap();

        *values.get_mut(ScalarField::Email.into()).unwrap() = "a@b.co".into();
        *values
            .get_mut(FieldKey::Experience(id, ExperienceField::Role))
            .unwrap() = "Engineer".into();

        assert_eq!(values.get(ScalarField::Email.into()), Some("a@b.co"));
        assert_eq!(
            values.get(FieldKey::Experience(id, ExperienceField::Role)),
            Some("Engineer")
        );
    }

    #[test]
    fn test_get_missing_row() {
        let mut values = FormValues::default();
        let id = values.work_experiences.append();
        values.work_experiences.remove_id(id).unwrap();
        assert_eq!(values.get(FieldKey::Experience(id, ExperienceField::Role)), None);
    }

    #[test]
    fn test_reset() {
        let mut values = FormValues::default();
        values.first_name = "Ada".into();
        values.work_experiences.append();
        values.reset();
        assert_eq!(values, FormValues::default());
        assert_eq!(values.work_experiences.len(), 1);
    }
}
