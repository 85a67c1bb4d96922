//! Stored entities and their creation payloads.
//!
//! Text limits mirror the relational schema the service was modelled on:
//! names, specialties and hospitals are bounded at [`MAX_NAME_LEN`]
//! characters, disease names are unbounded free text.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::id::EntityId;

/// Maximum length of bounded text fields.
pub const MAX_NAME_LEN: usize = 100;

/// Kind of stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    DiseaseCategory,
    Patient,
    Doctor,
}

impl EntityKind {
    /// Returns the display name used in errors and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::DiseaseCategory => "DiseaseCategory",
            EntityKind::Patient => "Patient",
            EntityKind::Doctor => "Doctor",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A disease category grouping patients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseCategory {
    pub id: EntityId,
    pub name: String,
}

/// A patient, always attached to an existing disease category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: EntityId,
    pub name: String,
    pub disease_name: String,
    pub category_id: EntityId,
}

/// A doctor. Doctors have no relations to other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: EntityId,
    pub name: String,
    pub specialty: String,
    pub hospital: String,
}

/// Payload for creating a disease category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiseaseCategory {
    pub name: String,
}

impl NewDiseaseCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<()> {
        bounded_text("name", &self.name)
    }

    pub fn into_entity(self, id: EntityId) -> DiseaseCategory {
        DiseaseCategory {
            id,
            name: self.name,
        }
    }
}

/// Payload for creating a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub disease_name: String,
    pub category_id: EntityId,
}

impl NewPatient {
    pub fn new(
        name: impl Into<String>,
        disease_name: impl Into<String>,
        category_id: EntityId,
    ) -> Self {
        Self {
            name: name.into(),
            disease_name: disease_name.into(),
            category_id,
        }
    }

    pub fn validate(&self) -> Result<()> {
        bounded_text("name", &self.name)?;
        required_text("diseaseName", &self.disease_name)
    }

    pub fn into_entity(self, id: EntityId) -> Patient {
        Patient {
            id,
            name: self.name,
            disease_name: self.disease_name,
            category_id: self.category_id,
        }
    }
}

/// Payload for creating a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub hospital: String,
}

impl NewDoctor {
    pub fn new(
        name: impl Into<String>,
        specialty: impl Into<String>,
        hospital: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
            hospital: hospital.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        bounded_text("name", &self.name)?;
        bounded_text("specialty", &self.specialty)?;
        bounded_text("hospital", &self.hospital)
    }

    pub fn into_entity(self, id: EntityId) -> Doctor {
        Doctor {
            id,
            name: self.name,
            specialty: self.specialty,
            hospital: self.hospital,
        }
    }
}

fn required_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::EmptyField { field });
    }
    Ok(())
}

fn bounded_text(field: &'static str, value: &str) -> Result<()> {
    required_text(field, value)?;
    let actual = value.chars().count();
    if actual > MAX_NAME_LEN {
        return Err(CoreError::FieldTooLong {
            field,
            max: MAX_NAME_LEN,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_validation() {
        let ok = NewPatient::new("Alice", "Asthma", EntityId::new(1));
        assert!(ok.validate().is_ok());

        let blank = NewPatient::new("   ", "Asthma", EntityId::new(1));
        assert_eq!(
            blank.validate(),
            Err(CoreError::EmptyField { field: "name" })
        );

        let no_disease = NewPatient::new("Alice", "", EntityId::new(1));
        assert_eq!(
            no_disease.validate(),
            Err(CoreError::EmptyField {
                field: "diseaseName"
            })
        );
    }

    #[test]
    fn test_disease_name_is_unbounded() {
        let long = "x".repeat(MAX_NAME_LEN * 5);
        let patient = NewPatient::new("Bob", long, EntityId::new(1));
        assert!(patient.validate().is_ok());
    }

    #[test]
    fn test_new_doctor_validation() {
        assert!(NewDoctor::new("House", "Diagnostics", "PPTH").validate().is_ok());

        let too_long = NewDoctor::new("House", "Diagnostics", "h".repeat(MAX_NAME_LEN + 1));
        assert_eq!(
            too_long.validate(),
            Err(CoreError::FieldTooLong {
                field: "hospital",
                max: MAX_NAME_LEN,
                actual: MAX_NAME_LEN + 1
            })
        );
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(NewDiseaseCategory::new(name).validate().is_ok());
    }

    #[test]
    fn test_into_entity() {
        let category = NewDiseaseCategory::new("Cardiology").into_entity(EntityId::new(3));
        assert_eq!(category.id.get(), 3);
        assert_eq!(category.name, "Cardiology");

        let patient =
            NewPatient::new("Alice", "Arrhythmia", category.id).into_entity(EntityId::new(9));
        assert_eq!(patient.category_id, category.id);
        assert_eq!(patient.disease_name, "Arrhythmia");
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::DiseaseCategory.to_string(), "DiseaseCategory");
        assert_eq!(EntityKind::Patient.to_string(), "Patient");
        assert_eq!(EntityKind::Doctor.to_string(), "Doctor");
    }
}
