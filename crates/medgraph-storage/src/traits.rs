//! Storage traits for the entity store abstraction layer.

use async_trait::async_trait;
use medgraph_core::{
    DiseaseCategory, Doctor, EntityId, NewDiseaseCategory, NewDoctor, NewPatient, Patient,
};

use crate::error::StorageError;

/// Result of deleting a disease category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDeletion {
    /// The deleted category.
    pub category: DiseaseCategory,
    /// Patients removed by the cascade, in creation order.
    pub patients: Vec<Patient>,
}

/// The storage trait that all entity store backends must implement.
///
/// Implementations must be thread-safe (`Send + Sync`). Every mutation is
/// atomic: it either applies fully or leaves the store unchanged.
///
/// # Example
///
/// ```ignore
/// use medgraph_storage::{EntityStore, StorageError};
///
/// async fn category_name(store: &dyn EntityStore, id: EntityId) -> Result<String, StorageError> {
///     store
///         .get_category(id)
///         .await?
///         .map(|c| c.name)
///         .ok_or_else(|| StorageError::not_found(EntityKind::DiseaseCategory, id))
/// }
/// ```
#[async_trait]
pub trait EntityStore: Send + Sync {
    // ==================== Create ====================

    /// Creates a disease category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidEntity` if the name is blank or too long.
    async fn create_category(
        &self,
        category: NewDiseaseCategory,
    ) -> Result<DiseaseCategory, StorageError>;

    /// Creates a patient attached to an existing category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the category does not exist; nothing
    /// is created in that case.
    /// Returns `StorageError::InvalidEntity` if a text field is invalid.
    async fn create_patient(&self, patient: NewPatient) -> Result<Patient, StorageError>;

    /// Creates a doctor.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidEntity` if a text field is invalid.
    async fn create_doctor(&self, doctor: NewDoctor) -> Result<Doctor, StorageError>;

    // ==================== Read ====================

    /// Reads a category by ID. Returns `None` if it does not exist.
    async fn get_category(&self, id: EntityId) -> Result<Option<DiseaseCategory>, StorageError>;

    /// Reads a patient by ID. Returns `None` if it does not exist.
    async fn get_patient(&self, id: EntityId) -> Result<Option<Patient>, StorageError>;

    /// Reads a doctor by ID. Returns `None` if it does not exist.
    async fn get_doctor(&self, id: EntityId) -> Result<Option<Doctor>, StorageError>;

    /// Lists all categories in creation order.
    async fn list_categories(&self) -> Result<Vec<DiseaseCategory>, StorageError>;

    /// Lists all patients in creation order.
    async fn list_patients(&self) -> Result<Vec<Patient>, StorageError>;

    /// Lists all doctors in creation order.
    async fn list_doctors(&self) -> Result<Vec<Doctor>, StorageError>;

    /// Lists the patients referencing a category, in creation order.
    ///
    /// An unknown category yields an empty list.
    async fn patients_by_category(
        &self,
        category_id: EntityId,
    ) -> Result<Vec<Patient>, StorageError>;

    // ==================== Delete ====================

    /// Deletes a category and every patient referencing it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the category does not exist.
    async fn delete_category(&self, id: EntityId) -> Result<CategoryDeletion, StorageError>;

    /// Deletes a patient, returning the removed entity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the patient does not exist.
    async fn delete_patient(&self, id: EntityId) -> Result<Patient, StorageError>;

    /// Deletes a doctor, returning the removed entity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the doctor does not exist.
    async fn delete_doctor(&self, id: EntityId) -> Result<Doctor, StorageError>;

    // ==================== Metadata ====================

    /// Returns the name of this storage backend.
    fn backend_name(&self) -> &'static str;
}
