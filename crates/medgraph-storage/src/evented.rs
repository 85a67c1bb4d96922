//! EventedStore - a store wrapper that invokes commit hooks after mutations.
//!
//! This wrapper delegates all operations to an inner store while invoking
//! the registered [`CommitHook`]s after each successful create or delete.
//!
//! # Example
//!
//! ```ignore
//! use medgraph_storage::EventedStore;
//!
//! let store = EventedStore::new(InMemoryStore::new()).with_hook(notifier.clone());
//!
//! // After this, every hook sees a `created` commit for the doctor
//! store.create_doctor(NewDoctor::new("Grey", "Surgery", "Seattle Grace")).await?;
//! ```

use async_trait::async_trait;
use medgraph_core::events::{CommitEvent, CommitHook, DynCommitHook};
use medgraph_core::{
    DiseaseCategory, Doctor, EntityId, NewDiseaseCategory, NewDoctor, NewPatient, Patient,
};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;
use crate::traits::{CategoryDeletion, EntityStore};

/// A store wrapper that invokes commit hooks after successful mutations.
///
/// Hooks run **after** the inner mutation succeeds, so they only ever see
/// changes that were actually applied. A failed mutation invokes nothing.
///
/// Mutations and their hook dispatch are serialized through a commit gate:
/// every hook observes commits in the order they were applied. Reads
/// bypass the gate.
pub struct EventedStore<S: EntityStore> {
    /// The inner store implementation.
    inner: S,
    /// Hooks registered at assembly time.
    hooks: Vec<DynCommitHook>,
    /// Serializes mutation + dispatch.
    commit_gate: Mutex<()>,
}

impl<S: EntityStore> EventedStore<S> {
    /// Create a new evented wrapper with no hooks.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            hooks: Vec::new(),
            commit_gate: Mutex::new(()),
        }
    }

    /// Register a commit hook.
    ///
    /// Hooks are fixed once the store is shared; register them all while
    /// assembling the application.
    pub fn with_hook<H: CommitHook + 'static>(mut self, hook: H) -> Self {
        debug!(hook = %hook.name(), "Registered commit hook");
        self.hooks.push(Arc::new(hook));
        self
    }

    fn emit(&self, event: CommitEvent) {
        for hook in &self.hooks {
            hook.on_commit(&event);
        }
        debug!(
            kind = %event.kind(),
            id = %event.entity.id(),
            operation = %event.operation,
            committed_at = %event.timestamp.format(&Rfc3339).unwrap_or_default(),
            hooks = self.hooks.len(),
            "Dispatched commit event"
        );
    }
}

#[async_trait]
impl<S: EntityStore> EntityStore for EventedStore<S> {
    async fn create_category(
        &self,
        category: NewDiseaseCategory,
    ) -> Result<DiseaseCategory, StorageError> {
        let _gate = self.commit_gate.lock().await;
        let created = self.inner.create_category(category).await?;
        self.emit(CommitEvent::created(created.clone()));
        Ok(created)
    }

    async fn create_patient(&self, patient: NewPatient) -> Result<Patient, StorageError> {
        let _gate = self.commit_gate.lock().await;
        let created = self.inner.create_patient(patient).await?;
        self.emit(CommitEvent::created(created.clone()));
        Ok(created)
    }

    async fn create_doctor(&self, doctor: NewDoctor) -> Result<Doctor, StorageError> {
        let _gate = self.commit_gate.lock().await;
        let created = self.inner.create_doctor(doctor).await?;
        self.emit(CommitEvent::created(created.clone()));
        Ok(created)
    }

    async fn get_category(&self, id: EntityId) -> Result<Option<DiseaseCategory>, StorageError> {
        self.inner.get_category(id).await
    }

    async fn get_patient(&self, id: EntityId) -> Result<Option<Patient>, StorageError> {
        self.inner.get_patient(id).await
    }

    async fn get_doctor(&self, id: EntityId) -> Result<Option<Doctor>, StorageError> {
        self.inner.get_doctor(id).await
    }

    async fn list_categories(&self) -> Result<Vec<DiseaseCategory>, StorageError> {
        self.inner.list_categories().await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        self.inner.list_patients().await
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StorageError> {
        self.inner.list_doctors().await
    }

    async fn patients_by_category(
        &self,
        category_id: EntityId,
    ) -> Result<Vec<Patient>, StorageError> {
        self.inner.patients_by_category(category_id).await
    }

    async fn delete_category(&self, id: EntityId) -> Result<CategoryDeletion, StorageError> {
        let _gate = self.commit_gate.lock().await;
        let deletion = self.inner.delete_category(id).await?;

        // Cascaded rows are committed before their category
        for patient in &deletion.patients {
            self.emit(CommitEvent::deleted(patient.clone()));
        }
        self.emit(CommitEvent::deleted(deletion.category.clone()));

        Ok(deletion)
    }

    async fn delete_patient(&self, id: EntityId) -> Result<Patient, StorageError> {
        let _gate = self.commit_gate.lock().await;
        let deleted = self.inner.delete_patient(id).await?;
        self.emit(CommitEvent::deleted(deleted.clone()));
        Ok(deleted)
    }

    async fn delete_doctor(&self, id: EntityId) -> Result<Doctor, StorageError> {
        let _gate = self.commit_gate.lock().await;
        let deleted = self.inner.delete_doctor(id).await?;
        self.emit(CommitEvent::deleted(deleted.clone()));
        Ok(deleted)
    }

    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }
}

impl<S: EntityStore> std::fmt::Debug for EventedStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventedStore")
            .field("backend", &self.inner.backend_name())
            .field(
                "hooks",
                &self.hooks.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
