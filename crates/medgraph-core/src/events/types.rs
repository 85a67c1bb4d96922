//! Commit event types.

use time::OffsetDateTime;

use crate::entity::{DiseaseCategory, Doctor, EntityKind, Patient};
use crate::id::EntityId;

/// Operation that was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitOperation {
    /// Entity was created
    Created,
    /// Entity was deleted, either directly or by cascade
    Deleted,
}

impl CommitOperation {
    /// Returns the string representation of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitOperation::Created => "created",
            CommitOperation::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for CommitOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the entity a commit touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    DiseaseCategory(DiseaseCategory),
    Patient(Patient),
    Doctor(Doctor),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::DiseaseCategory(_) => EntityKind::DiseaseCategory,
            Entity::Patient(_) => EntityKind::Patient,
            Entity::Doctor(_) => EntityKind::Doctor,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Entity::DiseaseCategory(c) => c.id,
            Entity::Patient(p) => p.id,
            Entity::Doctor(d) => d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::DiseaseCategory(c) => &c.name,
            Entity::Patient(p) => &p.name,
            Entity::Doctor(d) => &d.name,
        }
    }
}

impl From<DiseaseCategory> for Entity {
    fn from(value: DiseaseCategory) -> Self {
        Entity::DiseaseCategory(value)
    }
}

impl From<Patient> for Entity {
    fn from(value: Patient) -> Self {
        Entity::Patient(value)
    }
}

impl From<Doctor> for Entity {
    fn from(value: Doctor) -> Self {
        Entity::Doctor(value)
    }
}

/// A single committed create or delete.
#[derive(Debug, Clone)]
pub struct CommitEvent {
    pub operation: CommitOperation,
    pub entity: Entity,
    /// Wall-clock time the commit was applied (UTC).
    pub timestamp: OffsetDateTime,
}

impl CommitEvent {
    pub fn new(operation: CommitOperation, entity: impl Into<Entity>) -> Self {
        Self {
            operation,
            entity: entity.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Create a "created" event.
    pub fn created(entity: impl Into<Entity>) -> Self {
        Self::new(CommitOperation::Created, entity)
    }

    /// Create a "deleted" event.
    pub fn deleted(entity: impl Into<Entity>) -> Self {
        Self::new(CommitOperation::Deleted, entity)
    }

    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }
}
