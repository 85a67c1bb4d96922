//! Notification event types for entity subscriptions.

use medgraph_core::events::{CommitEvent, CommitOperation, Entity};

/// Kind of change a subscription listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A patient was created
    PatientAdded,
    /// A patient was deleted, directly or by category cascade
    PatientDeleted,
    /// A doctor was created
    DoctorAdded,
    /// A doctor was deleted
    DoctorDeleted,
}

impl EventKind {
    /// Every watched kind, in registry order.
    pub const ALL: [EventKind; 4] = [
        EventKind::PatientAdded,
        EventKind::PatientDeleted,
        EventKind::DoctorAdded,
        EventKind::DoctorDeleted,
    ];

    /// Returns the string representation of the event kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PatientAdded => "patient_added",
            EventKind::PatientDeleted => "patient_deleted",
            EventKind::DoctorAdded => "doctor_added",
            EventKind::DoctorDeleted => "doctor_deleted",
        }
    }

    /// Name of the GraphQL subscription field that streams this kind.
    pub fn field_name(&self) -> &'static str {
        match self {
            EventKind::PatientAdded => "newPatient",
            EventKind::PatientDeleted => "deletedPatient",
            EventKind::DoctorAdded => "newDoctor",
            EventKind::DoctorDeleted => "deletedDoctor",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            EventKind::PatientAdded => 0,
            EventKind::PatientDeleted => 1,
            EventKind::DoctorAdded => 2,
            EventKind::DoctorDeleted => 3,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rendered notification, ready to be pushed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    PatientAdded(String),
    PatientDeleted(String),
    DoctorAdded(String),
    DoctorDeleted(String),
}

impl NotificationEvent {
    pub fn patient_added(name: &str) -> Self {
        Self::PatientAdded(format!("New patient added: {name}"))
    }

    pub fn patient_deleted(name: &str) -> Self {
        Self::PatientDeleted(format!("Patient removed: {name}"))
    }

    pub fn doctor_added(name: &str) -> Self {
        Self::DoctorAdded(format!("New doctor added: {name}"))
    }

    pub fn doctor_deleted(name: &str) -> Self {
        Self::DoctorDeleted(format!("Doctor removed: {name}"))
    }

    /// Renders the notification for a commit, if its entity kind is watched.
    ///
    /// Category commits produce no notification.
    pub fn from_commit(event: &CommitEvent) -> Option<Self> {
        match (&event.entity, event.operation) {
            (Entity::Patient(p), CommitOperation::Created) => Some(Self::patient_added(&p.name)),
            (Entity::Patient(p), CommitOperation::Deleted) => Some(Self::patient_deleted(&p.name)),
            (Entity::Doctor(d), CommitOperation::Created) => Some(Self::doctor_added(&d.name)),
            (Entity::Doctor(d), CommitOperation::Deleted) => Some(Self::doctor_deleted(&d.name)),
            (Entity::DiseaseCategory(_), _) => None,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::PatientAdded(_) => EventKind::PatientAdded,
            Self::PatientDeleted(_) => EventKind::PatientDeleted,
            Self::DoctorAdded(_) => EventKind::DoctorAdded,
            Self::DoctorDeleted(_) => EventKind::DoctorDeleted,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::PatientAdded(m)
            | Self::PatientDeleted(m)
            | Self::DoctorAdded(m)
            | Self::DoctorDeleted(m) => m,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            Self::PatientAdded(m)
            | Self::PatientDeleted(m)
            | Self::DoctorAdded(m)
            | Self::DoctorDeleted(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medgraph_core::{DiseaseCategory, Doctor, EntityId, Patient};

    fn patient(name: &str) -> Patient {
        Patient {
            id: EntityId::new(1),
            name: name.to_string(),
            disease_name: "Angina".to_string(),
            category_id: EntityId::new(1),
        }
    }

    fn doctor(name: &str) -> Doctor {
        Doctor {
            id: EntityId::new(1),
            name: name.to_string(),
            specialty: "Surgery".to_string(),
            hospital: "General".to_string(),
        }
    }

    #[test]
    fn test_templates() {
        assert_eq!(
            NotificationEvent::patient_added("Alice").message(),
            "New patient added: Alice"
        );
        assert_eq!(
            NotificationEvent::patient_deleted("Alice").message(),
            "Patient removed: Alice"
        );
        assert_eq!(
            NotificationEvent::doctor_added("Grey").message(),
            "New doctor added: Grey"
        );
        assert_eq!(
            NotificationEvent::doctor_deleted("Grey").message(),
            "Doctor removed: Grey"
        );
    }

    #[test]
    fn test_from_commit() {
        let added = NotificationEvent::from_commit(&CommitEvent::created(patient("Bob")));
        assert_eq!(added, Some(NotificationEvent::patient_added("Bob")));

        let removed = NotificationEvent::from_commit(&CommitEvent::deleted(doctor("Grey")));
        assert_eq!(removed.map(|e| e.kind()), Some(EventKind::DoctorDeleted));
    }

    #[test]
    fn test_category_commits_are_not_watched() {
        let category = DiseaseCategory {
            id: EntityId::new(1),
            name: "Cardiology".to_string(),
        };
        assert!(NotificationEvent::from_commit(&CommitEvent::created(category.clone())).is_none());
        assert!(NotificationEvent::from_commit(&CommitEvent::deleted(category)).is_none());
    }

    #[test]
    fn test_kind_indices_are_distinct() {
        let mut seen: Vec<usize> = EventKind::ALL.iter().map(EventKind::index).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(EventKind::PatientDeleted.field_name(), "deletedPatient");
    }
}
