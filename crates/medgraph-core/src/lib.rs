//! # medgraph-core
//!
//! Entity model and commit event types shared by every medgraph crate.
//!
//! - [`entity`] - disease categories, patients and doctors plus their
//!   creation payloads and text-field validation
//! - [`id`] - sequential entity identifiers
//! - [`events`] - commit events and the [`CommitHook`](events::CommitHook)
//!   trait invoked by the store after every successful create or delete

pub mod entity;
pub mod error;
pub mod events;
pub mod id;

pub use entity::{
    DiseaseCategory, Doctor, EntityKind, NewDiseaseCategory, NewDoctor, NewPatient, Patient,
};
pub use error::{CoreError, Result};
pub use id::EntityId;
