//! # medgraph-storage
//!
//! Storage abstraction layer for the medgraph service.
//!
//! This crate defines the traits and types that all entity store backends
//! must implement. It does not contain a backend - see `medgraph-db-memory`.
//!
//! ## Overview
//!
//! The main trait is [`EntityStore`], which defines the contract for
//! creating, reading, filtering and deleting disease categories, patients
//! and doctors, including the patient → category reference and the
//! cascade on category deletion.
//!
//! [`EventedStore`] wraps any backend and invokes the registered
//! [`CommitHook`](medgraph_core::events::CommitHook)s after every
//! successful create or delete.
//!
//! ## Example
//!
//! ```ignore
//! use medgraph_storage::{EntityStore, EventedStore};
//!
//! let store = EventedStore::new(InMemoryStore::new()).with_hook(notifier.clone());
//! let category = store.create_category(NewDiseaseCategory::new("Cardiology")).await?;
//! ```

mod error;
pub mod evented;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use evented::EventedStore;
pub use traits::{CategoryDeletion, EntityStore};

/// Type alias for a shared store trait object.
pub type DynStore = std::sync::Arc<dyn EntityStore>;
