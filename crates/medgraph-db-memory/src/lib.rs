//! In-memory entity store backend for the medgraph service.
//!
//! This crate provides an in-memory implementation of the `EntityStore`
//! trait from `medgraph-storage`.
//!
//! # Example
//!
//! ```ignore
//! use medgraph_db_memory::InMemoryStore;
//! use medgraph_storage::EntityStore;
//!
//! let store = InMemoryStore::new();
//! let category = store.create_category(NewDiseaseCategory::new("Cardiology")).await?;
//! ```

pub mod storage;

// Re-export the EntityStore trait for convenience
pub use medgraph_storage::{EntityStore, StorageError};

pub use storage::InMemoryStore;
