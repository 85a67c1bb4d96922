//! Commit events emitted by the entity store.
//!
//! The store invokes every registered [`CommitHook`] synchronously after a
//! create or delete has been applied. Hooks are registered once when the
//! store is assembled at startup and see every commit in order.
//!
//! # Example
//!
//! ```
//! use medgraph_core::events::{CommitEvent, CommitHook};
//!
//! struct Printer;
//!
//! impl CommitHook for Printer {
//!     fn name(&self) -> &str {
//!         "printer"
//!     }
//!
//!     fn on_commit(&self, event: &CommitEvent) {
//!         println!("{} {}", event.operation, event.entity.kind());
//!     }
//! }
//! ```

pub mod hooks;
pub mod types;

pub use hooks::{CommitHook, DynCommitHook};
pub use types::{CommitEvent, CommitOperation, Entity};
