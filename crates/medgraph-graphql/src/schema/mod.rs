//! GraphQL schema construction.

mod builder;

pub use builder::{MedicalSchemaBuilder, SchemaBuilderConfig};
