//! # medgraph-graphql
//!
//! GraphQL API layer for the medgraph service.
//!
//! This crate provides a GraphQL interface to disease categories, patients
//! and doctors. It supports:
//!
//! - Query operations for listing and filtering records
//! - Mutation operations for creating and deleting records
//! - Subscriptions that push a text message for every patient or doctor
//!   added or removed
//!
//! ## Endpoints
//!
//! - `POST /graphql` - GraphQL endpoint
//! - `GET /graphql` - GraphQL (query via URL param)
//! - `GET /graphql/ws` - Subscriptions over WebSocket
//! - `GET /graphiql` - GraphiQL IDE
//!
//! ## Configuration
//!
//! Add to `medgraph.toml`:
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! playground = true
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`schema`] - Schema building
//! - [`subscriptions`] - Change notifier and subscription fields
//! - [`context`] - GraphQL execution context
//! - [`handler`] - Axum HTTP handlers
//! - [`error`] - Error types for GraphQL operations

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod resolvers;
pub mod schema;
pub mod subscriptions;

// Re-export main types
pub use config::GraphQLConfig;
pub use context::{GraphQLContext, RequestMeta};
pub use error::GraphQLError;
pub use handler::{GraphQLState, graphiql, graphql_handler, graphql_handler_get, subscription_service};
pub use schema::{MedicalSchemaBuilder, SchemaBuilderConfig};
pub use subscriptions::{ChangeNotifier, EventKind, NotificationEvent, SubscriptionQueue};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;
