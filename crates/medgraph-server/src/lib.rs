//! HTTP and WebSocket front end for the medgraph service.
//!
//! Serves the GraphQL schema from `medgraph-graphql` over `POST/GET
//! /graphql`, subscriptions over `/graphql/ws`, the GraphiQL IDE and the
//! health probes.

pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;

pub use config::AppConfig;
pub use observability::init_tracing;
pub use server::{AppState, MedgraphServer, ServerBuilder, build_app, build_router};
