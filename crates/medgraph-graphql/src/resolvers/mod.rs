//! GraphQL resolvers for medical records.
//!
//! - `types`: object types and their field resolvers
//! - `query`: list and filter queries
//! - `mutation`: create and delete mutations

mod mutation;
mod query;
mod types;

pub use mutation::MutationResolver;
pub use query::QueryResolver;
pub use types::{
    DISEASE_CATEGORY_TYPE, DOCTOR_TYPE, PATIENT_TYPE, disease_category_type, doctor_type,
    patient_type,
};

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::ResolverContext;
use medgraph_core::EntityId;
use medgraph_storage::StorageError;

use crate::context::{GraphQLContext, RequestMeta};
use crate::error::GraphQLError;

/// Helper to extract GraphQL context from resolver context.
pub(crate) fn get_graphql_context<'a>(
    ctx: &'a ResolverContext<'_>,
) -> Result<&'a GraphQLContext, async_graphql::Error> {
    ctx.data::<GraphQLContext>()
        .map_err(|_| GraphQLError::Internal("GraphQL context not available".into()).extend())
}

/// Request ID for log correlation; `-` when the operation did not arrive
/// over HTTP.
pub(crate) fn request_id(ctx: &ResolverContext<'_>) -> String {
    ctx.data_opt::<RequestMeta>()
        .map(|meta| meta.request_id.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Reads a required string argument.
pub(crate) fn string_arg(ctx: &ResolverContext<'_>, name: &str) -> Result<String, async_graphql::Error> {
    ctx.args
        .get(name)
        .and_then(|v| v.string().ok().map(str::to_string))
        .ok_or_else(|| {
            GraphQLError::InvalidQuery(format!("Missing required argument '{name}'")).extend()
        })
}

/// Reads a required `ID` argument, accepting both string and integer input.
pub(crate) fn id_arg(ctx: &ResolverContext<'_>, name: &str) -> Result<String, async_graphql::Error> {
    let value = ctx.args.get(name).ok_or_else(|| {
        GraphQLError::InvalidQuery(format!("Missing required argument '{name}'")).extend()
    })?;
    if let Ok(s) = value.string() {
        return Ok(s.to_string());
    }
    value
        .i64()
        .map(|n| n.to_string())
        .map_err(|_| GraphQLError::InvalidQuery(format!("Argument '{name}' must be an ID")).extend())
}

/// Parses a client-supplied ID. Anything that is not a valid identifier
/// cannot resolve, so callers treat `None` as not found.
pub(crate) fn parse_id(raw: &str) -> Option<EntityId> {
    raw.parse().ok()
}

pub(crate) fn storage_error_to_graphql(error: StorageError) -> async_graphql::Error {
    GraphQLError::from(error).extend()
}
