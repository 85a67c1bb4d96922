//! Query resolvers.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use tracing::{debug, trace};

use super::{get_graphql_context, id_arg, parse_id, storage_error_to_graphql};

/// Resolvers for the Query root.
///
/// ```graphql
/// query {
///   patientsByCategory(categoryId: "1") { id name diseaseName }
/// }
/// ```
pub struct QueryResolver;

impl QueryResolver {
    pub fn all_categories(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let categories = gql_ctx
                .store
                .list_categories()
                .await
                .map_err(storage_error_to_graphql)?;
            trace!(count = categories.len(), "Listed categories");
            Ok(Some(FieldValue::list(
                categories.into_iter().map(FieldValue::owned_any),
            )))
        })
    }

    pub fn all_patients(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let patients = gql_ctx
                .store
                .list_patients()
                .await
                .map_err(storage_error_to_graphql)?;
            trace!(count = patients.len(), "Listed patients");
            Ok(Some(FieldValue::list(
                patients.into_iter().map(FieldValue::owned_any),
            )))
        })
    }

    /// Patients of one category. An unknown category yields an empty list.
    pub fn patients_by_category(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let raw_id = id_arg(&ctx, "categoryId")?;

            let Some(category_id) = parse_id(&raw_id) else {
                debug!(category_id = %raw_id, "Unresolvable category id, returning no patients");
                return Ok(Some(FieldValue::list(Vec::<FieldValue<'_>>::new())));
            };

            let patients = gql_ctx
                .store
                .patients_by_category(category_id)
                .await
                .map_err(storage_error_to_graphql)?;
            trace!(category_id = %category_id, count = patients.len(), "Filtered patients");
            Ok(Some(FieldValue::list(
                patients.into_iter().map(FieldValue::owned_any),
            )))
        })
    }

    pub fn all_doctors(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let doctors = gql_ctx
                .store
                .list_doctors()
                .await
                .map_err(storage_error_to_graphql)?;
            trace!(count = doctors.len(), "Listed doctors");
            Ok(Some(FieldValue::list(
                doctors.into_iter().map(FieldValue::owned_any),
            )))
        })
    }
}
