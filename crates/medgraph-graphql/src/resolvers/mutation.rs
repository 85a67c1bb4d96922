//! Create and delete mutation resolvers.
//!
//! Every mutation goes through the store held in the GraphQL context, which
//! is the evented store in a running server: a successful commit notifies
//! subscribers before the mutation returns. Failures surface as GraphQL
//! errors with an `extensions.code` and notify nobody.

use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use async_graphql::{ErrorExtensions, Value};
use medgraph_core::{EntityKind, NewDiseaseCategory, NewDoctor, NewPatient};
use tracing::{debug, warn};

use super::{
    get_graphql_context, id_arg, parse_id, request_id, storage_error_to_graphql, string_arg,
};
use crate::error::GraphQLError;

/// Resolvers for the Mutation root.
///
/// ```graphql
/// mutation {
///   addPatient(name: "Alice", diseaseName: "Angina", categoryId: "1") { id }
///   deletePatient(id: "1")
/// }
/// ```
pub struct MutationResolver;

impl MutationResolver {
    pub fn add_category(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let name = string_arg(&ctx, "name")?;

            let category = gql_ctx
                .store
                .create_category(NewDiseaseCategory::new(name))
                .await
                .map_err(|e| {
                    warn!(error = %e, request_id = %request_id(&ctx), "addCategory failed");
                    storage_error_to_graphql(e)
                })?;

            debug!(id = %category.id, "Category added");
            Ok(Some(FieldValue::owned_any(category)))
        })
    }

    /// Deletes a category and, by cascade, all of its patients.
    pub fn delete_category(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let raw_id = id_arg(&ctx, "id")?;
            let id = parse_id(&raw_id).ok_or_else(|| {
                GraphQLError::not_found(EntityKind::DiseaseCategory, raw_id.as_str()).extend()
            })?;

            let deletion = gql_ctx.store.delete_category(id).await.map_err(|e| {
                warn!(error = %e, request_id = %request_id(&ctx), "deleteCategory failed");
                storage_error_to_graphql(e)
            })?;

            debug!(
                id = %id,
                cascaded = deletion.patients.len(),
                "Category deleted"
            );
            Ok(Some(Value::String(format!(
                "Category {} deleted along with {} patient(s)",
                deletion.category.name,
                deletion.patients.len()
            ))))
        })
    }

    pub fn add_patient(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let name = string_arg(&ctx, "name")?;
            let disease_name = string_arg(&ctx, "diseaseName")?;
            let raw_category_id = id_arg(&ctx, "categoryId")?;
            let category_id = parse_id(&raw_category_id).ok_or_else(|| {
                GraphQLError::not_found(EntityKind::DiseaseCategory, raw_category_id.as_str())
                    .extend()
            })?;

            let patient = gql_ctx
                .store
                .create_patient(NewPatient::new(name, disease_name, category_id))
                .await
                .map_err(|e| {
                    warn!(error = %e, request_id = %request_id(&ctx), "addPatient failed");
                    storage_error_to_graphql(e)
                })?;

            debug!(id = %patient.id, category_id = %category_id, "Patient added");
            Ok(Some(FieldValue::owned_any(patient)))
        })
    }

    pub fn delete_patient(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let raw_id = id_arg(&ctx, "id")?;
            let id = parse_id(&raw_id)
                .ok_or_else(|| GraphQLError::not_found(EntityKind::Patient, raw_id.as_str()).extend())?;

            let patient = gql_ctx.store.delete_patient(id).await.map_err(|e| {
                warn!(error = %e, request_id = %request_id(&ctx), "deletePatient failed");
                storage_error_to_graphql(e)
            })?;

            debug!(id = %id, "Patient deleted");
            Ok(Some(Value::String(format!("Patient {} deleted", patient.name))))
        })
    }

    pub fn add_doctor(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let name = string_arg(&ctx, "name")?;
            let specialty = string_arg(&ctx, "specialty")?;
            let hospital = string_arg(&ctx, "hospital")?;

            let doctor = gql_ctx
                .store
                .create_doctor(NewDoctor::new(name, specialty, hospital))
                .await
                .map_err(|e| {
                    warn!(error = %e, request_id = %request_id(&ctx), "addDoctor failed");
                    storage_error_to_graphql(e)
                })?;

            debug!(id = %doctor.id, "Doctor added");
            Ok(Some(Value::String(format!("Doctor {} added", doctor.name))))
        })
    }

    pub fn delete_doctor(ctx: ResolverContext<'_>) -> FieldFuture<'_> {
        FieldFuture::new(async move {
            let gql_ctx = get_graphql_context(&ctx)?;
            let raw_id = id_arg(&ctx, "id")?;
            let id = parse_id(&raw_id)
                .ok_or_else(|| GraphQLError::not_found(EntityKind::Doctor, raw_id.as_str()).extend())?;

            let doctor = gql_ctx.store.delete_doctor(id).await.map_err(|e| {
                warn!(error = %e, request_id = %request_id(&ctx), "deleteDoctor failed");
                storage_error_to_graphql(e)
            })?;

            debug!(id = %id, "Doctor deleted");
            Ok(Some(Value::String(format!("Doctor {} deleted", doctor.name))))
        })
    }
}
