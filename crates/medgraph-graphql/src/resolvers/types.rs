//! Object types for disease categories, patients and doctors.
//!
//! Resolvers hand entities to these types as `FieldValue::owned_any`; each
//! field downcasts its parent back to the entity struct.

use std::any::Any;

use async_graphql::ErrorExtensions;
use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, TypeRef};
use medgraph_core::{DiseaseCategory, Doctor, EntityKind, Patient};

use super::{get_graphql_context, storage_error_to_graphql};
use crate::error::GraphQLError;

pub const DISEASE_CATEGORY_TYPE: &str = "DiseaseCategory";
pub const PATIENT_TYPE: &str = "Patient";
pub const DOCTOR_TYPE: &str = "Doctor";

/// A field read straight off the parent entity.
fn parent_field<T: Any + Send + Sync>(
    name: &str,
    type_ref: TypeRef,
    read: fn(&T) -> Value,
) -> Field {
    Field::new(name, type_ref, move |ctx| {
        FieldFuture::new(async move {
            let parent = ctx.parent_value.try_downcast_ref::<T>()?;
            Ok(Some(read(parent)))
        })
    })
}

pub fn disease_category_type() -> Object {
    Object::new(DISEASE_CATEGORY_TYPE)
        .description("A disease category grouping patients")
        .field(parent_field::<DiseaseCategory>(
            "id",
            TypeRef::named_nn(TypeRef::ID),
            |c| Value::String(c.id.to_string()),
        ))
        .field(parent_field::<DiseaseCategory>(
            "name",
            TypeRef::named_nn(TypeRef::STRING),
            |c| Value::String(c.name.clone()),
        ))
        .field(
            Field::new("patients", TypeRef::named_nn_list_nn(PATIENT_TYPE), |ctx| {
                FieldFuture::new(async move {
                    let category = ctx.parent_value.try_downcast_ref::<DiseaseCategory>()?;
                    let gql_ctx = get_graphql_context(&ctx)?;
                    let patients = gql_ctx
                        .store
                        .patients_by_category(category.id)
                        .await
                        .map_err(storage_error_to_graphql)?;
                    Ok(Some(FieldValue::list(
                        patients.into_iter().map(FieldValue::owned_any),
                    )))
                })
            })
            .description("Patients in this category, in creation order"),
        )
}

pub fn patient_type() -> Object {
    Object::new(PATIENT_TYPE)
        .description("A patient attached to a disease category")
        .field(parent_field::<Patient>(
            "id",
            TypeRef::named_nn(TypeRef::ID),
            |p| Value::String(p.id.to_string()),
        ))
        .field(parent_field::<Patient>(
            "name",
            TypeRef::named_nn(TypeRef::STRING),
            |p| Value::String(p.name.clone()),
        ))
        .field(parent_field::<Patient>(
            "diseaseName",
            TypeRef::named_nn(TypeRef::STRING),
            |p| Value::String(p.disease_name.clone()),
        ))
        .field(Field::new(
            "category",
            TypeRef::named_nn(DISEASE_CATEGORY_TYPE),
            |ctx| {
                FieldFuture::new(async move {
                    let patient = ctx.parent_value.try_downcast_ref::<Patient>()?;
                    let gql_ctx = get_graphql_context(&ctx)?;
                    let category = gql_ctx
                        .store
                        .get_category(patient.category_id)
                        .await
                        .map_err(storage_error_to_graphql)?
                        .ok_or_else(|| {
                            GraphQLError::not_found(
                                EntityKind::DiseaseCategory,
                                patient.category_id.to_string(),
                            )
                            .extend()
                        })?;
                    Ok(Some(FieldValue::owned_any(category)))
                })
            },
        ))
}

pub fn doctor_type() -> Object {
    Object::new(DOCTOR_TYPE)
        .description("A doctor")
        .field(parent_field::<Doctor>(
            "id",
            TypeRef::named_nn(TypeRef::ID),
            |d| Value::String(d.id.to_string()),
        ))
        .field(parent_field::<Doctor>(
            "name",
            TypeRef::named_nn(TypeRef::STRING),
            |d| Value::String(d.name.clone()),
        ))
        .field(parent_field::<Doctor>(
            "specialty",
            TypeRef::named_nn(TypeRef::STRING),
            |d| Value::String(d.specialty.clone()),
        ))
        .field(parent_field::<Doctor>(
            "hospital",
            TypeRef::named_nn(TypeRef::STRING),
            |d| Value::String(d.hospital.clone()),
        ))
}
