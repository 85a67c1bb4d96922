//! Medical records GraphQL schema builder.
//!
//! This module provides `MedicalSchemaBuilder`, which assembles the schema
//! with async-graphql's dynamic schema API.

use std::sync::Arc;

use async_graphql::dynamic::{
    Field, InputValue, Object, Schema, SchemaBuilder, TypeRef,
};
use medgraph_storage::DynStore;
use tracing::debug;

use crate::context::GraphQLContext;
use crate::error::GraphQLError;
use crate::resolvers::{
    DISEASE_CATEGORY_TYPE, DOCTOR_TYPE, MutationResolver, PATIENT_TYPE, QueryResolver,
    disease_category_type, doctor_type, patient_type,
};
use crate::subscriptions::{ChangeNotifier, build_subscription_type};

/// Configuration for the schema builder.
#[derive(Debug, Clone)]
pub struct SchemaBuilderConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// Builds the medical records GraphQL schema.
///
/// The schema contains:
/// - `DiseaseCategory`, `Patient` and `Doctor` object types
/// - Query root with list and filter operations
/// - Mutation root with create and delete operations
/// - Subscription root streaming add/delete notifications
///
/// The store and notifier are attached as schema data, so resolvers reach
/// them for HTTP and WebSocket operations alike.
///
/// # Example
///
/// ```ignore
/// let notifier = ChangeNotifier::new_shared();
/// let store: DynStore = Arc::new(
///     EventedStore::new(InMemoryStore::new()).with_hook(notifier.clone()),
/// );
///
/// let schema = MedicalSchemaBuilder::new(store, notifier, SchemaBuilderConfig::default())
///     .build()?;
/// ```
pub struct MedicalSchemaBuilder {
    store: DynStore,
    notifier: Arc<ChangeNotifier>,
    config: SchemaBuilderConfig,
}

impl MedicalSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(
        store: DynStore,
        notifier: Arc<ChangeNotifier>,
        config: SchemaBuilderConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Builds the GraphQL schema.
    ///
    /// # Errors
    ///
    /// Returns an error if schema construction fails.
    pub fn build(self) -> Result<Schema, GraphQLError> {
        debug!(backend = self.store.backend_name(), "Starting GraphQL schema build");

        let mut schema_builder: SchemaBuilder =
            Schema::build("Query", Some("Mutation"), Some("Subscription"));

        // Object types
        schema_builder = schema_builder
            .register(disease_category_type())
            .register(patient_type())
            .register(doctor_type());

        // Root types
        schema_builder = schema_builder
            .register(build_query_type())
            .register(build_mutation_type())
            .register(build_subscription_type(self.notifier.clone()));

        // Configure limits
        schema_builder = schema_builder
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);

        // Enable/disable introspection
        if !self.config.introspection_enabled {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .data(GraphQLContext::new(self.store, self.notifier))
            .finish()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))?;

        debug!("GraphQL schema build complete");
        Ok(schema)
    }
}

/// Builds the Query root type.
fn build_query_type() -> Object {
    Object::new("Query")
        .description("Medical records Query root")
        .field(
            Field::new(
                "allCategories",
                TypeRef::named_nn_list_nn(DISEASE_CATEGORY_TYPE),
                QueryResolver::all_categories,
            )
            .description("All disease categories, in creation order"),
        )
        .field(
            Field::new(
                "allPatients",
                TypeRef::named_nn_list_nn(PATIENT_TYPE),
                QueryResolver::all_patients,
            )
            .description("All patients, in creation order"),
        )
        .field(
            Field::new(
                "patientsByCategory",
                TypeRef::named_nn_list_nn(PATIENT_TYPE),
                QueryResolver::patients_by_category,
            )
            .description("Patients belonging to one disease category")
            .argument(InputValue::new("categoryId", TypeRef::named_nn(TypeRef::ID))),
        )
        .field(
            Field::new(
                "allDoctors",
                TypeRef::named_nn_list_nn(DOCTOR_TYPE),
                QueryResolver::all_doctors,
            )
            .description("All doctors, in creation order"),
        )
}

/// Builds the Mutation root type.
fn build_mutation_type() -> Object {
    let string_nn = || TypeRef::named_nn(TypeRef::STRING);
    let id_nn = || TypeRef::named_nn(TypeRef::ID);

    Object::new("Mutation")
        .description("Medical records Mutation root")
        .field(
            Field::new(
                "addCategory",
                TypeRef::named_nn(DISEASE_CATEGORY_TYPE),
                MutationResolver::add_category,
            )
            .argument(InputValue::new("name", string_nn())),
        )
        .field(
            Field::new("deleteCategory", string_nn(), MutationResolver::delete_category)
                .description("Delete a category together with all of its patients")
                .argument(InputValue::new("id", id_nn())),
        )
        .field(
            Field::new(
                "addPatient",
                TypeRef::named_nn(PATIENT_TYPE),
                MutationResolver::add_patient,
            )
            .argument(InputValue::new("name", string_nn()))
            .argument(InputValue::new("diseaseName", string_nn()))
            .argument(InputValue::new("categoryId", id_nn())),
        )
        .field(
            Field::new("deletePatient", string_nn(), MutationResolver::delete_patient)
                .argument(InputValue::new("id", id_nn())),
        )
        .field(
            Field::new("addDoctor", string_nn(), MutationResolver::add_doctor)
                .argument(InputValue::new("name", string_nn()))
                .argument(InputValue::new("specialty", string_nn()))
                .argument(InputValue::new("hospital", string_nn())),
        )
        .field(
            Field::new("deleteDoctor", string_nn(), MutationResolver::delete_doctor)
                .argument(InputValue::new("id", id_nn())),
        )
}
