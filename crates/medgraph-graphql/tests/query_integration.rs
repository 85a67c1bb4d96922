//! Integration tests for queries and mutations against the in-memory store.

use std::sync::Arc;

use async_graphql::dynamic::Schema;
use medgraph_core::{NewDiseaseCategory, NewDoctor, NewPatient};
use medgraph_db_memory::InMemoryStore;
use medgraph_graphql::{ChangeNotifier, MedicalSchemaBuilder, SchemaBuilderConfig};
use medgraph_storage::{DynStore, EntityStore};
use serde_json::json;

async fn seeded_schema() -> Schema {
    let store = InMemoryStore::new();
    let cardiology = store
        .create_category(NewDiseaseCategory::new("Cardiology"))
        .await
        .unwrap();
    let neurology = store
        .create_category(NewDiseaseCategory::new("Neurology"))
        .await
        .unwrap();
    store
        .create_patient(NewPatient::new("Alice", "Angina", cardiology.id))
        .await
        .unwrap();
    store
        .create_patient(NewPatient::new("Bob", "Migraine", neurology.id))
        .await
        .unwrap();
    store
        .create_patient(NewPatient::new("Carol", "Arrhythmia", cardiology.id))
        .await
        .unwrap();
    store
        .create_doctor(NewDoctor::new("Grey", "Surgery", "Seattle Grace"))
        .await
        .unwrap();

    let store: DynStore = Arc::new(store);
    MedicalSchemaBuilder::new(
        store,
        ChangeNotifier::new_shared(),
        SchemaBuilderConfig::default(),
    )
    .build()
    .unwrap()
}

async fn run(schema: &Schema, query: &str) -> serde_json::Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

#[tokio::test]
async fn test_all_categories_with_patients() {
    let schema = seeded_schema().await;
    let data = run(&schema, "{ allCategories { id name patients { name } } }").await;

    assert_eq!(
        data,
        json!({
            "allCategories": [
                {"id": "1", "name": "Cardiology", "patients": [{"name": "Alice"}, {"name": "Carol"}]},
                {"id": "2", "name": "Neurology", "patients": [{"name": "Bob"}]}
            ]
        })
    );
}

#[tokio::test]
async fn test_all_patients_resolve_their_category() {
    let schema = seeded_schema().await;
    let data = run(&schema, "{ allPatients { name diseaseName category { name } } }").await;

    assert_eq!(
        data["allPatients"][1],
        json!({"name": "Bob", "diseaseName": "Migraine", "category": {"name": "Neurology"}})
    );
    assert_eq!(data["allPatients"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_patients_by_category() {
    let schema = seeded_schema().await;

    let data = run(&schema, r#"{ patientsByCategory(categoryId: "1") { name } }"#).await;
    assert_eq!(
        data["patientsByCategory"],
        json!([{"name": "Alice"}, {"name": "Carol"}])
    );

    // Unknown and unparseable categories yield no patients
    let data = run(&schema, r#"{ patientsByCategory(categoryId: "42") { name } }"#).await;
    assert_eq!(data["patientsByCategory"], json!([]));
    let data = run(&schema, r#"{ patientsByCategory(categoryId: "cardio") { name } }"#).await;
    assert_eq!(data["patientsByCategory"], json!([]));
}

#[tokio::test]
async fn test_all_doctors() {
    let schema = seeded_schema().await;
    let data = run(&schema, "{ allDoctors { id name specialty hospital } }").await;
    assert_eq!(
        data["allDoctors"],
        json!([{"id": "1", "name": "Grey", "specialty": "Surgery", "hospital": "Seattle Grace"}])
    );
}

#[tokio::test]
async fn test_add_patient_returns_entity() {
    let schema = seeded_schema().await;
    let data = run(
        &schema,
        r#"mutation { addPatient(name: "Dan", diseaseName: "Stroke", categoryId: "2") { id name category { name } } }"#,
    )
    .await;
    assert_eq!(
        data["addPatient"],
        json!({"id": "4", "name": "Dan", "category": {"name": "Neurology"}})
    );
}

#[tokio::test]
async fn test_missing_category_error_has_code() {
    let schema = seeded_schema().await;
    let response = schema
        .execute(r#"mutation { addPatient(name: "Dan", diseaseName: "Stroke", categoryId: "9") { id } }"#)
        .await;

    assert_eq!(response.errors.len(), 1);
    let error = serde_json::to_value(&response.errors[0]).unwrap();
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");
    assert_eq!(error["message"], "DiseaseCategory with id 9 not found");
}

#[tokio::test]
async fn test_variables_are_supported() {
    let schema = seeded_schema().await;
    let request = async_graphql::Request::new(
        "query ByCategory($id: ID!) { patientsByCategory(categoryId: $id) { name } }",
    )
    .variables(async_graphql::Variables::from_json(json!({"id": "2"})));

    let response = schema.execute(request).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap()["patientsByCategory"],
        json!([{"name": "Bob"}])
    );
}
