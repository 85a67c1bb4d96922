//! Commit hook dispatch through `EventedStore` backed by the in-memory store.

use std::sync::{Arc, Mutex};

use medgraph_core::events::{CommitEvent, CommitHook, CommitOperation};
use medgraph_core::{EntityId, EntityKind, NewDiseaseCategory, NewDoctor, NewPatient};
use medgraph_db_memory::InMemoryStore;
use medgraph_storage::{EntityStore, EventedStore};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(CommitOperation, EntityKind, String)>>,
}

impl Recorder {
    fn take(&self) -> Vec<(CommitOperation, EntityKind, String)> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl CommitHook for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn on_commit(&self, event: &CommitEvent) {
        self.seen.lock().unwrap().push((
            event.operation,
            event.kind(),
            event.entity.name().to_string(),
        ));
    }
}

fn evented() -> (EventedStore<InMemoryStore>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let store = EventedStore::new(InMemoryStore::new()).with_hook(recorder.clone());
    (store, recorder)
}

#[tokio::test]
async fn successful_mutations_are_dispatched() {
    let (store, recorder) = evented();

    let category = store
        .create_category(NewDiseaseCategory::new("Cardiology"))
        .await
        .unwrap();
    let patient = store
        .create_patient(NewPatient::new("Alice", "Angina", category.id))
        .await
        .unwrap();
    let doctor = store
        .create_doctor(NewDoctor::new("Grey", "Surgery", "Seattle Grace"))
        .await
        .unwrap();
    store.delete_patient(patient.id).await.unwrap();
    store.delete_doctor(doctor.id).await.unwrap();

    assert_eq!(
        recorder.take(),
        vec![
            (
                CommitOperation::Created,
                EntityKind::DiseaseCategory,
                "Cardiology".to_string()
            ),
            (
                CommitOperation::Created,
                EntityKind::Patient,
                "Alice".to_string()
            ),
            (
                CommitOperation::Created,
                EntityKind::Doctor,
                "Grey".to_string()
            ),
            (
                CommitOperation::Deleted,
                EntityKind::Patient,
                "Alice".to_string()
            ),
            (
                CommitOperation::Deleted,
                EntityKind::Doctor,
                "Grey".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn failed_mutations_dispatch_nothing() {
    let (store, recorder) = evented();

    assert!(store
        .create_patient(NewPatient::new("Bob", "Flu", EntityId::new(42)))
        .await
        .is_err());
    assert!(store
        .create_doctor(NewDoctor::new("", "Surgery", "General"))
        .await
        .is_err());
    assert!(store.delete_patient(EntityId::new(1)).await.is_err());
    assert!(store.delete_doctor(EntityId::new(1)).await.is_err());
    assert!(store.delete_category(EntityId::new(1)).await.is_err());

    assert!(recorder.take().is_empty());
}

#[tokio::test]
async fn cascade_dispatches_patient_deletions_before_category() {
    let (store, recorder) = evented();

    let category = store
        .create_category(NewDiseaseCategory::new("Neurology"))
        .await
        .unwrap();
    for name in ["A", "B"] {
        store
            .create_patient(NewPatient::new(name, "Migraine", category.id))
            .await
            .unwrap();
    }
    recorder.take();

    let deletion = store.delete_category(category.id).await.unwrap();
    assert_eq!(deletion.patients.len(), 2);

    assert_eq!(
        recorder.take(),
        vec![
            (
                CommitOperation::Deleted,
                EntityKind::Patient,
                "A".to_string()
            ),
            (
                CommitOperation::Deleted,
                EntityKind::Patient,
                "B".to_string()
            ),
            (
                CommitOperation::Deleted,
                EntityKind::DiseaseCategory,
                "Neurology".to_string()
            ),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_commits_are_dispatched_in_commit_order() {
    let (store, recorder) = evented();
    let store = Arc::new(store);

    let mut handles = Vec::new();
    for i in 0..32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create_doctor(NewDoctor::new(format!("D{i}"), "GP", "General"))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Identifiers are allocated at commit time, so dispatch order must
    // follow identifier order.
    let dispatched: Vec<String> = recorder.take().into_iter().map(|(_, _, n)| n).collect();
    let committed: Vec<String> = store
        .list_doctors()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(dispatched.len(), 32);
    assert_eq!(dispatched, committed);
}

#[tokio::test]
async fn reads_pass_through() {
    let (store, recorder) = evented();
    let category = store
        .create_category(NewDiseaseCategory::new("Oncology"))
        .await
        .unwrap();
    recorder.take();

    assert_eq!(store.list_categories().await.unwrap(), vec![category.clone()]);
    assert_eq!(
        store.get_category(category.id).await.unwrap(),
        Some(category.clone())
    );
    assert!(store.patients_by_category(category.id).await.unwrap().is_empty());
    assert_eq!(store.backend_name(), "memory");
    assert!(recorder.take().is_empty());
}

#[derive(Default)]
struct Stamps {
    seen: Mutex<Vec<time::OffsetDateTime>>,
}

impl CommitHook for Stamps {
    fn name(&self) -> &str {
        "stamps"
    }

    fn on_commit(&self, event: &CommitEvent) {
        self.seen.lock().unwrap().push(event.timestamp);
    }
}

#[tokio::test]
async fn commit_timestamps_follow_commit_order() {
    let stamps = Arc::new(Stamps::default());
    let store = EventedStore::new(InMemoryStore::new()).with_hook(stamps.clone());

    let category = store
        .create_category(NewDiseaseCategory::new("Oncology"))
        .await
        .unwrap();
    for name in ["A", "B", "C"] {
        store
            .create_patient(NewPatient::new(name, "Lymphoma", category.id))
            .await
            .unwrap();
    }
    store.delete_category(category.id).await.unwrap();

    let seen = stamps.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 8);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
}
