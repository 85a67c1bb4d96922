use async_trait::async_trait;
use indexmap::IndexMap;
use medgraph_core::{
    DiseaseCategory, Doctor, EntityId, EntityKind, NewDiseaseCategory, NewDoctor, NewPatient,
    Patient,
};
use medgraph_storage::{CategoryDeletion, EntityStore, StorageError};
use tokio::sync::RwLock;
use tracing::trace;

/// One table per entity kind plus its identifier sequence.
#[derive(Debug)]
struct Table<T> {
    rows: IndexMap<EntityId, T>,
    next_id: u64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Inserts a row built from a freshly allocated identifier.
    fn insert_with(&mut self, build: impl FnOnce(EntityId) -> T) -> T {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: EntityId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn remove(&mut self, id: EntityId) -> Option<T> {
        // shift_remove keeps the remaining rows in creation order
        self.rows.shift_remove(&id)
    }
}

#[derive(Debug)]
struct Tables {
    categories: Table<DiseaseCategory>,
    patients: Table<Patient>,
    doctors: Table<Doctor>,
}

/// In-memory entity store.
///
/// All tables live behind a single lock, so reference checks and cascades
/// are atomic with the mutation they guard. Rows are listed in creation
/// order and identifiers are never reused.
#[derive(Debug)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                categories: Table::new(),
                patients: Table::new(),
                doctors: Table::new(),
            }),
        }
    }

    /// Total number of stored rows across all tables.
    pub async fn len(&self) -> usize {
        let tables = self.tables.read().await;
        tables.categories.rows.len() + tables.patients.rows.len() + tables.doctors.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn create_category(
        &self,
        category: NewDiseaseCategory,
    ) -> Result<DiseaseCategory, StorageError> {
        category.validate()?;
        let mut tables = self.tables.write().await;
        let created = tables
            .categories
            .insert_with(|id| category.into_entity(id));
        trace!(id = %created.id, "Inserted category");
        Ok(created)
    }

    async fn create_patient(&self, patient: NewPatient) -> Result<Patient, StorageError> {
        patient.validate()?;
        let mut tables = self.tables.write().await;
        if !tables.categories.rows.contains_key(&patient.category_id) {
            return Err(StorageError::not_found(
                EntityKind::DiseaseCategory,
                patient.category_id,
            ));
        }
        let created = tables.patients.insert_with(|id| patient.into_entity(id));
        trace!(id = %created.id, category_id = %created.category_id, "Inserted patient");
        Ok(created)
    }

    async fn create_doctor(&self, doctor: NewDoctor) -> Result<Doctor, StorageError> {
        doctor.validate()?;
        let mut tables = self.tables.write().await;
        let created = tables.doctors.insert_with(|id| doctor.into_entity(id));
        trace!(id = %created.id, "Inserted doctor");
        Ok(created)
    }

    async fn get_category(&self, id: EntityId) -> Result<Option<DiseaseCategory>, StorageError> {
        Ok(self.tables.read().await.categories.get(id))
    }

    async fn get_patient(&self, id: EntityId) -> Result<Option<Patient>, StorageError> {
        Ok(self.tables.read().await.patients.get(id))
    }

    async fn get_doctor(&self, id: EntityId) -> Result<Option<Doctor>, StorageError> {
        Ok(self.tables.read().await.doctors.get(id))
    }

    async fn list_categories(&self) -> Result<Vec<DiseaseCategory>, StorageError> {
        Ok(self.tables.read().await.categories.all())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        Ok(self.tables.read().await.patients.all())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StorageError> {
        Ok(self.tables.read().await.doctors.all())
    }

    async fn patients_by_category(
        &self,
        category_id: EntityId,
    ) -> Result<Vec<Patient>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .patients
            .rows
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn delete_category(&self, id: EntityId) -> Result<CategoryDeletion, StorageError> {
        let mut tables = self.tables.write().await;
        let category = tables
            .categories
            .remove(id)
            .ok_or_else(|| StorageError::not_found(EntityKind::DiseaseCategory, id))?;

        let cascaded: Vec<EntityId> = tables
            .patients
            .rows
            .values()
            .filter(|p| p.category_id == id)
            .map(|p| p.id)
            .collect();
        let patients: Vec<Patient> = cascaded
            .into_iter()
            .filter_map(|pid| tables.patients.remove(pid))
            .collect();

        trace!(id = %id, cascaded = patients.len(), "Removed category");
        Ok(CategoryDeletion { category, patients })
    }

    async fn delete_patient(&self, id: EntityId) -> Result<Patient, StorageError> {
        let mut tables = self.tables.write().await;
        tables
            .patients
            .remove(id)
            .ok_or_else(|| StorageError::not_found(EntityKind::Patient, id))
    }

    async fn delete_doctor(&self, id: EntityId) -> Result<Doctor, StorageError> {
        let mut tables = self.tables.write().await;
        tables
            .doctors
            .remove(id)
            .ok_or_else(|| StorageError::not_found(EntityKind::Doctor, id))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
