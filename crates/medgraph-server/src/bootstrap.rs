//! Startup seeding of reference data.
//!
//! Disease categories listed under `[bootstrap]` are created through the
//! evented store before the listener is bound, so no client can observe
//! them being added.

use medgraph_core::NewDiseaseCategory;
use medgraph_storage::{EntityStore, StorageError};
use tracing::{debug, info};

use crate::config::BootstrapConfig;

/// Creates every configured category that does not exist yet.
///
/// Returns the number of categories created.
pub async fn seed_categories(
    store: &dyn EntityStore,
    cfg: &BootstrapConfig,
) -> Result<usize, StorageError> {
    if cfg.categories.is_empty() {
        return Ok(0);
    }

    let mut existing: Vec<String> = store
        .list_categories()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let mut created = 0;
    for name in &cfg.categories {
        if existing.iter().any(|n| n == name) {
            debug!(category = %name, "Category already present, skipping");
            continue;
        }
        let category = store
            .create_category(NewDiseaseCategory::new(name.clone()))
            .await?;
        debug!(id = %category.id, category = %category.name, "Seeded category");
        existing.push(category.name);
        created += 1;
    }

    info!(created, "Bootstrap categories seeded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medgraph_db_memory::InMemoryStore;

    #[tokio::test]
    async fn test_seeds_missing_categories_once() {
        let store = InMemoryStore::new();
        let cfg = BootstrapConfig {
            categories: vec!["Cardiology".into(), "Neurology".into(), "Cardiology".into()],
        };

        assert_eq!(seed_categories(&store, &cfg).await.unwrap(), 2);
        assert_eq!(seed_categories(&store, &cfg).await.unwrap(), 0);

        let names: Vec<String> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Cardiology", "Neurology"]);
    }

    #[tokio::test]
    async fn test_empty_config_is_noop() {
        let store = InMemoryStore::new();
        assert_eq!(
            seed_categories(&store, &BootstrapConfig::default())
                .await
                .unwrap(),
            0
        );
        assert!(store.is_empty().await);
    }
}
