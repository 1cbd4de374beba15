// Service exports
pub mod appwrite;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use appwrite::{AppwriteCollections, AppwriteStore};
pub use cache::{CacheError, CacheKey, CacheManager};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use repository::Repository;
pub use store::{Collection, Document, DocumentStore, Filter, Query, SortKey, StoreError};

use crate::config::{StoreBackend, StoreSettings};
use std::sync::Arc;

/// Build the configured document store
pub async fn build_store(settings: &StoreSettings) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match settings.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let pg = settings.postgres.as_ref().ok_or_else(|| {
                StoreError::Configuration("store.postgres section is required".into())
            })?;

            let store = PostgresStore::from_settings(
                &pg.url,
                pg.max_connections,
                pg.min_connections,
                pg.acquire_timeout_secs,
                pg.idle_timeout_secs,
            )
            .await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Appwrite => {
            let aw = settings.appwrite.as_ref().ok_or_else(|| {
                StoreError::Configuration("store.appwrite section is required".into())
            })?;

            let store = AppwriteStore::new(
                aw.endpoint.clone(),
                aw.api_key.clone(),
                aw.project_id.clone(),
                aw.database_id.clone(),
                AppwriteCollections {
                    users: aw.users_collection.clone(),
                    workouts: aw.workouts_collection.clone(),
                    sessions: aw.sessions_collection.clone(),
                },
            )?;
            Ok(Arc::new(store))
        }
    }
}
