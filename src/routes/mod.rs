// Route exports
pub mod auth;
pub mod discover;
pub mod health;
pub mod sessions;
pub mod workouts;

use actix_web::web;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::User;
use crate::services::{CacheKey, CacheManager, MemoryStore, Repository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Repository,
    pub cache: Arc<CacheManager>,
}

impl AppState {
    pub fn new(repository: Repository, cache: Arc<CacheManager>) -> Self {
        Self { repository, cache }
    }

    /// State backed by the in-memory store and an L1-only cache
    pub fn in_memory() -> Self {
        Self {
            repository: Repository::new(Arc::new(MemoryStore::new())),
            cache: Arc::new(CacheManager::in_memory(1000, 300)),
        }
    }

    /// Fetch a user through the profile cache
    ///
    /// Cache failures are logged and fall through to the store.
    pub async fn load_user(&self, id: &str) -> Result<Option<User>, ApiError> {
        let key = CacheKey::user(id);
        if let Ok(user) = self.cache.get::<User>(&key).await {
            return Ok(Some(user));
        }

        let user = self.repository.get_user(id).await?;
        if let Some(user) = &user {
            if let Err(e) = self.cache.set(&key, user).await {
                tracing::warn!("Failed to cache user {}: {}", id, e);
            }
        }
        Ok(user)
    }

    pub async fn invalidate_user(&self, id: &str) {
        if let Err(e) = self.cache.delete(&CacheKey::user(id)).await {
            tracing::warn!("Failed to invalidate cached user {}: {}", id, e);
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::configure)
            .service(web::scope("/auth").configure(auth::configure))
            .service(web::scope("/discover").configure(discover::configure))
            .service(web::scope("/workouts").configure(workouts::configure))
            .service(web::scope("/sessions").configure(sessions::configure)),
    );
}

/// Reject identifiers that are not UUIDs before they reach the store
pub fn parse_id(id: &str) -> Result<&str, ApiError> {
    uuid::Uuid::parse_str(id)
        .map(|_| id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", id)))
}

/// Fresh identifier for a new document
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
