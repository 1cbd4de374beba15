use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::services::store::{
    document_id, sort_documents, Collection, Document, DocumentStore, Query, StoreError,
};

/// In-process document store
///
/// Keeps insertion order per collection so unsorted `find` results are
/// deterministic. Used for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, doc: Document) -> Result<Document, StoreError> {
        let id = document_id(&doc)?.to_string();
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if docs.iter().any(|d| document_id(d).map(|i| i == id).unwrap_or(false)) {
            return Err(StoreError::Duplicate(format!(
                "id {} in {}",
                id,
                collection.name()
            )));
        }

        // Email is unique among users; checked under the write lock
        if collection == Collection::Users {
            if let Some(email) = doc.get("email").filter(|e| !e.is_null()) {
                if docs.iter().any(|d| d.get("email") == Some(email)) {
                    return Err(StoreError::Duplicate(format!("email {}", email)));
                }
            }
        }

        docs.push(doc.clone());
        tracing::trace!("Inserted {} into {}", id, collection.name());
        Ok(doc)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| document_id(d).ok() == Some(id)))
            .cloned())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        changes: Document,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| document_id(d).ok() == Some(id)))
        else {
            return Ok(false);
        };

        for (key, value) in changes {
            // The id is immutable
            if key != "id" {
                doc.insert(key, value);
            }
        }
        Ok(true)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|d| document_id(d).ok() != Some(id));
        Ok(docs.len() < before)
    }

    async fn find(&self, collection: Collection, query: &Query) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| query.filter.matches(d))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(collections);

        sort_documents(&mut docs, &query.sort);
        Ok(docs)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::{Filter, SortKey};
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Workouts, doc(json!({ "id": "w1", "type": "Yoga" })))
            .await
            .unwrap();

        let fetched = store.get(Collection::Workouts, "w1").await.unwrap().unwrap();
        assert_eq!(fetched["type"], "Yoga");

        let updated = store
            .update(Collection::Workouts, "w1", doc(json!({ "type": "Boxing", "id": "other" })))
            .await
            .unwrap();
        assert!(updated);
        let fetched = store.get(Collection::Workouts, "w1").await.unwrap().unwrap();
        assert_eq!(fetched["type"], "Boxing");
        assert_eq!(fetched["id"], "w1");

        assert!(store.delete(Collection::Workouts, "w1").await.unwrap());
        assert!(!store.delete(Collection::Workouts, "w1").await.unwrap());
        assert!(store.get(Collection::Workouts, "w1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let store = MemoryStore::new();
        let updated = store
            .update(Collection::Users, "nope", doc(json!({ "name": "x" })))
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        store.insert(Collection::Users, doc(json!({ "id": "u1" }))).await.unwrap();
        let result = store.insert(Collection::Users, doc(json!({ "id": "u1" }))).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Users, doc(json!({ "id": "u1", "email": "ana@example.com" })))
            .await
            .unwrap();

        let result = store
            .insert(Collection::Users, doc(json!({ "id": "u2", "email": "ana@example.com" })))
            .await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        // Other collections may repeat the field
        store
            .insert(Collection::Sessions, doc(json!({ "id": "s1", "email": "ana@example.com" })))
            .await
            .unwrap();
        store
            .insert(Collection::Sessions, doc(json!({ "id": "s2", "email": "ana@example.com" })))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_email() {
        let store = std::sync::Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(
                            Collection::Users,
                            doc(json!({ "id": format!("u{}", i), "email": "race@example.com" })),
                        )
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_find_filters_and_sorts() {
        let store = MemoryStore::new();
        for (id, date) in [("a", "2024-03-01"), ("b", "2024-01-01"), ("c", "2024-02-01")] {
            store
                .insert(Collection::Workouts, doc(json!({ "id": id, "userId": "u1", "date": date })))
                .await
                .unwrap();
        }
        store
            .insert(Collection::Workouts, doc(json!({ "id": "d", "userId": "u2", "date": "2024-04-01" })))
            .await
            .unwrap();

        let query = Query::new(Filter::eq("userId", "u1")).sort_by(SortKey::desc("date"));
        let found = store.find(Collection::Workouts, &query).await.unwrap();
        let ids: Vec<&str> = found.iter().map(|d| d["id"].as_str().unwrap()).collect();

        assert_eq!(ids, vec!["a", "c", "b"]);
    }
}
