use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use thiserror::Error;

pub use crate::models::{Document, Filter};

/// Errors that can occur in a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A unique key (document id, user email) is already taken
    #[error("Duplicate value: {0}")]
    Duplicate(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Named collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Workouts,
    Sessions,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Workouts => "workouts",
            Collection::Sessions => "sessions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: &str) -> Self {
        Self { field: field.to_string(), direction: SortDirection::Asc }
    }

    pub fn desc(field: &str) -> Self {
        Self { field: field.to_string(), direction: SortDirection::Desc }
    }
}

/// Filter plus ordering for `find`
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub sort: Vec<SortKey>,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self { filter, sort: vec![] }
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }
}

/// Minimal document store contract
///
/// Documents are JSON objects keyed by a string `id`. `update` merges the
/// given fields into the stored document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document; it must already carry an `id`
    async fn insert(&self, collection: Collection, doc: Document) -> Result<Document, StoreError>;

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError>;

    /// Merge `changes` into the document; returns false when it does not exist
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        changes: Document,
    ) -> Result<bool, StoreError>;

    /// Returns false when the document does not exist
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError>;

    async fn find(&self, collection: Collection, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Health check for the backend connection
    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Stable in-process ordering by the query's sort keys
///
/// Values of different JSON types order as PostgreSQL orders `jsonb`: null,
/// then strings, numbers, booleans, arrays and objects. A missing field sorts
/// with null, first ascending and last descending. Strings compare
/// byte-wise here and by collation in PostgreSQL, so sort keys should be
/// ASCII values such as ISO dates and `HH:MM` times.
pub fn sort_documents(docs: &mut [Document], sort: &[SortKey]) {
    if sort.is_empty() {
        return;
    }

    docs.sort_by(|a, b| {
        sort.iter().fold(Ordering::Equal, |ord, key| {
            ord.then_with(|| {
                let cmp = compare_values(a.get(&key.field), b.get(&key.field));
                match key.direction {
                    SortDirection::Asc => cmp,
                    SortDirection::Desc => cmp.reverse(),
                }
            })
        })
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::String(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::Bool(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Read the `id` of a document
pub fn document_id(doc: &Document) -> Result<&str, StoreError> {
    doc.get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidDocument("document has no string id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_sort_documents_multi_key() {
        let mut docs = vec![
            doc(json!({ "id": "3", "date": "2024-02-01", "startTime": "09:00" })),
            doc(json!({ "id": "1", "date": "2024-01-01", "startTime": "10:00" })),
            doc(json!({ "id": "2", "date": "2024-01-01", "startTime": "08:00" })),
        ];

        sort_documents(&mut docs, &[SortKey::asc("date"), SortKey::asc("startTime")]);
        let ids: Vec<&str> = docs.iter().map(|d| document_id(d).unwrap()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);

        sort_documents(&mut docs, &[SortKey::desc("date")]);
        assert_eq!(document_id(&docs[0]).unwrap(), "3");
    }

    #[test]
    fn test_sort_mixed_types_follows_jsonb_order() {
        let mut docs = vec![
            doc(json!({ "id": "obj", "k": { "a": 1 } })),
            doc(json!({ "id": "num", "k": 5 })),
            doc(json!({ "id": "missing" })),
            doc(json!({ "id": "bool", "k": true })),
            doc(json!({ "id": "str", "k": "2024-01-01" })),
            doc(json!({ "id": "arr", "k": [1] })),
        ];

        sort_documents(&mut docs, &[SortKey::asc("k")]);
        let ids: Vec<&str> = docs.iter().map(|d| document_id(d).unwrap()).collect();
        assert_eq!(ids, vec!["missing", "str", "num", "bool", "arr", "obj"]);

        sort_documents(&mut docs, &[SortKey::desc("k")]);
        let ids: Vec<&str> = docs.iter().map(|d| document_id(d).unwrap()).collect();
        assert_eq!(ids, vec!["obj", "arr", "bool", "num", "str", "missing"]);
    }
}
