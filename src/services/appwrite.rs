use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::services::store::{
    document_id, sort_documents, Collection, Document, DocumentStore, Filter, Query, StoreError,
};

/// Appwrite caps list responses at 25 documents unless told otherwise
const LIST_LIMIT: u32 = 5000;

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub users: String,
    pub workouts: String,
    pub sessions: String,
}

impl AppwriteCollections {
    fn id(&self, collection: Collection) -> &str {
        match collection {
            Collection::Users => &self.users,
            Collection::Workouts => &self.workouts,
            Collection::Sessions => &self.sessions,
        }
    }
}

/// Document store backed by the Appwrite databases API
///
/// Appwrite keeps the identifier in `$id`; documents are translated to and
/// from the store's `id` convention at this boundary. Filters that Appwrite
/// cannot express are applied locally after the fetch.
pub struct AppwriteStore {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

impl AppwriteStore {
    /// Create a new Appwrite-backed store
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: Collection) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.id(collection)
        )
    }

    fn document_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), urlencoding::encode(id))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn insert(&self, collection: Collection, doc: Document) -> Result<Document, StoreError> {
        let id = document_id(&doc)?.to_string();
        let mut data = doc.clone();
        data.remove("id");

        let response = self
            .authorized(self.client.post(self.documents_url(collection)))
            .json(&json!({ "documentId": id, "data": data }))
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::Duplicate(format!("{} in {}", id, collection.name())));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to create document in {}: {} - {}", collection.name(), status, body);
            return Err(StoreError::ApiError(format!("Failed to create document: {}", status)));
        }

        tracing::debug!("Created document {} in {}", id, collection.name());
        Ok(doc)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self
            .authorized(self.client.get(self.document_url(collection, id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to fetch document: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        from_appwrite(json).map(Some)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        mut changes: Document,
    ) -> Result<bool, StoreError> {
        changes.remove("id");

        let response = self
            .authorized(self.client.patch(self.document_url(collection, id)))
            .json(&json!({ "data": changes }))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StoreError::ApiError(format!("Failed to update document: {}", status))),
        }
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let response = self
            .authorized(self.client.delete(self.document_url(collection, id)))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StoreError::ApiError(format!("Failed to delete document: {}", status))),
        }
    }

    async fn find(&self, collection: Collection, query: &Query) -> Result<Vec<Document>, StoreError> {
        let mut params: Vec<(&str, String)> = vec![(
            "queries[]",
            json!({ "method": "limit", "values": [LIST_LIMIT] }).to_string(),
        )];
        if let Some(pushed) = render_filter(&query.filter) {
            params.push(("queries[]", pushed.to_string()));
        }

        let response = self
            .authorized(self.client.get(self.documents_url(collection)))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "Failed to query documents: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| StoreError::InvalidDocument("Missing documents array".into()))?;

        let mut docs = documents
            .iter()
            .cloned()
            .map(from_appwrite)
            .collect::<Result<Vec<_>, _>>()?;

        // Re-apply locally: covers predicates that were not pushed down
        docs.retain(|d| query.filter.matches(d));
        sort_documents(&mut docs, &query.sort);

        tracing::debug!("Queried {} documents from {}", docs.len(), collection.name());
        Ok(docs)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let url = format!(
            "{}/databases/{}",
            self.base_url.trim_end_matches('/'),
            self.database_id
        );
        let response = self.authorized(self.client.get(url)).send().await?;
        Ok(response.status().is_success())
    }
}

/// Convert an Appwrite document into the store's shape
fn from_appwrite(value: Value) -> Result<Document, StoreError> {
    let Value::Object(mut raw) = value else {
        return Err(StoreError::InvalidDocument("document is not an object".into()));
    };

    let id = raw
        .remove("$id")
        .ok_or_else(|| StoreError::InvalidDocument("document has no $id".into()))?;

    let mut doc: Document = raw.into_iter().filter(|(k, _)| !k.starts_with('$')).collect();
    doc.insert("id".to_string(), id);
    Ok(doc)
}

fn attribute(field: &str) -> &str {
    if field == "id" {
        "$id"
    } else {
        field
    }
}

/// Render a filter as an Appwrite query object
///
/// Returns `None` when the predicate (or part of a disjunction) has no
/// Appwrite equivalent.
fn render_filter(filter: &Filter) -> Option<Value> {
    match filter {
        Filter::Eq(field, value) => Some(json!({
            "method": "equal",
            "attribute": attribute(field),
            "values": [value],
        })),
        Filter::Ne(field, value) => Some(json!({
            "method": "notEqual",
            "attribute": attribute(field),
            "values": [value],
        })),
        Filter::ContainsAny(field, values) => Some(json!({
            "method": "contains",
            "attribute": attribute(field),
            "values": values,
        })),
        // Appwrite string matching is case-sensitive
        Filter::IContains(_, _) => None,
        Filter::And(filters) => {
            let rendered: Vec<Value> = filters.iter().filter_map(render_filter).collect();
            match rendered.len() {
                0 => None,
                1 => rendered.into_iter().next(),
                _ => Some(json!({ "method": "and", "values": rendered })),
            }
        }
        Filter::Or(filters) => {
            if filters.is_empty() {
                return None;
            }
            let rendered: Option<Vec<Value>> = filters.iter().map(render_filter).collect();
            rendered.map(|values| json!({ "method": "or", "values": values }))
        }
    }
}
