use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::models::{Session, SessionStatus, User, UserRecord, Workout};
use crate::services::store::{
    Collection, Document, DocumentStore, Filter, Query, SortKey, StoreError,
};

/// Typed access to the document store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn health_check(&self) -> Result<bool, StoreError> {
        self.store.health_check().await
    }

    // Users

    pub async fn insert_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        self.store.insert(Collection::Users, to_document(record)?).await?;
        Ok(())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let docs = self
            .store
            .find(Collection::Users, &Query::new(Filter::eq("email", email)))
            .await?;

        docs.into_iter().next().map(from_document).transpose()
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.store
            .get(Collection::Users, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// Users matching `filter`, in store order
    pub async fn find_users(&self, filter: Filter) -> Result<Vec<User>, StoreError> {
        self.store
            .find(Collection::Users, &Query::new(filter))
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn update_user(&self, id: &str, changes: Document) -> Result<bool, StoreError> {
        self.store.update(Collection::Users, id, changes).await
    }

    // Workouts

    pub async fn insert_workout(&self, workout: &Workout) -> Result<(), StoreError> {
        self.store.insert(Collection::Workouts, to_document(workout)?).await?;
        Ok(())
    }

    pub async fn get_workout(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        self.store
            .get(Collection::Workouts, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// A user's workouts, newest first
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<Workout>, StoreError> {
        let query = Query::new(Filter::eq("userId", user_id)).sort_by(SortKey::desc("date"));

        self.store
            .find(Collection::Workouts, &query)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn update_workout(&self, id: &str, changes: Document) -> Result<bool, StoreError> {
        self.store.update(Collection::Workouts, id, changes).await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete(Collection::Workouts, id).await
    }

    // Sessions

    pub async fn insert_session(&self, session: &Session) -> Result<(), StoreError> {
        self.store.insert(Collection::Sessions, to_document(session)?).await?;
        Ok(())
    }

    pub async fn get_session(&self, id: &str) -> Result<Option<Session>, StoreError> {
        self.store
            .get(Collection::Sessions, id)
            .await?
            .map(from_document)
            .transpose()
    }

    /// Sessions where the user is trainer or trainee, soonest first
    pub async fn list_sessions(
        &self,
        user_id: &str,
        status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, StoreError> {
        let mut filters = vec![Filter::Or(vec![
            Filter::eq("trainerId", user_id),
            Filter::eq("traineeId", user_id),
        ])];
        if let Some(status) = status {
            filters.push(Filter::eq("status", status.as_str()));
        }

        let query = Query::new(Filter::And(filters))
            .sort_by(SortKey::asc("date"))
            .sort_by(SortKey::asc("startTime"));

        self.store
            .find(Collection::Sessions, &query)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn update_session(&self, id: &str, changes: Document) -> Result<bool, StoreError> {
        self.store.update(Collection::Sessions, id, changes).await
    }

    pub async fn delete_session(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete(Collection::Sessions, id).await
    }
}

/// Serialize a model into a store document
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::InvalidDocument("model did not serialize to an object".into())),
    }
}

fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}
