use async_trait::async_trait;
use thiserror::Error;

use super::todo::{Todo, TodoId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Simulated network/service outage. Display text matches what the
    /// original front-end showed for any non-OK response.
    #[error("Something went wrong")]
    Transport,

    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// Empty title submitted; the client is expected to disable the
    /// action control before this can happen.
    #[error("title must not be empty")]
    EmptyTitle,
}

/// The authoritative todo collection. Mutations acknowledge without
/// content; callers re-fetch via `list` rather than patching locally.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Full collection in insertion order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;
    /// Assigns the next id (strictly greater than every id handed out so
    /// far, even across deletions) and appends.
    async fn create(&self, title: &str) -> Result<(), StoreError>;
    /// Replaces the title in place, preserving position.
    async fn update(&self, id: TodoId, title: &str) -> Result<(), StoreError>;
    /// Removes if present; absent ids are a silent no-op.
    async fn delete(&self, id: TodoId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: TodoStore> TodoStore for std::sync::Arc<S> {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.as_ref().list().await
    }

    async fn create(&self, title: &str) -> Result<(), StoreError> {
        self.as_ref().create(title).await
    }

    async fn update(&self, id: TodoId, title: &str) -> Result<(), StoreError> {
        self.as_ref().update(id, title).await
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        self.as_ref().delete(id).await
    }
}
