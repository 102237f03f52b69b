use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};

use crate::domain::store::TodoStore;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::http::types::{ServiceFault, StatusBody, success};

pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone() }
    }
}

pub fn router<S: TodoStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/todos/:id", patch(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn list_todos<S: TodoStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Todo>>, ServiceFault> {
    let todos = state.store.list().await?;
    Ok(Json(todos))
}

async fn create_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Json<StatusBody>, ServiceFault> {
    // A body that does not decode counts as a server-side fault, matching
    // the surface's catch-all contract.
    let Json(body) = payload.map_err(|rej| ServiceFault(rej.to_string()))?;
    state.store.create(&body.title).await?;
    Ok(success())
}

async fn update_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<StatusBody>, ServiceFault> {
    let Json(body) = payload.map_err(|rej| ServiceFault(rej.to_string()))?;
    state.store.update(TodoId(id), &body.title).await?;
    Ok(success())
}

async fn delete_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<u64>,
) -> Result<Json<StatusBody>, ServiceFault> {
    state.store.delete(TodoId(id)).await?;
    Ok(success())
}
