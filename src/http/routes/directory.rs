use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::domain::directory::{Project, Team, User};
use crate::infrastructure::fixtures::Directory;

// Read-only fixture surface for the dashboard; no mutation routes.

pub fn router(directory: Arc<Directory>) -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/teams", get(list_teams))
        .route("/projects", get(list_projects))
        .with_state(directory)
}

async fn list_users(State(dir): State<Arc<Directory>>) -> Json<Vec<User>> {
    Json(dir.users.clone())
}

async fn list_teams(State(dir): State<Arc<Directory>>) -> Json<Vec<Team>> {
    Json(dir.teams.clone())
}

async fn list_projects(State(dir): State<Arc<Directory>>) -> Json<Vec<Project>> {
    Json(dir.projects.clone())
}
