use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use balloon_shared::protocol::UserRecord;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::roster::Roster;

/// Shared app state passed to each handler
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RwLock<Roster>>,
}

impl AppState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster: Arc::new(RwLock::new(roster)),
        }
    }
}

/// Routes without middleware; callers add CORS or tracing layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(upsert_user))
        .route("/users/{id}/login", post(record_login))
        .with_state(state)
}

/// Full snapshot of every known user
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserRecord>> {
    let roster = state.roster.read().await;
    Json(roster.snapshot())
}

pub async fn upsert_user(
    State(state): State<AppState>,
    Json(user): Json<UserRecord>,
) -> Result<(StatusCode, Json<UserRecord>), StatusCode> {
    if user.id.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut roster = state.roster.write().await;
    let created = roster.upsert(user.clone());
    if created {
        tracing::info!("User {} registered ({} total)", user.id, roster.len());
        Ok((StatusCode::CREATED, Json(user)))
    } else {
        tracing::debug!("User {} replaced", user.id);
        Ok((StatusCode::OK, Json(user)))
    }
}

pub async fn record_login(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, StatusCode> {
    let mut roster = state.roster.write().await;
    match roster.record_login(&id, Utc::now()) {
        Some(user) => {
            tracing::info!("User {} logged in", id);
            Ok(Json(user))
        }
        None => {
            tracing::warn!("Login for unknown user {}", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
