use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::config::Profile;
use crate::http::state::AppState;

/// `GET /profiles` — saved-profile CRUD read side (spec §6).
pub async fn list_profiles(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Profile>>, StatusCode> {
    let path = state.profiles_path.clone();
    tokio::task::spawn_blocking(move || crate::config::profiles::load(&path))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// `POST /profiles` — upserts by name (spec §6).
pub async fn save_profile(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<Profile>,
) -> Result<Json<Vec<Profile>>, StatusCode> {
    let path = state.profiles_path.clone();
    tokio::task::spawn_blocking(move || crate::config::profiles::upsert(&path, profile))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// `DELETE /profiles/:name` — 404 if the profile does not exist (spec §7
/// "missing profile to 404").
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Profile>>, StatusCode> {
    let path = state.profiles_path.clone();
    tokio::task::spawn_blocking(move || crate::config::profiles::delete(&path, &name))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .map(Json)
        .map_err(|_| StatusCode::NOT_FOUND)
}
