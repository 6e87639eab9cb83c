use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::domain::{StateSnapshot, SupervisorError};
use crate::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub files: Vec<String>,
}

/// `POST /playlist` (spec §6).
pub async fn load_playlist(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlaylistRequest>,
) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.load_playlist(body.files))
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}

/// `POST /playlist/order` (spec §6).
pub async fn set_playlist_order(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlaylistRequest>,
) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.set_playlist_order(body.files))
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}
