use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{LogLine, StateSnapshot, SupervisorError};
use crate::http::state::AppState;

/// Runs a blocking `Supervisor` call on the blocking thread pool, bridging
/// async handlers into the synchronous locked-state API (SPEC_FULL §5).
async fn run_blocking<F, T>(f: F) -> Result<T, StatusCode>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub snapshot: StateSnapshot,
    pub profiles: Vec<crate::config::Profile>,
}

/// `GET /state` — snapshot plus saved profiles list (spec §6).
pub async fn get_state(State(state): State<Arc<AppState>>) -> Result<Json<StateResponse>, StatusCode> {
    let supervisor = state.supervisor.clone();
    let snapshot = run_blocking(move || supervisor.get_state()).await?;
    let profiles = crate::config::profiles::load(&state.profiles_path).unwrap_or_default();
    Ok(Json(StateResponse { snapshot, profiles }))
}

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub lines: Vec<LogLine>,
}

/// `GET /logs?limit=N` (spec §6).
pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogsQuery>,
) -> Json<LogsResponse> {
    let limit = query.limit.unwrap_or(100);
    Json(LogsResponse {
        lines: state.supervisor.recent_logs(limit),
    })
}

pub async fn play(State(state): State<Arc<AppState>>) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.play())
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}

pub async fn pause(State(state): State<Arc<AppState>>) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.pause())
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}

pub async fn stop(State(state): State<Arc<AppState>>) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.stop())
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}

pub async fn skip(State(state): State<Arc<AppState>>) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.skip_next())
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}

#[derive(Debug, Deserialize)]
pub struct PlayIndexRequest {
    pub index: usize,
}

pub async fn play_index(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PlayIndexRequest>,
) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.play_index(body.index))
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}

#[derive(Debug, Deserialize)]
pub struct SeekRequest {
    pub seconds: f64,
}

pub async fn seek(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SeekRequest>,
) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.seek(body.seconds))
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}
