use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::http::auth::generate_token;
use crate::http::state::AppState;
use crate::sync_ext::MutexExt;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /login` — 401 on mismatch (spec §6).
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    if body.username != state.admin_username || body.password != state.admin_password {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let token = generate_token();
    *state.session_token.lock_unpoisoned() = Some(token.clone());
    Ok(Json(LoginResponse { token }))
}

/// `POST /logout` — clears the in-memory session token (spec §6).
pub async fn logout(State(state): State<Arc<AppState>>) -> StatusCode {
    *state.session_token.lock_unpoisoned() = None;
    StatusCode::NO_CONTENT
}
