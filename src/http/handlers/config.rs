use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::domain::{EncoderSettingsPatch, StateSnapshot, SupervisorError};
use crate::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PathRequest {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

macro_rules! blocking_handler {
    ($name:ident, $body_ty:ty, $field:ident, $method:ident) => {
        pub async fn $name(
            State(state): State<Arc<AppState>>,
            Json(body): Json<$body_ty>,
        ) -> Result<Json<StateSnapshot>, SupervisorError> {
            let supervisor = state.supervisor.clone();
            tokio::task::spawn_blocking(move || supervisor.$method(body.$field))
                .await
                .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
                .map(Json)
        }
    };
}

// `POST /video`, `POST /rtmp`, `POST /ffmpeg`, `POST /overlay` (spec §6).
blocking_handler!(set_video, PathRequest, path, set_video);
blocking_handler!(set_rtmp, UrlRequest, url, set_rtmp);
blocking_handler!(set_ffmpeg_path, PathRequest, path, set_ffmpeg_path);
blocking_handler!(set_overlay_text, TextRequest, text, set_overlay_text);

/// `POST /encoder_settings` — partial update, unset fields keep their
/// current value (spec §6).
pub async fn set_encoder_settings(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EncoderSettingsPatch>,
) -> Result<Json<StateSnapshot>, SupervisorError> {
    let supervisor = state.supervisor.clone();
    tokio::task::spawn_blocking(move || supervisor.set_encoder_settings(body))
        .await
        .map_err(|e| SupervisorError::Other(anyhow::anyhow!(e)))?
        .map(Json)
}
