use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path as AxumPath, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::SupervisorError;
use crate::http::path_guard::resolve_within_root;
use crate::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<FileEntry>,
}

/// `GET /files` — lists the upload root's contents. Not a spec-named route
/// by itself, but the read half of the upload/list/delete trio spec §6
/// requires; every name in it is still under `UPLOAD_DIR` with the same
/// guard applied to the root.
pub async fn list_files(State(state): State<Arc<AppState>>) -> Result<Json<FileListResponse>, SupervisorError> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(&state.upload_dir)
        .map_err(|e| SupervisorError::Other(anyhow::Error::new(e).context("reading upload dir")))?;
    for entry in entries {
        let entry = entry.map_err(|e| SupervisorError::Other(e.into()))?;
        let metadata = entry
            .metadata()
            .map_err(|e| SupervisorError::Other(e.into()))?;
        if metadata.is_file() {
            files.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size_bytes: metadata.len(),
            });
        }
    }
    Ok(Json(FileListResponse { files }))
}

/// `POST /upload` — accepts a single multipart field named `file`, writing
/// it under `UPLOAD_DIR` after a path-traversal check on the provided
/// filename (spec §6, §7 "PermissionDenied", §8 property 7).
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<StatusCode, SupervisorError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SupervisorError::InvalidArgument(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let dest = resolve_within_root(&state.upload_dir, &file_name)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| SupervisorError::InvalidArgument(e.to_string()))?;
        std::fs::write(&dest, &bytes)
            .map_err(|e| SupervisorError::Other(anyhow::Error::new(e).context("writing upload")))?;
        return Ok(StatusCode::CREATED);
    }
    Err(SupervisorError::InvalidArgument("no file field in upload".to_string()))
}

/// `DELETE /files/:name` (spec §6, §7, §8 property 7).
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    AxumPath(name): AxumPath<String>,
) -> Result<StatusCode, SupervisorError> {
    let target = resolve_within_root(&state.upload_dir, &name)?;
    std::fs::remove_file(&target)
        .map_err(|e| SupervisorError::Other(anyhow::Error::new(e).context("deleting upload")))?;
    Ok(StatusCode::NO_CONTENT)
}
