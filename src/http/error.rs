use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::SupervisorError;

/// Maps each `SupervisorError` variant to the HTTP status spec §7
/// prescribes: `InvalidArgument` → 400, `PermissionDenied` → 403, anything
/// else that isn't a recognized client mistake → 500. Auth failures (401)
/// and missing-profile (404) are handled at the handler/middleware level,
/// not through this conversion, since they are not `SupervisorError`
/// variants.
impl IntoResponse for SupervisorError {
    fn into_response(self) -> Response {
        let status = match &self {
            SupervisorError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            SupervisorError::EmptyPlaylist => StatusCode::BAD_REQUEST,
            SupervisorError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            SupervisorError::ConfigMissing => StatusCode::CONFLICT,
            SupervisorError::SpawnFailure { .. }
            | SupervisorError::EncoderCrash { .. }
            | SupervisorError::DecoderCrash { .. }
            | SupervisorError::BrokenPipe { .. }
            | SupervisorError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
