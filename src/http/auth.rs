use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use rand::RngCore;

use crate::sync_ext::MutexExt;

use super::state::AppState;

/// Generates a 32-byte random token, hex-encoded, held only in process
/// memory (spec §6 "tokens are opaque random strings held in process
/// memory only").
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// `axum` middleware enforcing `Authorization: Bearer <token>` against the
/// current session token. Applied to every control endpoint except
/// `/login` (spec §6 "All control endpoints require...").
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let current = state.session_token.lock_unpoisoned();
    match (presented, current.as_deref()) {
        (Some(p), Some(c)) if p == c => {
            drop(current);
            Ok(next.run(request).await)
        }
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_64_hex_chars_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
