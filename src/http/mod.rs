//! The HTTP/JSON control surface (spec §6): a thin `axum` router in front
//! of `Supervisor` (see DESIGN.md for the dependency rationale).

pub mod auth;
pub mod error;
pub mod handlers;
pub mod path_guard;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Request bodies (mainly uploads) above this size are rejected before
/// reaching a handler.
const MAX_BODY_BYTES: usize = 512 * 1024 * 1024;

/// Assembles the full router: public `/login`, everything else behind the
/// bearer-token middleware (spec §6 "All control endpoints require...").
pub fn build_router(state: Arc<AppState>) -> Router {
    let public = Router::new().route("/login", post(handlers::session::login));

    let protected = Router::new()
        .route("/logout", post(handlers::session::logout))
        .route("/state", get(handlers::player::get_state))
        .route("/logs", get(handlers::player::get_logs))
        .route("/playlist", post(handlers::playlist::load_playlist))
        .route("/playlist/order", post(handlers::playlist::set_playlist_order))
        .route("/video", post(handlers::config::set_video))
        .route("/rtmp", post(handlers::config::set_rtmp))
        .route("/ffmpeg", post(handlers::config::set_ffmpeg_path))
        .route("/overlay", post(handlers::config::set_overlay_text))
        .route("/encoder_settings", post(handlers::config::set_encoder_settings))
        .route("/play", post(handlers::player::play))
        .route("/pause", post(handlers::player::pause))
        .route("/stop", post(handlers::player::stop))
        .route("/skip", post(handlers::player::skip))
        .route("/play_index", post(handlers::player::play_index))
        .route("/seek", post(handlers::player::seek))
        .route("/files", get(handlers::files::list_files))
        .route("/upload", post(handlers::files::upload_file))
        .route("/files/:name", delete(handlers::files::delete_file))
        .route("/profiles", get(handlers::profiles::list_profiles))
        .route("/profiles", post(handlers::profiles::save_profile))
        .route("/profiles/:name", delete(handlers::profiles::delete_profile))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    public
        .merge(protected)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
