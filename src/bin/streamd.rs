use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::{Context, Result};
use streamcaster::config::{self, PersistedConfig};
use streamcaster::domain::PipelineConfig;
use streamcaster::http::{self, AppState};
use streamcaster::supervisor::Supervisor;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    streamcaster::logging::init();

    let ffmpeg_path = env_or("FFMPEG_PATH", "ffmpeg");
    let ffprobe_path = env_opt("FFPROBE_PATH")
        .unwrap_or_else(|| streamcaster::pipeline::command_builder::derive_ffprobe_path(&ffmpeg_path));

    let config_path = env_opt("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or(config::executable_sidecar_path("config.json")?);
    let profiles_path = config_path.with_file_name("profiles.json");
    let upload_dir = env_opt("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or(config::executable_sidecar_path("uploads")?);
    std::fs::create_dir_all(&upload_dir).context("creating upload dir")?;

    let mut pipeline = PipelineConfig {
        rtmp_url: env_opt("DEFAULT_RTMP_URL"),
        video_size: env_or("VIDEO_SIZE", "1920x1080"),
        ffmpeg_path,
        ffprobe_path,
        video_udp_url: env_or("VIDEO_UDP_URL", "udp://127.0.0.1:12345"),
        ..PipelineConfig::default()
    };

    let mut playlist = Vec::new();
    if let Some(persisted) = config::persisted::load(&config_path)? {
        let (restored, restored_playlist) = persisted.into_pipeline(pipeline);
        pipeline = restored;
        playlist = restored_playlist;
    }

    let overlay_dir = config::executable_sidecar_path("overlay_text.txt")?
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let supervisor = Supervisor::new(pipeline, &overlay_dir)?;
    if !playlist.is_empty() {
        supervisor.load_playlist(playlist)?;
    }
    let watcher_shutdown = supervisor.spawn_watcher();

    let state = Arc::new(AppState {
        admin_username: env_or("ADMIN_USERNAME", "admin"),
        admin_password: env_or("ADMIN_PASSWORD", "admin"),
        session_token: Mutex::new(None),
        upload_dir,
        config_path: config_path.clone(),
        profiles_path,
        supervisor: supervisor.clone(),
    });

    let router = http::build_router(state);

    let host = env_or("HOST", "0.0.0.0");
    let port = env_or("PORT", "8080");
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "streamcaster listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(supervisor, config_path, watcher_shutdown))
        .await
        .context("serving HTTP")?;

    Ok(())
}

/// Waits for Ctrl-C, tells the supervisor (and therefore the watcher) a
/// shutdown is in progress so a concurrent encoder crash isn't mistaken
/// for something to recover from, persists current config, and lets axum
/// drain in-flight requests before the process exits.
async fn shutdown_signal(
    supervisor: Supervisor,
    config_path: PathBuf,
    watcher_shutdown: Arc<std::sync::atomic::AtomicBool>,
) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
    supervisor.request_shutdown();
    watcher_shutdown.store(true, std::sync::atomic::Ordering::Relaxed);

    let snapshot = supervisor.get_state();
    let pipeline = PipelineConfig {
        rtmp_url: snapshot.rtmp_url,
        video_file: snapshot.video_file,
        overlay_text: snapshot.overlay_text,
        ffmpeg_path: snapshot.ffmpeg_path,
        ffprobe_path: String::new(),
        video_size: snapshot.video_size,
        video_udp_url: String::new(),
        encoder_settings: snapshot.encoder_settings,
    };
    let persisted = PersistedConfig::from_pipeline(&pipeline, snapshot.playlist);
    if let Err(e) = config::persisted::save(&config_path, &persisted) {
        tracing::warn!(error = %e, "failed to save config on shutdown");
    }
}
