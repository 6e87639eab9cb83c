//! The player state machine (spec §4.1), implemented as `Supervisor(Arc<Inner>)`
//! wrapping a single `std::sync::Mutex<SupervisorState>`. Every public
//! method is a thin `lock()` followed by a call into a `*_locked` free
//! function; `*_locked` functions never re-lock, so call chains like
//! `set_rtmp` → `restart_pipeline_locked` → `start_pipeline_locked` are
//! safe by construction — the std-library equivalent of a reentrant mutex,
//! following `ffui_core::engine`'s `*_locked` helper convention.

mod advance;
mod config;
mod control;
mod playlist;
mod pump_hooks;
mod snapshot;
mod state;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use tracing::info;

use crate::domain::{LogRing, PipelineConfig};
use crate::overlay::OverlayFiles;
use crate::sync_ext::MutexExt;

pub(crate) use state::{Inner, SupervisorState};

/// The public facade. Cheap to clone — every clone shares the same `Inner`.
#[derive(Clone)]
pub struct Supervisor(Arc<Inner>);

impl Supervisor {
    /// Builds a fresh supervisor in `stopped` state. `overlay_dir` is where
    /// `overlay_text.txt`/`now_playing.txt` are created (spec §3 "Overlay
    /// state").
    pub fn new(pipeline: PipelineConfig, overlay_dir: &Path) -> Result<Self> {
        let overlay = OverlayFiles::init(overlay_dir)?;
        let inner = Inner {
            state: std::sync::Mutex::new(SupervisorState::new(pipeline)),
            log_ring: std::sync::Mutex::new(LogRing::new()),
            overlay,
        };
        Ok(Self(Arc::new(inner)))
    }

    pub(crate) fn inner(&self) -> &Arc<Inner> {
        &self.0
    }

    /// Most recent `limit` log lines (spec §6 `GET /logs?limit=N`).
    pub fn recent_logs(&self, limit: usize) -> Vec<crate::domain::LogLine> {
        self.0.log_ring.lock_unpoisoned().recent(limit)
    }

    pub(crate) fn log(&self, stream: &'static str, text: impl Into<String>) {
        self.0
            .log_ring
            .lock_unpoisoned()
            .push(crate::domain::LogLine::new(stream, text));
    }

    /// Starts the 1 Hz crash-recovery watcher (spec §4.7) as a detached
    /// background thread. Returns a flag the caller can flip to stop it on
    /// shutdown.
    pub fn spawn_watcher(&self) -> Arc<AtomicBool> {
        crate::pipeline::watcher::spawn(self.clone())
    }

    /// Signals the watcher (and any in-flight pump) that the process is
    /// shutting down, so a concurrent encoder crash is not treated as
    /// something to recover from.
    pub fn request_shutdown(&self) {
        let mut state = self.0.state.lock_unpoisoned();
        state.shutdown_requested = true;
        info!("shutdown requested");
    }
}
