use std::process::ChildStdin;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::domain::{DurationMap, LogRing, PipelineConfig, Playlist, PositionModel, Status};
use crate::overlay::OverlayFiles;
use crate::pipeline::WorkerHandle;

/// Everything the supervisor mutates under its single lock. Fields are
/// `pub(crate)` rather than accessor-wrapped: every access already goes
/// through a `Supervisor` method that holds the lock, so there is no
/// benefit to a second layer of getters/setters inside the module.
pub(crate) struct SupervisorState {
    pub status: Status,
    pub playlist: Playlist,
    pub durations: DurationMap,
    pub current_index: usize,
    pub position: PositionModel,
    pub pipeline: PipelineConfig,
    pub decoder: Option<WorkerHandle>,
    pub video: Option<WorkerHandle>,
    pub encoder: Option<WorkerHandle>,
    /// The encoder's stdin pipe, taken once when C is spawned and shared
    /// (never re-taken) across every decoder/pump restart for that
    /// encoder's lifetime — `ChildStdin` can only be taken from `Child`
    /// once, so every pump generation gets its own `Arc` clone rather than
    /// attempting a second `take_stdin()`.
    pub encoder_stdin: Option<Arc<Mutex<ChildStdin>>>,
    /// Bumped every time a new decoder+pump pair is started. A pump
    /// compares its captured generation against this value to decide
    /// whether it has been superseded (spec §4.5's "stop_pump flag" /
    /// "externally signaled to stop" conditions).
    pub pump_generation: u64,
    pub recent_seek_monotonic: Option<Instant>,
    pub consecutive_failures: u32,
    pub shutdown_requested: bool,
}

impl SupervisorState {
    pub fn new(pipeline: PipelineConfig) -> Self {
        Self {
            status: Status::Stopped,
            playlist: Playlist::default(),
            durations: DurationMap::default(),
            current_index: 0,
            position: PositionModel::new(),
            pipeline,
            decoder: None,
            video: None,
            encoder: None,
            encoder_stdin: None,
            pump_generation: 0,
            recent_seek_monotonic: None,
            consecutive_failures: 0,
            shutdown_requested: false,
        }
    }

    pub fn current_path(&self) -> Option<String> {
        self.playlist.get(self.current_index).map(|e| e.path.clone())
    }
}

/// Shared supervisor state plus the auxiliary resources that outlive any
/// single lock acquisition (the log ring and the overlay files, both of
/// which have their own internal synchronization).
pub struct Inner {
    pub(crate) state: Mutex<SupervisorState>,
    pub(crate) log_ring: Mutex<LogRing>,
    pub(crate) overlay: OverlayFiles,
}
