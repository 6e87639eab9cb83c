//! Data model shared across the supervisor, pipeline, and HTTP layers.

mod encoder_settings;
pub mod error;
mod log;
mod pipeline_config;
mod playlist;
mod position;
mod status;

pub use encoder_settings::{EncoderSettings, EncoderSettingsPatch};
pub use error::SupervisorError;
pub use log::{LogLine, LogRing};
pub use pipeline_config::PipelineConfig;
pub use playlist::{DurationMap, Playlist, PlaylistEntry};
pub use position::PositionModel;
pub use status::Status;

use serde::{Deserialize, Serialize};

/// A full, client-facing snapshot of the supervisor's state, returned by
/// `GET /state` and `Supervisor::get_state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub status: Status,
    pub current_index: usize,
    pub current_path: Option<String>,
    pub position_seconds: f64,
    pub playlist: Vec<String>,
    /// Durations aligned with `playlist`, by index; `None` when unknown.
    pub durations: Vec<Option<f64>>,
    pub video_file: Option<String>,
    pub overlay_text: String,
    pub rtmp_url: Option<String>,
    pub ffmpeg_path: String,
    pub encoder_settings: EncoderSettings,
    pub video_size: String,
    pub consecutive_failures: u32,
}
