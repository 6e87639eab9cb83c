use serde::{Deserialize, Serialize};

use super::EncoderSettings;

/// Everything the pipeline needs to spawn processes A, B, and C. See spec
/// §3 "PipelineConfig" and §4.2-§4.4.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub rtmp_url: Option<String>,
    pub video_file: Option<String>,
    pub overlay_text: String,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub video_size: String,
    pub video_udp_url: String,
    pub encoder_settings: EncoderSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rtmp_url: None,
            video_file: None,
            overlay_text: String::new(),
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            video_size: "1280x720".to_string(),
            video_udp_url: "udp://127.0.0.1:48689".to_string(),
            encoder_settings: EncoderSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Whether enough is configured to start streaming: an RTMP destination
    /// and a video bed file, per spec §4.1 "start preconditions".
    pub fn is_ready_to_play(&self) -> bool {
        self.rtmp_url.as_deref().is_some_and(|s| !s.is_empty())
            && self.video_file.as_deref().is_some_and(|s| !s.is_empty())
    }
}
