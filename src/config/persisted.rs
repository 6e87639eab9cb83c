use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::EncoderSettings;
use crate::domain::PipelineConfig;

use super::io::{read_json_file, write_json_file};

/// The JSON object persisted at `CONFIG_PATH` (spec §6 "Persistent config
/// file"). Field names and shape match that wire format exactly, not a
/// generic settings bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedConfig {
    pub rtmp_url: Option<String>,
    pub ffmpeg_path: String,
    pub video_file: Option<String>,
    pub overlay_text: String,
    pub playlist: Vec<String>,
    pub audio_bitrate: String,
    pub video_bitrate: String,
    pub maxrate: String,
    pub bufsize: String,
    pub video_fps: u32,
}

impl PersistedConfig {
    pub fn from_pipeline(pipeline: &PipelineConfig, playlist: Vec<String>) -> Self {
        let settings = &pipeline.encoder_settings;
        Self {
            rtmp_url: pipeline.rtmp_url.clone(),
            ffmpeg_path: pipeline.ffmpeg_path.clone(),
            video_file: pipeline.video_file.clone(),
            overlay_text: pipeline.overlay_text.clone(),
            playlist,
            audio_bitrate: settings.audio_bitrate.clone(),
            video_bitrate: settings.video_bitrate.clone(),
            maxrate: settings.maxrate.clone(),
            bufsize: settings.bufsize.clone(),
            video_fps: settings.video_fps,
        }
    }

    pub fn into_pipeline(self, mut base: PipelineConfig) -> (PipelineConfig, Vec<String>) {
        base.rtmp_url = self.rtmp_url;
        base.ffmpeg_path = self.ffmpeg_path;
        base.video_file = self.video_file;
        base.overlay_text = self.overlay_text;
        base.encoder_settings = EncoderSettings {
            audio_bitrate: self.audio_bitrate,
            video_bitrate: self.video_bitrate,
            maxrate: self.maxrate,
            bufsize: self.bufsize,
            video_fps: self.video_fps,
        };
        (base, self.playlist)
    }
}

pub fn load(path: &Path) -> Result<Option<PersistedConfig>> {
    read_json_file(path)
}

pub fn save(path: &Path, config: &PersistedConfig) -> Result<()> {
    write_json_file(path, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_observable_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut pipeline = PipelineConfig::default();
        pipeline.rtmp_url = Some("rtmp://h/l/k".to_string());
        pipeline.video_file = Some("/videos/bed.mp4".to_string());
        let playlist = vec!["/a.mp3".to_string(), "/b.mp3".to_string()];
        let persisted = PersistedConfig::from_pipeline(&pipeline, playlist.clone());

        save(&path, &persisted).unwrap();
        let loaded = load(&path).unwrap().unwrap();
        let (restored, restored_playlist) = loaded.into_pipeline(PipelineConfig::default());

        assert_eq!(restored.rtmp_url, pipeline.rtmp_url);
        assert_eq!(restored.video_file, pipeline.video_file);
        assert_eq!(restored_playlist, playlist);
    }
}
