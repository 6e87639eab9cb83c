use tracing::info;

use crate::domain::{EncoderSettingsPatch, StateSnapshot, Status, SupervisorError};
use crate::sync_ext::MutexExt;

use super::Supervisor;
use super::state::SupervisorState;

impl Supervisor {
    /// Sets the video bed path. Restarts the pipeline from the live
    /// position if currently playing — the video source is baked into
    /// worker B's command line (spec §4.1).
    pub fn set_video(&self, path: String) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        state.pipeline.video_file = Some(path);
        self.restart_if_playing_locked(&mut state)?;
        Ok(self.snapshot_locked(&state))
    }

    /// Hot-reloads the overlay text by writing `overlay_text.txt` directly
    /// — no pipeline restart (spec §4.1 parenthetical, §9 "Overlay
    /// live-reload is preferred over pipeline restart").
    pub fn set_overlay_text(&self, text: String) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        self.inner()
            .overlay
            .set_overlay_text(&text)
            .map_err(SupervisorError::Other)?;
        state.pipeline.overlay_text = text;
        Ok(self.snapshot_locked(&state))
    }

    /// Sets the RTMP destination. Restarts the pipeline if playing — per
    /// spec §9's open question, exactly one restart, not the source's
    /// redundant double call.
    pub fn set_rtmp(&self, url: String) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        state.pipeline.rtmp_url = Some(url);
        self.restart_if_playing_locked(&mut state)?;
        Ok(self.snapshot_locked(&state))
    }

    /// Sets the ffmpeg binary path (and re-derives ffprobe's path from it
    /// when that was not explicitly overridden). Restarts if playing.
    pub fn set_ffmpeg_path(&self, path: String) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        state.pipeline.ffprobe_path =
            crate::pipeline::command_builder::derive_ffprobe_path(&path);
        state.pipeline.ffmpeg_path = path;
        self.restart_if_playing_locked(&mut state)?;
        Ok(self.snapshot_locked(&state))
    }

    /// Applies a partial encoder settings update. Restarts if playing —
    /// bitrate/GOP knobs are baked into C's command line (spec §4.1).
    pub fn set_encoder_settings(
        &self,
        patch: EncoderSettingsPatch,
    ) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        state.pipeline.encoder_settings.apply_patch(patch);
        self.restart_if_playing_locked(&mut state)?;
        Ok(self.snapshot_locked(&state))
    }

    fn restart_if_playing_locked(&self, state: &mut SupervisorState) -> Result<(), SupervisorError> {
        if state.status == Status::Playing {
            let live_pos = state.position.current();
            info!(live_pos, "config change: restarting pipeline");
            self.start_pipeline_locked(state, live_pos)?;
        }
        Ok(())
    }
}
