use crate::domain::StateSnapshot;
use crate::sync_ext::MutexExt;

use super::Supervisor;
use super::state::SupervisorState;

impl Supervisor {
    /// Returns a full client-facing snapshot: status, index, current path,
    /// computed live position, playlist, durations, config, encoder
    /// settings (spec §4.1 "get_state").
    pub fn get_state(&self) -> StateSnapshot {
        let state = self.inner().state.lock_unpoisoned();
        self.snapshot_locked(&state)
    }

    pub(crate) fn snapshot_locked(&self, state: &SupervisorState) -> StateSnapshot {
        let paths = state.playlist.paths();
        let durations = state.durations.aligned_with(&paths);
        StateSnapshot {
            status: state.status,
            current_index: state.current_index,
            current_path: state.current_path(),
            position_seconds: state.position.current(),
            playlist: paths,
            durations,
            video_file: state.pipeline.video_file.clone(),
            overlay_text: state.pipeline.overlay_text.clone(),
            rtmp_url: state.pipeline.rtmp_url.clone(),
            ffmpeg_path: state.pipeline.ffmpeg_path.clone(),
            encoder_settings: state.pipeline.encoder_settings.clone(),
            video_size: state.pipeline.video_size.clone(),
            consecutive_failures: state.consecutive_failures,
        }
    }
}
