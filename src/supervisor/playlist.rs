use tracing::info;

use crate::domain::{Playlist, StateSnapshot, SupervisorError};
use crate::pipeline::probe;
use crate::sync_ext::MutexExt;

use super::Supervisor;

impl Supervisor {
    /// Replaces the playlist, resets `current_index`/`position` to 0, and
    /// kicks off an asynchronous duration refresh. Does not alter `status`
    /// or touch any worker (spec §4.1 "load_playlist").
    pub fn load_playlist(&self, paths: Vec<String>) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        state.durations.retain_paths(&paths);
        state.playlist = Playlist::new(paths);
        state.current_index = 0;
        state.position.reset_to(0.0);
        info!(len = state.playlist.len(), "playlist loaded");
        let snapshot = self.snapshot_locked(&state);
        drop(state);
        self.refresh_durations_async();
        Ok(snapshot)
    }

    /// Reorders the playlist in place. If the previously-current path is
    /// still present, `current_index` follows it; otherwise it resets to 0.
    /// Does not touch any worker (spec §4.1 "set_playlist_order").
    pub fn set_playlist_order(&self, paths: Vec<String>) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        let previous_path = state.current_path();
        state.durations.retain_paths(&paths);
        state.playlist = Playlist::new(paths);
        state.current_index = previous_path
            .and_then(|p| state.playlist.index_of(&p))
            .unwrap_or(0);
        let snapshot = self.snapshot_locked(&state);
        drop(state);
        self.refresh_durations_async();
        Ok(snapshot)
    }

    /// Probes durations for every playlist path not already in the
    /// duration map, on a background thread, updating the map under the
    /// lock as each result arrives. This is the async resolution spec §9's
    /// open question recommends, so `load_playlist` stays responsive on
    /// large playlists.
    fn refresh_durations_async(&self) {
        let supervisor = self.clone();
        std::thread::spawn(move || {
            let (paths, ffprobe_path) = {
                let state = supervisor.inner().state.lock_unpoisoned();
                let wanted = state.playlist.paths();
                let missing = state.durations.missing(&wanted);
                (missing, state.pipeline.ffprobe_path.clone())
            };

            for path in paths {
                let (duration, stderr) = probe::probe_duration_verbose(&ffprobe_path, &path);
                if let Some(seconds) = duration {
                    let mut state = supervisor.inner().state.lock_unpoisoned();
                    state.durations.set(path, seconds);
                } else if !stderr.is_empty() {
                    supervisor.log("supervisor", format!(
                        "duration probe failed for {path}: {}",
                        String::from_utf8_lossy(&stderr).trim()
                    ));
                }
            }
        });
    }
}
