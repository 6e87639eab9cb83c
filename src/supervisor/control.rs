use tracing::info;

use crate::domain::{StateSnapshot, Status, SupervisorError};
use crate::sync_ext::MutexExt;

use super::Supervisor;

impl Supervisor {
    /// Starts the pipeline from the stored position if not already playing
    /// (spec §4.1 "play"). No-op while already playing; logs and stays
    /// `stopped` on an empty playlist.
    pub fn play(&self) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        match state.status {
            Status::Playing => {}
            Status::Stopped | Status::Paused | Status::Error => {
                if state.playlist.is_empty() {
                    info!("play: empty playlist, staying stopped");
                    state.status = Status::Stopped;
                } else {
                    let resume_at = state.position.current();
                    self.start_pipeline_locked(&mut state, resume_at)?;
                }
            }
        }
        Ok(self.snapshot_locked(&state))
    }

    /// Validates the index, seeks to track start, and starts the pipeline
    /// from 0 (spec §4.1 "play_index").
    pub fn play_index(&self, index: usize) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        if state.playlist.is_empty() {
            return Err(SupervisorError::EmptyPlaylist);
        }
        if index >= state.playlist.len() {
            return Err(SupervisorError::InvalidArgument(format!(
                "index {index} out of range for playlist of length {}",
                state.playlist.len()
            )));
        }
        state.current_index = index;
        state.position.reset_to(0.0);
        self.start_pipeline_locked(&mut state, 0.0)?;
        Ok(self.snapshot_locked(&state))
    }

    /// Snapshots the live position, kills all workers, and moves to
    /// `paused` (spec §4.1 "pause").
    pub fn pause(&self) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        if state.status == Status::Playing {
            let live_pos = state.position.current();
            self.kill_all_locked(&mut state);
            state.position.reset_to(live_pos);
            state.status = Status::Paused;
        }
        Ok(self.snapshot_locked(&state))
    }

    /// Kills all workers, zeros the stored position, and moves to
    /// `stopped` (spec §4.1 "stop").
    pub fn stop(&self) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        self.kill_all_locked(&mut state);
        state.position.reset_to(0.0);
        state.status = Status::Stopped;
        Ok(self.snapshot_locked(&state))
    }

    /// Triggers a track advance regardless of current status (spec §4.1
    /// "skip_next" delegates to §4.6). If not currently playing this only
    /// advances the stored index; no workers are touched.
    pub fn skip_next(&self) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        if state.status == Status::Playing {
            self.advance_track_locked(&mut state, true);
        } else if !state.playlist.is_empty() {
            state.current_index = (state.current_index + 1) % state.playlist.len();
            state.position.reset_to(0.0);
        }
        Ok(self.snapshot_locked(&state))
    }

    /// Clamps `seconds` into `[0, duration - 1)` when the current track's
    /// duration is known, stores it, stamps the seek timestamp, and — if
    /// playing — restarts only the decoder at the new offset (spec §4.1
    /// "seek", §8 property 3).
    pub fn seek(&self, seconds: f64) -> Result<StateSnapshot, SupervisorError> {
        let mut state = self.inner().state.lock_unpoisoned();
        if !seconds.is_finite() {
            return Err(SupervisorError::InvalidArgument(
                "seek target must be a finite number".to_string(),
            ));
        }

        let clamped = {
            let duration = state.current_path().and_then(|p| state.durations.get(&p));
            let lower = seconds.max(0.0);
            match duration {
                Some(d) if lower >= d => (d - 1.0).max(0.0),
                _ => lower,
            }
        };

        state.position.reset_to(clamped);
        self.stamp_recent_seek(&mut state);

        if state.status == Status::Playing {
            let encoder_stdin = state
                .encoder_stdin
                .clone()
                .ok_or(SupervisorError::BrokenPipe { process: "encoder" })?;
            self.start_decoder_locked(&mut state, clamped, encoder_stdin)?;
            state.position.set_running(clamped);
        }

        Ok(self.snapshot_locked(&state))
    }
}
