use std::time::Instant;

use tracing::{error, info, warn};

use crate::domain::{Status, SupervisorError};
use crate::sync_ext::MutexExt;

use super::Supervisor;

/// Consecutive encoder crashes within the backoff window before the
/// watcher gives up and surfaces `status = error` instead of retrying
/// (spec §4.7 "SHOULD bound restart frequency", §8 scenario 6: "five
/// consecutive crashes").
const MAX_CONSECUTIVE_FAILURES: u32 = 5;

impl Supervisor {
    /// Called by a pump thread when its decoder hit EOF (spec §4.5 item 1).
    pub(crate) fn on_pump_natural_end(&self, generation: u64) {
        let mut state = self.inner().state.lock_unpoisoned();
        if state.pump_generation != generation {
            return; // superseded between the read and this call
        }
        if state.status != Status::Playing {
            return;
        }
        if Self::within_seek_suppression(&state, Instant::now()) {
            info!("pump: EOF suppressed, within seek window");
            return;
        }
        info!("pump: natural end, advancing track");
        self.advance_track_locked(&mut state, true);
    }

    /// Called by a pump thread when a write to the encoder's stdin failed
    /// (spec §4.5 item 2). The watcher is responsible for recovery; this
    /// only logs.
    pub(crate) fn on_pump_broken_pipe(&self, generation: u64) {
        let state = self.inner().state.lock_unpoisoned();
        if state.pump_generation != generation {
            return;
        }
        warn!("pump: broken pipe writing to encoder, awaiting watcher");
    }

    /// Called by a pump thread when reading from the decoder's stdout
    /// failed outright, i.e. the decoder died mid-stream rather than
    /// exiting cleanly (spec §7 "DecoderCrash / BrokenPipe"). If the
    /// pipeline is otherwise healthy and still playing this takes the
    /// same natural-end path as a clean decoder EOF; otherwise the
    /// watcher is left to recover via the encoder's own state.
    pub(crate) fn on_pump_decoder_error(&self, generation: u64) {
        let mut state = self.inner().state.lock_unpoisoned();
        if state.pump_generation != generation {
            return;
        }
        let err = SupervisorError::DecoderCrash { code: None };
        if state.status != Status::Playing {
            warn!(error = %err, "pump: decoder read error while not playing");
            return;
        }
        error!(error = %err, "pump: decoder read error, advancing track");
        self.advance_track_locked(&mut state, true);
    }

    /// One tick of the 1 Hz crash-recovery watcher (spec §4.7).
    pub(crate) fn watcher_tick(&self) {
        let mut state = self.inner().state.lock_unpoisoned();
        if state.status != Status::Playing {
            return;
        }

        let encoder_alive = matches!(state.encoder.as_mut().map(|e| e.poll()), Some(Ok(None)));
        if encoder_alive {
            return;
        }

        let exit_code = state
            .encoder
            .as_mut()
            .and_then(|e| e.poll().ok().flatten())
            .and_then(|status| status.code());

        if let Some(mut decoder) = state.decoder.take() {
            let _ = decoder.kill();
        }
        if let Some(mut video) = state.video.take() {
            let _ = video.kill();
        }
        state.encoder = None;

        if exit_code == Some(0) {
            info!("watcher: encoder exited cleanly");
            state.status = Status::Stopped;
            return;
        }

        let err = SupervisorError::EncoderCrash { code: exit_code };

        if state.playlist.is_empty() || state.shutdown_requested {
            error!(error = %err, "watcher: encoder crashed, no recovery possible");
            state.status = Status::Error;
            return;
        }

        state.consecutive_failures += 1;
        if state.consecutive_failures > MAX_CONSECUTIVE_FAILURES {
            error!(
                error = %err,
                failures = state.consecutive_failures,
                "watcher: too many consecutive encoder crashes, giving up"
            );
            state.status = Status::Error;
            return;
        }

        let resume_at = state.position.current();
        warn!(?exit_code, resume_at, "watcher: restarting pipeline after encoder crash");
        match self.start_pipeline_locked(&mut state, resume_at) {
            Ok(()) => {}
            Err(e) => {
                error!(error = %e, "watcher: restart after crash failed");
                state.status = Status::Error;
            }
        }
    }
}
