use std::process::ChildStdin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::domain::{PositionModel, Status, SupervisorError};
use crate::pipeline::child::TERMINATE_GRACE;
use crate::pipeline::{WorkerHandle, command_builder, log_reader, pump};

use super::state::SupervisorState;
use super::Supervisor;

/// Gap between starting the encoder and the video worker: just long enough
/// for the encoder's UDP listener to be ready. Spec §9 flags the source's
/// `time.sleep(1000)` between these two spawns as a likely seconds/
/// milliseconds bug; this is the corrected, readiness-sized delay.
const ENCODER_READY_DELAY: Duration = Duration::from_millis(300);

impl Supervisor {
    /// Tears down whichever of A/B/C are live, in reverse spawn order, and
    /// clears their handles. Teardown always strictly precedes any new
    /// spawn within a single control call (spec §5 ordering guarantee).
    pub(crate) fn kill_all_locked(&self, state: &mut SupervisorState) {
        // Bump the pump generation first so any in-flight pump treats
        // itself as superseded as soon as it next checks.
        state.pump_generation += 1;

        if let Some(mut decoder) = state.decoder.take() {
            let _ = decoder.terminate(TERMINATE_GRACE);
        }
        if let Some(mut video) = state.video.take() {
            let _ = video.terminate(TERMINATE_GRACE);
        }
        if let Some(mut encoder) = state.encoder.take() {
            let _ = encoder.terminate(TERMINATE_GRACE);
        }
        state.encoder_stdin = None;
    }

    /// Starts C then B then A from `start_pos`, per spec §4.2 ("must be
    /// started before the video worker") and §4.1 (play/resume semantics).
    pub(crate) fn start_pipeline_locked(
        &self,
        state: &mut SupervisorState,
        start_pos: f64,
    ) -> Result<(), SupervisorError> {
        if !state.pipeline.is_ready_to_play() {
            return Err(SupervisorError::ConfigMissing);
        }
        if state.playlist.is_empty() {
            return Err(SupervisorError::EmptyPlaylist);
        }

        self.kill_all_locked(state);

        let encoder_cmd = command_builder::build_encoder_command(&state.pipeline);
        let mut encoder = WorkerHandle::spawn(encoder_cmd, "C", true).map_err(|source| {
            SupervisorError::SpawnFailure { process: "encoder", source }
        })?;
        self.attach_log_readers(&mut encoder);
        let encoder_stdin = encoder
            .take_stdin()
            .ok_or(SupervisorError::BrokenPipe { process: "encoder" })?;
        state.encoder = Some(encoder);
        // Taken once here for this encoder's whole lifetime; every
        // decoder/pump restart below gets its own `Arc` clone instead of a
        // second (impossible) `take_stdin()`.
        state.encoder_stdin = Some(Arc::new(Mutex::new(encoder_stdin)));
        // Encoder starting cleanly resets the crash-backoff counter (spec
        // §4.7 "reset each time the encoder starts successfully").
        state.consecutive_failures = 0;

        std::thread::sleep(ENCODER_READY_DELAY);

        let video_cmd = command_builder::build_video_command(
            &state.pipeline,
            &self.0.overlay.overlay_text_path().to_string_lossy(),
            &self.0.overlay.now_playing_path().to_string_lossy(),
        );
        let mut video = WorkerHandle::spawn(video_cmd, "B", false).map_err(|source| {
            SupervisorError::SpawnFailure { process: "video", source }
        })?;
        self.attach_log_readers(&mut video);
        state.video = Some(video);

        let encoder_stdin = state
            .encoder_stdin
            .clone()
            .ok_or(SupervisorError::BrokenPipe { process: "encoder" })?;
        self.start_decoder_locked(state, start_pos, encoder_stdin)?;

        state.position = PositionModel::new();
        state.position.set_running(start_pos);
        state.status = Status::Playing;
        info!(start_pos, "pipeline started");
        Ok(())
    }

    /// Replaces decoder A only (spec §4.4/§4.6): kills any existing
    /// decoder, bumps the pump generation, spawns a fresh A at
    /// `start_pos`, and launches its pump against `encoder_stdin` — a
    /// shared handle onto the encoder's one stdin pipe, cloned for this
    /// generation rather than taken anew.
    pub(crate) fn start_decoder_locked(
        &self,
        state: &mut SupervisorState,
        start_pos: f64,
        encoder_stdin: Arc<Mutex<ChildStdin>>,
    ) -> Result<(), SupervisorError> {
        state.pump_generation += 1;
        let generation = state.pump_generation;

        if let Some(mut old) = state.decoder.take() {
            let _ = old.terminate(TERMINATE_GRACE);
        }

        let Some(path) = state.current_path() else {
            return Err(SupervisorError::EmptyPlaylist);
        };

        let cmd = command_builder::build_decoder_command(&state.pipeline.ffmpeg_path, &path, start_pos);
        let mut decoder = WorkerHandle::spawn(cmd, "A", false).map_err(|source| {
            SupervisorError::SpawnFailure { process: "decoder", source }
        })?;
        self.attach_log_readers(&mut decoder);
        let decoder_stdout = decoder
            .take_stdout()
            .ok_or(SupervisorError::BrokenPipe { process: "decoder" })?;
        state.decoder = Some(decoder);

        let supervisor = self.clone();
        std::thread::Builder::new()
            .name(format!("streamcaster-pump-{generation}"))
            .spawn(move || pump::run(supervisor, generation, decoder_stdout, encoder_stdin))
            .expect("failed to spawn pump thread");

        Ok(())
    }

    /// True iff `generation` is still the most recent decoder/pump
    /// generation — used by a running pump to detect supersession.
    pub(crate) fn is_pump_current(&self, generation: u64) -> bool {
        use crate::sync_ext::MutexExt;
        self.inner().state.lock_unpoisoned().pump_generation == generation
    }

    /// Advances to the next track (spec §4.6). `loop_queue=true` wraps at
    /// the end of the playlist; `false` stops instead.
    pub(crate) fn advance_track_locked(&self, state: &mut SupervisorState, loop_queue: bool) {
        if state.playlist.is_empty() {
            state.status = Status::Stopped;
            return;
        }

        let at_last = state.current_index + 1 >= state.playlist.len();
        if at_last && !loop_queue {
            if let Some(mut decoder) = state.decoder.take() {
                let _ = decoder.terminate(TERMINATE_GRACE);
            }
            state.status = Status::Stopped;
            state.position.reset_to(0.0);
            return;
        }

        state.current_index = if at_last { 0 } else { state.current_index + 1 };
        state.position = PositionModel::new();
        state.position.set_running(0.0);

        let encoder_alive = matches!(
            state.encoder.as_mut().map(|e| e.poll()),
            Some(Ok(None))
        );
        if !encoder_alive {
            error!("advance_track: encoder unexpectedly dead, stopping");
            state.status = Status::Stopped;
            return;
        }

        let Some(stdin) = state.encoder_stdin.clone() else {
            warn!("advance_track: no live encoder stdin, stopping");
            state.status = Status::Stopped;
            return;
        };

        if let Err(e) = self.start_decoder_locked(state, 0.0, stdin) {
            error!(error = %e, "advance_track: failed to start next decoder");
            state.status = Status::Stopped;
        }
    }

    pub(crate) fn stamp_recent_seek(&self, state: &mut SupervisorState) {
        state.recent_seek_monotonic = Some(Instant::now());
    }

    /// Whether `instant` falls within the seek-EOF suppression window
    /// (spec §4.5 item 1, §8 property 6).
    pub(crate) fn within_seek_suppression(state: &SupervisorState, instant: Instant) -> bool {
        state
            .recent_seek_monotonic
            .is_some_and(|seek_at| instant.duration_since(seek_at) < pump::SEEK_EOF_SUPPRESSION_WINDOW)
    }

    /// Wires stderr (and, for B/C, stdout) into the ring log. Decoder A's
    /// stdout is left untouched — it carries raw PCM for the pump, not
    /// text — so callers must take it via `take_stdout` before this runs,
    /// or not call this for A's stdout at all.
    fn attach_log_readers(&self, handle: &mut WorkerHandle) {
        let label = handle.label();
        if label != "A" {
            if let Some(stdout) = handle.take_stdout() {
                log_reader::spawn_line_reader(stdout, label, self.clone());
            }
        }
        if let Some(stderr) = handle.take_stderr() {
            log_reader::spawn_line_reader(stderr, label, self.clone());
        }
    }
}
