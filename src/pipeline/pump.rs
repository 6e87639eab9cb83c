use std::io::{Read, Write};
use std::process::{ChildStdin, ChildStdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};

use crate::supervisor::Supervisor;
use crate::sync_ext::MutexExt;

/// Bytes moved per read/write cycle (spec §4.5 "fixed-size byte chunks
/// (e.g., 4 KiB)").
const CHUNK_SIZE: usize = 4096;

/// Outcome of one pump's lifetime, reported back to the supervisor so it
/// can decide whether a natural end should trigger a track advance.
pub enum PumpExit {
    /// `A` hit EOF while this pump was still the current one.
    NaturalEnd,
    /// Writing to `C`'s stdin failed — the encoder is presumed dead.
    BrokenPipe,
    /// Reading from `A`'s stdout failed — the decoder is presumed dead.
    DecoderReadError,
    /// A newer pump (or an explicit stop) superseded this one; no action.
    Superseded,
}

/// Runs the PCM pump for one decoder generation: copies chunks from `A`'s
/// stdout to `C`'s stdin until EOF, a write failure, or supersession.
/// `generation` is the value captured at spawn time; the supervisor is
/// asked whether it is still current before any decision is acted on,
/// which is this build's implementation of spec §4.5's "externally
/// signaled to stop" / "stop_pump flag" conditions — both collapse to "a
/// newer generation exists" (see DESIGN.md).
///
/// `stdin` is an `Arc`-shared handle onto the encoder's one stdin pipe,
/// not an owned `ChildStdin` — `ChildStdin` can only be taken from its
/// `Child` once, and the same pipe is reused across every decoder/pump
/// restart for as long as the encoder stays alive, so every generation
/// gets its own clone of the same underlying handle rather than a second
/// `take_stdin()`.
pub fn run(
    supervisor: Supervisor,
    generation: u64,
    mut stdout: ChildStdout,
    stdin: Arc<Mutex<ChildStdin>>,
) {
    let mut buf = [0u8; CHUNK_SIZE];
    let exit = loop {
        let n = match stdout.read(&mut buf) {
            Ok(0) => {
                break if supervisor.is_pump_current(generation) {
                    PumpExit::NaturalEnd
                } else {
                    PumpExit::Superseded
                };
            }
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "pump: read from decoder failed");
                break if supervisor.is_pump_current(generation) {
                    PumpExit::DecoderReadError
                } else {
                    PumpExit::Superseded
                };
            }
        };

        if !supervisor.is_pump_current(generation) {
            break PumpExit::Superseded;
        }

        let write_result = {
            let mut stdin = stdin.lock_unpoisoned();
            stdin.write_all(&buf[..n]).and_then(|_| stdin.flush())
        };
        if let Err(e) = write_result {
            debug!(error = %e, "pump: write to encoder failed");
            break PumpExit::BrokenPipe;
        }
    };

    match exit {
        PumpExit::NaturalEnd => supervisor.on_pump_natural_end(generation),
        PumpExit::BrokenPipe => supervisor.on_pump_broken_pipe(generation),
        PumpExit::DecoderReadError => supervisor.on_pump_decoder_error(generation),
        PumpExit::Superseded => {}
    }
}

/// How recently-ended a seek must be for a subsequent decoder EOF to be
/// suppressed as spurious (spec §4.5 item 1, §5 "Cancellation / timeouts").
pub const SEEK_EOF_SUPPRESSION_WINDOW: Duration = Duration::from_secs(2);
