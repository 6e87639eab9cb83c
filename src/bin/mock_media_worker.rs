//! Stand-in for `ffmpeg`/`ffprobe` in integration tests, built alongside
//! `streamd` so tests can locate it via `env!("CARGO_BIN_EXE_mock_media_worker")`
//! without requiring a real media toolchain on the test machine.
//!
//! Two calling conventions are supported:
//!
//! - Direct mode, selected by a literal first argument (`decoder`,
//!   `encoder`, `video`, `probe`) — used by tests that drive
//!   `pipeline::pump::run` straight, without going through a `Supervisor`.
//! - ffmpeg-argv mode — used when this binary is pointed to by
//!   `PipelineConfig::ffmpeg_path`/`ffprobe_path` and invoked with the
//!   actual argv `command_builder` produces. The role is sniffed from
//!   recognizable flags/positions rather than a mode keyword, since the
//!   caller has no opportunity to prepend one:
//!   - `-show_entries` present → probe: prints a duration and exits.
//!   - `-stream_loop` present → video: sleeps until killed.
//!   - last arg is `pipe:1` → decoder: writes a bounded amount of PCM to
//!     stdout, then exits 0.
//!   - otherwise (has `pipe:0` as an input) → encoder: reads stdin to EOF,
//!     then exits 0.
//!
//! `MOCK_DECODER_BYTES` and `MOCK_DECODER_DELAY_MS` override the decoder's
//! output size and per-chunk delay in ffmpeg-argv mode (direct mode takes
//! these as positional args instead).

use std::io::{Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("decoder") => {
            let total: usize = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(4096);
            let delay_ms: u64 = args.get(3).and_then(|v| v.parse().ok()).unwrap_or(1);
            run_decoder(total, delay_ms);
        }
        Some("encoder") => run_encoder(),
        Some("video") => run_video(),
        Some("probe") => {
            let seconds = args.get(2).map(String::as_str).unwrap_or("10.0");
            print!("{seconds}");
        }
        _ => run_ffmpeg_argv(&args[1..]),
    }
}

/// Sniffs an ffmpeg/ffprobe-style argv for which of the three media roles
/// it corresponds to, since a real invocation has no mode keyword to match
/// on — only the flags and pipe endpoints `command_builder` produces.
fn run_ffmpeg_argv(args: &[String]) {
    if args.iter().any(|a| a == "-show_entries") {
        let seconds = std::env::var("MOCK_PROBE_SECONDS").unwrap_or_else(|_| "5.0".to_string());
        print!("{seconds}");
        return;
    }
    if args.iter().any(|a| a == "-stream_loop") {
        run_video();
        return;
    }
    if args.last().map(String::as_str) == Some("pipe:1") {
        let total: usize = std::env::var("MOCK_DECODER_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(65536);
        let delay_ms: u64 = std::env::var("MOCK_DECODER_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        run_decoder(total, delay_ms);
        return;
    }
    if args.iter().any(|a| a == "pipe:0") {
        run_encoder();
        return;
    }
    eprintln!("mock_media_worker: unrecognized argv, treating as a no-op probe");
    print!("0.0");
}

/// Writes `total` zero bytes to stdout in small chunks with a delay between
/// them, then exits 0 (simulates a finite audio track).
fn run_decoder(total: usize, delay_ms: u64) {
    let chunk = vec![0u8; 256];
    let mut written = 0;
    let mut stdout = std::io::stdout();
    while written < total {
        let n = chunk.len().min(total - written);
        if stdout.write_all(&chunk[..n]).is_err() {
            break;
        }
        let _ = stdout.flush();
        written += n;
        std::thread::sleep(std::time::Duration::from_millis(delay_ms));
    }
}

/// Reads stdin to EOF, discarding it, then exits 0 (simulates the
/// long-lived encoder consuming PCM until the pipe closes).
fn run_encoder() {
    let mut sink = Vec::new();
    let _ = std::io::stdin().read_to_end(&mut sink);
}

/// Sleeps until killed (simulates the looping video worker, which never
/// exits on its own).
fn run_video() -> ! {
    loop {
        std::thread::sleep(std::time::Duration::from_secs(3600));
    }
}
