//! Exercises the PCM pump (spec §4.5) against a mock media worker binary
//! instead of real `ffmpeg`, so it runs without a media toolchain on the
//! test machine.

use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use streamcaster::domain::PipelineConfig;
use streamcaster::pipeline::pump;
use streamcaster::supervisor::Supervisor;

fn mock_worker() -> &'static str {
    env!("CARGO_BIN_EXE_mock_media_worker")
}

fn test_supervisor() -> (Supervisor, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let supervisor =
        Supervisor::new(PipelineConfig::default(), dir.path()).expect("supervisor construction");
    (supervisor, dir)
}

#[test]
fn pump_returns_once_decoder_reaches_eof() {
    let (supervisor, _dir) = test_supervisor();

    let mut decoder = Command::new(mock_worker())
        .args(["decoder", "2048", "0"])
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn mock decoder");
    let mut encoder = Command::new(mock_worker())
        .arg("encoder")
        .stdin(Stdio::piped())
        .spawn()
        .expect("spawn mock encoder");

    let stdout = decoder.stdout.take().expect("decoder stdout");
    let stdin = Arc::new(Mutex::new(encoder.stdin.take().expect("encoder stdin")));

    // Runs on the test thread: the mock decoder writes a small, bounded
    // amount of data and exits promptly, so this does not hang.
    pump::run(supervisor.clone(), 0, stdout, stdin);

    decoder.wait().expect("decoder exit");
    drop(encoder.stdin.take());
    encoder.kill().ok();
    encoder.wait().ok();
}

#[test]
fn pump_does_not_hang_when_encoder_stdin_closes_early() {
    let (supervisor, _dir) = test_supervisor();

    let mut decoder = Command::new(mock_worker())
        .args(["decoder", "1048576", "1"])
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn mock decoder");
    let mut encoder = Command::new(mock_worker())
        .arg("encoder")
        .stdin(Stdio::piped())
        .spawn()
        .expect("spawn mock encoder");

    let stdout = decoder.stdout.take().expect("decoder stdout");
    let stdin = Arc::new(Mutex::new(encoder.stdin.take().expect("encoder stdin")));

    // Kill the encoder immediately so the pump's writes hit a closed pipe;
    // `pump::run` must still return rather than blocking forever.
    encoder.kill().expect("kill mock encoder");
    encoder.wait().expect("reap mock encoder");

    pump::run(supervisor.clone(), 0, stdout, stdin);

    decoder.kill().ok();
    decoder.wait().ok();
}
