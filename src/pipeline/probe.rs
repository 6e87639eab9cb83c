use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::pipeline::command_builder::build_probe_command;

/// Stderr bytes captured from a probe invocation are only used for log
/// lines, never parsed; this bounds memory for a pathological ffprobe.
const PROBE_STDERR_LIMIT: usize = 4096;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs ffprobe against `track_path` and parses a single floating-point
/// number of seconds from stdout. Returns `None` on any error, non-finite
/// result, or non-positive duration (spec §4.8).
pub fn probe_duration(ffprobe_path: &str, track_path: &str) -> Option<f64> {
    let (result, _stderr) = probe_duration_verbose(ffprobe_path, track_path);
    result
}

/// Same as `probe_duration`, but also returns any captured stderr so the
/// caller can log why a probe failed.
pub fn probe_duration_verbose(ffprobe_path: &str, track_path: &str) -> (Option<f64>, Vec<u8>) {
    let cmd = build_probe_command(ffprobe_path, track_path);
    let Ok((status, stdout, stderr)) = run_capturing(cmd, PROBE_TIMEOUT, PROBE_STDERR_LIMIT)
    else {
        return (None, Vec::new());
    };
    if !status.success() {
        return (None, stderr);
    }
    let text = String::from_utf8_lossy(&stdout);
    let parsed = text.trim().parse::<f64>().ok();
    let seconds = parsed.filter(|s| s.is_finite() && *s > 0.0);
    (seconds, stderr)
}

fn run_capturing(
    mut cmd: Command,
    timeout: Duration,
    stderr_capture_limit: usize,
) -> std::io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn()?;

    let mut stdout_pipe = child.stdout.take();
    let stdout_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stdout_pipe.take() {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    });

    let mut stderr_pipe = child.stderr.take();
    let stderr_handle = std::thread::spawn(move || {
        let mut captured = Vec::new();
        if let Some(mut pipe) = stderr_pipe.take() {
            let mut buf = [0u8; 4096];
            loop {
                match pipe.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if captured.len() < stderr_capture_limit {
                            let remaining = stderr_capture_limit - captured.len();
                            let to_copy = remaining.min(n);
                            captured.extend_from_slice(&buf[..to_copy]);
                        }
                    }
                }
            }
        }
        captured
    });

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            break child.wait()?;
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    Ok((status, stdout, stderr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_numeric_output() {
        // `echo` stands in for ffprobe's stdout contract without requiring
        // a real media toolchain in the test environment.
        let (result, _) = probe_duration_verbose("echo", "not-a-number");
        assert_eq!(result, None);
    }
}
