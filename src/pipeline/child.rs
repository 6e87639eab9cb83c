use std::io;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Bound given to every worker teardown before a force-kill (spec §5
/// "Cancellation / timeouts").
pub const TERMINATE_GRACE: Duration = Duration::from_secs(5);

/// A live media worker process (A, B, or C). Wraps `std::process::Child`
/// with the `spawn / stdin / stdout_bytes / poll / terminate(timeout) / kill`
/// shape spec §9 calls for as "a single abstraction".
pub struct WorkerHandle {
    child: Child,
    label: &'static str,
}

impl WorkerHandle {
    /// Spawns `cmd`, wiring stdin as requested. Stdout and stderr are both
    /// piped; the log-reader task (see `pipeline::log_reader`) drains both
    /// into the same ring buffer, which is the "merged for logging
    /// simplicity" behavior spec §4.2/§9 call for without requiring
    /// unsafe fd-level splicing.
    pub fn spawn(mut cmd: Command, label: &'static str, with_stdin: bool) -> io::Result<Self> {
        cmd.stdin(if with_stdin { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let child = cmd.spawn()?;
        Ok(Self { child, label })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Takes ownership of the stdin pipe, if one was requested at spawn
    /// time. Can only be called once.
    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    /// Takes ownership of the stdout pipe for a reader task.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    pub fn take_stderr(&mut self) -> Option<std::process::ChildStderr> {
        self.child.stderr.take()
    }

    /// Non-blocking liveness check. `Some(status)` once the process has
    /// exited; `None` while still running.
    pub fn poll(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    /// Sends a kill signal and reaps the process, ignoring the case where
    /// it had already exited.
    pub fn kill(&mut self) -> io::Result<()> {
        match self.child.kill() {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(e),
        }
        self.child.wait().map(|_| ())
    }

    /// Waits up to `grace` for the process to exit on its own (useful when
    /// the caller has already closed its stdin to signal shutdown), then
    /// force-kills.
    pub fn terminate(&mut self, grace: Duration) -> io::Result<ExitStatus> {
        let start = Instant::now();
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            if start.elapsed() >= grace {
                self.kill()?;
                return self.child.wait();
            }
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}
