use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::supervisor::Supervisor;

/// Poll interval for the crash-recovery watcher (spec §4.7 "polling at 1 Hz").
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns the watcher as a named background thread. Returns a handle whose
/// `Arc<AtomicBool>` can be flipped to stop the loop on process shutdown.
pub fn spawn(supervisor: Supervisor) -> Arc<AtomicBool> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    std::thread::Builder::new()
        .name("streamcaster-watcher".to_string())
        .spawn(move || {
            while !shutdown_clone.load(Ordering::Relaxed) {
                supervisor.watcher_tick();
                std::thread::sleep(POLL_INTERVAL);
            }
        })
        .expect("failed to spawn watcher thread");
    shutdown
}
