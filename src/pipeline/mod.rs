//! Subprocess worker management for the three media workers (spec §4.2–
//! §4.4): command construction, the live-process handle, the PCM pump, the
//! crash-recovery watcher, and the duration probe.

pub mod child;
pub mod command_builder;
pub mod log_reader;
pub mod probe;
pub mod pump;
pub mod watcher;

pub use child::{TERMINATE_GRACE, WorkerHandle};
