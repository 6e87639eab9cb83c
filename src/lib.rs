//! `streamcaster` — a continuous live-streaming engine.
//!
//! Mixes a user-supplied playlist of audio tracks with a looping video bed
//! and pushes the result as a single uninterrupted RTMP broadcast. See
//! `SPEC_FULL.md` at the repository root for the full design.

pub mod config;
pub mod domain;
pub mod http;
pub mod logging;
pub mod overlay;
pub mod pipeline;
pub mod supervisor;
mod sync_ext;

pub use domain::error::SupervisorError;
pub use supervisor::Supervisor;
