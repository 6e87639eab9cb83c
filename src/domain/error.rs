use thiserror::Error;

/// Errors surfaced at the supervisor's public API boundary. Internal
/// plumbing uses `anyhow::Result` with `.context()`; call sites that need
/// to report a structured cause (notably the HTTP layer, see
/// `crate::http::error`) convert into this enum at the edge.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("no RTMP URL or video file configured")]
    ConfigMissing,

    #[error("failed to spawn {process}: {source}")]
    SpawnFailure {
        process: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("encoder process exited unexpectedly (code {code:?})")]
    EncoderCrash { code: Option<i32> },

    #[error("decoder process exited unexpectedly (code {code:?})")]
    DecoderCrash { code: Option<i32> },

    #[error("broken pipe writing to {process}")]
    BrokenPipe { process: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
