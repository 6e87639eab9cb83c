use tracing_subscriber::EnvFilter;

/// Initializes the global `tracing` subscriber. Defaults to `info`,
/// overridable via `RUST_LOG` (spec SPEC_FULL §4.11). This is the one
/// process-wide call; everything else just emits events through the
/// `tracing` macros.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
