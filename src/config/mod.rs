//! Persistent JSON configuration and saved profiles (spec §6), using an
//! atomic write-then-rename save on every file.

pub mod io;
pub mod persisted;
pub mod profiles;

pub use io::executable_sidecar_path;
pub use persisted::PersistedConfig;
pub use profiles::Profile;
