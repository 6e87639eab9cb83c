use std::path::PathBuf;
use std::sync::Mutex;

use crate::supervisor::Supervisor;

/// Shared state handed to every `axum` handler. One instance for the
/// whole process.
pub struct AppState {
    pub supervisor: Supervisor,
    pub admin_username: String,
    pub admin_password: String,
    /// The single live session token, if any. Matches spec §6's "single
    /// admin session" model — no multi-user session table.
    pub session_token: Mutex<Option<String>>,
    pub upload_dir: PathBuf,
    pub config_path: PathBuf,
    pub profiles_path: PathBuf,
}
