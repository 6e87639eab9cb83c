use serde::{Deserialize, Serialize};

/// Player status. See spec §3 "Status".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Stopped,
    Paused,
    Playing,
    Error,
}

impl Default for Status {
    fn default() -> Self {
        Self::Stopped
    }
}
