use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Directory containing the running executable — the default location for
/// config/profile files when no explicit path is given via environment
/// variables.
pub fn executable_sidecar_path(file_name: &str) -> Result<PathBuf> {
    let exe = std::env::current_exe().context("resolving current executable path")?;
    let dir = exe.parent().context("executable has no parent directory")?;
    Ok(dir.join(file_name))
}

/// Reads and deserializes JSON from `path`. Returns `Ok(None)` if the file
/// does not exist yet, so callers can fall back to defaults on first run.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let value = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing JSON from {}", path.display()))?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// Serializes `value` to pretty JSON and writes it atomically: write to a
/// sibling temp file, then rename over the destination. Prevents a reader
/// from ever observing a half-written file.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .with_context(|| format!("serializing JSON for {}", path.display()))?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)
        .with_context(|| format!("writing {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} to {}", tmp_path.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn round_trips_through_atomic_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        write_json_file(&path, &Sample { value: 7 }).unwrap();
        let loaded: Option<Sample> = read_json_file(&path).unwrap();
        assert_eq!(loaded, Some(Sample { value: 7 }));
    }

    #[test]
    fn missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let loaded: Option<Sample> = read_json_file(&path).unwrap();
        assert_eq!(loaded, None);
    }
}
