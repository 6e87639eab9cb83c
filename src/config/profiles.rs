use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::io::{read_json_file, write_json_file};

/// A saved RTMP/encoder preset (spec §6 "Profiles file").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub url: String,
    pub audio_bitrate: String,
    pub video_bitrate: String,
    pub maxrate: String,
    pub bufsize: String,
    pub video_fps: u32,
}

pub fn load(path: &Path) -> Result<Vec<Profile>> {
    Ok(read_json_file(path)?.unwrap_or_default())
}

pub fn save(path: &Path, profiles: &[Profile]) -> Result<()> {
    write_json_file(path, &profiles.to_vec())
}

/// Inserts or replaces the profile named `profile.name`, then persists the
/// full array.
pub fn upsert(path: &Path, profile: Profile) -> Result<Vec<Profile>> {
    let mut profiles = load(path)?;
    if let Some(existing) = profiles.iter_mut().find(|p| p.name == profile.name) {
        *existing = profile;
    } else {
        profiles.push(profile);
    }
    save(path, &profiles)?;
    Ok(profiles)
}

/// Removes the profile named `name`. Errors if no such profile exists, so
/// the HTTP layer can map this to 404 (spec §7 "missing profile to 404").
pub fn delete(path: &Path, name: &str) -> Result<Vec<Profile>> {
    let mut profiles = load(path)?;
    let before = profiles.len();
    profiles.retain(|p| p.name != name);
    if profiles.len() == before {
        bail!("profile not found: {name}");
    }
    save(path, &profiles).context("saving profiles after delete")?;
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_then_delete_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");

        let profile = Profile {
            name: "main".to_string(),
            url: "rtmp://h/l/k".to_string(),
            audio_bitrate: "320k".to_string(),
            video_bitrate: "800k".to_string(),
            maxrate: "800k".to_string(),
            bufsize: "1600k".to_string(),
            video_fps: 24,
        };
        let after_insert = upsert(&path, profile.clone()).unwrap();
        assert_eq!(after_insert, vec![profile.clone()]);

        let after_delete = delete(&path, "main").unwrap();
        assert!(after_delete.is_empty());
    }

    #[test]
    fn delete_missing_profile_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        save(&path, &[]).unwrap();
        assert!(delete(&path, "missing").is_err());
    }
}
