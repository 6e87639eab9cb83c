use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Writes the two small text files the video worker's `drawtext` filters
/// re-read every frame, so overlay text changes without a pipeline restart
/// (spec §3 "Overlay state", §9 "Overlay live-reload").
pub struct OverlayFiles {
    overlay_text_path: PathBuf,
    now_playing_path: PathBuf,
}

impl OverlayFiles {
    /// Creates both files (empty) under `dir` if they do not already
    /// exist. `dir` is typically a sidecar directory next to the
    /// executable or `UPLOAD_DIR`'s parent.
    pub fn init(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating overlay directory {}", dir.display()))?;
        let overlay_text_path = dir.join("overlay_text.txt");
        let now_playing_path = dir.join("now_playing.txt");
        for path in [&overlay_text_path, &now_playing_path] {
            if !path.exists() {
                std::fs::write(path, b"")
                    .with_context(|| format!("creating {}", path.display()))?;
            }
        }
        Ok(Self {
            overlay_text_path,
            now_playing_path,
        })
    }

    pub fn overlay_text_path(&self) -> &Path {
        &self.overlay_text_path
    }

    pub fn now_playing_path(&self) -> &Path {
        &self.now_playing_path
    }

    pub fn set_overlay_text(&self, text: &str) -> Result<()> {
        std::fs::write(&self.overlay_text_path, text)
            .with_context(|| format!("writing {}", self.overlay_text_path.display()))
    }

    pub fn set_now_playing(&self, text: &str) -> Result<()> {
        std::fs::write(&self.now_playing_path, text)
            .with_context(|| format!("writing {}", self.now_playing_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_empty_files_once() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = OverlayFiles::init(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(overlay.overlay_text_path()).unwrap(), "");
        overlay.set_overlay_text("hello").unwrap();
        assert_eq!(std::fs::read_to_string(overlay.overlay_text_path()).unwrap(), "hello");

        // Re-init must not clobber existing content.
        let overlay2 = OverlayFiles::init(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(overlay2.overlay_text_path()).unwrap(), "hello");
    }

    #[test]
    fn now_playing_updates_independently_of_overlay_text() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = OverlayFiles::init(dir.path()).unwrap();
        overlay.set_overlay_text("a").unwrap();
        overlay.set_now_playing("b").unwrap();
        assert_eq!(std::fs::read_to_string(overlay.overlay_text_path()).unwrap(), "a");
        assert_eq!(std::fs::read_to_string(overlay.now_playing_path()).unwrap(), "b");
    }
}
