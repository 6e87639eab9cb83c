use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Absolute path to an audio file. See spec §3 "PlaylistEntry".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub path: String,
}

impl PlaylistEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl From<String> for PlaylistEntry {
    fn from(path: String) -> Self {
        Self { path }
    }
}

/// An ordered sequence of audio tracks. Replaced atomically by `load` or
/// `reorder`; entries are never individually mutated (spec §3 "Lifecycles").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(paths: Vec<String>) -> Self {
        Self {
            entries: paths.into_iter().map(PlaylistEntry::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Index of `path` in this playlist, comparing entries by path string.
    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }
}

/// Mapping from absolute path string to positive floating-point seconds.
/// Populated on playlist load; survives reorder for paths still present;
/// never negative (spec §3 "DurationMap").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationMap {
    durations: HashMap<String, f64>,
}

impl DurationMap {
    pub fn get(&self, path: &str) -> Option<f64> {
        self.durations.get(path).copied()
    }

    /// Inserts a duration, ignoring non-finite or non-positive values so the
    /// "durations stored are finite and positive" invariant always holds.
    pub fn set(&mut self, path: impl Into<String>, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.durations.insert(path.into(), seconds);
        }
    }

    /// Drops every entry whose path is not in `keep`, preserving the rest —
    /// this is the "survives reorder for paths still present" behavior.
    pub fn retain_paths(&mut self, keep: &[String]) {
        let keep_set: std::collections::HashSet<&str> =
            keep.iter().map(String::as_str).collect();
        self.durations.retain(|path, _| keep_set.contains(path.as_str()));
    }

    /// Paths present in `wanted` that this map does not yet know a duration
    /// for — the set the duration probe should be run against.
    pub fn missing(&self, wanted: &[String]) -> Vec<String> {
        wanted
            .iter()
            .filter(|p| !self.durations.contains_key(p.as_str()))
            .cloned()
            .collect()
    }

    pub fn aligned_with(&self, paths: &[String]) -> Vec<Option<f64>> {
        paths.iter().map(|p| self.get(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_map_rejects_non_positive() {
        let mut map = DurationMap::default();
        map.set("a.mp3", -1.0);
        map.set("b.mp3", 0.0);
        map.set("c.mp3", f64::NAN);
        map.set("d.mp3", 10.0);
        assert_eq!(map.get("a.mp3"), None);
        assert_eq!(map.get("b.mp3"), None);
        assert_eq!(map.get("c.mp3"), None);
        assert_eq!(map.get("d.mp3"), Some(10.0));
    }

    #[test]
    fn duration_map_retains_only_known_paths() {
        let mut map = DurationMap::default();
        map.set("a.mp3", 10.0);
        map.set("b.mp3", 20.0);
        map.retain_paths(&["b.mp3".to_string()]);
        assert_eq!(map.get("a.mp3"), None);
        assert_eq!(map.get("b.mp3"), Some(20.0));
    }

    #[test]
    fn playlist_index_of_compares_by_path_string() {
        let playlist = Playlist::new(vec!["/a.mp3".to_string(), "/b.mp3".to_string()]);
        assert_eq!(playlist.index_of("/b.mp3"), Some(1));
        assert_eq!(playlist.index_of("/missing.mp3"), None);
    }
}
