use std::path::{Path, PathBuf};

use crate::domain::SupervisorError;

/// Resolves `file_name` against `root` and rejects it unless the
/// canonicalized result is a descendant of the canonicalized root (spec §7
/// "PermissionDenied — upload/delete outside the upload root", §8 property
/// 7). `file_name` is also rejected outright if it is absolute or contains
/// a parent-directory component, before any filesystem call, so a
/// not-yet-existing upload destination can still be validated.
pub fn resolve_within_root(root: &Path, file_name: &str) -> Result<PathBuf, SupervisorError> {
    let requested = Path::new(file_name);
    if requested.is_absolute() || requested.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(SupervisorError::PermissionDenied(file_name.to_string()));
    }

    let root_canonical = std::fs::canonicalize(root)
        .map_err(|e| SupervisorError::Other(anyhow::Error::new(e).context("canonicalizing upload root")))?;
    let candidate = root_canonical.join(requested);

    // The file may not exist yet (a fresh upload); canonicalize whatever
    // prefix does exist and re-join the rest, so traversal via symlinks in
    // existing ancestor directories is still caught.
    let canonical = canonicalize_best_effort(&candidate);

    if canonical.starts_with(&root_canonical) {
        Ok(candidate)
    } else {
        Err(SupervisorError::PermissionDenied(file_name.to_string()))
    }
}

fn canonicalize_best_effort(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    match path.parent() {
        Some(parent) if parent != path => {
            let base = canonicalize_best_effort(parent);
            match path.file_name() {
                Some(name) => base.join(name),
                None => base,
            }
        }
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_dir_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_within_root(dir.path(), "../escape.mp3");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_within_root(dir.path(), "/etc/passwd");
        assert!(result.is_err());
    }

    #[test]
    fn accepts_plain_filename() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_within_root(dir.path(), "track.mp3");
        assert!(result.is_ok());
    }
}
