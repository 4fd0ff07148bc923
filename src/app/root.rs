use crate::app::error::SerializeError;
use std::path::{Path, PathBuf};

/// Entries whose presence marks a project root.
const PROJECT_MARKERS: &[&str] = &[".git", ".gitignore"];

/// Canonicalizes `root_dir` and, for full-project runs, climbs to the project root.
pub fn resolve_root(root_dir: &Path, full_project: bool) -> Result<PathBuf, SerializeError> {
    let root = root_dir
        .canonicalize()
        .map_err(|e| SerializeError::InvalidRoot {
            path: root_dir.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !root.is_dir() {
        return Err(SerializeError::InvalidRoot {
            path: root_dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    if !full_project {
        return Ok(root);
    }

    match find_project_root(&root) {
        Some(project_root) => {
            log::debug!("Project root resolved to {}", project_root.display());
            Ok(project_root)
        }
        None => {
            log::warn!(
                "No project root found above {}; using it as the root",
                root.display()
            );
            Ok(root)
        }
    }
}

/// Nearest ancestor of `start` (inclusive) holding one of the project markers.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|m| dir.join(m).exists()))
        .map(Path::to_path_buf)
}
