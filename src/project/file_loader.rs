//! Document discovery and loading.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use walkdir::WalkDir;

/// Recursively collect files under `dir` with one of `extensions`,
/// sorted by path.
pub fn collect_file_paths(dir: &Path, extensions: &[SmolStr]) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err(format!("Directory not found: {}", dir.display()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// True if `path` ends in one of `extensions` (case-insensitive).
pub fn has_extension(path: &Path, extensions: &[SmolStr]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Read a document from disk.
pub fn load_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}
