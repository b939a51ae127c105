use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, SearchError};

/// Find the run folder the trainer created under `root` for `prefix`.
///
/// Candidates are sorted by name and the first is used. Several matches mean
/// a stale folder shares the prefix; that is reported, not resolved.
pub fn discover_folder(root: &Path, prefix: &str) -> Result<PathBuf> {
    let mut matches: Vec<String> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| name.starts_with(prefix))
        .collect();
    matches.sort();

    let Some(first) = matches.first() else {
        return Err(SearchError::FolderNotFound {
            prefix: prefix.to_string(),
            root: root.to_path_buf(),
        });
    };

    if matches.len() > 1 {
        warn!(
            prefix,
            chosen = %first,
            others = ?&matches[1..],
            "Several run folders share the trial prefix"
        );
    }

    Ok(root.join(first))
}

/// Names of the entries in `root`, for diagnostics.
pub fn list_entries(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter_map(|e| e.file_name().into_string().ok())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
