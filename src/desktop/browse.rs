//! File browsing for the bill field.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// List the regular, non-hidden files in a directory, sorted by name.
pub fn list_bill_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if !hidden {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Resolve a 1-based selection from a browse listing.
pub fn pick(files: &[PathBuf], selection: &str) -> Option<PathBuf> {
    let index: usize = selection.trim().parse().ok()?;
    files.get(index.checked_sub(1)?).cloned()
}
