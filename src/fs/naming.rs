//! Filename handling for uploaded bills.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Maximum numeric suffix tried by [`create_unique_file`].
const MAX_SUFFIX: u32 = 1000;

/// Validate and sanitize a client supplied filename.
///
/// Browsers send only a base name, so anything that could address another
/// directory is rejected outright. Characters that are invalid on common
/// filesystems are replaced with `_`.
pub fn sanitize_filename(name: &str) -> Result<String> {
    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    // Without separators the only way to leave the directory is a bare dot name
    if matches!(name.trim(), "." | "..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(
            "Null bytes not allowed in filename".to_string(),
        ));
    }

    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Create a new file at `path`, or at `stem_N.ext` if that name is taken.
///
/// Each candidate is opened with `create_new`, so the name is reserved
/// atomically and an existing file is never truncated, even when several
/// uploads with the same name arrive at once.
pub fn create_unique_file(path: &Path) -> Result<(PathBuf, File)> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for counter in 0..=MAX_SUFFIX {
        let candidate = match counter {
            0 => path.to_path_buf(),
            n if ext.is_empty() => parent.join(format!("{}_{}", stem, n)),
            n => parent.join(format!("{}_{}.{}", stem, n, ext)),
        };

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }

    Err(Error::Io(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!(
            "no free name for {} after {} attempts",
            path.display(),
            MAX_SUFFIX
        ),
    )))
}
