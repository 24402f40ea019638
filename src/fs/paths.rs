//! Upload directory management.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::{create_unique_file, sanitize_filename};

/// Write an uploaded file into the upload directory, returning where it went.
///
/// The client supplied name is sanitized and, if a file of that name already
/// exists, a numeric suffix is added so earlier uploads are kept.
pub fn store_upload(upload_dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let name = sanitize_filename(filename)?;
    let (path, mut file) = create_unique_file(&upload_dir.join(name))?;

    file.write_all(content)?;
    file.sync_all()?;

    tracing::debug!("Stored upload at {} ({} bytes)", path.display(), content.len());
    Ok(path)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_store_upload_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();

        let first = store_upload(dir.path(), "bill.pdf", b"one").unwrap();
        let second = store_upload(dir.path(), "bill.pdf", b"two").unwrap();

        assert_eq!(first, dir.path().join("bill.pdf"));
        assert_eq!(second, dir.path().join("bill_1.pdf"));
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[test]
    fn test_store_upload_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            store_upload(dir.path(), "../escape.pdf", b"x"),
            Err(Error::InvalidFilename(_))
        ));
        assert!(matches!(
            store_upload(dir.path(), "..", b"x"),
            Err(Error::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_store_upload_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            store_upload(&dir.path().join("absent"), "bill.pdf", b"x"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads").join("2024");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
