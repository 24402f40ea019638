//! The bill record built for each submission.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::bill::fields::DATE_FORMAT;
use crate::bill::hash::{hash_bytes, hash_file};

/// A submitted bill.
///
/// The digest is computed when the record is built and cannot be changed
/// afterwards. `None` means the file content could not be read.
#[derive(Debug, Clone)]
pub struct Bill {
    amount: i64,
    date: NaiveDate,
    file_path: PathBuf,
    digest: Option<String>,
}

/// Display form of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillSummary {
    pub amount: i64,
    pub date: String,
    pub hash: Option<String>,
}

impl Bill {
    /// Build a bill from a file on disk, hashing its content.
    pub fn from_path(amount: i64, date: NaiveDate, file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        let digest = match hash_file(&file_path) {
            Ok(digest) => Some(digest),
            Err(e) => {
                tracing::warn!("Failed to hash {}: {}", file_path.display(), e);
                None
            }
        };

        Self {
            amount,
            date,
            file_path,
            digest,
        }
    }

    /// Build a bill from content already held in memory.
    pub fn from_bytes(
        amount: i64,
        date: NaiveDate,
        bytes: &[u8],
        file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            amount,
            date,
            file_path: file_path.into(),
            digest: Some(hash_bytes(bytes)),
        }
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn summary(&self) -> BillSummary {
        BillSummary {
            amount: self.amount,
            date: self.date.format(DATE_FORMAT).to_string(),
            hash: self.digest.clone(),
        }
    }
}
