//! In-memory registry of seen bill digests.
//!
//! The registry lives for the lifetime of the process and is never
//! persisted. It is constructed once and handed to whichever front end is
//! running; handlers may call it concurrently.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::bill::{parse_bill_date, Bill};
use crate::error::{Error, Result};

/// Result of checking a bill against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// First time this content was seen; the digest is now recorded.
    Accepted(String),
    /// The content was submitted before.
    Duplicate(String),
}

impl Outcome {
    pub fn digest(&self) -> &str {
        match self {
            Outcome::Accepted(digest) | Outcome::Duplicate(digest) => digest,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Outcome::Duplicate(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted(_) => write!(f, "accepted"),
            Outcome::Duplicate(_) => write!(f, "duplicate"),
        }
    }
}

/// A bill together with the registry's verdict on it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub bill: Bill,
    pub outcome: Outcome,
}

/// Counters reported by [`DuplicateRegistry::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub unique: usize,
    pub accepted: u64,
    pub duplicates: u64,
}

#[derive(Debug, Default)]
struct Inner {
    digests: HashSet<String>,
    accepted: u64,
    duplicates: u64,
}

/// Set of digests of every bill accepted so far.
///
/// A digest is present iff a bill with that exact content was accepted.
/// The set only grows.
#[derive(Debug, Default)]
pub struct DuplicateRegistry {
    inner: Mutex<Inner>,
}

impl DuplicateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit bill content held in memory.
    pub fn submit(&self, amount: i64, date: &str, bytes: &[u8]) -> Result<Submission> {
        let date = parse_bill_date(date)?;
        self.record(Bill::from_bytes(amount, date, bytes, ""))
    }

    /// Submit a bill stored on disk.
    pub fn submit_file(&self, amount: i64, date: &str, path: &Path) -> Result<Submission> {
        let date = parse_bill_date(date)?;
        self.record(Bill::from_path(amount, date, path))
    }

    /// Check a bill's digest and record it if it has not been seen.
    ///
    /// The membership check and the insert happen under one lock, so two
    /// identical bills racing each other cannot both be accepted.
    pub fn record(&self, bill: Bill) -> Result<Submission> {
        let digest = bill
            .digest()
            .ok_or_else(|| Error::UnreadableFile(bill.file_path().to_path_buf()))?
            .to_string();

        let mut inner = self.lock();
        let outcome = if inner.digests.insert(digest.clone()) {
            inner.accepted += 1;
            Outcome::Accepted(digest)
        } else {
            inner.duplicates += 1;
            Outcome::Duplicate(digest)
        };
        drop(inner);

        match &outcome {
            Outcome::Accepted(digest) => {
                tracing::info!(amount = bill.amount(), date = %bill.date(), "Accepted bill {}", digest)
            }
            Outcome::Duplicate(digest) => {
                tracing::warn!(amount = bill.amount(), date = %bill.date(), "Duplicate bill {}", digest)
            }
        }

        Ok(Submission { bill, outcome })
    }

    /// Check whether a digest has been recorded.
    pub fn contains(&self, digest: &str) -> bool {
        self.lock().digests.contains(digest)
    }

    /// Number of distinct digests recorded.
    pub fn len(&self) -> usize {
        self.lock().digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RegistryStats {
        let inner = self.lock();
        RegistryStats {
            unique: inner.digests.len(),
            accepted: inner.accepted,
            duplicates: inner.duplicates,
        }
    }

    // Every critical section leaves the set consistent, so a poisoned lock
    // is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
