//! Bill Dedup - duplicate bill detection by content hash
//!
//! Bills are submitted with an amount, a date and a file. The file content
//! is hashed with SHA-256 and checked against an in-memory registry of
//! digests; the same content submitted twice is reported as a duplicate no
//! matter what amount or date accompanies it.
//!
//! # Front ends
//!
//! - A web server with an upload page and a `POST /upload` endpoint
//! - An interactive terminal form with a scrolling submission log
//!
//! # Example
//!
//! ```
//! use bill_dedup::{DuplicateRegistry, Outcome};
//!
//! let registry = DuplicateRegistry::new();
//!
//! let first = registry.submit(100, "2024-01-01", b"abc").unwrap();
//! assert!(matches!(first.outcome, Outcome::Accepted(_)));
//!
//! let again = registry.submit(200, "2024-02-02", b"abc").unwrap();
//! assert!(again.outcome.is_duplicate());
//! ```

pub mod bill;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod desktop;
pub mod error;
pub mod fs;
pub mod output;
pub mod web;

// Re-exports for convenience
pub use bill::{hash_bytes, hash_file, Bill, BillSummary};
pub use config::Config;
pub use dedup::{DuplicateRegistry, Outcome, RegistryStats, Submission};
pub use error::{Error, Result};
