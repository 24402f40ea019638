//! Duplicate detection.
//!
//! Provides the process-lifetime registry of bill digests and the outcome of
//! checking a bill against it.

pub mod registry;

pub use registry::{DuplicateRegistry, Outcome, RegistryStats, Submission};
