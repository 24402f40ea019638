//! Filesystem module.
//!
//! Provides:
//! - Upload directory management
//! - Filename sanitizing and collision handling

pub mod naming;
pub mod paths;

pub use naming::{create_unique_file, sanitize_filename};
pub use paths::{ensure_dir, store_upload};
