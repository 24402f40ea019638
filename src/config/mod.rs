//! Configuration module for bill-dedup.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, FormConfig, ServerConfig, StorageConfig};
pub use validation::validate_config;
