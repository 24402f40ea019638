//! Error types for the bill-dedup application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Submission errors
    #[error("Missing fields: {0}")]
    MissingField(String),

    #[error("Invalid amount '{0}': expected a whole number")]
    InvalidAmount(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Could not read bill file: {}", .0.display())]
    UnreadableFile(PathBuf),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Malformed upload: {0}")]
    Upload(String),

    #[error("Upload exceeds the {0} byte limit")]
    UploadTooLarge(usize),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Whether the error was caused by what the user submitted, as opposed to
    /// a failure on our side.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_)
                | Error::InvalidAmount(_)
                | Error::InvalidDate(_)
                | Error::InvalidFilename(_)
                | Error::Upload(_)
                | Error::UploadTooLarge(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 3;
    pub const SERVER_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
