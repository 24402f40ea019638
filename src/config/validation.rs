//! Configuration validation logic.

use std::net::SocketAddr;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_bind_address(&config.server.bind_address)?;
    validate_max_upload_bytes(config.server.max_upload_bytes)?;
    validate_upload_dir(&config.storage.upload_dir.to_string_lossy())?;
    validate_log_capacity(config.form.log_capacity)?;

    Ok(())
}

/// Validate the server bind address.
pub fn validate_bind_address(address: &str) -> Result<SocketAddr> {
    address.parse::<SocketAddr>().map_err(|e| Error::ConfigValidation {
        field: "bind_address".to_string(),
        message: format!("'{}' is not a valid socket address: {}", address, e),
    })
}

/// Validate the request body limit.
pub fn validate_max_upload_bytes(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::ConfigValidation {
            field: "max_upload_bytes".to_string(),
            message: "Upload limit must be greater than zero".to_string(),
        });
    }

    Ok(())
}

/// Validate the upload directory.
pub fn validate_upload_dir(dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "upload_dir".to_string(),
            message: "Upload directory cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate the log panel capacity.
pub fn validate_log_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(Error::ConfigValidation {
            field: "log_capacity".to_string(),
            message: "Log panel must keep at least one line".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_bind_address() {
        assert!(validate_bind_address("127.0.0.1:5000").is_ok());
        assert!(validate_bind_address("[::1]:8080").is_ok());
        assert!(validate_bind_address("localhost").is_err());
        assert!(validate_bind_address("127.0.0.1:99999").is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(validate_max_upload_bytes(0).is_err());
        assert!(validate_log_capacity(0).is_err());
    }

    #[test]
    fn test_empty_upload_dir_rejected() {
        let mut config = Config::default();
        config.storage.upload_dir = "".into();
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { field, .. }) if field == "upload_dir"
        ));
    }
}
