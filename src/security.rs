use regex::Regex;

use crate::errors::{AppError, AppResult};

/// Hard ceiling the hosting service enforces per upload.
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

pub struct InputValidator;

impl InputValidator {
    pub fn validate_api_key(key: &str) -> AppResult<()> {
        let trimmed = key.trim();

        if trimmed.is_empty() {
            return Err(AppError::validation("api_key", "API key cannot be empty"));
        }

        if trimmed.len() < 16 || trimmed.len() > 128 {
            return Err(AppError::validation(
                "api_key",
                "API key length must be between 16 and 128 characters",
            ));
        }

        // Keys are opaque tokens; reject anything that cannot appear in a form field
        let safe_chars = Regex::new(r"^[A-Za-z0-9_\-]+$").unwrap();
        if !safe_chars.is_match(trimmed) {
            return Err(AppError::validation(
                "api_key",
                "API key contains invalid characters",
            ));
        }

        Ok(())
    }

    pub fn validate_endpoint(url: &str) -> AppResult<()> {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            return Err(AppError::validation("endpoint", "Endpoint cannot be empty"));
        }

        // http is allowed so tests can point the client at a local listener
        let endpoint_pattern = Regex::new(r"^https?://[^\s]+$").unwrap();
        if !endpoint_pattern.is_match(trimmed) {
            return Err(AppError::validation(
                "endpoint",
                "Endpoint must be an http(s) URL",
            ));
        }

        if trimmed.len() > 500 {
            return Err(AppError::validation("endpoint", "Endpoint URL too long"));
        }

        Ok(())
    }

    pub fn validate_payload(payload: &[u8]) -> AppResult<()> {
        if payload.is_empty() {
            return Err(AppError::validation("payload", "Payload cannot be empty"));
        }

        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(AppError::validation(
                "payload",
                "Payload exceeds the 64 MiB service limit",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key_accepts_hex_key() {
        assert!(InputValidator::validate_api_key("6d207e02198a847aa98d0a2a901485a5").is_ok());
    }

    #[test]
    fn test_validate_api_key_rejects_bad_input() {
        assert!(InputValidator::validate_api_key("").is_err());
        assert!(InputValidator::validate_api_key("short").is_err());
        assert!(InputValidator::validate_api_key("key with spaces and more padding").is_err());
        assert!(InputValidator::validate_api_key(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(InputValidator::validate_endpoint("https://freeimage.host/api/1/upload").is_ok());
        assert!(InputValidator::validate_endpoint("http://127.0.0.1:8080/upload").is_ok());
        assert!(InputValidator::validate_endpoint("ftp://example.com").is_err());
        assert!(InputValidator::validate_endpoint("").is_err());
    }

    #[test]
    fn test_validate_payload() {
        assert!(InputValidator::validate_payload(&[]).is_err());
        assert!(InputValidator::validate_payload(&[0u8; 16]).is_ok());
    }
}
