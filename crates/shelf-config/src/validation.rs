// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths, and well-formed route prefixes.

use crate::diagnostic::ConfigError;
use crate::model::ShelfConfig;

/// Log levels accepted by `app.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShelfConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.name must not be empty".to_string(),
        });
    }

    let level = config.app.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    let prefix = &config.server.api_prefix;
    if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.api_prefix `{prefix}` must start with `/` and must not end with `/`"
            ),
        });
    }
    if let Some(problem) = prefix_segment_problem(prefix) {
        errors.push(ConfigError::Validation {
            message: format!("server.api_prefix `{prefix}` {problem}"),
        });
    }

    if config.storage.database_file.as_os_str().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_file must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The router mounts the API under a literal path, so the prefix may not
/// carry route syntax or empty segments.
fn prefix_segment_problem(prefix: &str) -> Option<&'static str> {
    if prefix.contains(['*', '{', '}']) {
        return Some("must not contain route syntax (`*`, `{`, `}`)");
    }
    let segments: Vec<&str> = prefix.trim_start_matches('/').split('/').collect();
    if prefix.len() > 1 && segments.iter().any(|segment| segment.is_empty()) {
        return Some("must not contain empty segments (`//`)");
    }
    if segments.iter().any(|segment| segment.starts_with(':')) {
        return Some("must not contain segments starting with `:`");
    }
    None
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = ShelfConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_file_fails_validation() {
        let mut config = ShelfConfig::default();
        config.storage.database_file = PathBuf::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "database_file"));
    }

    #[test]
    fn bad_host_fails_validation() {
        let mut config = ShelfConfig::default();
        config.server.host = "not a host!".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "server.host"));
    }

    #[test]
    fn trailing_slash_prefix_fails_validation() {
        let mut config = ShelfConfig::default();
        config.server.api_prefix = "/api/".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "api_prefix"));
    }

    #[test]
    fn wildcard_prefix_fails_validation() {
        let mut config = ShelfConfig::default();
        config.server.api_prefix = "/api/*rest".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "route syntax"));
    }

    #[test]
    fn capture_prefix_fails_validation() {
        for prefix in ["/api/{version}", "/api/{", "/api}"] {
            let mut config = ShelfConfig::default();
            config.server.api_prefix = prefix.to_string();
            let errors = validate_config(&config).unwrap_err();
            assert!(has_error(&errors, "route syntax"), "{prefix} should be rejected");
        }
    }

    #[test]
    fn empty_segment_prefix_fails_validation() {
        let mut config = ShelfConfig::default();
        config.server.api_prefix = "/api//v1".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "empty segments"));
    }

    #[test]
    fn colon_segment_prefix_fails_validation() {
        let mut config = ShelfConfig::default();
        config.server.api_prefix = "/api/:version".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "`:`"));
    }

    #[test]
    fn nested_literal_prefix_is_allowed() {
        let mut config = ShelfConfig::default();
        config.server.api_prefix = "/shop/api-v2".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_prefix_is_allowed() {
        let mut config = ShelfConfig::default();
        config.server.api_prefix = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = ShelfConfig::default();
        config.app.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "log_level"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = ShelfConfig::default();
        config.app.name = " ".to_string();
        config.server.host = String::new();
        config.storage.database_file = PathBuf::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = ShelfConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.api_prefix = "/v1".to_string();
        config.storage.database_file = PathBuf::from("/var/lib/shelf/db.json");
        config.app.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
