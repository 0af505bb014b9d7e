//! Validation of client configuration.
//!
//! Runs before a client is built so a bad address or a missing token fails
//! immediately instead of on the first request.

use crate::error::{ConfigError, Result};
use reqwest::Url;
use tracing::debug;

use super::settings::ClientConfig;

/// Validator for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ConfigValidator {
    /// Whether an empty token is accepted.
    allow_anonymous: bool,
}

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationIssue>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation issue.
#[derive(Debug)]
pub struct ValidationIssue {
    /// The field that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a validator that requires a token.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_anonymous: false,
        }
    }

    /// Accepts configurations without a token.
    #[must_use]
    pub const fn allow_anonymous(mut self) -> Self {
        self.allow_anonymous = true;
        self
    }

    /// Validates a client configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error found.
    pub fn validate(&self, config: &ClientConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        Self::validate_address(&config.address, &mut result);
        Self::validate_base_path(&config.base_path, &mut result);
        self.validate_token(&config.token, &mut result);

        if config.timeout_secs == 0 {
            result.errors.push(ValidationIssue {
                field: String::from("timeout_secs"),
                message: String::from("Timeout must be at least 1 second"),
            });
        }

        match result.errors.first() {
            None => {
                debug!("Configuration validation passed");
                Ok(result)
            }
            Some(first) => Err(ConfigError::validation(
                first.message.clone(),
                first.field.clone(),
            )
            .into()),
        }
    }

    fn validate_address(address: &str, result: &mut ValidationResult) {
        if address.trim().is_empty() {
            result.errors.push(ValidationIssue {
                field: String::from("address"),
                message: String::from("Address cannot be empty"),
            });
            return;
        }

        match Url::parse(address) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.errors.push(ValidationIssue {
                        field: String::from("address"),
                        message: format!("Address scheme '{}' is not http or https", url.scheme()),
                    });
                } else if url.scheme() == "http" {
                    result
                        .warnings
                        .push(String::from("Address uses plain http; the token is sent unencrypted"));
                }
                if url.cannot_be_a_base() {
                    result.errors.push(ValidationIssue {
                        field: String::from("address"),
                        message: format!("Address '{address}' cannot be used as a base URL"),
                    });
                }
            }
            Err(e) => {
                result.errors.push(ValidationIssue {
                    field: String::from("address"),
                    message: format!("Address '{address}' is not a valid URL: {e}"),
                });
            }
        }
    }

    fn validate_base_path(base_path: &str, result: &mut ValidationResult) {
        if !base_path.starts_with('/') {
            result.errors.push(ValidationIssue {
                field: String::from("base_path"),
                message: format!("Base path '{base_path}' must start with '/'"),
            });
        }
    }

    fn validate_token(&self, token: &str, result: &mut ValidationResult) {
        if token.is_empty() {
            if self.allow_anonymous {
                result
                    .warnings
                    .push(String::from("No API token configured; requests are anonymous"));
            } else {
                result.errors.push(ValidationIssue {
                    field: String::from("token"),
                    message: String::from("API token is required"),
                });
            }
        } else if token.chars().any(char::is_control) {
            result.errors.push(ValidationIssue {
                field: String::from("token"),
                message: String::from("API token contains control characters"),
            });
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
