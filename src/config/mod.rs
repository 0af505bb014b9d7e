//! Configuration module for the TFE client.
//!
//! This module handles all configuration-related functionality:
//! - Loading settings from `tfe.yaml`, `.env` and `TFE_*` variables
//! - Validation of the address, base path and token

mod parser;
mod settings;
mod validator;

pub use parser::{
    ConfigParser, DEFAULT_CONFIG_FILES, ENV_ADDRESS, ENV_BASE_PATH, ENV_TIMEOUT_SECS, ENV_TOKEN,
    find_config_file,
};
pub use settings::{ClientConfig, DEFAULT_ADDRESS, DEFAULT_BASE_PATH, DEFAULT_TIMEOUT_SECS};
pub use validator::{ConfigValidator, ValidationIssue, ValidationResult};
