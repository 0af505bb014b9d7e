//! Configuration loading from YAML files, `.env` files and the environment.
//!
//! Precedence, lowest first: built-in defaults, the YAML file, then the
//! `TFE_*` environment variables (after an optional `.env` file has been
//! loaded into the process environment).

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::settings::ClientConfig;

/// Environment variable holding the API address.
pub const ENV_ADDRESS: &str = "TFE_ADDRESS";

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "TFE_TOKEN";

/// Environment variable overriding the API base path.
pub const ENV_BASE_PATH: &str = "TFE_BASE_PATH";

/// Environment variable overriding the request timeout.
pub const ENV_TIMEOUT_SECS: &str = "TFE_TIMEOUT_SECS";

/// Loader for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving the `.env` file.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the directory the `.env` file is looked up in.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ClientConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to read file: {e}"),
            location: Some(path.display().to_string()),
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ClientConfig> {
        debug!("Parsing YAML configuration");

        let config: ClientConfig = serde_yaml::from_str(content).map_err(|e| {
            ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            }
        })?;

        debug!("Parsed configuration for address: {}", config.address);
        Ok(config)
    }

    /// Loads a YAML file, then applies `.env` and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or the `.env` file cannot be loaded, or
    /// an override has an invalid value.
    pub fn load_with_env(&self, path: impl AsRef<Path>) -> Result<ClientConfig> {
        let mut config = self.load_file(path)?;
        self.load_dotenv()?;
        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Builds a configuration from defaults, `.env` and the environment only.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file cannot be loaded or an override
    /// has an invalid value.
    pub fn from_env(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::default();
        self.load_dotenv()?;
        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Applies `TFE_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if `TFE_TIMEOUT_SECS` is not a number.
    pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = lookup(ENV_ADDRESS) {
            debug!("Overriding address from environment");
            config.address = address;
        }

        if let Some(token) = lookup(ENV_TOKEN) {
            debug!("Overriding token from environment");
            config.token = token;
        }

        if let Some(base_path) = lookup(ENV_BASE_PATH) {
            debug!("Overriding base_path from environment");
            config.base_path = base_path;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            debug!("Overriding timeout_secs from environment");
            config.timeout_secs = timeout.trim().parse().map_err(|e| {
                ConfigError::validation(
                    format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds: {e}"),
                    "timeout_secs",
                )
            })?;
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to load .env file: {e}"),
                location: Some(env_path.display().to_string()),
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["tfe.yaml", "tfe.yml", ".tfe.yaml", ".tfe.yml"];

/// Finds the configuration file in the given directory or its parents.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    Err(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }
    .into())
}
