//! Configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the integration API, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `X-API-Key`
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Customer email the endpoints are queried for
    #[serde(default = "default_email")]
    pub email: String,

    /// Request timeout duration
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Directory the JSON response files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Exit with a failure code when any request fails
    #[serde(default)]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            email: default_email(),
            timeout_seconds: default_timeout_secs(),
            output_dir: default_output_dir(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            strict: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Strip trailing slashes and surrounding whitespace from user input
    pub fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self.api_key = self.api_key.trim().to_string();
    }

    /// Validate the configuration and return any errors
    ///
    /// The API key prefix is not checked here; the runner does that as its
    /// first step so a bad key is reported before anything else happens.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(AppError::config("Base URL cannot be empty"));
        }

        match url::Url::parse(&self.base_url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!(
                        "Base URL must use http or https: {}",
                        self.base_url
                    )));
                }
                if parsed.host_str().is_none() {
                    return Err(AppError::config(format!("Base URL has no host: {}", self.base_url)));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!("Invalid base URL '{}': {}", self.base_url, e)));
            }
        }

        if self.email.trim().is_empty() {
            return Err(AppError::config("Email cannot be empty"));
        }

        if !self.email.contains('@') {
            return Err(AppError::config(format!("Invalid email address: {}", self.email)));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > 300 {
            return Err(AppError::config("Timeout cannot exceed 300 seconds"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(AppError::config("Output directory cannot be empty"));
        }

        Ok(())
    }

    /// API key with everything but the prefix and last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let prefix = crate::defaults::API_KEY_PREFIX;
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= prefix.len() + 4 {
            return "*".repeat(chars.len());
        }
        let head = if self.api_key.starts_with(prefix) { prefix.to_string() } else { String::new() };
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    }

    /// Merge `WOO_*` environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_vars(|key| std::env::var(key).ok())
    }

    /// Merge variables from any lookup source
    pub fn merge_from_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("WOO_BASE_URL") {
            self.base_url = base_url;
        }

        if let Some(api_key) = lookup("WOO_API_KEY") {
            self.api_key = api_key;
        }

        if let Some(email) = lookup("WOO_EMAIL") {
            self.email = email;
        }

        if let Some(timeout) = lookup("WOO_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid WOO_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Some(output_dir) = lookup("WOO_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// Check that an API key carries the required literal prefix
pub fn validate_api_key(api_key: &str) -> Result<()> {
    let prefix = crate::defaults::API_KEY_PREFIX;
    if api_key.starts_with(prefix) {
        Ok(())
    } else {
        Err(AppError::config(format!("API key must start with '{}'", prefix)))
    }
}

// Default value functions for serde
fn default_base_url() -> String {
    crate::defaults::DEFAULT_BASE_URL.to_string()
}

fn default_api_key() -> String {
    crate::defaults::DEFAULT_API_KEY.to_string()
}

fn default_email() -> String {
    crate::defaults::DEFAULT_EMAIL.to_string()
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_OUTPUT_DIR)
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
