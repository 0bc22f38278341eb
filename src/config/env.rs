//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file from the current directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load a specific env file if it exists
    ///
    /// Variables already present in the process environment are not
    /// overwritten.
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                println!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            println!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# WooCommerce Endpoint Tester Configuration
#
# Values here are used as defaults and can be overridden by real
# environment variables or command-line arguments.

# Base URL of the API (without trailing slash)
# WOO_BASE_URL=https://your-domain.com

# API key, must start with 'ahc_live_sk_'
# WOO_API_KEY=ahc_live_sk_...

# Email address of the customer to look up
# WOO_EMAIL=customer@example.com

# Request timeout in seconds (1-300)
# WOO_TIMEOUT_SECONDS=60

# Directory the JSON response files are written to
# WOO_OUTPUT_DIR=.

# Enable colored output (true/false)
# ENABLE_COLOR=true
"#.to_string()
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        std::fs::write(path, Self::create_example_env_content())
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "WOO_BASE_URL" => {
                url::Url::parse(value.trim())
                    .map_err(|e| AppError::config(format!("Invalid WOO_BASE_URL '{}': {}", value, e)))?;
            }
            "WOO_API_KEY" => {
                crate::models::validate_api_key(value.trim())?;
            }
            "WOO_EMAIL" => {
                if !value.contains('@') {
                    return Err(AppError::config(format!("Invalid WOO_EMAIL '{}'", value)));
                }
            }
            "WOO_TIMEOUT_SECONDS" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid WOO_TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > 300 {
                    return Err(AppError::config(format!("WOO_TIMEOUT_SECONDS must be between 1 and 300, got: {}", timeout)));
                }
            }
            "WOO_OUTPUT_DIR" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("WOO_OUTPUT_DIR cannot be empty"));
                }
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("WOO_BASE_URL", "Base URL of the integration API", "https://your-domain.com"),
            ("WOO_API_KEY", "API key (must start with ahc_live_sk_)", "ahc_live_sk_..."),
            ("WOO_EMAIL", "Customer email to query", "customer@example.com"),
            ("WOO_TIMEOUT_SECONDS", "Request timeout in seconds (1-300)", "60"),
            ("WOO_OUTPUT_DIR", "Directory for the JSON response files", "./responses"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<20} {}\n", var, description));
            help.push_str(&format!("  {:<20} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(var_name, _, _)| {
                let value = std::env::var(var_name).ok()?;
                Self::validate_env_var(var_name, &value).err().map(|e| format!("Warning: {}", e))
            })
            .collect()
    }
}
