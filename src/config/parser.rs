//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::{AppError, Result},
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        self.cli.validate().map_err(AppError::config)?;

        EnvManager::load_env_file(self.cli.debug)?;

        let mut config = Config::default();
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Build the configuration from an explicit variable source, skipping
    /// the process environment and any .env file
    pub fn parse_with_vars<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.cli.validate().map_err(AppError::config)?;

        let mut config = Config::default();
        config.merge_from_vars(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref base_url) = self.cli.base_url {
            config.base_url = base_url.clone();
        }

        if let Some(ref api_key) = self.cli.api_key {
            config.api_key = api_key.clone();
        }

        if let Some(ref email) = self.cli.email {
            config.email = email.clone();
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(ref output_dir) = self.cli.output_dir {
            config.output_dir = output_dir.clone();
        }

        if let Some(enable_color) = self.cli.color_override() {
            config.enable_color = enable_color;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        config.strict = self.cli.strict;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    [
        format!("Base URL: {}", config.base_url),
        format!("API Key: {}", config.masked_api_key()),
        format!("Email: {}", config.email),
        format!("Timeout: {}s", config.timeout_seconds),
        format!("Output Directory: {}", config.output_dir.display()),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
        format!("Strict: {}", config.strict),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["woo-endpoint-tester"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults_without_vars() {
        let config = ConfigParser::new(cli(&[])).parse_with_vars(|_| None).unwrap();
        assert_eq!(config.base_url, crate::defaults::DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, 60);
        assert!(!config.strict);
    }

    #[test]
    fn test_cli_overrides_env() {
        let env: HashMap<&str, &str> = [
            ("WOO_BASE_URL", "https://from-env.example.com"),
            ("WOO_EMAIL", "env@example.com"),
            ("WOO_TIMEOUT_SECONDS", "20"),
        ]
        .into_iter()
        .collect();

        let config = ConfigParser::new(cli(&["--email", "cli@example.com", "--strict", "--no-color"]))
            .parse_with_vars(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "https://from-env.example.com");
        assert_eq!(config.email, "cli@example.com");
        assert_eq!(config.timeout_seconds, 20);
        assert!(config.strict);
        assert!(!config.enable_color);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = ConfigParser::new(cli(&["--base-url", "https://shop.example.com/", "-o", "runs"]))
            .parse_with_vars(|_| None)
            .unwrap();
        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.output_dir, PathBuf::from("runs"));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let result = ConfigParser::new(cli(&["--base-url", "nope"])).parse_with_vars(|_| None);
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = ConfigParser::new(cli(&["--color", "--no-color"])).parse_with_vars(|_| None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_bad_api_key_passes_parsing() {
        // The prefix check happens when the run starts
        let config = ConfigParser::new(cli(&["--api-key", "wrong"])).parse_with_vars(|_| None).unwrap();
        assert_eq!(config.api_key, "wrong");
    }

    #[test]
    fn test_display_config_summary_masks_key() {
        let mut config = Config::default();
        config.api_key = "ahc_live_sk_0123456789abcdef".to_string();
        let summary = display_config_summary(&config);
        assert!(summary.contains("API Key: ahc_live_sk_****cdef"));
        assert!(!summary.contains("0123456789"));
    }
}
