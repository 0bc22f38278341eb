//! Non-fatal configuration checks

use crate::{
    error::Result,
    models::Config,
};
use url::Host;

/// Configuration validator producing warnings on top of `Config::validate`
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run hard validation, then collect warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_base_url(&config.base_url)?);
        warnings.extend(Self::validate_email(&config.email));
        warnings.extend(Self::validate_timeout(config.timeout_seconds));
        Ok(warnings)
    }

    fn validate_base_url(base_url: &str) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();
        let parsed = url::Url::parse(base_url)?;

        let is_local = match parsed.host() {
            Some(Host::Domain(domain)) => domain == "localhost" || domain.ends_with(".local"),
            Some(Host::Ipv4(ip)) => ip.is_loopback() || ip.is_private(),
            Some(Host::Ipv6(ip)) => ip.is_loopback(),
            None => false,
        };

        if parsed.scheme() == "http" && !is_local {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Base URL '{}' uses HTTP; the API key will be sent unencrypted", base_url),
            ));
        }

        if parsed.query().is_some() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Base URL '{}' includes a query string, which is replaced on every request", base_url),
            ));
        }

        Ok(warnings)
    }

    fn validate_email(email: &str) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if email.trim() != email {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Email '{}' has surrounding whitespace", email),
            ));
        }

        if email.chars().any(char::is_uppercase) {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Email '{}' contains uppercase letters; customer lookups may not match it", email),
            ));
        }

        warnings
    }

    fn validate_timeout(timeout_seconds: u64) -> Vec<ValidationWarning> {
        if timeout_seconds < 5 {
            vec![ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Timeout of {}s may be too short for WooCommerce lookups", timeout_seconds),
            )]
        } else {
            Vec::new()
        }
    }
}

/// Validation warning level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Info => "INFO",
            ValidationLevel::Warning => "WARNING",
        }
    }
}

/// Validation warning with level and message
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            use colored::Colorize;
            let tag = match self.level {
                ValidationLevel::Info => tag.blue(),
                ValidationLevel::Warning => tag.yellow(),
            };
            format!("{} {}", tag, self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
