//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// WooCommerce Endpoint Tester - measure the integration API endpoints and save their responses
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "woo-endpoint-tester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the API, without trailing slash (e.g. https://your-domain.com)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// API key, must start with 'ahc_live_sk_'
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Customer email to query
    #[arg(short, long)]
    pub email: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Directory the JSON response files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Exit with a non-zero code when any request fails
    #[arg(long)]
    pub strict: bool,

    /// Show supported environment variables and exit
    #[arg(long)]
    pub env_help: bool,

    /// Write an example .env file to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub write_env_example: Option<PathBuf>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 || timeout > 300 {
                return Err(format!("--timeout must be between 1 and 300 seconds, got {}", timeout));
            }
        }

        Ok(())
    }

    /// Color preference from the flags, `None` when neither was given
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Whether the invocation only prints help or writes a file
    pub fn is_info_only(&self) -> bool {
        self.env_help || self.write_env_example.is_some()
    }
}
