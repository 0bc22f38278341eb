//! WooCommerce Endpoint Tester
//!
//! A diagnostic tool that calls the subscriptions, orders and
//! per-subscription orders endpoints of the WooCommerce integration API one
//! after another, measures how long each call takes and saves the raw
//! responses together with a timing summary as JSON files.

pub mod cli;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod runner;
pub mod storage;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, EndpointResult, SubscriptionOrdersResult, TestSummary};
pub use client::{ApiClient, ApiResponse, HttpClient};
pub use runner::{RunReport, Runner};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
    /// Placeholder key with the accepted prefix; the real key comes from the
    /// environment or `--api-key`.
    pub const DEFAULT_API_KEY: &str = "ahc_live_sk_replace_me";
    pub const DEFAULT_EMAIL: &str = "customer@example.com";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_OUTPUT_DIR: &str = ".";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Every integration API key starts with this literal.
    pub const API_KEY_PREFIX: &str = "ahc_live_sk_";

    /// Maximum number of characters kept from a body that is not JSON.
    pub const RAW_SNIPPET_LIMIT: usize = 500;
}
