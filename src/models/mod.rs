//! Data models and structures for the endpoint tester

pub mod config;
pub mod results;

// Re-export main model types
pub use config::{Config, validate_api_key};
pub use results::{
    display_count, EndpointResult, Outcome, RunResults, SubscriptionId, SubscriptionOrdersResult,
    SubscriptionOrdersStats, TestSummary,
};
