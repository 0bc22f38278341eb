//! Per-request result records and the run summary

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Fallback message when a failed response carries no `error` field
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Either the item count of a successful call or the error of a failed one
///
/// The count is kept exactly as the server sent it, whatever its JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Count { count: Value },
    Error { error: String },
}

/// Timing and status of a single endpoint call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
    pub time_seconds: f64,
    pub time_ms: f64,
    /// HTTP status, 0 when no response was received
    pub status_code: u16,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl EndpointResult {
    /// Build the record for a response body, elapsed time and status
    ///
    /// A 200 yields the body's `count` (0 only when absent), anything else yields
    /// the body's `error` message.
    pub fn from_response(body: &Value, elapsed: Duration, status_code: u16) -> Self {
        let time_seconds = elapsed.as_secs_f64();
        let outcome = if status_code == 200 {
            Outcome::Count { count: extract_count(body) }
        } else {
            Outcome::Error { error: extract_error(body) }
        };

        Self {
            time_seconds,
            time_ms: time_seconds * 1000.0,
            status_code,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    pub fn count(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Count { count } => Some(count),
            Outcome::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Count { .. } => None,
            Outcome::Error { error } => Some(error),
        }
    }
}

/// `count` of a success body, 0 when the key is missing
pub fn extract_count(body: &Value) -> Value {
    body.get("count").cloned().unwrap_or_else(|| Value::from(0))
}

/// Console form of a count; strings are shown without quotes
pub fn display_count(count: &Value) -> String {
    match count {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// `error` of a failure body
///
/// Strings are taken as-is, other non-null values are kept as JSON text.
pub fn extract_error(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Subscription identifier exactly as the server returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Value);

impl SubscriptionId {
    /// Read the `id` of a subscription object
    ///
    /// Returns `None` for a missing id and for null, `false`, `0` and `""`.
    pub fn from_subscription(subscription: &Value) -> Option<Self> {
        let id = subscription.get("id")?;
        let present = match id {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
            Value::String(text) => !text.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        };
        present.then(|| Self(id.clone()))
    }

    /// Form used inside file names, path separators replaced
    pub fn file_component(&self) -> String {
        self.to_string()
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
            .collect()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(text) => write!(f, "{}", text),
            other => write!(f, "{}", other),
        }
    }
}

impl From<i64> for SubscriptionId {
    fn from(id: i64) -> Self {
        Self(Value::from(id))
    }
}

/// Result of fetching the orders of one subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionOrdersResult {
    pub subscription_id: SubscriptionId,
    #[serde(flatten)]
    pub result: EndpointResult,
}

/// Aggregate timing over the per-subscription calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptionOrdersStats {
    pub total_seconds: f64,
    pub average_seconds: f64,
    pub requests: usize,
}

impl SubscriptionOrdersStats {
    /// `None` when no per-subscription call was made
    pub fn from_results(results: &[SubscriptionOrdersResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        let total_seconds: f64 = results.iter().map(|r| r.result.time_seconds).sum();
        Some(Self {
            total_seconds,
            average_seconds: total_seconds / results.len() as f64,
            requests: results.len(),
        })
    }
}

/// All results of one run, keyed by endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    pub subscriptions: EndpointResult,
    pub orders: EndpointResult,
    pub subscription_orders: Vec<SubscriptionOrdersResult>,
}

impl RunResults {
    /// Total number of requests issued
    pub fn request_count(&self) -> usize {
        2 + self.subscription_orders.len()
    }

    /// Number of requests that did not return 200
    pub fn failed_count(&self) -> usize {
        [&self.subscriptions, &self.orders]
            .into_iter()
            .chain(self.subscription_orders.iter().map(|r| &r.result))
            .filter(|r| !r.is_success())
            .count()
    }

    /// Elapsed time of the two top-level calls plus every subscription call
    pub fn summed_request_seconds(&self) -> f64 {
        self.subscriptions.time_seconds
            + self.orders.time_seconds
            + self.subscription_orders.iter().map(|r| r.result.time_seconds).sum::<f64>()
    }
}

/// Summary written to `test_summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSummary {
    /// ISO-8601 local time the summary was produced
    pub timestamp: String,
    pub base_url: String,
    pub email: String,
    pub results: RunResults,
    pub total_time_seconds: f64,
    pub total_time_ms: f64,
}

impl TestSummary {
    pub fn new(base_url: &str, email: &str, results: RunResults, total: Duration) -> Self {
        let total_time_seconds = total.as_secs_f64();
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            base_url: base_url.to_string(),
            email: email.to_string(),
            results,
            total_time_seconds,
            total_time_ms: total_time_seconds * 1000.0,
        }
    }
}
