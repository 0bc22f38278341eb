//! Console report formatter
//!
//! Builds the progress lines and the performance summary as strings; the
//! runner decides where they are printed.

use crate::models::{display_count, Config, EndpointResult, RunResults, SubscriptionId, SubscriptionOrdersStats};
use chrono::{DateTime, Local};
use colored::*;
use std::path::Path;
use std::time::Duration;

/// Width of the separator rules
pub const RULE_WIDTH: usize = 80;

/// Format seconds as `1.234s (1234.00ms)`
pub fn format_time(seconds: f64) -> String {
    format!("{:.3}s ({:.2}ms)", seconds, seconds * 1000.0)
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

/// Formats every line the runner prints
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    use_color: bool,
    colors: ColorScheme,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            colors: ColorScheme::default(),
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn heavy_rule(&self) -> String {
        self.paint(&"=".repeat(RULE_WIDTH), self.colors.header)
    }

    fn light_rule(&self) -> String {
        self.paint(&"-".repeat(RULE_WIDTH), self.colors.muted)
    }

    fn status(&self, status_code: u16) -> String {
        let color = if status_code == 200 { self.colors.success } else { self.colors.error };
        self.paint(&status_code.to_string(), color)
    }

    /// Title block printed before the first request
    pub fn banner(&self, config: &Config, started_at: DateTime<Local>) -> String {
        [
            self.heavy_rule(),
            self.bold("WooCommerce API Performance Test"),
            self.heavy_rule(),
            format!("Base URL: {}", config.base_url),
            format!("Email: {}", config.email),
            format!("Timestamp: {}", started_at.format("%Y-%m-%d %H:%M:%S")),
            self.heavy_rule(),
            String::new(),
        ]
        .join("\n")
    }

    /// Heading of one test step
    pub fn section(&self, title: &str) -> String {
        format!("{}\n{}", self.bold(title), self.light_rule())
    }

    pub fn request_url(&self, indent: &str, url: &str) -> String {
        format!("{}URL: {}", indent, url)
    }

    /// Status, timing and count-or-error of one call
    pub fn response(&self, indent: &str, result: &EndpointResult, found_label: &str) -> String {
        let mut lines = vec![
            format!("{}Status Code: {}", indent, self.status(result.status_code)),
            format!("{}Time Taken: {}", indent, format_time(result.time_seconds)),
        ];

        match (result.count(), result.error()) {
            (Some(count), _) => lines.push(format!("{}{} Found: {}", indent, found_label, display_count(count))),
            (None, Some(error)) => {
                lines.push(format!("{}{}", indent, self.paint(&format!("❌ Error: {}", error), self.colors.error)))
            }
            (None, None) => {}
        }

        lines.join("\n")
    }

    /// Files in the working directory are shown by bare name
    pub fn saved(&self, indent: &str, path: &Path) -> String {
        let shown = path.strip_prefix(".").unwrap_or(path);
        format!("{}  {}", indent, self.paint(&format!("✓ Saved to: {}", shown.display()), self.colors.success))
    }

    /// Heading of one per-subscription request, `position` counts from 1
    pub fn subscription_heading(&self, position: usize, id: &SubscriptionId) -> String {
        format!("\n  Subscription {}: ID {}", position, id)
    }

    pub fn no_subscriptions(&self) -> String {
        "No subscriptions found, skipping subscription orders test.".to_string()
    }

    pub fn subscriptions_failed(&self) -> String {
        self.paint("Cannot fetch subscription orders - subscriptions endpoint failed.", self.colors.error)
    }

    pub fn fatal(&self, message: &str) -> String {
        self.paint(&format!("❌ ERROR: {}", message), self.colors.error)
    }

    /// Performance summary printed after the last request
    pub fn summary(&self, results: &RunResults, total: Duration) -> String {
        let mut lines = vec![
            self.heavy_rule(),
            self.bold("📊 PERFORMANCE SUMMARY"),
            self.heavy_rule(),
            String::new(),
        ];

        self.push_endpoint(&mut lines, "1. Subscriptions Endpoint:", &results.subscriptions, "subscriptions");
        self.push_endpoint(&mut lines, "2. Orders Endpoint:", &results.orders, "orders");

        if let Some(stats) = SubscriptionOrdersStats::from_results(&results.subscription_orders) {
            lines.push("3. Subscription Orders Endpoint:".to_string());
            lines.push(format!("   Total Time: {}", format_time(stats.total_seconds)));
            lines.push(format!("   Average Time: {}", format_time(stats.average_seconds)));
            lines.push(format!("   Requests: {}", stats.requests));
            for record in &results.subscription_orders {
                lines.push(format!(
                    "   - Subscription {}: {}",
                    record.subscription_id,
                    format_time(record.result.time_seconds)
                ));
            }
            lines.push(String::new());
        }

        lines.push(self.bold(&format!("Total Test Time: {}", format_time(total.as_secs_f64()))));
        lines.push(String::new());
        lines.join("\n")
    }

    fn push_endpoint(&self, lines: &mut Vec<String>, title: &str, result: &EndpointResult, noun: &str) {
        lines.push(title.to_string());
        lines.push(format!("   Time: {}", format_time(result.time_seconds)));
        lines.push(format!("   Status: {}", self.status(result.status_code)));
        if let Some(count) = result.count() {
            lines.push(format!("   Count: {} {}", display_count(count), noun));
        }
        lines.push(String::new());
    }

    /// Closing block listing the generated files
    pub fn completion(&self, files: &[String]) -> String {
        let mut lines = vec![
            self.heavy_rule(),
            self.paint("✅ Test Complete!", self.colors.success),
            self.heavy_rule(),
            String::new(),
            "Generated Files:".to_string(),
        ];
        lines.extend(files.iter().map(|file| format!("  - {}", file)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscriptionOrdersResult;
    use chrono::TimeZone;
    use serde_json::json;

    fn result(body: serde_json::Value, millis: u64, status: u16) -> EndpointResult {
        EndpointResult::from_response(&body, Duration::from_millis(millis), status)
    }

    fn plain() -> ConsoleReporter {
        ConsoleReporter::new(false)
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(1.5), "1.500s (1500.00ms)");
        assert_eq!(format_time(0.0), "0.000s (0.00ms)");
        assert_eq!(format_time(0.0123456), "0.012s (12.35ms)");
    }

    #[test]
    fn test_banner() {
        let mut config = Config::default();
        config.base_url = "https://shop.example.com".to_string();
        config.email = "jane@example.com".to_string();
        let started = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();

        let banner = plain().banner(&config, started);
        assert!(banner.starts_with(&"=".repeat(80)));
        assert!(banner.contains("WooCommerce API Performance Test"));
        assert!(banner.contains("Base URL: https://shop.example.com"));
        assert!(banner.contains("Email: jane@example.com"));
        assert!(banner.contains("Timestamp: 2026-03-04 05:06:07"));
        assert!(!banner.contains(&config.api_key));
    }

    #[test]
    fn test_response_success_and_failure() {
        let ok = plain().response("", &result(json!({"count": 3}), 1200, 200), "Orders");
        assert_eq!(ok, "Status Code: 200\nTime Taken: 1.200s (1200.00ms)\nOrders Found: 3");

        let failed = plain().response("  ", &result(json!({"error": "Request timeout"}), 60_000, 0), "Orders");
        assert!(failed.contains("  Status Code: 0"));
        assert!(failed.contains("  ❌ Error: Request timeout"));
        assert!(!failed.contains("Found"));
    }

    #[test]
    fn test_summary_with_subscription_orders() {
        let results = RunResults {
            subscriptions: result(json!({"count": 2}), 500, 200),
            orders: result(json!({"count": 9}), 250, 200),
            subscription_orders: vec![
                SubscriptionOrdersResult {
                    subscription_id: SubscriptionId::from(10),
                    result: result(json!({"count": 1}), 100, 200),
                },
                SubscriptionOrdersResult {
                    subscription_id: SubscriptionId::from(11),
                    result: result(json!({"error": "Not found"}), 300, 404),
                },
            ],
        };

        let summary = plain().summary(&results, Duration::from_millis(1200));
        assert!(summary.contains("1. Subscriptions Endpoint:\n   Time: 0.500s (500.00ms)\n   Status: 200\n   Count: 2 subscriptions"));
        assert!(summary.contains("   Count: 9 orders"));
        assert!(summary.contains("   Total Time: 0.400s (400.00ms)"));
        assert!(summary.contains("   Average Time: 0.200s (200.00ms)"));
        assert!(summary.contains("   Requests: 2"));
        assert!(summary.contains("   - Subscription 10: 0.100s (100.00ms)"));
        assert!(summary.contains("   - Subscription 11: 0.300s (300.00ms)"));
        assert!(summary.contains("Total Test Time: 1.200s (1200.00ms)"));

        let ten = summary.find("Subscription 10").unwrap();
        let eleven = summary.find("Subscription 11").unwrap();
        assert!(ten < eleven);
    }

    #[test]
    fn test_summary_without_subscription_orders() {
        let results = RunResults {
            subscriptions: result(json!({"error": "boom"}), 10, 500),
            orders: result(json!({"error": "boom"}), 10, 500),
            subscription_orders: vec![],
        };

        let summary = plain().summary(&results, Duration::from_millis(30));
        assert!(!summary.contains("3. Subscription Orders Endpoint"));
        assert!(!summary.contains("Count:"));
        assert!(summary.contains("   Status: 500"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let reporter = plain();
        let text = reporter.fatal("API key must start with 'ahc_live_sk_'");
        assert_eq!(text, "❌ ERROR: API key must start with 'ahc_live_sk_'");
        assert!(!reporter.section("📦 Test 2: Fetching All Orders").contains('\x1b'));
    }

    #[test]
    fn test_completion_lists_files() {
        let text = plain().completion(&["orders_response.json".to_string(), "test_summary.json".to_string()]);
        assert!(text.contains("✅ Test Complete!"));
        assert!(text.ends_with("Generated Files:\n  - orders_response.json\n  - test_summary.json"));
    }

    #[test]
    fn test_saved_shows_bare_name_in_working_directory() {
        let reporter = plain();
        let default_dir = Path::new(".").join("subscriptions_response.json");
        assert_eq!(reporter.saved("", &default_dir), "  ✓ Saved to: subscriptions_response.json");
        assert_eq!(
            reporter.saved("  ", Path::new("runs/orders_response.json")),
            "    ✓ Saved to: runs/orders_response.json"
        );
    }

    #[test]
    fn test_counts_are_shown_as_sent() {
        let float = plain().response("", &result(json!({"count": 2.0}), 0, 200), "Orders");
        assert!(float.ends_with("Orders Found: 2.0"));

        let text = plain().response("", &result(json!({"count": "3"}), 0, 200), "Subscriptions");
        assert!(text.ends_with("Subscriptions Found: 3"));
    }

    #[test]
    fn test_subscription_heading() {
        assert_eq!(plain().subscription_heading(2, &SubscriptionId::from(77)), "\n  Subscription 2: ID 77");
    }
}
