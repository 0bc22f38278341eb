//! Test run orchestration
//!
//! A run validates the API key, then fetches subscriptions, all orders and
//! the orders of every returned subscription, strictly one request after
//! another. Each response body is saved as soon as it arrives; the summary
//! is written last.

use crate::{
    client::{ApiResponse, HttpClient},
    endpoints::{Endpoint, SUMMARY_FILE},
    error::Result,
    logging::RequestLogger,
    models::{validate_api_key, Config, EndpointResult, RunResults, SubscriptionId, SubscriptionOrdersResult, TestSummary},
    output::ConsoleReporter,
    storage::ResponseWriter,
};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: TestSummary,
    /// Files written, in the order they were written
    pub files: Vec<PathBuf>,
}

impl RunReport {
    pub fn results(&self) -> &RunResults {
        &self.summary.results
    }

    pub fn total_time(&self) -> Duration {
        Duration::from_secs_f64(self.summary.total_time_seconds)
    }

    pub fn has_failures(&self) -> bool {
        self.results().failed_count() > 0
    }
}

/// Runs the endpoint checks against one API
pub struct Runner<C: HttpClient> {
    config: Config,
    client: C,
    writer: ResponseWriter,
    reporter: ConsoleReporter,
    logger: RequestLogger,
    out: Box<dyn Write + Send>,
}

impl<C: HttpClient> Runner<C> {
    /// Create a runner that prints its report to stdout
    pub fn new(config: Config, client: C) -> Self {
        let writer = ResponseWriter::new(config.output_dir.clone());
        let reporter = ConsoleReporter::new(config.enable_color);
        let logger = RequestLogger::new(&config);

        Self {
            config,
            client,
            writer,
            reporter,
            logger,
            out: Box::new(io::stdout()),
        }
    }

    /// Send the console report somewhere other than stdout
    pub fn with_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self
    }

    pub fn with_logger(mut self, logger: RequestLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    /// Execute the whole run
    ///
    /// Request failures are recorded, not returned. Only a bad API key or a
    /// failure to write output files ends the run early.
    pub async fn run(&mut self) -> Result<RunReport> {
        let banner = self.reporter.banner(&self.config, chrono::Local::now());
        self.emit(&banner)?;

        if let Err(e) = validate_api_key(&self.config.api_key) {
            let message = self.reporter.fatal(&format!("API key must start with '{}'", crate::defaults::API_KEY_PREFIX));
            self.emit(&message)?;
            self.logger.logger().fatal("Aborting run").error_info(&e).log().await;
            return Err(e);
        }

        self.writer.prepare()?;
        self.logger.logger().start_session().await;

        let mut files = Vec::new();
        let total_start = Instant::now();

        // Test 1: subscriptions
        let title = self.reporter.section("📋 Test 1: Fetching Subscriptions");
        self.emit(&title)?;
        let (subscriptions_response, subscriptions) =
            self.check_endpoint(Endpoint::Subscriptions, "", "Subscriptions", &mut files).await?;
        self.emit("")?;

        // Test 2: orders, regardless of how test 1 went
        let title = self.reporter.section("📦 Test 2: Fetching All Orders");
        self.emit(&title)?;
        let (_, orders) = self.check_endpoint(Endpoint::Orders, "", "Orders", &mut files).await?;
        self.emit("")?;

        // Test 3: orders of every subscription
        let title = self.reporter.section("🔗 Test 3: Fetching Orders for Each Subscription");
        self.emit(&title)?;
        let mut subscription_orders = Vec::new();

        match subscription_list(&subscriptions_response) {
            None => {
                let message = self.reporter.subscriptions_failed();
                self.emit(&message)?;
            }
            Some(list) if list.is_empty() => {
                let message = self.reporter.no_subscriptions();
                self.emit(&message)?;
            }
            Some(list) => {
                for (position, subscription) in list.iter().enumerate() {
                    let Some(id) = SubscriptionId::from_subscription(subscription) else {
                        continue;
                    };

                    let heading = self.reporter.subscription_heading(position + 1, &id);
                    self.emit(&heading)?;
                    let (_, result) = self
                        .check_endpoint(Endpoint::SubscriptionOrders(id.clone()), "  ", "Orders", &mut files)
                        .await?;
                    subscription_orders.push(SubscriptionOrdersResult { subscription_id: id, result });
                }
            }
        }
        self.emit("")?;

        let results = RunResults {
            subscriptions,
            orders,
            subscription_orders,
        };

        let total = total_start.elapsed();
        let report = self.reporter.summary(&results, total);
        self.emit(&report)?;

        let summary = TestSummary::new(&self.config.base_url, &self.config.email, results, total);
        let path = self.writer.write_json(SUMMARY_FILE, &summary)?;
        let saved = self.reporter.saved("", &path);
        self.emit(&saved)?;
        files.push(path);

        let names: Vec<String> = files
            .iter()
            .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .collect();
        let completion = self.reporter.completion(&names);
        self.emit(&completion)?;

        self.logger.logger().info("Run finished")
            .field("requests", summary.results.request_count())
            .field("failed", summary.results.failed_count())
            .field("total_time_ms", summary.total_time_ms)
            .log()
            .await;

        Ok(RunReport { summary, files })
    }

    /// Request one endpoint, print its outcome and save the body
    async fn check_endpoint(
        &mut self,
        endpoint: Endpoint,
        indent: &str,
        found_label: &str,
        files: &mut Vec<PathBuf>,
    ) -> Result<(ApiResponse, EndpointResult)> {
        let url = endpoint.url(&self.config.base_url, &self.config.email)?;
        let line = self.reporter.request_url(indent, url.as_str());
        self.emit(&line)?;

        let name = endpoint.name();
        let correlation_id = self.logger.request_started(&name, url.as_str()).await;
        let response = self.client.get_json(&url).await;
        self.logger.request_completed(&correlation_id, &name, &response).await;

        let result = EndpointResult::from_response(&response.body, response.elapsed, response.status_code);
        let lines = self.reporter.response(indent, &result, found_label);
        self.emit(&lines)?;

        let path = self.writer.write_json(&endpoint.response_file(), &response.body)?;
        self.logger.file_saved(&path).await;
        let saved = self.reporter.saved(indent, &path);
        self.emit(&saved)?;
        files.push(path);

        Ok((response, result))
    }
}

/// Subscription objects of a subscriptions response
///
/// `None` when the call did not return 200 or the body has no
/// `subscriptions` field; a field that is not an array counts as empty.
pub fn subscription_list(response: &ApiResponse) -> Option<Vec<Value>> {
    if !response.is_success() {
        return None;
    }
    let field = response.body.get("subscriptions")?;
    Some(field.as_array().cloned().unwrap_or_default())
}
