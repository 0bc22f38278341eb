//! The three integration API endpoints and where their responses are saved

use crate::{
    error::{AppError, Result},
    models::SubscriptionId,
};
use url::Url;

/// Path prefix shared by every WooCommerce endpoint of the integration API
pub const API_PREFIX: &str = "api/woocommerce";

pub const SUBSCRIPTIONS_FILE: &str = "subscriptions_response.json";
pub const ORDERS_FILE: &str = "orders_response.json";
pub const SUMMARY_FILE: &str = "test_summary.json";

/// An endpoint queried during a run
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// `GET /api/woocommerce/subscriptions?email=`
    Subscriptions,
    /// `GET /api/woocommerce/orders?email=`
    Orders,
    /// `GET /api/woocommerce/subscriptions/{id}/orders?email=`
    SubscriptionOrders(SubscriptionId),
}

impl Endpoint {
    /// Human-readable name for console output and logs
    pub fn name(&self) -> String {
        match self {
            Endpoint::Subscriptions => "subscriptions".to_string(),
            Endpoint::Orders => "orders".to_string(),
            Endpoint::SubscriptionOrders(id) => format!("subscription {} orders", id),
        }
    }

    /// Build the request URL for a base URL and customer email
    pub fn url(&self, base_url: &str, email: &str) -> Result<Url> {
        let mut url = Url::parse(base_url.trim_end_matches('/'))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::config(format!("Base URL cannot carry a path: {}", base_url)))?;
            segments.pop_if_empty();
            segments.extend(API_PREFIX.split('/'));
            match self {
                Endpoint::Subscriptions => {
                    segments.push("subscriptions");
                }
                Endpoint::Orders => {
                    segments.push("orders");
                }
                Endpoint::SubscriptionOrders(id) => {
                    segments.push("subscriptions").push(&id.to_string()).push("orders");
                }
            }
        }

        url.query_pairs_mut().clear().append_pair("email", email);
        Ok(url)
    }

    /// File the raw response body is written to
    pub fn response_file(&self) -> String {
        match self {
            Endpoint::Subscriptions => SUBSCRIPTIONS_FILE.to_string(),
            Endpoint::Orders => ORDERS_FILE.to_string(),
            Endpoint::SubscriptionOrders(id) => {
                format!("subscription_{}_orders_response.json", id.file_component())
            }
        }
    }
}
