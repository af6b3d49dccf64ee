//! HTTP plumbing for the Lunch Money API
//!
//! All resources share one authenticated GET shape: bearer token, JSON
//! content type, and query parameters appended in the order given. Query
//! values are not URL-encoded; the parameters this widget sends (limits,
//! statuses, ISO dates, currency codes) never need it.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;

/// Base URL for the Lunch Money API
const LUNCH_MONEY_BASE_URL: &str = "https://dev.lunchmoney.app";

/// Errors that can occur when talking to the API
///
/// These propagate to the per-resource fetch and are absorbed at the
/// aggregation boundary, never past it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-success HTTP status
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Authenticated client for the Lunch Money API
#[derive(Debug, Clone)]
pub struct LunchMoneyClient {
    http: Client,
    base_url: String,
    token: String,
}

impl LunchMoneyClient {
    /// Creates a client for the production API with the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: LUNCH_MONEY_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    /// Overrides the base URL (used by tests)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Issues a GET request and parses the body as JSON
    ///
    /// Fails on transport errors, HTTP error statuses, and non-JSON bodies.
    /// Callers are responsible for catching; there is no retry.
    pub async fn get_json(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}{}{}", self.base_url, path, build_query(params));
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Builds a query string from ordered key/value pairs
///
/// The first pair is prefixed with `?`, the rest with `&`, in slice order.
/// Values are appended verbatim.
pub fn build_query(params: &[(&str, String)]) -> String {
    let mut query = String::new();
    for (i, (key, value)) in params.iter().enumerate() {
        query.push(if i == 0 { '?' } else { '&' });
        query.push_str(key);
        query.push('=');
        query.push_str(value);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_empty_params() {
        assert_eq!(build_query(&[]), "");
    }

    #[test]
    fn test_build_query_single_param() {
        assert_eq!(build_query(&[("limit", "250".to_string())]), "?limit=250");
    }

    #[test]
    fn test_build_query_first_pair_prefixed_with_question_mark() {
        let query = build_query(&[("a", "1".to_string()), ("b", "x".to_string())]);
        assert_eq!(query, "?a=1&b=x");
    }

    #[test]
    fn test_build_query_preserves_slice_order() {
        let query = build_query(&[
            ("start_date", "2026-08-01".to_string()),
            ("end_date", "2026-08-29".to_string()),
            ("currency", "EUR".to_string()),
        ]);
        assert_eq!(
            query,
            "?start_date=2026-08-01&end_date=2026-08-29&currency=EUR"
        );
    }

    #[test]
    fn test_build_query_values_are_not_encoded() {
        // Values are appended verbatim; callers must not pass values that
        // would need URL-encoding.
        let query = build_query(&[("status", "uncleared".to_string())]);
        assert_eq!(query, "?status=uncleared");
    }

    #[test]
    fn test_client_base_url_override() {
        let client = LunchMoneyClient::new("token").with_base_url("http://127.0.0.1:9");
        assert_eq!(client.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn test_client_defaults_to_production_base_url() {
        let client = LunchMoneyClient::new("token");
        assert_eq!(client.base_url, LUNCH_MONEY_BASE_URL);
    }
}
