//! Linked-account health from `/v1/plaid_accounts`
//!
//! Two things matter for the widget: how many linked accounts have fallen
//! out of a healthy sync status, and how stale the oldest balance is.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::client::{ApiError, LunchMoneyClient};
use super::format_relative;

/// Statuses that do not count as an account error
const ACCEPTED_STATUSES: [&str; 3] = ["active", "inactive", "syncing"];

/// Response shape of `/v1/plaid_accounts`
#[derive(Debug, Deserialize)]
pub struct PlaidAccountsResponse {
    pub plaid_accounts: Vec<PlaidAccount>,
}

/// A linked account as reported by the aggregation provider
#[derive(Debug, Clone, Deserialize)]
pub struct PlaidAccount {
    /// Provider sync status, e.g. "active" or "error"
    pub status: String,
    /// When the balance was last refreshed
    pub balance_last_update: DateTime<Utc>,
}

/// Derived linked-account health
#[derive(Debug, Clone, PartialEq)]
pub struct PlaidHealth {
    /// Accounts whose status is outside the accepted set
    pub accounts_in_error: usize,
    /// Age of the stalest balance, human readable
    pub oldest_update: String,
    /// Hours since the stalest balance refresh, rounded
    pub hours_since_update: i64,
}

/// Reduces the account list to its health summary
///
/// The stalest timestamp starts at `now`, so an empty list (or one with
/// only future timestamps) reports zero elapsed hours.
pub fn summarize(accounts: &[PlaidAccount], now: DateTime<Utc>) -> PlaidHealth {
    let oldest = accounts
        .iter()
        .map(|account| account.balance_last_update)
        .fold(now, |oldest, update| if update < oldest { update } else { oldest });

    let accounts_in_error = accounts
        .iter()
        .filter(|account| !ACCEPTED_STATUSES.contains(&account.status.as_str()))
        .count();

    let elapsed = now - oldest;
    PlaidHealth {
        accounts_in_error,
        oldest_update: format_relative(elapsed),
        hours_since_update: (elapsed.num_milliseconds() as f64 / 3_600_000.0).round() as i64,
    }
}

impl LunchMoneyClient {
    /// Fetches all linked accounts and reduces them to a health summary
    pub async fn fetch_plaid_health(&self) -> Result<PlaidHealth, ApiError> {
        let value = self.get_json("/v1/plaid_accounts", &[]).await?;
        let response: PlaidAccountsResponse = serde_json::from_value(value)?;
        Ok(summarize(&response.plaid_accounts, Utc::now()))
    }
}
