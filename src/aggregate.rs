//! Aggregation pipeline: cache check, concurrent fetches, merge, cache write
//!
//! One invocation produces one `Summary`. A fresh cached snapshot (under
//! two hours old) short-circuits the whole pipeline; otherwise the four
//! resource fetches run concurrently and each degrades to `Unknown` fields
//! on its own failure without affecting the others.

use chrono::Local;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::data::budget::{self, format_currency, format_rate, month_to_date};
use crate::data::{LunchMoneyClient, Metric, Summary};

/// Cache key for the serialized snapshot
const CACHE_KEY: &str = "lunchMoneyCache";

/// How long a cached snapshot stays fresh (2 hours)
const CACHE_MAX_AGE: Duration = Duration::from_millis(7_200_000);

/// Partial result of the linked-account fetch
struct PlaidFields {
    accounts_in_error: Metric<usize>,
    plaid_oldest_update: Metric<String>,
    hours_since_plaid_update: Metric<i64>,
}

/// Partial result of the budget fetch
struct BudgetFields {
    income: Metric<String>,
    spent: Metric<String>,
    savings: Metric<String>,
}

/// Runs the aggregation pipeline against the API and the snapshot cache
pub struct Aggregator {
    client: LunchMoneyClient,
    cache: CacheStore,
}

impl Aggregator {
    /// Creates an Aggregator over an authenticated client and a cache store
    pub fn new(client: LunchMoneyClient, cache: CacheStore) -> Self {
        Self { client, cache }
    }

    /// Returns the snapshot for this invocation
    ///
    /// Unless `force_refresh` is set, a cached snapshot younger than two
    /// hours is returned as-is with no network calls and no further
    /// freshness checks. On a miss the four fetches run concurrently, the
    /// merged snapshot is written back to the cache (write failures are
    /// non-fatal), and returned. This never fails as a whole: every fetch
    /// failure is already folded into the snapshot's fields.
    pub async fn get_summary(&self, force_refresh: bool) -> Summary {
        if !force_refresh {
            if let Some(raw) = self.cache.get(CACHE_KEY, CACHE_MAX_AGE) {
                if let Ok(summary) = serde_json::from_str::<Summary>(&raw) {
                    return summary;
                }
                // A blob that no longer deserializes counts as a miss
            }
        }

        let (pending, plaid, budget, manual) = futures::join!(
            self.fetch_pending(),
            self.fetch_plaid(),
            self.fetch_budget(),
            self.fetch_manual(),
        );

        let summary = Summary {
            pending_transactions: pending,
            income: budget.income,
            spent: budget.spent,
            savings: budget.savings,
            accounts_in_error: plaid.accounts_in_error,
            plaid_oldest_update: plaid.plaid_oldest_update,
            hours_since_plaid_update: plaid.hours_since_plaid_update,
            manual_oldest_update: manual,
        };

        if let Ok(raw) = serde_json::to_string(&summary) {
            let _ = self.cache.set(CACHE_KEY, &raw);
        }
        summary
    }

    async fn fetch_pending(&self) -> Metric<usize> {
        match self.client.fetch_pending_count().await {
            Ok(count) => Metric::Known(count),
            Err(_) => Metric::Unknown,
        }
    }

    async fn fetch_plaid(&self) -> PlaidFields {
        match self.client.fetch_plaid_health().await {
            Ok(health) => PlaidFields {
                accounts_in_error: Metric::Known(health.accounts_in_error),
                plaid_oldest_update: Metric::Known(health.oldest_update),
                hours_since_plaid_update: Metric::Known(health.hours_since_update),
            },
            Err(_) => PlaidFields {
                accounts_in_error: Metric::Unknown,
                plaid_oldest_update: Metric::Unknown,
                hours_since_plaid_update: Metric::Unknown,
            },
        }
    }

    async fn fetch_budget(&self) -> BudgetFields {
        let (start, end) = month_to_date(Local::now().date_naive());
        match self.client.fetch_budget(start, end).await {
            Ok(categories) => {
                let totals = budget::summarize(&categories);
                BudgetFields {
                    income: Metric::Known(format_currency(totals.income)),
                    spent: Metric::Known(format_currency(totals.spent)),
                    savings: match totals.savings_rate() {
                        Some(rate) => Metric::Known(format_rate(rate)),
                        None => Metric::Unknown,
                    },
                }
            }
            Err(_) => BudgetFields {
                income: Metric::Unknown,
                spent: Metric::Unknown,
                savings: Metric::Unknown,
            },
        }
    }

    async fn fetch_manual(&self) -> Metric<String> {
        match self.client.fetch_manual_staleness().await {
            Ok(line) => Metric::Known(line),
            Err(_) => Metric::Unknown,
        }
    }
}
