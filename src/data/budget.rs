//! Month-to-date budget totals from `/v1/budgets`
//!
//! The budget endpoint returns one entry per category with a per-period
//! data bucket and an optional list of recurring items. The widget reduces
//! that to three figures: income, non-recurring spend, and the savings
//! rate derived from both.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;

use super::client::{ApiError, LunchMoneyClient};
use super::transactions::CURRENCY;

/// A budget category entry as returned by `/v1/budgets`
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetCategory {
    /// Whether amounts in this category count as income
    #[serde(default)]
    pub is_income: bool,
    /// Excluded from the budget entirely
    #[serde(default)]
    pub exclude_from_budget: bool,
    /// Excluded from totals
    #[serde(default)]
    pub exclude_from_totals: bool,
    /// Category groups aggregate their children and are skipped
    #[serde(default)]
    pub is_group: bool,
    /// Per-period buckets; for a month-to-date query there is exactly one
    #[serde(default)]
    pub data: HashMap<String, BudgetBucket>,
    /// Recurring items attributed to this category
    #[serde(default)]
    pub recurring: Option<Recurring>,
}

/// The aggregate figures for one period within a category
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetBucket {
    /// Spend in the base currency for this period
    pub spending_to_base: Option<f64>,
}

/// Recurring-item block on a category
#[derive(Debug, Clone, Deserialize)]
pub struct Recurring {
    #[serde(default)]
    pub list: Vec<RecurringItem>,
}

/// A single recurring item
#[derive(Debug, Clone, Deserialize)]
pub struct RecurringItem {
    /// Amount in the base currency
    pub to_base: f64,
}

/// Summed month-to-date figures across all counted categories
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetTotals {
    pub income: f64,
    pub spent: f64,
}

impl BudgetTotals {
    /// Savings rate as a percentage, `None` when there is no income
    ///
    /// The upstream data can legitimately produce a negative rate; a zero
    /// income month would divide by zero, so it is reported as unknown
    /// instead.
    pub fn savings_rate(&self) -> Option<f64> {
        if self.income == 0.0 {
            None
        } else {
            Some((self.income - self.spent) / self.income * 100.0)
        }
    }
}

/// Reduces the category list to income and spend totals
///
/// Categories that are excluded from the budget, excluded from totals, or
/// are groups do not count. Each remaining category contributes the
/// absolute spend of its single data bucket; income categories also add
/// their recurring items.
pub fn summarize(categories: &[BudgetCategory]) -> BudgetTotals {
    let mut totals = BudgetTotals::default();
    for category in categories {
        if category.exclude_from_budget || category.exclude_from_totals || category.is_group {
            continue;
        }
        let non_recurring = category
            .data
            .values()
            .next()
            .and_then(|bucket| bucket.spending_to_base)
            .unwrap_or(0.0)
            .abs();
        let recurring: f64 = category
            .recurring
            .as_ref()
            .map(|r| r.list.iter().map(|item| item.to_base.abs()).sum())
            .unwrap_or(0.0);
        if category.is_income {
            totals.income += non_recurring + recurring;
        } else {
            // Recurring amounts are already reflected in the category's
            // bucket, so adding them here would double-count spend.
            totals.spent += non_recurring;
        }
    }
    totals
}

/// Formats an amount in the widget's fixed currency
pub fn format_currency(amount: f64) -> String {
    format!("\u{20AC}{:.2}", amount)
}

/// Formats a savings rate percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// Month-to-date date range for a given day: first of its month through it
pub fn month_to_date(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today.with_day(1).unwrap_or(today), today)
}

impl LunchMoneyClient {
    /// Fetches budget categories for the given date range
    pub async fn fetch_budget(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<BudgetCategory>, ApiError> {
        let params = [
            ("start_date", start_date.format("%Y-%m-%d").to_string()),
            ("end_date", end_date.format("%Y-%m-%d").to_string()),
            ("currency", CURRENCY.to_string()),
        ];
        let value = self.get_json("/v1/budgets", &params).await?;
        Ok(serde_json::from_value(value)?)
    }
}
