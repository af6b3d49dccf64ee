//! Core data models for the Lunch Money widget
//!
//! This module contains the aggregated snapshot (`Summary`), the per-field
//! `Metric` sum type that makes degraded fetches explicit, the mood
//! classification shown under the numbers, and shared time formatting.

pub mod assets;
pub mod budget;
pub mod client;
pub mod plaid;
pub mod transactions;

pub use client::{ApiError, LunchMoneyClient};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A metric that either resolved to a value or degraded on fetch failure
///
/// Every field of the snapshot is independently optional: one resource
/// failing must not take the others down, so failures collapse to `Unknown`
/// instead of propagating. Rendering code is forced to handle both arms;
/// `Display` shows the `?` placeholder for the unknown case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Metric<T> {
    /// The fetch succeeded and produced this value
    Known(T),
    /// The backing fetch failed; render as a placeholder
    Unknown,
}

impl<T> Metric<T> {
    /// Returns the contained value, if known
    #[allow(dead_code)]
    pub fn known(&self) -> Option<&T> {
        match self {
            Metric::Known(value) => Some(value),
            Metric::Unknown => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Metric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Known(value) => value.fmt(f),
            Metric::Unknown => write!(f, "?"),
        }
    }
}

/// The merged, render-ready snapshot for one invocation
///
/// This is what gets serialized into the cache, so fields keep stable
/// names. All fields degrade independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Count of uncleared transactions in the configured currency
    pub pending_transactions: Metric<usize>,
    /// Month-to-date income, formatted as currency
    pub income: Metric<String>,
    /// Month-to-date non-recurring spend, formatted as currency
    pub spent: Metric<String>,
    /// Savings rate `(income - spent) / income * 100`, formatted; may be negative
    pub savings: Metric<String>,
    /// Linked accounts whose sync status is outside the accepted set
    pub accounts_in_error: Metric<usize>,
    /// Age of the stalest linked-account balance, human readable
    pub plaid_oldest_update: Metric<String>,
    /// Hours since the stalest linked-account balance refresh
    pub hours_since_plaid_update: Metric<i64>,
    /// Stalest manually-tracked balance, with the account name (informational only)
    pub manual_oldest_update: Metric<String>,
}

/// Mood classification derived from the snapshot
///
/// Account errors take precedence over a negative savings rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    /// More than one linked account needs re-linking
    NeedsAttention,
    /// Savings rate is negative this month
    RoughMonth,
    /// Everything looks healthy
    DoingGreat,
}

impl Mood {
    /// Classifies a snapshot; pure function of its fields
    pub fn classify(summary: &Summary) -> Self {
        if let Metric::Known(count) = summary.accounts_in_error {
            if count > 1 {
                return Mood::NeedsAttention;
            }
        }
        if let Metric::Known(ref savings) = summary.savings {
            if savings.starts_with('-') {
                return Mood::RoughMonth;
            }
        }
        Mood::DoingGreat
    }

    /// Message rendered at the bottom of the widget
    pub fn message(&self) -> &'static str {
        match self {
            Mood::NeedsAttention => "\u{1F9FE} Some accounts need your attention.",
            Mood::RoughMonth => "\u{1F4B3} Looks rough, try and save more!",
            Mood::DoingGreat => "\u{1F911} You're doing great saving!",
        }
    }
}

/// Formats an elapsed duration as rounded hours, or rounded days past 24h
///
/// `3_600_000ms` renders as `"1 hours"`; `90_000_000ms` (25 rounded hours)
/// renders as `"1 days"`.
pub fn format_relative(elapsed: Duration) -> String {
    let hours = (elapsed.num_milliseconds() as f64 / 3_600_000.0).round() as i64;
    if hours > 24 {
        let days = (hours as f64 / 24.0).round() as i64;
        format!("{} days", days)
    } else {
        format!("{} hours", hours)
    }
}
