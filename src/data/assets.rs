//! Manual-asset staleness from `/v1/assets`
//!
//! Manually-tracked balances go stale silently, so the widget surfaces the
//! account whose `balance_as_of` is oldest. The result is informational
//! only; the rendering layer does not currently show it.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::client::{ApiError, LunchMoneyClient};
use super::format_relative;

/// Response shape of `/v1/assets`
#[derive(Debug, Deserialize)]
pub struct AssetsResponse {
    pub assets: Vec<Asset>,
}

/// A manually-tracked account
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Canonical account name
    pub name: String,
    /// User-facing name, preferred over `name` when set
    pub display_name: Option<String>,
    /// When the balance was last entered by the user
    pub balance_as_of: DateTime<Utc>,
}

/// Finds the stalest manual balance as `"<relative-time> - <account name>"`
///
/// The search starts from `now`, so an empty asset list yields
/// `"0 hours - "` rather than an error.
pub fn stalest_update(assets: &[Asset], now: DateTime<Utc>) -> String {
    let mut oldest = now;
    let mut account = "";
    for asset in assets {
        if asset.balance_as_of < oldest {
            oldest = asset.balance_as_of;
            account = asset.display_name.as_deref().unwrap_or(&asset.name);
        }
    }
    format!("{} - {}", format_relative(now - oldest), account)
}

impl LunchMoneyClient {
    /// Fetches all manual assets and reports the stalest balance
    pub async fn fetch_manual_staleness(&self) -> Result<String, ApiError> {
        let value = self.get_json("/v1/assets", &[]).await?;
        let response: AssetsResponse = serde_json::from_value(value)?;
        Ok(stalest_update(&response.assets, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE_RESPONSE: &str = r#"{
        "assets": [
            {
                "id": 10,
                "name": "cash_wallet",
                "display_name": "Cash",
                "balance": "84.50",
                "balance_as_of": "2026-08-27T12:00:00.000Z"
            },
            {
                "id": 11,
                "name": "pension_fund",
                "display_name": null,
                "balance": "15200.00",
                "balance_as_of": "2026-08-21T12:00:00.000Z"
            }
        ]
    }"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap()
    }

    fn parse_sample() -> Vec<Asset> {
        let response: AssetsResponse =
            serde_json::from_str(SAMPLE_RESPONSE).expect("Failed to parse sample response");
        response.assets
    }

    #[test]
    fn test_stalest_asset_wins_and_falls_back_to_name() {
        // The pension fund is 8 days old and has no display name
        assert_eq!(stalest_update(&parse_sample(), now()), "8 days - pension_fund");
    }

    #[test]
    fn test_display_name_preferred_when_present() {
        let assets = vec![Asset {
            name: "cash_wallet".to_string(),
            display_name: Some("Cash".to_string()),
            balance_as_of: Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).unwrap(),
        }];

        assert_eq!(stalest_update(&assets, now()), "2 days - Cash");
    }

    #[test]
    fn test_empty_asset_list_reports_zero_elapsed_and_no_name() {
        assert_eq!(stalest_update(&[], now()), "0 hours - ");
    }

    #[test]
    fn test_recent_asset_reported_in_hours() {
        let assets = vec![Asset {
            name: "wallet".to_string(),
            display_name: None,
            balance_as_of: Utc.with_ymd_and_hms(2026, 8, 29, 7, 0, 0).unwrap(),
        }];

        assert_eq!(stalest_update(&assets, now()), "5 hours - wallet");
    }

    #[test]
    fn test_parse_malformed_timestamp_is_an_error() {
        let malformed = r#"{"assets": [{"name": "x", "display_name": null, "balance_as_of": "yesterday"}]}"#;
        let result: Result<AssetsResponse, _> = serde_json::from_str(malformed);
        assert!(result.is_err());
    }
}
