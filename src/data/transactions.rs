//! Pending-transaction count from `/v1/transactions`
//!
//! The widget only needs how many uncleared transactions are waiting for
//! review, so the response model keeps just enough shape to count them.

use serde::Deserialize;

use super::client::{ApiError, LunchMoneyClient};

/// Maximum transactions requested per fetch
const PENDING_LIMIT: u32 = 250;

/// Currency the widget reports in
pub const CURRENCY: &str = "EUR";

/// Response shape of `/v1/transactions`
#[derive(Debug, Deserialize)]
struct TransactionsResponse {
    transactions: Vec<Transaction>,
}

/// A single transaction; only identity is needed for counting
#[derive(Debug, Deserialize)]
struct Transaction {
    #[allow(dead_code)]
    id: u64,
}

impl LunchMoneyClient {
    /// Fetches the number of uncleared transactions (capped at 250)
    pub async fn fetch_pending_count(&self) -> Result<usize, ApiError> {
        let params = [
            ("limit", PENDING_LIMIT.to_string()),
            ("status", "uncleared".to_string()),
            ("currency", CURRENCY.to_string()),
        ];
        let value = self.get_json("/v1/transactions", &params).await?;
        let response: TransactionsResponse = serde_json::from_value(value)?;
        Ok(response.transactions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "transactions": [
            { "id": 101, "date": "2026-08-02", "payee": "Bakery", "status": "uncleared" },
            { "id": 102, "date": "2026-08-05", "payee": "Grocer", "status": "uncleared" },
            { "id": 103, "date": "2026-08-11", "payee": "Cafe", "status": "uncleared" }
        ],
        "has_more": false
    }"#;

    #[test]
    fn test_parse_counts_transactions() {
        let response: TransactionsResponse =
            serde_json::from_str(SAMPLE_RESPONSE).expect("Failed to parse sample response");
        assert_eq!(response.transactions.len(), 3);
    }

    #[test]
    fn test_parse_empty_transaction_list() {
        let response: TransactionsResponse =
            serde_json::from_str(r#"{"transactions": []}"#).expect("Failed to parse");
        assert_eq!(response.transactions.len(), 0);
    }

    #[test]
    fn test_parse_missing_transactions_key_is_an_error() {
        let result: Result<TransactionsResponse, _> = serde_json::from_str(r#"{"items": []}"#);
        assert!(result.is_err());
    }
}
