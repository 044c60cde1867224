//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bank-linked transaction as delivered by the account aggregator.
///
/// Fields the aggregator adds that are not modelled here are kept in
/// `extra` so the snapshot round-trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub account_id: String,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub pending: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Payload of a transactions blob. Older producers wrote a bare array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TransactionSnapshot {
    Bare(Vec<Transaction>),
    Wrapped { transactions: Vec<Transaction> },
}

impl TransactionSnapshot {
    pub fn into_transactions(self) -> Vec<Transaction> {
        match self {
            TransactionSnapshot::Wrapped { transactions } => transactions,
            TransactionSnapshot::Bare(transactions) => transactions,
        }
    }
}

/// Delegated, expiring URL for a transactions snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsLink {
    pub cid: String,
    pub url: String,
    /// Seconds until `url` stops working.
    pub expires_in: u64,
}
