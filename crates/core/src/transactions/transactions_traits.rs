use async_trait::async_trait;

use super::transactions_model::{Transaction, TransactionsLink};
use crate::errors::Result;

/// Read-only access to a user's transaction snapshot.
///
/// Only the first entry of `transactionsCID` is consulted; there is no
/// write path for transactions.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn get_transactions(&self, username: &str) -> Result<Vec<Transaction>>;
    async fn get_transactions_link(&self, username: &str) -> Result<TransactionsLink>;
}
