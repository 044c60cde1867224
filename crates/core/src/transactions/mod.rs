//! Transactions module - read-only transaction snapshot.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::{Transaction, TransactionSnapshot, TransactionsLink};
pub use transactions_service::TransactionService;
pub use transactions_traits::TransactionServiceTrait;
