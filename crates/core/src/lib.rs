//! Spendly Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Spendly: user records, the
//! savings-goals snapshot log and the read-only transaction snapshot. It is
//! storage-agnostic and defines the traits implemented by the
//! `storage-sqlite` (document store) and `ipfs` (blob store) crates.

pub mod blobs;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod transactions;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
