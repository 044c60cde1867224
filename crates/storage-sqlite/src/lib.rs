//! SQLite storage implementation for Spendly.
//!
//! This crate is the document store behind `spendly-core`'s
//! `UserRepositoryTrait`. A user row is a document: scalar fields map to
//! columns and list fields (`banks`, the goals snapshot log, the
//! transactions snapshot log) are stored as JSON text.
//!
//! ```text
//!   core (domain)
//!        │
//!        ▼
//!  storage-sqlite (this crate)
//!        │
//!        ▼
//!    SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from spendly-core for convenience
pub use spendly_core::errors::{DatabaseError, Error, Result};
