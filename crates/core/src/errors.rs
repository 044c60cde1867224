//! Core error types for Spendly.
//!
//! This module defines storage-agnostic error types. Diesel errors are converted
//! by the `storage-sqlite` crate and HTTP gateway errors by the `ipfs` crate, so
//! nothing here depends on a concrete backend.

use thiserror::Error;

use crate::goals::GoalValidationError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
///
/// The variants follow the request-level taxonomy the HTTP layer reports:
/// authentication, missing parameters, invalid input, duplicates, absent
/// records and upstream (database or blob store) failures.
#[derive(Error, Debug)]
pub enum Error {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("{0} not provided")]
    MissingParameter(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Blob store operation failed: {0}")]
    BlobStore(#[from] BlobStoreError),

    #[error("Snapshot {cid} could not be decoded: {reason}")]
    CorruptSnapshot { cid: String, reason: String },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True when the failure came from the document store or the blob store
    /// rather than from the request itself.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::BlobStore(_) | Error::CorruptSnapshot { .. }
        )
    }
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored document could not be (de)serialized.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors raised by content-addressed blob stores.
#[derive(Error, Debug)]
pub enum BlobStoreError {
    #[error("Invalid content identifier: {0}")]
    InvalidCid(String),

    #[error("Blob {0} not found")]
    NotFound(String),

    #[error("Gateway request failed: {0}")]
    Request(String),

    #[error("Gateway returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected gateway response: {0}")]
    Decode(String),

    #[error("Blob IO failed: {0}")]
    Io(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error(transparent)]
    Goal(#[from] GoalValidationError),

    #[error("{0}")]
    InvalidInput(String),
}

impl From<GoalValidationError> for Error {
    fn from(err: GoalValidationError) -> Self {
        Error::Validation(ValidationError::Goal(err))
    }
}

impl From<std::io::Error> for BlobStoreError {
    fn from(err: std::io::Error) -> Self {
        BlobStoreError::Io(err.to_string())
    }
}
