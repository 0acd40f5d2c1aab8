// ABOUTME: Structured error types for database operations and domain failures
// ABOUTME: Provides domain-specific errors with context for better error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! # Error Handling
//!
//! Typed errors for everything that can fail across the library boundary.
//! Parsing itself never fails; only storage faults and exhausted
//! concurrency retries surface to callers.

use thiserror::Error;

/// Errors produced by the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to open or reach the database
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A query failed; `context` names the operation
    #[error("query failed during {context}: {source}")]
    Query {
        /// Operation that was running when the error occurred
        context: String,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// A row that must exist could not be found
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity kind (e.g. "unit", "grocery list")
        entity: &'static str,
        /// Lookup key that missed
        key: String,
    },

    /// A compare-and-swap update lost every retry attempt
    #[error("concurrent update conflict on {context}")]
    Conflict {
        /// Row identity the conflict occurred on
        context: String,
    },

    /// Stored data could not be decoded (e.g. malformed JSON column)
    #[error("corrupt stored data: {0}")]
    Corrupt(String),
}

impl DatabaseError {
    /// Wrap a driver error with the name of the failing operation
    pub fn query(context: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let context = context.into();
        move |source| Self::Query { context, source }
    }
}

/// Result alias for storage operations
pub type DbResult<T> = Result<T, DatabaseError>;
