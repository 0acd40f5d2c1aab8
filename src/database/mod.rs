// ABOUTME: Database management for the Larder backend core
// ABOUTME: Owns the connection pool, runs migrations, and hosts all query methods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! # Database Management
//!
//! This module provides database functionality for the grocery backend.
//! It handles the unit catalog, grocery lists and items, and the
//! grocery-list/recipe attachment rows with their denormalized selection
//! state.

mod grocery;
mod parsing;
mod units;

use crate::errors::{DatabaseError, DbResult};
use crate::ingredients::IngredientParser;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

/// Database manager for the grocery backend core
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
    parser: IngredientParser,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the database cannot be
    /// opened, or a query error if migrations fail.
    pub async fn new(database_url: &str) -> DbResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(DatabaseError::Connection)?;

        let db = Self {
            pool,
            parser: IngredientParser::new(),
        };

        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// The ingredient line parser this database composes with unit
    /// resolution
    #[must_use]
    pub const fn parser(&self) -> &IngredientParser {
        &self.parser
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns a query error if any migration statement fails.
    pub async fn migrate(&self) -> DbResult<()> {
        self.migrate_units().await?;
        self.migrate_recipes().await?;
        self.migrate_grocery().await?;

        info!("database migrations complete");
        Ok(())
    }
}
