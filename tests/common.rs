// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database setup against a throwaway file-backed SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder
#![allow(dead_code)]

//! Shared test utilities for `larder`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use larder::database::Database;
use std::sync::Once;
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A migrated database backed by a temp directory that lives as long as
/// the handle
pub struct TestDb {
    pub db: Database,
    _dir: TempDir,
}

/// Standard test database setup
pub async fn create_test_database() -> Result<TestDb> {
    init_test_logging();
    let dir = TempDir::new()?;
    let database_url = format!("sqlite:{}/test.db", dir.path().display());
    let db = Database::new(&database_url).await?;
    Ok(TestDb { db, _dir: dir })
}

/// Create a grocery list and an attached recipe, returning their ids
pub async fn create_list_with_recipe(
    db: &Database,
    lines: &[&str],
) -> Result<(i64, i64)> {
    let list = db.create_grocery_list("Weekly Shop", None).await?;
    let lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
    let recipe = db.create_recipe("Test Recipe", &lines).await?;
    db.attach_recipe_to_list(list.id, recipe.id, 2).await?;
    Ok((list.id, recipe.id))
}
