// ABOUTME: Main library entry point for the Larder grocery backend core
// ABOUTME: Provides ingredient parsing, unit resolution, and grocery list synchronization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

#![deny(unsafe_code)]

//! # Larder
//!
//! Core library for a recipe-and-grocery-list backend. It turns free-text
//! ingredient lines into structured grocery items and keeps each grocery
//! list's per-recipe selection state consistent as items come and go.
//!
//! ## Features
//!
//! - **Ingredient parsing**: "1 1/2 cups flour" becomes a quantity, a
//!   canonical unit, and an ingredient name, with graceful fallbacks for
//!   lines that don't match any pattern
//! - **Unit resolution**: arbitrary unit text ("tbsp", "Cups") resolves to
//!   a single persisted canonical unit, created lazily on first sight
//! - **Selection synchronization**: grocery-list/recipe attachments track
//!   which items originated from each recipe, updated through create and
//!   delete lifecycle hooks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use larder::database::Database;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Database::new("sqlite:data/larder.db").await?;
//!
//!     let parsed = db.parse_ingredient("2 cups rolled oats").await?;
//!     println!("{} / {:?} / {:?}", parsed.name, parsed.quantity, parsed.unit);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the seed binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Configuration management loaded from the environment
pub mod config;

/// Application constants and environment-variable defaults
pub mod constants;

/// Database connection, migrations, and query methods
pub mod database;

/// Structured error types crossing the library boundary
pub mod errors;

/// Ingredient line grammar and the cooking unit vocabulary
pub mod ingredients;

/// Logging configuration and structured logging setup
pub mod logging;

/// Common data structures for units, lists, items, and parse results
pub mod models;

/// Grocery selection synchronization hooks
pub mod sync;

pub use database::Database;
pub use errors::{DatabaseError, DbResult};
pub use ingredients::parser::IngredientParser;
pub use models::{GroceryItem, GroceryList, NewGroceryItem, ParsedIngredient, Quantity, Unit, UnitType};
