// ABOUTME: Ingredient parsing module grouping the line grammar and unit vocabulary
// ABOUTME: Pure, storage-free code; unit resolution lives in the database layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! Ingredient parsing.
//!
//! Everything here is pure and trivially safe to run in parallel across
//! lines or recipes. The database layer composes these pieces with unit
//! resolution to produce full [`crate::models::ParsedIngredient`] values.

/// Fixed cooking-unit vocabulary and classification tables
pub mod cooking_units;

/// Free-text ingredient line parser
pub mod parser;

pub use parser::{IngredientParser, ParsedLine};
