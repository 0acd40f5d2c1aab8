// ABOUTME: Ingredient parsing composed with unit resolution
// ABOUTME: Turns free-text lines into ParsedIngredient values backed by persisted units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

use super::Database;
use crate::errors::DbResult;
use crate::models::ParsedIngredient;

impl Database {
    /// Parse one ingredient line, resolving any unit text to a persisted
    /// unit
    ///
    /// The structural parse itself cannot fail; the only fallible step is
    /// unit resolution touching storage. Lines that match no pattern fall
    /// back to a bare name with no quantity or unit.
    ///
    /// # Errors
    ///
    /// Returns a query error if unit resolution hits a storage fault.
    pub async fn parse_ingredient(&self, line: &str) -> DbResult<ParsedIngredient> {
        let parsed = self.parser.parse(line);

        let unit = match parsed.unit_text {
            Some(text) => self.resolve_unit(&text).await?,
            None => None,
        };

        Ok(ParsedIngredient {
            quantity: parsed.quantity,
            unit,
            name: parsed.name,
            original: parsed.original,
        })
    }

    /// Parse multiple ingredient lines, preserving input order
    ///
    /// Lines are parsed independently; a line that matches no pattern
    /// falls back rather than affecting its neighbors.
    ///
    /// # Errors
    ///
    /// Returns a query error if unit resolution hits a storage fault.
    pub async fn parse_ingredients(&self, lines: &[String]) -> DbResult<Vec<ParsedIngredient>> {
        let mut results = Vec::with_capacity(lines.len());
        for line in lines {
            results.push(self.parse_ingredient(line).await?);
        }
        Ok(results)
    }
}
