// ABOUTME: Unit catalog queries including race-safe create-or-fetch resolution
// ABOUTME: Maps free-text unit strings to persisted canonical unit rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

use super::Database;
use crate::errors::{DatabaseError, DbResult};
use crate::ingredients::cooking_units;
use crate::models::{NewUnit, Unit, UnitType};
use sqlx::Row;
use std::collections::HashMap;
use tracing::debug;

const UNIT_COLUMNS: &str = "id, name, display_name, unit_type, is_standardized, \
     conversion_factor, abbreviation, description, created_at, updated_at";

impl Database {
    pub(super) async fn migrate_units(&self) -> DbResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS units (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                display_name TEXT NOT NULL,
                unit_type TEXT NOT NULL,
                is_standardized BOOLEAN NOT NULL DEFAULT 1,
                conversion_factor REAL,
                abbreviation TEXT,
                description TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create units table"))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_units_unit_type ON units(unit_type)")
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("create units indexes"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_units_is_standardized ON units(is_standardized)",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create units indexes"))?;

        Ok(())
    }

    /// Find a unit by name (case-insensitive, trimmed)
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn find_unit_by_name(&self, name: &str) -> DbResult<Option<Unit>> {
        let canonical = name.trim().to_lowercase();
        let row = sqlx::query(&format!("SELECT {UNIT_COLUMNS} FROM units WHERE name = $1"))
            .bind(&canonical)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("find unit by name"))?;

        row.map(|r| Self::row_to_unit(&r)).transpose()
    }

    /// Create a unit, or fetch the existing row with the same name
    ///
    /// Insertion uses `ON CONFLICT(name) DO NOTHING` so two concurrent
    /// resolutions of the same never-seen unit text converge on one row;
    /// the losing insert is absorbed and refetched.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn create_unit(&self, unit: &NewUnit) -> DbResult<Unit> {
        let name = unit.name.trim().to_lowercase();

        sqlx::query(
            r"
            INSERT INTO units (name, display_name, unit_type, is_standardized,
                               conversion_factor, abbreviation, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(name) DO NOTHING
            ",
        )
        .bind(&name)
        .bind(&unit.display_name)
        .bind(unit.unit_type.as_str())
        .bind(unit.is_standardized)
        .bind(unit.conversion_factor)
        .bind(&unit.abbreviation)
        .bind(&unit.description)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create unit"))?;

        self.find_unit_by_name(&name)
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "unit",
                key: name,
            })
    }

    /// Resolve free text to a canonical unit, creating one on first sight
    ///
    /// Returns `Ok(None)` for input that is empty after trimming — no
    /// unit is created for blank text.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn resolve_unit(&self, text: &str) -> DbResult<Option<Unit>> {
        let raw = text.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let standardized = cooking_units::standardize(raw);

        if let Some(existing) = self.find_unit_by_name(&standardized).await? {
            return Ok(Some(existing));
        }

        let unit = self
            .create_unit(&NewUnit {
                name: standardized.clone(),
                display_name: capitalize(&standardized),
                unit_type: cooking_units::classify(&standardized).unwrap_or(UnitType::Other),
                is_standardized: cooking_units::is_standard(raw),
                abbreviation: cooking_units::abbreviation_for(&standardized)
                    .map(ToString::to_string),
                conversion_factor: None,
                description: Some(format!("Standard {standardized} unit")),
            })
            .await?;

        debug!(unit = %unit.name, unit_type = %unit.unit_type, "created unit");
        Ok(Some(unit))
    }

    /// All units, ordered by type then name
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn list_units(&self) -> DbResult<Vec<Unit>> {
        let rows = sqlx::query(&format!(
            "SELECT {UNIT_COLUMNS} FROM units ORDER BY unit_type, name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::query("list units"))?;

        rows.iter().map(Self::row_to_unit).collect()
    }

    /// Units grouped by their semantic type
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn units_grouped_by_type(&self) -> DbResult<HashMap<UnitType, Vec<Unit>>> {
        let mut grouped: HashMap<UnitType, Vec<Unit>> = HashMap::new();
        for unit in self.list_units().await? {
            grouped.entry(unit.unit_type).or_default().push(unit);
        }
        Ok(grouped)
    }

    /// Total number of unit rows
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn count_units(&self) -> DbResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM units")
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::query("count units"))
    }

    /// Convert a database row to a Unit struct
    fn row_to_unit(row: &sqlx::sqlite::SqliteRow) -> DbResult<Unit> {
        let unit_type: String = row.get("unit_type");

        Ok(Unit {
            id: row.get("id"),
            name: row.get("name"),
            display_name: row.get("display_name"),
            unit_type: UnitType::parse(&unit_type),
            is_standardized: row.get("is_standardized"),
            conversion_factor: row.get("conversion_factor"),
            abbreviation: row.get("abbreviation"),
            description: row.get("description"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

/// Uppercase the first character, leaving the rest unchanged
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalize_uppercases_only_the_first_character() {
        assert_eq!(capitalize("tablespoon"), "Tablespoon");
        assert_eq!(capitalize("fl oz"), "Fl oz");
        assert_eq!(capitalize(""), "");
    }
}
