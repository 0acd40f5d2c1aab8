// ABOUTME: Data models for units, grocery lists, grocery items, and parse results
// ABOUTME: Defines the persisted entities and the ephemeral ingredient parse output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Semantic category of a measurement unit
///
/// `Volume`, `Weight`, `Count`, and `Special` are produced by vocabulary
/// classification. `Size` appears only in seeded vocabulary rows (size
/// words classify as `Count` during parsing, matching the fixed probe
/// order). `Other` is the fallback for custom units the vocabulary does
/// not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Volume,
    Weight,
    Count,
    Size,
    Special,
    #[default]
    Other,
}

impl UnitType {
    /// Database column representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Weight => "weight",
            Self::Count => "count",
            Self::Size => "size",
            Self::Special => "special",
            Self::Other => "other",
        }
    }

    /// Parse from the database column value, falling back to `Other`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "volume" => Self::Volume,
            "weight" => Self::Weight,
            "count" => Self::Count,
            "size" => Self::Size,
            "special" => Self::Special,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical measurement unit
///
/// `name` is unique, lowercase, and trimmed. Units are created lazily the
/// first time a never-seen unit string is parsed and are never deleted by
/// this library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    /// Lowercase canonical name ("tablespoon", "cup")
    pub name: String,
    /// Human-cased name ("Tablespoon")
    pub display_name: String,
    pub unit_type: UnitType,
    /// True if the name matched the standard cooking vocabulary
    pub is_standardized: bool,
    /// Reserved for future cross-unit math
    pub conversion_factor: Option<f64>,
    /// Short form ("tbsp"), when one is known
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Unit {
    /// Display name with fallback to the canonical name
    #[must_use]
    pub fn display(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

/// Fields for creating a unit row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUnit {
    pub name: String,
    pub display_name: String,
    pub unit_type: UnitType,
    pub is_standardized: bool,
    pub abbreviation: Option<String>,
    pub conversion_factor: Option<f64>,
    pub description: Option<String>,
}

/// A shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryList {
    pub id: i64,
    /// Public identifier
    pub uid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroceryList {
    /// Whether the list has been marked completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// One shopping-list line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: i64,
    /// Public identifier
    pub uid: Uuid,
    pub grocery_list_id: i64,
    pub name: String,
    /// Store section ("Produce", "Dairy"), when known
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit_id: Option<i64>,
    pub notes: Option<String>,
    pub is_checked: bool,
    pub checked_at: Option<DateTime<Utc>>,
    pub sort_order: i64,
    /// Source recipe if generated from a recipe; None means manually added
    pub recipe_id: Option<i64>,
    /// Flexible metadata; parser-generated items carry `parsed_from`
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Fields for inserting a grocery item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroceryItem {
    pub grocery_list_id: i64,
    pub recipe_id: Option<i64>,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit_id: Option<i64>,
    pub is_checked: bool,
    pub metadata: Value,
}

/// A recipe attached to a grocery list ("pivot" row)
///
/// `selected_item_ids` is a derived cache of the item rows that
/// originated from this recipe and still exist in the list. Source of
/// truth is always the grocery item rows themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeAttachment {
    pub grocery_list_id: i64,
    pub recipe_id: i64,
    /// Servings multiplier applied to quantities
    pub servings: i64,
    /// Ids of the still-present items generated from this recipe
    pub selected_item_ids: Vec<i64>,
    pub auto_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal recipe entity used as an attachment target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub uid: Uuid,
    pub name: String,
    /// Free-text ingredient lines as authored
    pub ingredient_lines: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A parsed ingredient quantity
///
/// Ranges ("2-3") are carried verbatim and never reduced to a single
/// number; downstream code must handle both shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Simple, fractional, or mixed numbers evaluated to a decimal
    Value(f64),
    /// A dash/en-dash range, kept as its source text
    Range(String),
}

impl Quantity {
    /// Numeric value, or None for ranges
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Range(_) => None,
        }
    }
}

/// Structured result of parsing one free-text ingredient line
///
/// Ephemeral: consumed immediately to build a grocery item insertion
/// record, then discarded. `original` always preserves the source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub quantity: Option<Quantity>,
    /// Resolved unit, when the line named one
    pub unit: Option<Unit>,
    /// Remaining ingredient name text, trimmed
    pub name: String,
    /// Verbatim source text, retained for traceability
    pub original: String,
}

impl ParsedIngredient {
    /// Build the insertion record for a grocery item from this parse
    /// result
    ///
    /// Range quantities are dropped to None at this boundary — the
    /// original backend behaves this way and inserts expect a numeric
    /// column. The verbatim range text still survives in
    /// `metadata.parsed_from`. A future schema could keep the lower
    /// bound or add a `quantity_range` column instead.
    #[must_use]
    pub fn to_grocery_item_fields(
        &self,
        grocery_list_id: i64,
        recipe_id: Option<i64>,
    ) -> NewGroceryItem {
        NewGroceryItem {
            grocery_list_id,
            recipe_id,
            name: self.name.clone(),
            quantity: self.quantity.as_ref().and_then(Quantity::as_f64),
            unit_id: self.unit.as_ref().map(|u| u.id),
            is_checked: false,
            metadata: json!({ "parsed_from": self.original }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_type_round_trips_through_column_value() {
        for t in [
            UnitType::Volume,
            UnitType::Weight,
            UnitType::Count,
            UnitType::Size,
            UnitType::Special,
            UnitType::Other,
        ] {
            assert_eq!(UnitType::parse(t.as_str()), t);
        }
    }

    #[test]
    fn unknown_unit_type_falls_back_to_other() {
        assert_eq!(UnitType::parse("temperature"), UnitType::Other);
    }

    #[test]
    fn grocery_item_fields_keep_numeric_quantity() {
        let parsed = ParsedIngredient {
            quantity: Some(Quantity::Value(1.5)),
            unit: None,
            name: "flour".into(),
            original: "1 1/2 cups flour".into(),
        };
        let fields = parsed.to_grocery_item_fields(7, Some(3));
        assert_eq!(fields.quantity, Some(1.5));
        assert_eq!(fields.grocery_list_id, 7);
        assert_eq!(fields.recipe_id, Some(3));
        assert!(!fields.is_checked);
    }

    #[test]
    fn grocery_item_fields_drop_range_quantity_but_keep_source() {
        let parsed = ParsedIngredient {
            quantity: Some(Quantity::Range("2-3".into())),
            unit: None,
            name: "onions".into(),
            original: "2-3 onions".into(),
        };
        let fields = parsed.to_grocery_item_fields(1, None);
        assert_eq!(fields.quantity, None);
        assert_eq!(fields.metadata["parsed_from"], "2-3 onions");
    }
}
