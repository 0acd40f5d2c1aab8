// ABOUTME: Standard cooking unit vocabulary with classification and synonym tables
// ABOUTME: Provides consistency for parsed units while allowing custom units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! Fixed cooking-unit vocabulary.
//!
//! Four surface-form sets (volume, weight, count, special), a synonym
//! table for canonicalization, and an abbreviation table. All tables are
//! static data; classification probes the sets in a fixed order so a
//! name appearing in two sets always resolves to the earlier category.

use crate::models::UnitType;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Volume measurements (US standard and metric surface forms)
pub const VOLUME: &[&str] = &[
    "cup", "cups",
    "tablespoon", "tablespoons", "tbsp",
    "teaspoon", "teaspoons", "tsp",
    "fluid ounce", "fluid ounces", "fl oz",
    "pint", "pints", "pt",
    "quart", "quarts", "qt",
    "gallon", "gallons", "gal",
    "milliliter", "milliliters", "ml",
    "liter", "liters", "l",
];

/// Weight measurements
pub const WEIGHT: &[&str] = &[
    "pound", "pounds", "lb", "lbs",
    "ounce", "ounces", "oz",
    "gram", "grams", "g",
    "kilogram", "kilograms", "kg",
];

/// Count and size measurements
pub const COUNT: &[&str] = &[
    "piece", "pieces", "pc",
    "slice", "slices",
    "clove", "cloves",
    "head", "heads",
    "bunch", "bunches",
    "bundle", "bundles",
    "can", "cans",
    "package", "packages", "pkg",
    "jar", "jars",
    "bottle", "bottles",
    "bag", "bags",
    "box", "boxes",
    "small", "medium", "large", "extra large",
    "sm", "med", "lg", "xl",
];

/// Special cooking measurements
pub const SPECIAL: &[&str] = &[
    "to taste",
    "as needed",
    "pinch",
    "dash",
    "handful",
    "splash",
    "drizzle",
];

/// Classification probe order. A surface form present in more than one
/// set resolves to the earliest category in this order.
pub const CATEGORY_PROBE_ORDER: [(UnitType, &[&str]); 4] = [
    (UnitType::Volume, VOLUME),
    (UnitType::Weight, WEIGHT),
    (UnitType::Count, COUNT),
    (UnitType::Special, SPECIAL),
];

/// Synonym table mapping common variations to canonical names
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Tablespoon variations
        ("tbsp", "tablespoon"),
        ("tablespoons", "tablespoon"),
        // Teaspoon variations
        ("tsp", "teaspoon"),
        ("teaspoons", "teaspoon"),
        // Cup variations
        ("cups", "cup"),
        // Weight variations
        ("lb", "pound"),
        ("lbs", "pound"),
        ("pounds", "pound"),
        ("oz", "ounce"),
        ("ounces", "ounce"),
        // Metric variations
        ("grams", "gram"),
        ("kilograms", "kilogram"),
        ("kg", "kilogram"),
        ("milliliters", "milliliter"),
        ("liters", "liter"),
        // Count variations
        ("pieces", "piece"),
        ("slices", "slice"),
        ("cloves", "clove"),
        ("bunches", "bunch"),
    ])
});

/// Abbreviation table for canonical (and plural) unit names
static ABBREVIATIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("tablespoon", "tbsp"),
        ("tablespoons", "tbsp"),
        ("teaspoon", "tsp"),
        ("teaspoons", "tsp"),
        ("fluid ounce", "fl oz"),
        ("fluid ounces", "fl oz"),
        ("pound", "lb"),
        ("pounds", "lb"),
        ("ounce", "oz"),
        ("ounces", "oz"),
        ("gram", "g"),
        ("grams", "g"),
        ("kilogram", "kg"),
        ("kilograms", "kg"),
        ("milliliter", "ml"),
        ("milliliters", "ml"),
        ("liter", "l"),
        ("liters", "l"),
        ("package", "pkg"),
        ("packages", "pkg"),
        ("small", "sm"),
        ("medium", "med"),
        ("large", "lg"),
        ("extra large", "xl"),
    ])
});

/// Normalize a unit string to its canonical form
///
/// Lowercases and trims, then applies the synonym table. Unmapped input
/// passes through unchanged (still lowercased and trimmed). Pure, never
/// fails.
#[must_use]
pub fn standardize(unit: &str) -> String {
    let unit = unit.trim().to_lowercase();
    SYNONYMS
        .get(unit.as_str())
        .map_or(unit, |canonical| (*canonical).to_string())
}

/// Classify a unit name into a semantic category
///
/// Probes the fixed sets in `CATEGORY_PROBE_ORDER`; the first matching
/// category wins. Returns None for names outside the vocabulary.
#[must_use]
pub fn classify(unit: &str) -> Option<UnitType> {
    let unit = unit.trim().to_lowercase();
    CATEGORY_PROBE_ORDER
        .iter()
        .find(|(_, set)| set.contains(&unit.as_str()))
        .map(|(category, _)| *category)
}

/// Whether the text is a literal member of the standard vocabulary
///
/// Checked against raw surface forms ("tbsp" is standard even though its
/// canonical form is "tablespoon").
#[must_use]
pub fn is_standard(unit: &str) -> bool {
    let unit = unit.trim().to_lowercase();
    CATEGORY_PROBE_ORDER
        .iter()
        .any(|(_, set)| set.contains(&unit.as_str()))
}

/// Abbreviation for a canonical unit name, when one is known
#[must_use]
pub fn abbreviation_for(unit: &str) -> Option<&'static str> {
    ABBREVIATIONS.get(unit.trim().to_lowercase().as_str()).copied()
}

/// Shortlist of common units for autocomplete surfaces
#[must_use]
pub const fn common_units() -> &'static [&'static str] {
    &[
        "cup", "tablespoon", "teaspoon", "pound", "ounce", "gram",
        "piece", "clove", "bunch", "can", "package", "medium", "large",
        "to taste", "pinch", "dash",
    ]
}
