// ABOUTME: Parser for free-text recipe ingredient lines
// ABOUTME: Extracts quantity, unit text, and ingredient name with ordered pattern fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! Ingredient line grammar.
//!
//! Patterns are tried in a fixed priority order; the first match wins and
//! the last pattern always succeeds, so parsing never fails:
//!
//! 1. Quantity + unit + name ("1 1/2 cups flour") — accepted only when
//!    the middle word group passes the unit check
//! 2. Quantity + name ("3 eggs")
//! 3. Trailing special phrase ("Salt to taste")
//! 4. Bare name fallback (the whole line)

use super::cooking_units;
use crate::models::Quantity;
use regex::Regex;
use std::sync::LazyLock;

/// Regex patterns for the line grammar
/// Stored as Option to handle compilation failures gracefully (should never fail for static patterns)
static QUANTITY_UNIT_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "1 1/2 cups flour", "2-3 medium onions", "1/2 tsp salt"
    Regex::new(r"(?i)^(\d+(?:\s*[-–]\s*\d+)?(?:\s+\d+/\d+)?|\d+/\d+)\s+([a-zA-Z\s]+?)\s+(.+)$")
        .ok()
});

static QUANTITY_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "3 eggs", "2 ripe bananas"
    Regex::new(r"(?i)^(\d+(?:\s*[-–]\s*\d+)?(?:\s+\d+/\d+)?|\d+/\d+)\s+(.+)$").ok()
});

static SPECIAL_PHRASE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "Salt to taste", "Pepper as needed", "Paprika for seasoning"
    Regex::new(r"(?i)^(.+?)\s+(to taste|as needed|for seasoning)$").ok()
});

static RANGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*[-–]\s*(\d+)$").ok());

static FRACTION: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(\d+)/(\d+)$").ok());

static MIXED_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)/(\d+)$").ok());

/// Word patterns accepted as units beyond the standard vocabulary
static SIZE_WORDS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(small|medium|large|extra\s+large)$").ok());

static CONTAINER_WORDS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(can|jar|bottle|package|bag|box)s?$").ok());

static BUNCH_WORDS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(bunch|bundle|head|clove)s?$").ok());

/// Structural parse of one ingredient line, before unit resolution
///
/// `unit_text` is raw surface text; resolving it to a persisted unit is
/// the storage layer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub quantity: Option<Quantity>,
    pub unit_text: Option<String>,
    pub name: String,
    pub original: String,
}

/// Parser for recipe ingredient lines
#[derive(Debug, Clone, Copy, Default)]
pub struct IngredientParser;

impl IngredientParser {
    /// Create a parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse an ingredient line into structured components
    ///
    /// Examples:
    /// "1 1/2 cups flour" → quantity 1.5, unit text "cups", name "flour"
    /// "2-3 medium onions" → quantity "2-3", unit text "medium", name "onions"
    /// "Salt to taste" → no quantity, unit text "to taste", name "Salt"
    #[must_use]
    pub fn parse(&self, ingredient: &str) -> ParsedLine {
        let ingredient = ingredient.trim();

        // Pattern 1: Quantity + Unit + Name (e.g., "1 1/2 cups flour")
        if let Some(caps) = QUANTITY_UNIT_NAME
            .as_ref()
            .and_then(|re| re.captures(ingredient))
        {
            let unit_text = caps[2].trim();

            // Verify the unit makes sense; otherwise fall through
            if Self::looks_like_unit(unit_text) {
                return ParsedLine {
                    quantity: Self::parse_quantity(caps[1].trim()),
                    unit_text: Some(unit_text.to_string()),
                    name: caps[3].trim().to_string(),
                    original: ingredient.to_string(),
                };
            }
        }

        // Pattern 2: Quantity + Name (no unit, e.g., "3 eggs")
        if let Some(caps) = QUANTITY_NAME
            .as_ref()
            .and_then(|re| re.captures(ingredient))
        {
            return ParsedLine {
                quantity: Self::parse_quantity(caps[1].trim()),
                unit_text: None,
                name: caps[2].trim().to_string(),
                original: ingredient.to_string(),
            };
        }

        // Pattern 3: Special cases (e.g., "Salt to taste", "Pepper as needed")
        if let Some(caps) = SPECIAL_PHRASE
            .as_ref()
            .and_then(|re| re.captures(ingredient))
        {
            return ParsedLine {
                quantity: None,
                unit_text: Some(caps[2].to_string()),
                name: caps[1].trim().to_string(),
                original: ingredient.to_string(),
            };
        }

        // Fallback: Just the name
        ParsedLine {
            quantity: None,
            unit_text: None,
            name: ingredient.to_string(),
            original: ingredient.to_string(),
        }
    }

    /// Parse a quantity string to a decimal, keeping ranges as strings
    ///
    /// Returns None for anything unparseable; never fails.
    #[must_use]
    pub fn parse_quantity(quantity: &str) -> Option<Quantity> {
        let quantity = quantity.trim();

        // Ranges (e.g., "2-3", "1–2") are kept verbatim
        if RANGE.as_ref().is_some_and(|re| re.is_match(quantity)) {
            return Some(Quantity::Range(quantity.to_string()));
        }

        // Fractions (e.g., "1/2", "3/4")
        if let Some(caps) = FRACTION.as_ref().and_then(|re| re.captures(quantity)) {
            let numerator: f64 = caps[1].parse().ok()?;
            let denominator: f64 = caps[2].parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            return Some(Quantity::Value(numerator / denominator));
        }

        // Mixed numbers (e.g., "1 1/2")
        if let Some(caps) = MIXED_NUMBER.as_ref().and_then(|re| re.captures(quantity)) {
            let whole: f64 = caps[1].parse().ok()?;
            let numerator: f64 = caps[2].parse().ok()?;
            let denominator: f64 = caps[3].parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            return Some(Quantity::Value(whole + numerator / denominator));
        }

        // Plain decimal numbers
        quantity.parse::<f64>().ok().map(Quantity::Value)
    }

    /// Whether a word is likely a cooking unit
    ///
    /// Standard vocabulary members pass, plus size words and common
    /// container words the vocabulary spells differently.
    #[must_use]
    pub fn looks_like_unit(word: &str) -> bool {
        let word = word.trim();

        if cooking_units::is_standard(word) {
            return true;
        }

        [&SIZE_WORDS, &CONTAINER_WORDS, &BUNCH_WORDS]
            .iter()
            .any(|pattern| pattern.as_ref().is_some_and(|re| re.is_match(word)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ParsedLine {
        IngredientParser::new().parse(line)
    }

    // ========================================================================
    // Quantity Parsing
    // ========================================================================

    #[test]
    fn quantity_simple_fraction() {
        assert_eq!(
            IngredientParser::parse_quantity("1/2"),
            Some(Quantity::Value(0.5))
        );
    }

    #[test]
    fn quantity_mixed_number() {
        assert_eq!(
            IngredientParser::parse_quantity("1 1/2"),
            Some(Quantity::Value(1.5))
        );
    }

    #[test]
    fn quantity_range_stays_a_string() {
        assert_eq!(
            IngredientParser::parse_quantity("2-3"),
            Some(Quantity::Range("2-3".into()))
        );
        assert_eq!(
            IngredientParser::parse_quantity("1–2"),
            Some(Quantity::Range("1–2".into()))
        );
    }

    #[test]
    fn quantity_plain_number() {
        assert_eq!(
            IngredientParser::parse_quantity("3"),
            Some(Quantity::Value(3.0))
        );
        assert_eq!(
            IngredientParser::parse_quantity("2.5"),
            Some(Quantity::Value(2.5))
        );
    }

    #[test]
    fn quantity_garbage_yields_none() {
        assert_eq!(IngredientParser::parse_quantity("abc"), None);
        assert_eq!(IngredientParser::parse_quantity(""), None);
    }

    #[test]
    fn quantity_zero_denominator_yields_none() {
        assert_eq!(IngredientParser::parse_quantity("1/0"), None);
        assert_eq!(IngredientParser::parse_quantity("1 1/0"), None);
    }

    // ========================================================================
    // Pattern Priority
    // ========================================================================

    #[test]
    fn pattern_quantity_unit_name() {
        let parsed = parse("1 1/2 cups flour");
        assert_eq!(parsed.quantity, Some(Quantity::Value(1.5)));
        assert_eq!(parsed.unit_text.as_deref(), Some("cups"));
        assert_eq!(parsed.name, "flour");
        assert_eq!(parsed.original, "1 1/2 cups flour");
    }

    #[test]
    fn pattern_quantity_name_when_middle_word_is_not_a_unit() {
        let parsed = parse("2 ripe bananas");
        assert_eq!(parsed.quantity, Some(Quantity::Value(2.0)));
        assert_eq!(parsed.unit_text, None);
        assert_eq!(parsed.name, "ripe bananas");
    }

    #[test]
    fn pattern_quantity_name_single_word() {
        let parsed = parse("3 eggs");
        assert_eq!(parsed.quantity, Some(Quantity::Value(3.0)));
        assert_eq!(parsed.unit_text, None);
        assert_eq!(parsed.name, "eggs");
    }

    #[test]
    fn pattern_range_with_size_unit() {
        let parsed = parse("2-3 medium onions");
        assert_eq!(parsed.quantity, Some(Quantity::Range("2-3".into())));
        assert_eq!(parsed.unit_text.as_deref(), Some("medium"));
        assert_eq!(parsed.name, "onions");
    }

    #[test]
    fn pattern_special_phrase() {
        let parsed = parse("Salt to taste");
        assert_eq!(parsed.quantity, None);
        assert_eq!(parsed.unit_text.as_deref(), Some("to taste"));
        assert_eq!(parsed.name, "Salt");
    }

    #[test]
    fn pattern_special_phrase_as_needed() {
        let parsed = parse("Olive oil as needed");
        assert_eq!(parsed.unit_text.as_deref(), Some("as needed"));
        assert_eq!(parsed.name, "Olive oil");
    }

    #[test]
    fn pattern_fallback_bare_name() {
        let parsed = parse("a generous knob of butter");
        assert_eq!(parsed.quantity, None);
        assert_eq!(parsed.unit_text, None);
        assert_eq!(parsed.name, "a generous knob of butter");
    }

    #[test]
    fn pattern_fallback_empty_input_does_not_panic() {
        let parsed = parse("");
        assert_eq!(parsed.quantity, None);
        assert_eq!(parsed.unit_text, None);
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.original, "");
    }

    #[test]
    fn input_is_trimmed_before_matching() {
        let parsed = parse("  1 cup sugar  ");
        assert_eq!(parsed.quantity, Some(Quantity::Value(1.0)));
        assert_eq!(parsed.unit_text.as_deref(), Some("cup"));
        assert_eq!(parsed.name, "sugar");
        assert_eq!(parsed.original, "1 cup sugar");
    }

    #[test]
    fn container_words_count_as_units() {
        let parsed = parse("2 cans crushed tomatoes");
        assert_eq!(parsed.unit_text.as_deref(), Some("cans"));
        assert_eq!(parsed.name, "crushed tomatoes");
    }

    #[test]
    fn looks_like_unit_accepts_vocabulary_and_patterns() {
        assert!(IngredientParser::looks_like_unit("tbsp"));
        assert!(IngredientParser::looks_like_unit("Extra Large"));
        assert!(IngredientParser::looks_like_unit("jars"));
        assert!(IngredientParser::looks_like_unit("cloves"));
        assert!(!IngredientParser::looks_like_unit("ripe"));
    }
}
