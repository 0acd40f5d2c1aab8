// ABOUTME: Demo data seeder for the Larder backend core
// ABOUTME: Seeds the standard unit vocabulary and demo grocery lists through the parser
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! Demo data seeder for Larder.
//!
//! This binary populates the database with the standard cooking-unit
//! vocabulary and a set of demo recipes and grocery lists, pushing every
//! ingredient line through the parser so the data looks exactly like
//! production writes.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-demo-data
//!
//! # Reset demo rows before seeding (keeps units)
//! cargo run --bin seed-demo-data -- --reset
//!
//! # Verbose output
//! cargo run --bin seed-demo-data -- -v
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use larder::config::ServerConfig;
use larder::database::Database;
use larder::logging::{LogFormat, LoggingConfig};
use larder::models::{NewUnit, UnitType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Larder Demo Data Seeder",
    long_about = "Populate the database with the unit vocabulary and demo grocery lists"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Delete demo lists, items, and recipes before seeding (units are kept)
    #[arg(long)]
    reset: bool,

    /// Seed for the random generator, for reproducible demo data
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Standard unit vocabulary row
struct SeedUnit {
    name: &'static str,
    display_name: &'static str,
    unit_type: UnitType,
    abbreviation: Option<&'static str>,
}

const fn unit(
    name: &'static str,
    display_name: &'static str,
    unit_type: UnitType,
    abbreviation: Option<&'static str>,
) -> SeedUnit {
    SeedUnit {
        name,
        display_name,
        unit_type,
        abbreviation,
    }
}

/// The standard cooking-unit vocabulary, including plural and
/// abbreviated surface forms
const SEED_UNITS: &[SeedUnit] = &[
    // Volume measurements
    unit("cup", "Cup", UnitType::Volume, Some("c")),
    unit("cups", "Cups", UnitType::Volume, Some("c")),
    unit("tablespoon", "Tablespoon", UnitType::Volume, Some("tbsp")),
    unit("tablespoons", "Tablespoons", UnitType::Volume, Some("tbsp")),
    unit("tbsp", "Tbsp", UnitType::Volume, Some("tbsp")),
    unit("teaspoon", "Teaspoon", UnitType::Volume, Some("tsp")),
    unit("teaspoons", "Teaspoons", UnitType::Volume, Some("tsp")),
    unit("tsp", "Tsp", UnitType::Volume, Some("tsp")),
    unit("fluid ounce", "Fluid Ounce", UnitType::Volume, Some("fl oz")),
    unit("fluid ounces", "Fluid Ounces", UnitType::Volume, Some("fl oz")),
    unit("fl oz", "Fl Oz", UnitType::Volume, Some("fl oz")),
    unit("pint", "Pint", UnitType::Volume, Some("pt")),
    unit("pints", "Pints", UnitType::Volume, Some("pt")),
    unit("pt", "Pt", UnitType::Volume, Some("pt")),
    unit("quart", "Quart", UnitType::Volume, Some("qt")),
    unit("quarts", "Quarts", UnitType::Volume, Some("qt")),
    unit("qt", "Qt", UnitType::Volume, Some("qt")),
    unit("gallon", "Gallon", UnitType::Volume, Some("gal")),
    unit("gallons", "Gallons", UnitType::Volume, Some("gal")),
    unit("gal", "Gal", UnitType::Volume, Some("gal")),
    unit("milliliter", "Milliliter", UnitType::Volume, Some("ml")),
    unit("milliliters", "Milliliters", UnitType::Volume, Some("ml")),
    unit("ml", "mL", UnitType::Volume, Some("ml")),
    unit("liter", "Liter", UnitType::Volume, Some("l")),
    unit("liters", "Liters", UnitType::Volume, Some("l")),
    unit("l", "L", UnitType::Volume, Some("l")),
    // Weight measurements
    unit("pound", "Pound", UnitType::Weight, Some("lb")),
    unit("pounds", "Pounds", UnitType::Weight, Some("lb")),
    unit("lb", "Lb", UnitType::Weight, Some("lb")),
    unit("lbs", "Lbs", UnitType::Weight, Some("lb")),
    unit("ounce", "Ounce", UnitType::Weight, Some("oz")),
    unit("ounces", "Ounces", UnitType::Weight, Some("oz")),
    unit("oz", "Oz", UnitType::Weight, Some("oz")),
    unit("gram", "Gram", UnitType::Weight, Some("g")),
    unit("grams", "Grams", UnitType::Weight, Some("g")),
    unit("g", "g", UnitType::Weight, Some("g")),
    unit("kilogram", "Kilogram", UnitType::Weight, Some("kg")),
    unit("kilograms", "Kilograms", UnitType::Weight, Some("kg")),
    unit("kg", "kg", UnitType::Weight, Some("kg")),
    // Count measurements
    unit("piece", "Piece", UnitType::Count, Some("pc")),
    unit("pieces", "Pieces", UnitType::Count, Some("pc")),
    unit("pc", "Pc", UnitType::Count, Some("pc")),
    unit("slice", "Slice", UnitType::Count, None),
    unit("slices", "Slices", UnitType::Count, None),
    unit("clove", "Clove", UnitType::Count, None),
    unit("cloves", "Cloves", UnitType::Count, None),
    unit("head", "Head", UnitType::Count, None),
    unit("heads", "Heads", UnitType::Count, None),
    unit("bunch", "Bunch", UnitType::Count, None),
    unit("bunches", "Bunches", UnitType::Count, None),
    unit("bundle", "Bundle", UnitType::Count, None),
    unit("bundles", "Bundles", UnitType::Count, None),
    unit("can", "Can", UnitType::Count, None),
    unit("cans", "Cans", UnitType::Count, None),
    unit("package", "Package", UnitType::Count, Some("pkg")),
    unit("packages", "Packages", UnitType::Count, Some("pkg")),
    unit("pkg", "Pkg", UnitType::Count, Some("pkg")),
    unit("jar", "Jar", UnitType::Count, None),
    unit("jars", "Jars", UnitType::Count, None),
    unit("bottle", "Bottle", UnitType::Count, None),
    unit("bottles", "Bottles", UnitType::Count, None),
    unit("bag", "Bag", UnitType::Count, None),
    unit("bags", "Bags", UnitType::Count, None),
    unit("box", "Box", UnitType::Count, None),
    unit("boxes", "Boxes", UnitType::Count, None),
    // Size measurements
    unit("small", "Small", UnitType::Size, Some("sm")),
    unit("medium", "Medium", UnitType::Size, Some("med")),
    unit("large", "Large", UnitType::Size, Some("lg")),
    unit("extra large", "Extra Large", UnitType::Size, Some("xl")),
    unit("sm", "Sm", UnitType::Size, Some("sm")),
    unit("med", "Med", UnitType::Size, Some("med")),
    unit("lg", "Lg", UnitType::Size, Some("lg")),
    unit("xl", "XL", UnitType::Size, Some("xl")),
    // Special measurements
    unit("to taste", "To Taste", UnitType::Special, None),
    unit("as needed", "As Needed", UnitType::Special, None),
    unit("pinch", "Pinch", UnitType::Special, None),
    unit("dash", "Dash", UnitType::Special, None),
    unit("handful", "Handful", UnitType::Special, None),
    unit("splash", "Splash", UnitType::Special, None),
    unit("drizzle", "Drizzle", UnitType::Special, None),
];

/// Demo recipe with free-text ingredient lines
struct DemoRecipe {
    name: &'static str,
    ingredient_lines: &'static [&'static str],
}

const DEMO_RECIPES: &[DemoRecipe] = &[
    DemoRecipe {
        name: "Weeknight Pancakes",
        ingredient_lines: &[
            "2 cups all purpose flour",
            "1 1/2 tablespoons sugar",
            "2 teaspoons baking powder",
            "1/2 teaspoon salt",
            "2 eggs",
            "1 3/4 cups milk",
            "Butter as needed",
        ],
    },
    DemoRecipe {
        name: "Garlic Butter Pasta",
        ingredient_lines: &[
            "1 pound spaghetti",
            "4 cloves garlic",
            "1/2 cup grated parmesan",
            "2-3 tablespoons olive oil",
            "Salt to taste",
            "Black pepper to taste",
        ],
    },
    DemoRecipe {
        name: "Hearty Veggie Chili",
        ingredient_lines: &[
            "2 cans crushed tomatoes",
            "1 large onion",
            "2 medium carrots",
            "1 bunch cilantro",
            "2 tablespoons chili powder",
            "1 bag frozen corn",
        ],
    },
    DemoRecipe {
        name: "Morning Oats",
        ingredient_lines: &[
            "1 cup rolled oats",
            "2 cups milk",
            "1 tablespoon honey",
            "1 pinch cinnamon",
            "A handful of fresh berries",
        ],
    },
];

const DEMO_LIST_NAMES: &[&str] = &[
    "Weekly Shop",
    "Weekend Cooking",
    "Pantry Restock",
    "Dinner Party",
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    LoggingConfig {
        level: if args.verbose {
            "debug".into()
        } else {
            "info".into()
        },
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()?;

    let config = ServerConfig::from_env()?;
    let database_url = args.database_url.unwrap_or(config.database_url);

    info!(database_url = %database_url, "connecting");
    let db = Database::new(&database_url)
        .await
        .context("failed to open database")?;

    if args.reset {
        reset_demo_data(&db).await?;
    }

    seed_units(&db).await?;
    seed_lists(&db, args.seed).await?;

    info!("demo data seeding completed");
    Ok(())
}

/// Delete demo lists, items, attachments, and recipes. Units are kept.
async fn reset_demo_data(db: &Database) -> Result<()> {
    info!("resetting demo data");
    for table in [
        "grocery_list_recipes",
        "grocery_items",
        "grocery_lists",
        "recipes",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(db.pool())
            .await
            .with_context(|| format!("failed to clear {table}"))?;
    }
    Ok(())
}

/// Seed the standard unit vocabulary (first-or-create per row)
async fn seed_units(db: &Database) -> Result<()> {
    info!("seeding units...");

    for seed in SEED_UNITS {
        db.create_unit(&NewUnit {
            name: seed.name.into(),
            display_name: seed.display_name.into(),
            unit_type: seed.unit_type,
            is_standardized: true,
            abbreviation: seed.abbreviation.map(Into::into),
            conversion_factor: None,
            description: None,
        })
        .await?;
    }

    info!(count = db.count_units().await?, "units seeded");
    Ok(())
}

/// Create demo recipes and grocery lists, feeding ingredient lines
/// through the parser exactly as production writes do
async fn seed_lists(db: &Database, seed: u64) -> Result<()> {
    info!("creating demo recipes and grocery lists...");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recipe_ids = Vec::with_capacity(DEMO_RECIPES.len());
    for recipe in DEMO_RECIPES {
        let lines: Vec<String> = recipe
            .ingredient_lines
            .iter()
            .map(ToString::to_string)
            .collect();
        let created = db.create_recipe(recipe.name, &lines).await?;
        recipe_ids.push(created.id);
    }

    let list_count = rng.gen_range(2..=DEMO_LIST_NAMES.len());
    let mut total_items = 0_usize;

    for name in &DEMO_LIST_NAMES[..list_count] {
        let list = db.create_grocery_list(name, None).await?;

        // Attach one or two distinct recipes per list, parser-generating
        // the items
        let attach_count = rng.gen_range(1..=2);
        let chosen: Vec<i64> = recipe_ids
            .choose_multiple(&mut rng, attach_count)
            .copied()
            .collect();
        for recipe_id in chosen {
            let servings = rng.gen_range(2..=6);
            let items = db
                .add_recipe_to_grocery_list(list.id, recipe_id, servings)
                .await?;
            total_items += items.len();
        }

        info!(list = %list.name, "created grocery list");
    }

    info!(
        recipes = DEMO_RECIPES.len(),
        lists = list_count,
        items = total_items,
        "demo lists created"
    );
    Ok(())
}
