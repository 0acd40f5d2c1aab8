// ABOUTME: Integration tests for grocery selection synchronization
// ABOUTME: Exercises lifecycle hooks, bulk deletion shortcuts, and the selection invariant
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! Tests for the selection synchronizer:
//! - Create/delete hooks against the attachment's selection set
//! - Benign no-ops for detached items and missing attachments
//! - Bulk list deletion and recipe detachment shortcuts
//! - The selection-set invariant under randomized create/delete sequences

use larder::database::Database;
use larder::models::NewGroceryItem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

mod common;
use common::{create_list_with_recipe, create_test_database};

fn item_fields(grocery_list_id: i64, recipe_id: Option<i64>, name: &str) -> NewGroceryItem {
    NewGroceryItem {
        grocery_list_id,
        recipe_id,
        name: name.into(),
        quantity: None,
        unit_id: None,
        is_checked: false,
        metadata: json!({}),
    }
}

async fn selected_ids(db: &Database, list_id: i64, recipe_id: i64) -> Vec<i64> {
    db.find_pivot(list_id, recipe_id)
        .await
        .unwrap()
        .map(|p| p.selected_item_ids)
        .unwrap_or_default()
}

// ============================================================================
// Lifecycle Hooks
// ============================================================================

#[tokio::test]
async fn created_item_joins_the_selection_set() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let item = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();

    assert_eq!(selected_ids(&t.db, list_id, recipe_id).await, vec![item.id]);
}

#[tokio::test]
async fn manually_added_item_has_no_attachment_effect() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    t.db.create_grocery_item(&item_fields(list_id, None, "sponges"))
        .await
        .unwrap();

    assert!(selected_ids(&t.db, list_id, recipe_id).await.is_empty());
}

#[tokio::test]
async fn missing_attachment_is_a_benign_no_op() {
    let t = create_test_database().await.unwrap();
    let list = t.db.create_grocery_list("Solo", None).await.unwrap();
    let recipe = t.db.create_recipe("Unattached", &[]).await.unwrap();

    // Item creation racing ahead of attachment must not fail
    let item = t
        .db
        .create_grocery_item(&item_fields(list.id, Some(recipe.id), "flour"))
        .await
        .unwrap();

    assert_eq!(item.recipe_id, Some(recipe.id));
    assert!(t.db.find_pivot(list.id, recipe.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleted_item_leaves_the_selection_set_compact() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let mut items = Vec::new();
    for name in ["flour", "sugar", "eggs"] {
        items.push(
            t.db.create_grocery_item(&item_fields(list_id, Some(recipe_id), name))
                .await
                .unwrap(),
        );
    }

    t.db.delete_grocery_item(&items[1]).await.unwrap();

    assert_eq!(
        selected_ids(&t.db, list_id, recipe_id).await,
        vec![items[0].id, items[2].id]
    );
}

#[tokio::test]
async fn deleting_twice_fires_the_hook_once() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let keep = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();
    let item = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "sugar"))
        .await
        .unwrap();

    t.db.delete_grocery_item(&item).await.unwrap();
    t.db.delete_grocery_item(&item).await.unwrap();

    assert_eq!(selected_ids(&t.db, list_id, recipe_id).await, vec![keep.id]);
}

#[tokio::test]
async fn force_delete_also_unselects() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let item = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();

    t.db.force_delete_grocery_item(&item).await.unwrap();

    assert!(selected_ids(&t.db, list_id, recipe_id).await.is_empty());
    assert!(t.db.get_grocery_item(item.id).await.unwrap().is_none());
}

// ============================================================================
// Selection Accessors
// ============================================================================

#[tokio::test]
async fn selected_items_resolve_to_live_rows() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let kept = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();
    let dropped = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "sugar"))
        .await
        .unwrap();
    t.db.delete_grocery_item(&dropped).await.unwrap();

    let selected = t
        .db
        .get_selected_items_for_recipe(list_id, recipe_id)
        .await
        .unwrap();

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, kept.id);
}

#[tokio::test]
async fn selection_overwrite_deduplicates() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let a = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();
    let b = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "sugar"))
        .await
        .unwrap();

    t.db.update_selected_items_for_recipe(list_id, recipe_id, &[b.id, a.id, b.id])
        .await
        .unwrap();

    assert_eq!(selected_ids(&t.db, list_id, recipe_id).await, vec![a.id, b.id]);
}

#[tokio::test]
async fn item_selection_check_covers_manual_and_recipe_items() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let from_recipe = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();
    let manual = t
        .db
        .create_grocery_item(&item_fields(list_id, None, "sponges"))
        .await
        .unwrap();

    assert!(t.db.is_item_selected_for_recipe(&from_recipe).await.unwrap());
    assert!(!t.db.is_item_selected_for_recipe(&manual).await.unwrap());
}

#[tokio::test]
async fn checked_counts_track_the_flag() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let first = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();
    t.db.create_grocery_item(&item_fields(list_id, Some(recipe_id), "sugar"))
        .await
        .unwrap();

    t.db.set_item_checked(first.id, true).await.unwrap();

    assert_eq!(t.db.checked_item_count(list_id).await.unwrap(), 1);
    assert_eq!(t.db.unchecked_item_count(list_id).await.unwrap(), 1);

    let checked = t.db.get_grocery_item(first.id).await.unwrap().unwrap();
    assert!(checked.is_checked);
    assert!(checked.checked_at.is_some());

    t.db.set_item_checked(first.id, false).await.unwrap();
    assert_eq!(t.db.checked_item_count(list_id).await.unwrap(), 0);
}

// ============================================================================
// Bulk Shortcuts
// ============================================================================

#[tokio::test]
async fn deleting_a_list_drops_every_attachment_row() {
    let t = create_test_database().await.unwrap();
    let list = t.db.create_grocery_list("Weekly Shop", None).await.unwrap();

    let mut recipe_ids = Vec::new();
    for name in ["Pancakes", "Chili", "Oats"] {
        let recipe = t.db.create_recipe(name, &[]).await.unwrap();
        t.db.attach_recipe_to_list(list.id, recipe.id, 2)
            .await
            .unwrap();
        t.db.create_grocery_item(&item_fields(list.id, Some(recipe.id), name))
            .await
            .unwrap();
        recipe_ids.push(recipe.id);
    }

    t.db.delete_grocery_list(list.id).await.unwrap();

    for recipe_id in recipe_ids {
        assert!(t.db.find_pivot(list.id, recipe_id).await.unwrap().is_none());
    }
    assert!(t.db.items_for_list(list.id).await.unwrap().is_empty());
    assert!(t.db.get_grocery_list(list.id).await.unwrap().is_none());
}

#[tokio::test]
async fn detaching_a_recipe_keeps_its_items() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let item = t
        .db
        .create_grocery_item(&item_fields(list_id, Some(recipe_id), "flour"))
        .await
        .unwrap();

    t.db.detach_recipe_from_list(list_id, recipe_id)
        .await
        .unwrap();

    assert!(t.db.find_pivot(list_id, recipe_id).await.unwrap().is_none());
    let remaining = t.db.items_for_list(list_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, item.id);
}

// ============================================================================
// End to End
// ============================================================================

#[tokio::test]
async fn adding_a_recipe_generates_selected_items() {
    let t = create_test_database().await.unwrap();
    let list = t.db.create_grocery_list("Weekend Cooking", None).await.unwrap();
    let lines: Vec<String> = ["2 cups flour", "3 eggs", "Salt to taste"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let recipe = t.db.create_recipe("Pancakes", &lines).await.unwrap();

    let items = t
        .db
        .add_recipe_to_grocery_list(list.id, recipe.id, 4)
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].name, "flour");
    assert_eq!(items[0].quantity, Some(2.0));
    assert_eq!(items[1].name, "eggs");
    assert_eq!(items[2].name, "Salt");
    assert_eq!(items[2].metadata["parsed_from"], "Salt to taste");

    let mut expected: Vec<i64> = items.iter().map(|i| i.id).collect();
    expected.sort_unstable();
    assert_eq!(selected_ids(&t.db, list.id, recipe.id).await, expected);

    let pivot = t.db.find_pivot(list.id, recipe.id).await.unwrap().unwrap();
    assert_eq!(pivot.servings, 4);
    assert!(pivot.auto_generated);
}

// ============================================================================
// Selection-Set Invariant
// ============================================================================

#[tokio::test]
async fn selection_matches_live_items_under_random_churn() {
    let t = create_test_database().await.unwrap();
    let (list_id, recipe_id) = create_list_with_recipe(&t.db, &[]).await.unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let mut live = Vec::new();

    for step in 0..80 {
        if live.is_empty() || rng.gen_bool(0.6) {
            let item = t
                .db
                .create_grocery_item(&item_fields(
                    list_id,
                    Some(recipe_id),
                    &format!("item-{step}"),
                ))
                .await
                .unwrap();
            live.push(item);
        } else {
            let victim = live.swap_remove(rng.gen_range(0..live.len()));
            if rng.gen_bool(0.5) {
                t.db.delete_grocery_item(&victim).await.unwrap();
            } else {
                t.db.force_delete_grocery_item(&victim).await.unwrap();
            }
        }

        let expected = t
            .db
            .live_item_ids_for_recipe(list_id, recipe_id)
            .await
            .unwrap();
        assert_eq!(
            selected_ids(&t.db, list_id, recipe_id).await,
            expected,
            "selection drifted from live items at step {step}"
        );
    }
}
