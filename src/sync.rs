// ABOUTME: Grocery selection synchronization hooks and list/recipe lifecycle paths
// ABOUTME: Keeps each attachment's selected item ids consistent with live item rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! Grocery selection synchronization.
//!
//! Every grocery-list/recipe attachment carries a denormalized set of the
//! item ids that originated from that recipe and still exist in the list.
//! The hooks here are invoked by the item create/delete paths — exactly
//! once per successful event — so callers of item-creation code never
//! update the attachment themselves. Bulk list deletion and recipe
//! detachment bypass the per-item path and drop attachment rows outright.

use crate::database::Database;
use crate::errors::{DatabaseError, DbResult};
use crate::models::{GroceryItem, ParsedIngredient};
use tracing::{debug, info};

impl Database {
    /// Handle a grocery item "created" event
    ///
    /// Items without a source recipe have no attachment effect. For
    /// recipe-generated items the id is added to the attachment's
    /// selection set (idempotently); a missing attachment row is a
    /// benign no-op since item creation may race ahead of attachment.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults, or `Conflict` if the
    /// selection update loses every compare-and-swap attempt.
    pub async fn on_grocery_item_created(&self, item: &GroceryItem) -> DbResult<()> {
        let Some(recipe_id) = item.recipe_id else {
            return Ok(());
        };

        self.mutate_pivot_selection(item.grocery_list_id, recipe_id, |ids| {
            ids.insert(item.id);
        })
        .await
    }

    /// Handle a grocery item "deleted" event (soft or hard)
    ///
    /// Removes the item's id from the attachment's selection set and
    /// re-serializes the remainder compactly. Absent attachment or an
    /// already-empty set is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults, or `Conflict` if the
    /// selection update loses every compare-and-swap attempt.
    pub async fn on_grocery_item_deleted(&self, item: &GroceryItem) -> DbResult<()> {
        let Some(recipe_id) = item.recipe_id else {
            return Ok(());
        };

        self.mutate_pivot_selection(item.grocery_list_id, recipe_id, |ids| {
            ids.remove(&item.id);
        })
        .await
    }

    /// Delete a grocery list with all of its items and attachments
    ///
    /// Attachment rows are dropped in one statement instead of walking
    /// the per-item synchronization path.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn delete_grocery_list(&self, grocery_list_id: i64) -> DbResult<()> {
        let attachments = self.delete_pivot_rows_for_list(grocery_list_id).await?;
        let items = self.delete_items_for_list(grocery_list_id).await?;
        self.delete_list_row(grocery_list_id).await?;

        info!(grocery_list_id, attachments, items, "deleted grocery list");
        Ok(())
    }

    /// Detach a recipe from a grocery list
    ///
    /// Drops the single attachment row; the grocery items generated from
    /// the recipe stay on the list.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn detach_recipe_from_list(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
    ) -> DbResult<()> {
        let removed = self.delete_pivot_row(grocery_list_id, recipe_id).await?;
        debug!(grocery_list_id, recipe_id, removed, "detached recipe");
        Ok(())
    }

    /// Selected grocery items for a recipe on a list
    ///
    /// Resolves the attachment's selection set to the live item rows.
    /// Returns an empty vector when the attachment is missing or its
    /// selection is empty.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn get_selected_items_for_recipe(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
    ) -> DbResult<Vec<GroceryItem>> {
        let Some(pivot) = self.find_pivot(grocery_list_id, recipe_id).await? else {
            return Ok(Vec::new());
        };

        if pivot.selected_item_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.items_by_ids(grocery_list_id, &pivot.selected_item_ids)
            .await
    }

    /// Overwrite the selection set for a recipe on a list
    ///
    /// Ids are deduplicated; the stored order is not meaningful.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn update_selected_items_for_recipe(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
        item_ids: &[i64],
    ) -> DbResult<()> {
        self.overwrite_pivot_selection(grocery_list_id, recipe_id, item_ids)
            .await
    }

    /// Whether an item is selected for its source recipe
    ///
    /// Manually added items (no source recipe) are never "selected".
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn is_item_selected_for_recipe(&self, item: &GroceryItem) -> DbResult<bool> {
        let Some(recipe_id) = item.recipe_id else {
            return Ok(false);
        };

        let Some(pivot) = self.find_pivot(item.grocery_list_id, recipe_id).await? else {
            return Ok(false);
        };

        Ok(pivot.selected_item_ids.contains(&item.id))
    }

    /// Attach a recipe to a list and generate grocery items from its
    /// ingredient lines
    ///
    /// Each line is parsed independently and inserted; the created hooks
    /// populate the attachment's selection set as a side effect. Returns
    /// the created items in line order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the recipe does not exist, or a query error
    /// on storage faults.
    pub async fn add_recipe_to_grocery_list(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
        servings: i64,
    ) -> DbResult<Vec<GroceryItem>> {
        let recipe = self
            .get_recipe(recipe_id)
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "recipe",
                key: recipe_id.to_string(),
            })?;

        self.attach_recipe_to_list(grocery_list_id, recipe_id, servings)
            .await?;

        let parsed = self.parse_ingredients(&recipe.ingredient_lines).await?;

        let mut items = Vec::with_capacity(parsed.len());
        for ingredient in &parsed {
            let fields =
                ParsedIngredient::to_grocery_item_fields(ingredient, grocery_list_id, Some(recipe_id));
            items.push(self.create_grocery_item(&fields).await?);
        }

        info!(
            grocery_list_id,
            recipe_id,
            items = items.len(),
            "added recipe to grocery list"
        );
        Ok(items)
    }
}
