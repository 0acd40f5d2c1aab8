// ABOUTME: Grocery list, grocery item, and recipe attachment queries
// ABOUTME: Includes the compare-and-swap discipline for the pivot selection column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

use super::Database;
use crate::constants::limits;
use crate::errors::{DatabaseError, DbResult};
use crate::models::{GroceryItem, GroceryList, NewGroceryItem, Recipe, RecipeAttachment};
use serde_json::Value;
use sqlx::Row;
use std::collections::BTreeSet;
use tracing::debug;
use uuid::Uuid;

const ITEM_COLUMNS: &str = "id, uid, grocery_list_id, name, category, quantity, unit_id, \
     notes, is_checked, checked_at, sort_order, recipe_id, metadata, \
     created_at, updated_at, deleted_at";

impl Database {
    pub(super) async fn migrate_recipes(&self) -> DbResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uid TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                ingredient_lines TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create recipes table"))?;

        Ok(())
    }

    pub(super) async fn migrate_grocery(&self) -> DbResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS grocery_lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uid TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                description TEXT,
                completed_at DATETIME,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery_lists table"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS grocery_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uid TEXT NOT NULL UNIQUE,
                grocery_list_id INTEGER NOT NULL
                    REFERENCES grocery_lists(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                category TEXT,
                quantity REAL,
                unit_id INTEGER REFERENCES units(id) ON DELETE SET NULL,
                notes TEXT,
                is_checked BOOLEAN NOT NULL DEFAULT 0,
                checked_at DATETIME,
                sort_order INTEGER NOT NULL DEFAULT 0,
                recipe_id INTEGER REFERENCES recipes(id) ON DELETE SET NULL,
                metadata TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                deleted_at DATETIME
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery_items table"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_grocery_items_list_sort \
             ON grocery_items(grocery_list_id, sort_order)",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery_items indexes"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_grocery_items_recipe ON grocery_items(recipe_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery_items indexes"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS grocery_list_recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                grocery_list_id INTEGER NOT NULL
                    REFERENCES grocery_lists(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL
                    REFERENCES recipes(id) ON DELETE CASCADE,
                servings INTEGER NOT NULL DEFAULT 1,
                selected_item_ids TEXT,
                auto_generated BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(grocery_list_id, recipe_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery_list_recipes table"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_glr_list ON grocery_list_recipes(grocery_list_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery_list_recipes indexes"))?;

        Ok(())
    }

    // ── Grocery lists ───────────────────────────────────────────────────

    /// Create a grocery list
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn create_grocery_list(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> DbResult<GroceryList> {
        let uid = Uuid::new_v4();
        let result = sqlx::query(
            "INSERT INTO grocery_lists (uid, name, description) VALUES ($1, $2, $3)",
        )
        .bind(uid.to_string())
        .bind(name)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery list"))?;

        self.get_grocery_list(result.last_insert_rowid())
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "grocery list",
                key: uid.to_string(),
            })
    }

    /// Fetch a grocery list by id
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn get_grocery_list(&self, id: i64) -> DbResult<Option<GroceryList>> {
        let row = sqlx::query(
            "SELECT id, uid, name, description, completed_at, created_at, updated_at \
             FROM grocery_lists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::query("get grocery list"))?;

        row.map(|r| Self::row_to_list(&r)).transpose()
    }

    /// Number of checked, live items on a list
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn checked_item_count(&self, grocery_list_id: i64) -> DbResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM grocery_items \
             WHERE grocery_list_id = $1 AND is_checked = 1 AND deleted_at IS NULL",
        )
        .bind(grocery_list_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::query("count checked items"))
    }

    /// Number of unchecked, live items on a list
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn unchecked_item_count(&self, grocery_list_id: i64) -> DbResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM grocery_items \
             WHERE grocery_list_id = $1 AND is_checked = 0 AND deleted_at IS NULL",
        )
        .bind(grocery_list_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::query("count unchecked items"))
    }

    pub(crate) async fn delete_list_row(&self, grocery_list_id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM grocery_lists WHERE id = $1")
            .bind(grocery_list_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("delete grocery list row"))?;
        Ok(())
    }

    pub(crate) async fn delete_items_for_list(&self, grocery_list_id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM grocery_items WHERE grocery_list_id = $1")
            .bind(grocery_list_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("delete items for list"))?;
        Ok(result.rows_affected())
    }

    // ── Recipes ─────────────────────────────────────────────────────────

    /// Create a recipe with its free-text ingredient lines
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn create_recipe(&self, name: &str, ingredient_lines: &[String]) -> DbResult<Recipe> {
        let uid = Uuid::new_v4();
        let lines = serde_json::to_string(ingredient_lines)
            .map_err(|e| DatabaseError::Corrupt(format!("encode ingredient lines: {e}")))?;

        let result =
            sqlx::query("INSERT INTO recipes (uid, name, ingredient_lines) VALUES ($1, $2, $3)")
                .bind(uid.to_string())
                .bind(name)
                .bind(lines)
                .execute(&self.pool)
                .await
                .map_err(DatabaseError::query("create recipe"))?;

        self.get_recipe(result.last_insert_rowid())
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "recipe",
                key: uid.to_string(),
            })
    }

    /// Fetch a recipe by id
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn get_recipe(&self, id: i64) -> DbResult<Option<Recipe>> {
        let row = sqlx::query(
            "SELECT id, uid, name, ingredient_lines, created_at, updated_at \
             FROM recipes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::query("get recipe"))?;

        row.map(|r| Self::row_to_recipe(&r)).transpose()
    }

    // ── Recipe attachments (pivot) ──────────────────────────────────────

    /// Attach a recipe to a grocery list with an empty selection set
    ///
    /// Idempotent: attaching an already-attached recipe is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn attach_recipe_to_list(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
        servings: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r"
            INSERT INTO grocery_list_recipes
                (grocery_list_id, recipe_id, servings, selected_item_ids, auto_generated)
            VALUES ($1, $2, $3, '[]', 1)
            ON CONFLICT(grocery_list_id, recipe_id) DO NOTHING
            ",
        )
        .bind(grocery_list_id)
        .bind(recipe_id)
        .bind(servings)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("attach recipe to list"))?;

        Ok(())
    }

    /// Fetch the attachment row for a (list, recipe) pair
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn find_pivot(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
    ) -> DbResult<Option<RecipeAttachment>> {
        let row = sqlx::query(
            "SELECT grocery_list_id, recipe_id, servings, selected_item_ids, \
                    auto_generated, created_at, updated_at \
             FROM grocery_list_recipes WHERE grocery_list_id = $1 AND recipe_id = $2",
        )
        .bind(grocery_list_id)
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::query("find recipe attachment"))?;

        row.map(|r| Self::row_to_pivot(&r)).transpose()
    }

    pub(crate) async fn delete_pivot_rows_for_list(&self, grocery_list_id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM grocery_list_recipes WHERE grocery_list_id = $1")
            .bind(grocery_list_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("delete attachments for list"))?;
        Ok(result.rows_affected())
    }

    pub(crate) async fn delete_pivot_row(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            "DELETE FROM grocery_list_recipes WHERE grocery_list_id = $1 AND recipe_id = $2",
        )
        .bind(grocery_list_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("delete recipe attachment"))?;
        Ok(result.rows_affected())
    }

    /// Read-modify-write the selection set of one attachment row under a
    /// compare-and-swap loop
    ///
    /// The column is a full-set overwrite, so concurrent mutations of the
    /// same row would otherwise lose updates. The UPDATE only applies
    /// when the stored value still matches what was read (`IS` handles
    /// the NULL case); losing the swap re-reads and retries a bounded
    /// number of times.
    ///
    /// A missing attachment row is a benign no-op: item creation is
    /// allowed to race ahead of recipe attachment.
    pub(crate) async fn mutate_pivot_selection<F>(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
        apply: F,
    ) -> DbResult<()>
    where
        F: Fn(&mut BTreeSet<i64>),
    {
        for attempt in 1..=limits::PIVOT_UPDATE_MAX_ATTEMPTS {
            let row = sqlx::query(
                "SELECT selected_item_ids FROM grocery_list_recipes \
                 WHERE grocery_list_id = $1 AND recipe_id = $2",
            )
            .bind(grocery_list_id)
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::query("read attachment selection"))?;

            let Some(row) = row else {
                debug!(
                    grocery_list_id,
                    recipe_id, "no attachment row for selection update; skipping"
                );
                return Ok(());
            };

            let stored: Option<String> = row.get("selected_item_ids");
            let mut ids = parse_selection(stored.as_deref())?;
            let before = ids.clone();
            apply(&mut ids);

            if ids == before {
                return Ok(());
            }

            let serialized = serialize_selection(&ids)?;
            let result = sqlx::query(
                r"
                UPDATE grocery_list_recipes
                SET selected_item_ids = $3, updated_at = CURRENT_TIMESTAMP
                WHERE grocery_list_id = $1 AND recipe_id = $2
                  AND selected_item_ids IS $4
                ",
            )
            .bind(grocery_list_id)
            .bind(recipe_id)
            .bind(&serialized)
            .bind(&stored)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("update attachment selection"))?;

            if result.rows_affected() == 1 {
                return Ok(());
            }

            debug!(
                grocery_list_id,
                recipe_id, attempt, "selection compare-and-swap lost; retrying"
            );
        }

        Err(DatabaseError::Conflict {
            context: format!("grocery_list_recipes({grocery_list_id}, {recipe_id})"),
        })
    }

    /// Overwrite an attachment's selection set directly
    ///
    /// Ids are deduplicated and stored sorted.
    pub(crate) async fn overwrite_pivot_selection(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
        item_ids: &[i64],
    ) -> DbResult<()> {
        let ids: BTreeSet<i64> = item_ids.iter().copied().collect();
        let serialized = serialize_selection(&ids)?;

        sqlx::query(
            r"
            UPDATE grocery_list_recipes
            SET selected_item_ids = $3, updated_at = CURRENT_TIMESTAMP
            WHERE grocery_list_id = $1 AND recipe_id = $2
            ",
        )
        .bind(grocery_list_id)
        .bind(recipe_id)
        .bind(&serialized)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("overwrite attachment selection"))?;

        Ok(())
    }

    // ── Grocery items ───────────────────────────────────────────────────

    /// Insert a grocery item and fire the created lifecycle hook
    ///
    /// The hook fires exactly once per successful insert; it keeps the
    /// owning attachment's selection set current when the item came from
    /// a recipe.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn create_grocery_item(&self, fields: &NewGroceryItem) -> DbResult<GroceryItem> {
        let uid = Uuid::new_v4();
        let result = sqlx::query(
            r"
            INSERT INTO grocery_items
                (uid, grocery_list_id, name, quantity, unit_id, is_checked, recipe_id, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(uid.to_string())
        .bind(fields.grocery_list_id)
        .bind(&fields.name)
        .bind(fields.quantity)
        .bind(fields.unit_id)
        .bind(fields.is_checked)
        .bind(fields.recipe_id)
        .bind(fields.metadata.to_string())
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("create grocery item"))?;

        let item = self
            .get_grocery_item(result.last_insert_rowid())
            .await?
            .ok_or(DatabaseError::NotFound {
                entity: "grocery item",
                key: uid.to_string(),
            })?;

        self.on_grocery_item_created(&item).await?;
        Ok(item)
    }

    /// Fetch a grocery item by id (soft-deleted rows included)
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn get_grocery_item(&self, id: i64) -> DbResult<Option<GroceryItem>> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM grocery_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::query("get grocery item"))?;

        row.map(|r| Self::row_to_item(&r)).transpose()
    }

    /// Soft-delete a grocery item and fire the deleted lifecycle hook
    ///
    /// The hook fires exactly once: a second delete of the same item is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn delete_grocery_item(&self, item: &GroceryItem) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE grocery_items \
             SET deleted_at = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(item.id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("delete grocery item"))?;

        if result.rows_affected() == 1 {
            self.on_grocery_item_deleted(item).await?;
        }
        Ok(())
    }

    /// Hard-delete a grocery item row and fire the deleted lifecycle hook
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn force_delete_grocery_item(&self, item: &GroceryItem) -> DbResult<()> {
        let already_soft_deleted = item.deleted_at.is_some();

        let result = sqlx::query("DELETE FROM grocery_items WHERE id = $1")
            .bind(item.id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::query("force delete grocery item"))?;

        // The soft delete already ran the hook for this item
        if result.rows_affected() == 1 && !already_soft_deleted {
            self.on_grocery_item_deleted(item).await?;
        }
        Ok(())
    }

    /// Check or uncheck a live item
    ///
    /// `checked_at` follows the flag: stamped on check, cleared on
    /// uncheck.
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn set_item_checked(&self, item_id: i64, checked: bool) -> DbResult<()> {
        sqlx::query(
            r"
            UPDATE grocery_items
            SET is_checked = $2,
                checked_at = CASE WHEN $2 THEN CURRENT_TIMESTAMP ELSE NULL END,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(item_id)
        .bind(checked)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::query("set item checked"))?;
        Ok(())
    }

    /// Live items on a list, in sort order
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn items_for_list(&self, grocery_list_id: i64) -> DbResult<Vec<GroceryItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM grocery_items \
             WHERE grocery_list_id = $1 AND deleted_at IS NULL \
             ORDER BY sort_order, id"
        ))
        .bind(grocery_list_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::query("list items for list"))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    /// Ids of live items generated from a recipe on a list
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn live_item_ids_for_recipe(
        &self,
        grocery_list_id: i64,
        recipe_id: i64,
    ) -> DbResult<Vec<i64>> {
        sqlx::query_scalar(
            "SELECT id FROM grocery_items \
             WHERE grocery_list_id = $1 AND recipe_id = $2 AND deleted_at IS NULL \
             ORDER BY id",
        )
        .bind(grocery_list_id)
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::query("list item ids for recipe"))
    }

    /// Live items on a list matching the given ids
    ///
    /// # Errors
    ///
    /// Returns a query error on storage faults.
    pub async fn items_by_ids(
        &self,
        grocery_list_id: i64,
        ids: &[i64],
    ) -> DbResult<Vec<GroceryItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM grocery_items \
             WHERE grocery_list_id = ? AND deleted_at IS NULL AND id IN ({placeholders}) \
             ORDER BY sort_order, id"
        );

        let mut q = sqlx::query(&query).bind(grocery_list_id);
        for id in ids {
            q = q.bind(id);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::query("list items by ids"))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    // ── Row mapping ─────────────────────────────────────────────────────

    fn row_to_list(row: &sqlx::sqlite::SqliteRow) -> DbResult<GroceryList> {
        Ok(GroceryList {
            id: row.get("id"),
            uid: parse_uid(&row.get::<String, _>("uid"))?,
            name: row.get("name"),
            description: row.get("description"),
            completed_at: row.get("completed_at"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn row_to_recipe(row: &sqlx::sqlite::SqliteRow) -> DbResult<Recipe> {
        let lines: String = row.get("ingredient_lines");
        let ingredient_lines = serde_json::from_str(&lines)
            .map_err(|e| DatabaseError::Corrupt(format!("recipe ingredient lines: {e}")))?;

        Ok(Recipe {
            id: row.get("id"),
            uid: parse_uid(&row.get::<String, _>("uid"))?,
            name: row.get("name"),
            ingredient_lines,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn row_to_pivot(row: &sqlx::sqlite::SqliteRow) -> DbResult<RecipeAttachment> {
        let stored: Option<String> = row.get("selected_item_ids");
        let selected_item_ids = parse_selection(stored.as_deref())?.into_iter().collect();

        Ok(RecipeAttachment {
            grocery_list_id: row.get("grocery_list_id"),
            recipe_id: row.get("recipe_id"),
            servings: row.get("servings"),
            selected_item_ids,
            auto_generated: row.get("auto_generated"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> DbResult<GroceryItem> {
        let metadata: Option<String> = row.get("metadata");
        let metadata = metadata.map_or(Value::Null, |raw| {
            serde_json::from_str(&raw).unwrap_or(Value::Null)
        });

        Ok(GroceryItem {
            id: row.get("id"),
            uid: parse_uid(&row.get::<String, _>("uid"))?,
            grocery_list_id: row.get("grocery_list_id"),
            name: row.get("name"),
            category: row.get("category"),
            quantity: row.get("quantity"),
            unit_id: row.get("unit_id"),
            notes: row.get("notes"),
            is_checked: row.get("is_checked"),
            checked_at: row.get("checked_at"),
            sort_order: row.get("sort_order"),
            recipe_id: row.get("recipe_id"),
            metadata,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            deleted_at: row.get("deleted_at"),
        })
    }
}

fn parse_uid(raw: &str) -> DbResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::Corrupt(format!("uid column: {e}")))
}

/// Decode the stored selection column into a set
///
/// NULL decodes as the empty set; the column is a JSON array on disk but
/// is always treated as a set in memory.
fn parse_selection(stored: Option<&str>) -> DbResult<BTreeSet<i64>> {
    match stored {
        None => Ok(BTreeSet::new()),
        Some(raw) => serde_json::from_str::<Vec<i64>>(raw)
            .map(|ids| ids.into_iter().collect())
            .map_err(|e| DatabaseError::Corrupt(format!("selected_item_ids column: {e}"))),
    }
}

/// Encode a selection set as the ordered JSON array the column stores
fn serialize_selection(ids: &BTreeSet<i64>) -> DbResult<String> {
    let ordered: Vec<i64> = ids.iter().copied().collect();
    serde_json::to_string(&ordered)
        .map_err(|e| DatabaseError::Corrupt(format!("encode selected_item_ids: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_selection_treats_null_as_empty() {
        assert!(parse_selection(None).unwrap().is_empty());
        assert!(parse_selection(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn parse_selection_deduplicates() {
        let ids = parse_selection(Some("[3, 1, 3, 2]")).unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn parse_selection_rejects_malformed_json() {
        assert!(parse_selection(Some("{not json")).is_err());
    }

    #[test]
    fn serialize_selection_orders_ids() {
        let ids: BTreeSet<i64> = [5, 1, 3].into_iter().collect();
        assert_eq!(serialize_selection(&ids).unwrap(), "[1,3,5]");
    }
}
