//! # Recipe Repository
//!
//! Database operations for recipes and their item lists.
//!
//! ## Batched Fetches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │             How a Recipe Load Avoids N+1 Queries                        │
//! │                                                                         │
//! │  get_with_items("recipe-id")                                           │
//! │       │                                                                 │
//! │       ├── 1 query: the recipe row                                      │
//! │       └── 1 query: recipe_items JOIN products                          │
//! │              (product name + unit price come back with each item)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Recipe { items: [RecipeItem { product snapshot, quantity }, ...] }    │
//! │                                                                         │
//! │  Never one round trip per item. Item order is the stored insertion     │
//! │  order (`position`), so merge iteration is deterministic.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use mealcart_core::{Recipe, RecipeItem};

/// A recipe row without its items (internal shape).
#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: String,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// A recipe item joined with its product, tagged with the owning recipe
/// (internal shape for the all-recipes listing).
#[derive(Debug, sqlx::FromRow)]
struct RecipeItemRow {
    recipe_id: String,
    product_id: String,
    product_name: String,
    unit_price_cents: i64,
    quantity: i64,
}

impl From<RecipeItemRow> for RecipeItem {
    fn from(row: RecipeItemRow) -> Self {
        RecipeItem {
            product_id: row.product_id,
            product_name: row.product_name,
            unit_price_cents: row.unit_price_cents,
            quantity: row.quantity,
        }
    }
}

/// Repository for recipe database operations.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    /// Creates a new RecipeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RecipeRepository { pool }
    }

    /// Gets a recipe together with its item list, fully populated with
    /// product snapshots.
    ///
    /// ## Returns
    /// `None` when no recipe exists for the id.
    pub async fn get_with_items(&self, id: &str) -> DbResult<Option<Recipe>> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM recipes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, RecipeItem>(
            r#"
            SELECT
                ri.product_id,
                p.name AS product_name,
                p.price_cents AS unit_price_cents,
                ri.quantity
            FROM recipe_items ri
            JOIN products p ON p.id = ri.product_id
            WHERE ri.recipe_id = ?1
            ORDER BY ri.position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Recipe {
            id: row.id,
            name: row.name,
            items,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    /// Lists all recipes with their items in two queries total, grouped in
    /// memory.
    pub async fn list_with_items(&self) -> DbResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM recipes
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, RecipeItemRow>(
            r#"
            SELECT
                ri.recipe_id,
                ri.product_id,
                p.name AS product_name,
                p.price_cents AS unit_price_cents,
                ri.quantity
            FROM recipe_items ri
            JOIN products p ON p.id = ri.product_id
            ORDER BY ri.recipe_id, ri.position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        // Group items under their recipe, preserving per-recipe item order.
        let mut items_by_recipe: HashMap<String, Vec<RecipeItem>> = HashMap::new();
        for row in item_rows {
            items_by_recipe
                .entry(row.recipe_id.clone())
                .or_default()
                .push(row.into());
        }

        let recipes = rows
            .into_iter()
            .map(|row| Recipe {
                items: items_by_recipe.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect();

        Ok(recipes)
    }

    /// Inserts a recipe and its items (seeding and tests).
    ///
    /// Item positions follow the order of `recipe.items`.
    pub async fn insert(&self, recipe: &Recipe) -> DbResult<()> {
        debug!(id = %recipe.id, name = %recipe.name, items = recipe.items.len(), "Inserting recipe");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO recipes (id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&recipe.id)
        .bind(&recipe.name)
        .bind(recipe.created_at)
        .bind(recipe.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in recipe.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO recipe_items (id, recipe_id, product_id, quantity, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&recipe.id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
