//! # Cart Repository
//!
//! Database operations for carts and their line items.
//!
//! ## Merge Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  How a Merge Outcome Is Persisted                       │
//! │                                                                         │
//! │  merge::apply_recipe / revert_recipe  (pure, in mealcart-core)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MergeOutcome { total_cents, changes: [Upsert|Delete] }                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist_outcome()  ← ONE SQLite transaction                           │
//! │  ├── UPDATE carts SET total_cents = ?                                  │
//! │  ├── INSERT .. ON CONFLICT (cart_id, product_id) DO UPDATE  (upserts)  │
//! │  └── DELETE FROM cart_line_items WHERE id = ?            (deletes)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit — a crash mid-write never leaves a half-applied recipe         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mealcart_core::{Cart, CartLineItem, CartLineView, LineItemChange, MergeOutcome};

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Creates a new empty cart (total 0, no line items).
    pub async fn create(&self) -> DbResult<Cart> {
        let cart = Cart::new_empty();

        debug!(id = %cart.id, "Creating cart");

        sqlx::query(
            r#"
            INSERT INTO carts (id, total_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&cart.id)
        .bind(cart.total_cents)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(cart)
    }

    /// Gets a cart by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, total_cents, created_at, updated_at
            FROM carts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cart)
    }

    /// Lists all carts (basic data only — no line items).
    pub async fn list(&self) -> DbResult<Vec<Cart>> {
        let carts = sqlx::query_as::<_, Cart>(
            r#"
            SELECT id, total_cents, created_at, updated_at
            FROM carts
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(carts)
    }

    /// Lists a cart's line items, in insertion order.
    ///
    /// Input to the merge engine. `rowid` order is creation order and is not
    /// disturbed by quantity updates.
    pub async fn list_line_items(&self, cart_id: &str) -> DbResult<Vec<CartLineItem>> {
        let items = sqlx::query_as::<_, CartLineItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at
            FROM cart_line_items
            WHERE cart_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a cart's line items joined with their product snapshots, in
    /// insertion order. One query — the read-side join for the cart view.
    pub async fn list_line_views(&self, cart_id: &str) -> DbResult<Vec<CartLineView>> {
        let views = sqlx::query_as::<_, CartLineView>(
            r#"
            SELECT
                li.id,
                li.product_id,
                p.name AS product_name,
                p.price_cents AS unit_price_cents,
                li.quantity
            FROM cart_line_items li
            JOIN products p ON p.id = li.product_id
            WHERE li.cart_id = ?1
            ORDER BY li.rowid
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(views)
    }

    /// Creates or updates a single line item, keyed by (cart_id, product_id).
    pub async fn upsert_line_item(&self, item: &CartLineItem) -> DbResult<()> {
        debug!(cart_id = %item.cart_id, product_id = %item.product_id, quantity = item.quantity, "Upserting line item");

        sqlx::query(
            r#"
            INSERT INTO cart_line_items (id, cart_id, product_id, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(&item.id)
        .bind(&item.cart_id)
        .bind(&item.product_id)
        .bind(item.quantity)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a single line item.
    pub async fn delete_line_item(&self, item: &CartLineItem) -> DbResult<()> {
        debug!(cart_id = %item.cart_id, product_id = %item.product_id, "Deleting line item");

        sqlx::query("DELETE FROM cart_line_items WHERE id = ?1")
            .bind(&item.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Updates a cart's cached total.
    pub async fn save_total(&self, cart_id: &str, total_cents: i64) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE carts SET total_cents = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(cart_id)
        .bind(total_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cart", cart_id));
        }

        Ok(())
    }

    /// Persists a whole merge outcome — the new cached total plus every
    /// line-item change — in one transaction, in the outcome's order.
    pub async fn persist_outcome(&self, cart_id: &str, outcome: &MergeOutcome) -> DbResult<()> {
        debug!(
            cart_id = %cart_id,
            total_cents = outcome.total_cents,
            changes = outcome.changes.len(),
            "Persisting merge outcome"
        );

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE carts SET total_cents = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(cart_id)
        .bind(outcome.total_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(DbError::not_found("Cart", cart_id));
        }

        for change in &outcome.changes {
            match change {
                LineItemChange::Upsert(item) => {
                    sqlx::query(
                        r#"
                        INSERT INTO cart_line_items (id, cart_id, product_id, quantity, created_at)
                        VALUES (?1, ?2, ?3, ?4, ?5)
                        ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = excluded.quantity
                        "#,
                    )
                    .bind(&item.id)
                    .bind(&item.cart_id)
                    .bind(&item.product_id)
                    .bind(item.quantity)
                    .bind(item.created_at)
                    .execute(&mut *tx)
                    .await?;
                }
                LineItemChange::Delete(item) => {
                    sqlx::query("DELETE FROM cart_line_items WHERE id = ?1")
                        .bind(&item.id)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
