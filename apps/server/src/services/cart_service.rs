//! Cart service: cart reads plus the recipe add/remove orchestration.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              add_recipe_to_cart / remove_recipe_from_cart               │
//! │                                                                         │
//! │  1. acquire per-cart lock            (serializes same-cart merges)     │
//! │  2. load cart                        → 404 when missing                │
//! │  3. load recipe with items (batched) → 400 when missing                │
//! │  4. load cart line items (batched)                                     │
//! │  5. merge::apply_recipe / revert_recipe   (pure, in mealcart-core)     │
//! │  6. persist outcome in one transaction                                 │
//! │  7. release lock, return confirmation message                          │
//! │                                                                         │
//! │  Steps 2-3 fail BEFORE any mutation: a missing cart or recipe never    │
//! │  touches the stores.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::dto::{CartResponse, CartSummary};
use crate::error::ApiError;
use crate::state::AppState;
use mealcart_core::{merge, CoreError};

/// Confirmation message for a successful recipe add.
pub const MSG_RECIPE_ADDED: &str = "Recipe added to cart successfully";

/// Confirmation message for a successful recipe removal.
pub const MSG_RECIPE_REMOVED: &str = "Recipe removed from cart successfully";

/// Cart operations: reads and recipe merges.
pub struct CartService {
    state: Arc<AppState>,
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(state: Arc<AppState>) -> Self {
        CartService { state }
    }

    /// Lists all carts with basic data only (id, cached total).
    pub async fn get_all_carts(&self) -> Result<Vec<CartSummary>, ApiError> {
        debug!("get_all_carts");

        let carts = self.state.db().carts().list().await?;
        Ok(carts.iter().map(CartSummary::from_cart).collect())
    }

    /// Gets one cart with its line items joined against the catalog.
    pub async fn get_cart(&self, cart_id: &str) -> Result<CartResponse, ApiError> {
        debug!(cart_id = %cart_id, "get_cart");

        let carts = self.state.db().carts();
        let cart = carts
            .get_by_id(cart_id)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(cart_id.to_string()))?;
        let lines = carts.list_line_views(cart_id).await?;

        Ok(CartResponse::assemble(&cart, &lines))
    }

    /// Applies a recipe's items onto a cart.
    ///
    /// Quantities aggregate onto existing line items; the cached total grows
    /// by the recipe's price delta. An empty recipe succeeds and changes
    /// nothing.
    pub async fn add_recipe_to_cart(
        &self,
        cart_id: &str,
        recipe_id: &str,
    ) -> Result<&'static str, ApiError> {
        debug!(cart_id = %cart_id, recipe_id = %recipe_id, "add_recipe_to_cart");

        let _guard = self.state.locks().acquire(cart_id).await;

        let carts = self.state.db().carts();
        let cart = carts
            .get_by_id(cart_id)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(cart_id.to_string()))?;
        let recipe = self
            .state
            .db()
            .recipes()
            .get_with_items(recipe_id)
            .await?
            .ok_or_else(|| CoreError::RecipeNotFound(recipe_id.to_string()))?;
        let line_items = carts.list_line_items(cart_id).await?;

        let outcome = merge::apply_recipe(&cart, &line_items, &recipe.items);
        carts.persist_outcome(cart_id, &outcome).await?;

        info!(
            cart_id = %cart_id,
            recipe = %recipe.name,
            total_cents = outcome.total_cents,
            "Recipe added to cart"
        );

        Ok(MSG_RECIPE_ADDED)
    }

    /// Reverses a recipe's items from a cart.
    ///
    /// Absent products are skipped; removal is partial (`min(wanted, held)`)
    /// and the cached total is clamped at zero.
    pub async fn remove_recipe_from_cart(
        &self,
        cart_id: &str,
        recipe_id: &str,
    ) -> Result<&'static str, ApiError> {
        debug!(cart_id = %cart_id, recipe_id = %recipe_id, "remove_recipe_from_cart");

        let _guard = self.state.locks().acquire(cart_id).await;

        let carts = self.state.db().carts();
        let cart = carts
            .get_by_id(cart_id)
            .await?
            .ok_or_else(|| CoreError::CartNotFound(cart_id.to_string()))?;
        let recipe = self
            .state
            .db()
            .recipes()
            .get_with_items(recipe_id)
            .await?
            .ok_or_else(|| CoreError::RecipeNotFound(recipe_id.to_string()))?;
        let line_items = carts.list_line_items(cart_id).await?;

        let outcome = merge::revert_recipe(&cart, &line_items, &recipe.items);
        carts.persist_outcome(cart_id, &outcome).await?;

        info!(
            cart_id = %cart_id,
            recipe = %recipe.name,
            total_cents = outcome.total_cents,
            "Recipe removed from cart"
        );

        Ok(MSG_RECIPE_REMOVED)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use mealcart_core::{CartLineItem, Product, Recipe, RecipeItem};
    use mealcart_db::{Database, DbConfig};

    async fn test_state() -> Arc<AppState> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Arc::new(AppState::new(db))
    }

    async fn seed_product(state: &AppState, id: &str, name: &str, price_cents: i64) {
        let now = Utc::now();
        state
            .db()
            .products()
            .insert(&Product {
                id: id.to_string(),
                name: name.to_string(),
                price_cents,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    async fn seed_recipe(state: &AppState, id: &str, name: &str, items: Vec<(&str, i64)>) {
        let now = Utc::now();
        state
            .db()
            .recipes()
            .insert(&Recipe {
                id: id.to_string(),
                name: name.to_string(),
                items: items
                    .into_iter()
                    .map(|(product_id, quantity)| RecipeItem {
                        product_id: product_id.to_string(),
                        product_name: String::new(),
                        unit_price_cents: 0,
                        quantity,
                    })
                    .collect(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    /// Salad demo fixture: Tomatoes×1 + Onions×1 in the cart (total 649),
    /// recipe Salad = Tomatoes×2 + Onions×1.
    async fn salad_fixture(state: &Arc<AppState>) -> String {
        seed_product(state, "p-tomatoes", "Tomatoes", 399).await;
        seed_product(state, "p-onions", "Onions", 250).await;
        seed_recipe(state, "r-salad", "Salad", vec![("p-tomatoes", 2), ("p-onions", 1)]).await;

        let cart = state.db().carts().create().await.unwrap();
        state
            .db()
            .carts()
            .upsert_line_item(&CartLineItem::new(&cart.id, "p-tomatoes", 1))
            .await
            .unwrap();
        state
            .db()
            .carts()
            .upsert_line_item(&CartLineItem::new(&cart.id, "p-onions", 1))
            .await
            .unwrap();
        state.db().carts().save_total(&cart.id, 649).await.unwrap();
        cart.id
    }

    #[tokio::test]
    async fn test_add_recipe_aggregates_quantities_and_total() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        let service = CartService::new(state.clone());

        let message = service.add_recipe_to_cart(&cart_id, "r-salad").await.unwrap();
        assert_eq!(message, MSG_RECIPE_ADDED);

        // 649 + (399×2 + 250×1) = 1697; quantities aggregated, no duplicates.
        let cart = service.get_cart(&cart_id).await.unwrap();
        assert_eq!(cart.total_amount, 1697);
        assert_eq!(cart.cart_items.len(), 2);
        assert_eq!(cart.cart_items[0].product_name, "Tomatoes");
        assert_eq!(cart.cart_items[0].quantity, 3);
        assert_eq!(cart.cart_items[1].product_name, "Onions");
        assert_eq!(cart.cart_items[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_cart() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        let service = CartService::new(state.clone());

        service.add_recipe_to_cart(&cart_id, "r-salad").await.unwrap();
        let message = service
            .remove_recipe_from_cart(&cart_id, "r-salad")
            .await
            .unwrap();
        assert_eq!(message, MSG_RECIPE_REMOVED);

        let cart = service.get_cart(&cart_id).await.unwrap();
        assert_eq!(cart.total_amount, 649);
        assert_eq!(cart.cart_items.len(), 2);
        assert_eq!(cart.cart_items[0].quantity, 1);
        assert_eq!(cart.cart_items[1].quantity, 1);
    }

    #[tokio::test]
    async fn test_remove_deletes_line_item_driven_to_zero() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        let service = CartService::new(state.clone());

        // Cart holds Onions×1; the recipe removes exactly 1 → row deleted.
        // Tomatoes×1 against wanted 2 is also deleted (partial removal caps
        // at what the cart holds).
        service
            .remove_recipe_from_cart(&cart_id, "r-salad")
            .await
            .unwrap();

        let cart = service.get_cart(&cart_id).await.unwrap();
        assert!(cart.cart_items.is_empty());
        // Only 399 + 250 actually came off.
        assert_eq!(cart.total_amount, 0);
    }

    #[tokio::test]
    async fn test_add_missing_cart_is_not_found_and_mutates_nothing() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        let service = CartService::new(state.clone());

        let err = service
            .add_recipe_to_cart("no-such-cart", "r-salad")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        // The existing cart is untouched.
        let cart = service.get_cart(&cart_id).await.unwrap();
        assert_eq!(cart.total_amount, 649);
    }

    #[tokio::test]
    async fn test_add_missing_recipe_is_bad_request_and_mutates_nothing() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        let service = CartService::new(state.clone());

        let err = service
            .add_recipe_to_cart(&cart_id, "no-such-recipe")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert_eq!(err.message, "Recipe not found");

        let cart = service.get_cart(&cart_id).await.unwrap();
        assert_eq!(cart.total_amount, 649);
        assert_eq!(cart.cart_items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_remove_missing_cart_and_recipe_outcomes() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        let service = CartService::new(state.clone());

        let err = service
            .remove_recipe_from_cart("no-such-cart", "r-salad")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = service
            .remove_recipe_from_cart(&cart_id, "no-such-recipe")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
        assert_eq!(err.message, "Recipe not found");
    }

    #[tokio::test]
    async fn test_empty_recipe_add_and_remove_are_noops() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        seed_recipe(&state, "r-empty", "Empty", vec![]).await;
        let service = CartService::new(state.clone());

        service.add_recipe_to_cart(&cart_id, "r-empty").await.unwrap();
        service
            .remove_recipe_from_cart(&cart_id, "r-empty")
            .await
            .unwrap();

        let cart = service.get_cart(&cart_id).await.unwrap();
        assert_eq!(cart.total_amount, 649);
        assert_eq!(cart.cart_items.len(), 2);
    }

    #[tokio::test]
    async fn test_repeated_removal_clamps_total_at_zero() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        let service = CartService::new(state.clone());

        // First removal drains the line items and most of the total; the
        // second matches nothing and the total stays clamped at zero.
        service
            .remove_recipe_from_cart(&cart_id, "r-salad")
            .await
            .unwrap();
        service
            .remove_recipe_from_cart(&cart_id, "r-salad")
            .await
            .unwrap();

        let cart = service.get_cart(&cart_id).await.unwrap();
        assert_eq!(cart.total_amount, 0);
        assert!(cart.cart_items.is_empty());
    }

    #[tokio::test]
    async fn test_get_cart_missing_is_not_found() {
        let state = test_state().await;
        let service = CartService::new(state);

        let err = service.get_cart("no-such-cart").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_get_all_carts_lists_basic_data() {
        let state = test_state().await;
        let cart_id = salad_fixture(&state).await;
        state.db().carts().create().await.unwrap();
        let service = CartService::new(state);

        let carts = service.get_all_carts().await.unwrap();
        assert_eq!(carts.len(), 2);
        let seeded = carts.iter().find(|c| c.id == cart_id).unwrap();
        assert_eq!(seeded.total_amount, 649);
    }
}
