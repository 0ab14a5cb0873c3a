//! Recipe service: read-only recipe listing.

use std::sync::Arc;

use tracing::debug;

use crate::dto::RecipeResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Recipe read operations.
pub struct RecipeService {
    state: Arc<AppState>,
}

impl RecipeService {
    /// Creates a new recipe service.
    pub fn new(state: Arc<AppState>) -> Self {
        RecipeService { state }
    }

    /// Lists all recipes with their items.
    ///
    /// One batched fetch for the recipes and one for all items (joined with
    /// products) — never a query per recipe or per item.
    pub async fn get_all_recipes(&self) -> Result<Vec<RecipeResponse>, ApiError> {
        debug!("get_all_recipes");

        let recipes = self.state.db().recipes().list_with_items().await?;
        Ok(recipes.iter().map(RecipeResponse::assemble).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mealcart_core::{Product, Recipe, RecipeItem};
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

    #[tokio::test]
    async fn test_get_all_recipes_assembles_joined_items() {
        let state = test_state().await;
        seed_product(&state, "p-tomatoes", "Tomatoes", 399).await;
        seed_product(&state, "p-onions", "Onions", 250).await;

        let now = Utc::now();
        state
            .db()
            .recipes()
            .insert(&Recipe {
                id: "r-salad".to_string(),
                name: "Salad".to_string(),
                items: vec![
                    RecipeItem {
                        product_id: "p-tomatoes".to_string(),
                        product_name: String::new(),
                        unit_price_cents: 0,
                        quantity: 2,
                    },
                    RecipeItem {
                        product_id: "p-onions".to_string(),
                        product_name: String::new(),
                        unit_price_cents: 0,
                        quantity: 1,
                    },
                ],
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let recipes = RecipeService::new(state).get_all_recipes().await.unwrap();

        assert_eq!(recipes.len(), 1);
        let salad = &recipes[0];
        assert_eq!(salad.name, "Salad");
        assert_eq!(salad.products.len(), 2);
        // Snapshots come from the join, not from what the insert carried.
        assert_eq!(salad.products[0].product_name, "Tomatoes");
        assert_eq!(salad.products[0].price_in_cents, 399);
        assert_eq!(salad.products[1].product_name, "Onions");
    }
}
