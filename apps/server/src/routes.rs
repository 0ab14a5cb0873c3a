//! # HTTP Routes
//!
//! Route table and thin handlers. All behavior lives in the service layer;
//! handlers only extract, delegate, and wrap.
//!
//! ## Route Table
//! ```text
//! GET    /health                                        → liveness probe
//! GET    /buy-recipe/products                           → catalog listing
//! GET    /buy-recipe/carts                              → all carts (basic)
//! GET    /buy-recipe/carts/{id}                         → cart detail
//! GET    /buy-recipe/recipes                            → all recipes
//! POST   /buy-recipe/carts/{cart_id}/add_recipe         → apply recipe
//! DELETE /buy-recipe/carts/{cart_id}/recipes/{recipe_id}→ revert recipe
//! ```
//!
//! ## Status Mapping
//! Missing cart → 404 (empty body). Missing recipe → 400 with the literal
//! body `Recipe not found`. Success on the merge routes → 200 with a literal
//! confirmation message. See [`crate::error::ApiError`].

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::dto::{AddRecipeRequest, CartResponse, CartSummary, ProductResponse, RecipeResponse};
use crate::error::ApiError;
use crate::services::{CartService, CatalogService, RecipeService};
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/buy-recipe/products", get(list_products))
        .route("/buy-recipe/carts", get(list_carts))
        .route("/buy-recipe/carts/{id}", get(get_cart))
        .route("/buy-recipe/carts/{cart_id}/add_recipe", post(add_recipe))
        .route(
            "/buy-recipe/carts/{cart_id}/recipes/{recipe_id}",
            delete(remove_recipe),
        )
        .route("/buy-recipe/recipes", get(list_recipes))
        .with_state(state)
}

/// Liveness probe.
async fn health() -> &'static str {
    "OK"
}

/// Catalog listing.
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    CatalogService::new(state).get_all_products().await.map(Json)
}

/// All carts, basic data only.
async fn list_carts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CartSummary>>, ApiError> {
    CartService::new(state).get_all_carts().await.map(Json)
}

/// Cart detail with joined line items.
async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    CartService::new(state).get_cart(&id).await.map(Json)
}

/// All recipes with their items.
async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    RecipeService::new(state).get_all_recipes().await.map(Json)
}

/// Applies a recipe onto a cart.
async fn add_recipe(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<String>,
    Json(request): Json<AddRecipeRequest>,
) -> Result<&'static str, ApiError> {
    CartService::new(state)
        .add_recipe_to_cart(&cart_id, &request.recipe_id)
        .await
}

/// Reverts a recipe from a cart.
async fn remove_recipe(
    State(state): State<Arc<AppState>>,
    Path((cart_id, recipe_id)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    CartService::new(state)
        .remove_recipe_from_cart(&cart_id, &recipe_id)
        .await
}
