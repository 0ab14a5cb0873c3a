//! # API Data Transfer Objects
//!
//! Wire-facing request/response shapes plus the read-side assemblers that
//! build them.
//!
//! ## Assemblers
//! The assemblers are pure projections: they join already-loaded rows into
//! response shapes and never touch storage or mutate anything. The product
//! snapshot embedded in each row comes from the repository's batched join.

use serde::{Deserialize, Serialize};

use mealcart_core::{Cart, CartLineView, Product, Recipe};

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /buy-recipe/carts/{cart_id}/add_recipe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRecipeRequest {
    /// The recipe to apply.
    pub recipe_id: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// One catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price_in_cents: i64,
}

impl ProductResponse {
    /// Projects a product into its wire shape.
    pub fn from_product(product: &Product) -> Self {
        ProductResponse {
            id: product.id.clone(),
            name: product.name.clone(),
            price_in_cents: product.price_cents,
        }
    }
}

// =============================================================================
// Carts
// =============================================================================

/// Basic cart data for the all-carts listing (no line items).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub id: String,
    pub total_amount: i64,
}

impl CartSummary {
    /// Projects a cart into its listing shape.
    pub fn from_cart(cart: &Cart) -> Self {
        CartSummary {
            id: cart.id.clone(),
            total_amount: cart.total_cents,
        }
    }
}

/// One line item in a cart detail response, joined with its product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub price_in_cents: i64,
    pub quantity: i64,
}

/// Cart detail: cached total plus joined line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: String,
    pub total_amount: i64,
    pub cart_items: Vec<CartItemResponse>,
}

impl CartResponse {
    /// Assembles a cart detail from the cart row and its joined line views.
    ///
    /// Pure projection: no storage access, no mutation. Line order follows
    /// the views' (insertion) order.
    pub fn assemble(cart: &Cart, lines: &[CartLineView]) -> Self {
        CartResponse {
            id: cart.id.clone(),
            total_amount: cart.total_cents,
            cart_items: lines
                .iter()
                .map(|line| CartItemResponse {
                    id: line.id.clone(),
                    product_id: line.product_id.clone(),
                    product_name: line.product_name.clone(),
                    price_in_cents: line.unit_price_cents,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Recipes
// =============================================================================

/// One entry in a recipe response, joined with its product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeProductResponse {
    pub product_id: String,
    pub product_name: String,
    pub price_in_cents: i64,
    pub quantity: i64,
}

/// Recipe detail: id, name, and joined items in stored order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: String,
    pub name: String,
    pub products: Vec<RecipeProductResponse>,
}

impl RecipeResponse {
    /// Assembles a recipe response from an already-joined recipe.
    ///
    /// Pure projection: item order is the recipe's stored order.
    pub fn assemble(recipe: &Recipe) -> Self {
        RecipeResponse {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            products: recipe
                .items
                .iter()
                .map(|item| RecipeProductResponse {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    price_in_cents: item.unit_price_cents,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mealcart_core::RecipeItem;

    #[test]
    fn test_assemble_cart_joins_lines_with_total() {
        let mut cart = Cart::new_empty();
        cart.total_cents = 1697;

        let lines = vec![
            CartLineView {
                id: "line-1".to_string(),
                product_id: "p-1".to_string(),
                product_name: "Tomatoes".to_string(),
                unit_price_cents: 399,
                quantity: 3,
            },
            CartLineView {
                id: "line-2".to_string(),
                product_id: "p-2".to_string(),
                product_name: "Onions".to_string(),
                unit_price_cents: 250,
                quantity: 2,
            },
        ];

        let response = CartResponse::assemble(&cart, &lines);

        assert_eq!(response.total_amount, 1697);
        assert_eq!(response.cart_items.len(), 2);
        assert_eq!(response.cart_items[0].product_name, "Tomatoes");
        assert_eq!(response.cart_items[0].price_in_cents, 399);
        assert_eq!(response.cart_items[1].quantity, 2);
    }

    #[test]
    fn test_assemble_recipe_preserves_item_order() {
        let now = Utc::now();
        let recipe = Recipe {
            id: "r-1".to_string(),
            name: "Salad".to_string(),
            items: vec![
                RecipeItem {
                    product_id: "p-1".to_string(),
                    product_name: "Tomatoes".to_string(),
                    unit_price_cents: 399,
                    quantity: 2,
                },
                RecipeItem {
                    product_id: "p-2".to_string(),
                    product_name: "Onions".to_string(),
                    unit_price_cents: 250,
                    quantity: 1,
                },
            ],
            created_at: now,
            updated_at: now,
        };

        let response = RecipeResponse::assemble(&recipe);

        assert_eq!(response.name, "Salad");
        assert_eq!(response.products[0].product_name, "Tomatoes");
        assert_eq!(response.products[1].product_name, "Onions");
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let mut cart = Cart::new_empty();
        cart.total_cents = 649;
        let json = serde_json::to_value(CartSummary::from_cart(&cart)).unwrap();
        assert!(json.get("totalAmount").is_some());

        let lines = vec![CartLineView {
            id: "line-1".to_string(),
            product_id: "p-1".to_string(),
            product_name: "Tomatoes".to_string(),
            unit_price_cents: 399,
            quantity: 1,
        }];
        let json = serde_json::to_value(CartResponse::assemble(&cart, &lines)).unwrap();
        assert!(json.get("cartItems").is_some());
        assert!(json["cartItems"][0].get("productId").is_some());
        assert!(json["cartItems"][0].get("priceInCents").is_some());

        let request: AddRecipeRequest =
            serde_json::from_str(r#"{"recipeId": "r-1"}"#).unwrap();
        assert_eq!(request.recipe_id, "r-1");
    }
}
