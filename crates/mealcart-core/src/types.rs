//! # Domain Types
//!
//! Core domain types used throughout Mealcart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Recipe      │   │      Cart       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  total_cents    │       │
//! │  │  price_cents    │   │  items (ordered)│   │  (cached)       │       │
//! │  └─────────────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │                                 │                     │                 │
//! │                        ┌────────┴────────┐   ┌────────┴────────┐       │
//! │                        │   RecipeItem    │   │  CartLineItem   │       │
//! │                        │  ─────────────  │   │  ─────────────  │       │
//! │                        │  product_id     │   │  product_id     │       │
//! │                        │  product_name   │   │  quantity > 0   │       │
//! │                        │  unit_price     │   │  (unique per    │       │
//! │                        │  quantity > 0   │   │   cart+product) │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Cached Total
//! `Cart::total_cents` is a cached aggregate, maintained as a delta update by
//! the merge engine — never recomputed from line items on read. After a
//! clamped removal (see [`crate::merge`]) it can sit above the true sum of
//! the remaining line items; that divergence is part of the contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Products are read-only inputs to the merge engine: they are created and
/// edited out-of-band (seed data, admin tooling).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in cart and recipe views.
    pub name: String,

    /// Unit price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Recipe
// =============================================================================

/// A single entry in a recipe: one product plus the quantity the recipe
/// calls for.
///
/// Uses the snapshot pattern: the storage layer returns items already joined
/// with the product's current name and unit price, so the merge engine and
/// the read side never chase product references item by item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RecipeItem {
    /// Product this entry refers to.
    pub product_id: String,

    /// Product name at read time (joined snapshot).
    pub product_name: String,

    /// Unit price in cents at read time (joined snapshot).
    pub unit_price_cents: i64,

    /// Quantity the recipe calls for. Always positive.
    pub quantity: i64,
}

impl RecipeItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// A named bundle of (product, quantity) pairs.
///
/// ## Ordering
/// `items` preserves the recipe's stored insertion order. The merge engine
/// iterates it front to back, so line-item creation order in a cart is
/// deterministic for identical inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name ("Salad", "Taco Night", ...).
    pub name: String,

    /// Ordered item list, fully populated with product snapshots.
    pub items: Vec<RecipeItem>,

    /// When the recipe was created.
    pub created_at: DateTime<Utc>,

    /// When the recipe was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart: a cached monetary total plus (separately stored) line
/// items.
///
/// ## Invariants
/// - Created empty with `total_cents == 0`
/// - `total_cents` never goes negative (floor clamp on removal)
/// - Intended: `total_cents == Σ unit_price × quantity` over line items,
///   maintained incrementally; a clamped removal may break this on purpose
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Cart {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Cached aggregate total in cents. Never negative.
    pub total_cents: i64,

    /// When the cart was created.
    pub created_at: DateTime<Utc>,

    /// When the cart was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with a generated id and total 0.
    pub fn new_empty() -> Self {
        let now = Utc::now();
        Cart {
            id: Uuid::new_v4().to_string(),
            total_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the cached total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// A (product, quantity) pairing held by a cart.
///
/// ## Lifecycle
/// Created on first add of a product, mutated by subsequent add/remove,
/// deleted when removal drives its quantity to zero or below. A line item
/// with `quantity <= 0` must never exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartLineItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Cart this line item belongs to.
    pub cart_id: String,

    /// Product this line item refers to. Unique within one cart.
    pub product_id: String,

    /// Quantity in the cart. Always positive.
    pub quantity: i64,

    /// When this line item was first created.
    pub created_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Creates a new line item with a generated id.
    pub fn new(cart_id: &str, product_id: &str, quantity: i64) -> Self {
        CartLineItem {
            id: Uuid::new_v4().to_string(),
            cart_id: cart_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Cart Line View
// =============================================================================

/// A cart line item joined with its product snapshot, as returned by the
/// read-side batched fetch. Input to the cart assembler; never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartLineView {
    /// Line item id.
    pub id: String,

    /// Product this line refers to.
    pub product_id: String,

    /// Product name (joined snapshot).
    pub product_name: String,

    /// Unit price in cents (joined snapshot).
    pub unit_price_cents: i64,

    /// Quantity in the cart.
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty_cart() {
        let cart = Cart::new_empty();
        assert_eq!(cart.total_cents, 0);
        assert!(cart.total().is_zero());
        assert!(!cart.id.is_empty());
    }

    #[test]
    fn test_line_item_new() {
        let item = CartLineItem::new("cart-1", "product-1", 3);
        assert_eq!(item.cart_id, "cart-1");
        assert_eq!(item.product_id, "product-1");
        assert_eq!(item.quantity, 3);
        assert!(!item.id.is_empty());
    }

    #[test]
    fn test_product_price() {
        let now = Utc::now();
        let product = Product {
            id: "p-1".to_string(),
            name: "Tomatoes".to_string(),
            price_cents: 399,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(product.price().cents(), 399);
    }
}
