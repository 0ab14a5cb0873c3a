//! # mealcart-core: Pure Business Logic for Mealcart
//!
//! This crate is the **heart** of Mealcart. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mealcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    list carts ──► cart detail ──► add/remove recipe            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mealcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   merge   │  │   error   │  │   │
//! │  │   │  Product  │  │   Money   │  │ apply /   │  │ CartNot-  │  │   │
//! │  │   │  Recipe   │  │           │  │ revert    │  │ Found ... │  │   │
//! │  │   │  Cart     │  │           │  │ recipe    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mealcart-db (Database Layer)                 │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Recipe, Cart, CartLineItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`merge`] - The recipe→cart merge/unmerge engine
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: The merge engine is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use mealcart_core::merge;
//! use mealcart_core::types::{Cart, RecipeItem};
//!
//! let cart = Cart::new_empty();
//! let items = vec![RecipeItem {
//!     product_id: "p-1".to_string(),
//!     product_name: "Tomatoes".to_string(),
//!     unit_price_cents: 399,
//!     quantity: 2,
//! }];
//!
//! let outcome = merge::apply_recipe(&cart, &[], &items);
//! assert_eq!(outcome.total_cents, 798);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod merge;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mealcart_core::Money` instead of
// `use mealcart_core::money::Money`

pub use error::{CoreError, CoreResult};
pub use merge::{LineItemChange, MergeOutcome};
pub use money::Money;
pub use types::*;
