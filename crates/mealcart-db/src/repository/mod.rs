//! # Repository Module
//!
//! Database repository implementations for Mealcart.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service layer                                                         │
//! │       │                                                                 │
//! │       │  db.recipes().get_with_items(id)                                │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  RecipeRepository                                                      │
//! │  ├── get_with_items(&self, id)                                         │
//! │  ├── list_with_items(&self)                                            │
//! │  └── insert(&self, recipe)                                             │
//! │       │                                                                 │
//! │       │  One joined SQL query per collection (no per-item round trips) │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product catalog reads and seeding
//! - [`recipe::RecipeRepository`] - Recipes with batched item fetches
//! - [`cart::CartRepository`] - Carts, line items, and merge persistence

pub mod cart;
pub mod product;
pub mod recipe;
