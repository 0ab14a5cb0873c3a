//! # Error Types
//!
//! Domain-specific error types for mealcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mealcart-core errors (this file)                                      │
//! │  └── CoreError        - Domain failures (cart/recipe missing)          │
//! │                                                                         │
//! │  mealcart-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP API errors (in server app)                                       │
//! │  └── ApiError         - Status code + body mapping                     │
//! │                                                                         │
//! │  Flow: CoreError / DbError → ApiError → HTTP response                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the missing id)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain-level failures for cart/recipe operations.
///
/// Both variants are terminal for the operation: they reflect caller error
/// (a dangling id), not a transient fault, so there is nothing to retry.
/// Storage failures are NOT represented here — they live in the db layer
/// and propagate to the caller unmodified.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The target cart id has no record.
    #[error("Cart not found: {0}")]
    CartNotFound(String),

    /// The target recipe id has no record.
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
