//! # Recipe → Cart Merge Engine
//!
//! Reconciles a recipe's ordered item list against a cart's line items and
//! its cached total. This is the one place in the system with non-trivial
//! invariants: quantity aggregation on add, partial removal on revert, and
//! the floor clamp on the cached total.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Merge Engine Data Flow                             │
//! │                                                                         │
//! │  Cart (cached total)  ──┐                                              │
//! │  CartLineItems        ──┼──► apply_recipe / revert_recipe ──► Outcome  │
//! │  RecipeItems (ordered)──┘         (pure, deterministic)        │       │
//! │                                                                ▼       │
//! │                                            MergeOutcome {              │
//! │                                              total_cents,              │
//! │                                              changes: [Upsert|Delete]  │
//! │                                            }                           │
//! │                                                                         │
//! │  The caller loads the inputs, runs the pure function, and persists     │
//! │  the outcome. No I/O happens in this module.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Cached-Total Policy
//! The cart total is maintained as a delta update, never recomputed from
//! line items. On removal the new total is `max(0, total - delta)` — the
//! floor clamp. Repeated partial removals can therefore leave the cached
//! total above the true sum of the remaining line items; that divergence is
//! part of the contract and must not be "fixed" by recomputation. Both
//! policies live behind these two functions, so a stricter recompute mode
//! would be a local swap.

use crate::money::Money;
use crate::types::{Cart, CartLineItem, RecipeItem};

// =============================================================================
// Outcome Types
// =============================================================================

/// A single line-item mutation produced by a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemChange {
    /// Create the line item, or overwrite the quantity of the existing line
    /// item for the same (cart, product) pair.
    Upsert(CartLineItem),

    /// Delete the line item entirely (its quantity was driven to zero or
    /// below).
    Delete(CartLineItem),
}

impl LineItemChange {
    /// The line item this change applies to.
    pub fn line_item(&self) -> &CartLineItem {
        match self {
            LineItemChange::Upsert(item) => item,
            LineItemChange::Delete(item) => item,
        }
    }
}

/// The result of merging or unmerging one recipe against one cart.
///
/// `changes` holds one entry per touched product, in the order the recipe
/// first touched it — so persisting them front to back reproduces the same
/// line-item creation order on every run with identical inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The cart's new cached total in cents. Never negative.
    pub total_cents: i64,

    /// Line-item mutations to persist, in deterministic order.
    pub changes: Vec<LineItemChange>,
}

impl MergeOutcome {
    /// True when the merge touched nothing (empty recipe, or a removal that
    /// matched no line items).
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

// =============================================================================
// Apply (AddRecipe)
// =============================================================================

/// Applies a recipe's items onto a cart.
///
/// ## Behavior
/// For each recipe item, in the recipe's stored order:
/// - product already in the cart: its line-item quantity increases by the
///   recipe quantity
/// - product not in the cart: a new line item is created with the recipe
///   quantity
/// - the price delta accumulates `unit_price × quantity`
///
/// The new total is `cart.total + delta`. An empty recipe yields an empty
/// outcome with the total unchanged.
///
/// ## Duplicate products
/// A recipe that lists the same product twice has both entries applied
/// independently: the second entry sees the quantity the first one wrote.
///
/// ## Arguments
/// * `cart` - The target cart (source of the cached total)
/// * `line_items` - The cart's current line items
/// * `recipe_items` - The recipe's items, in stored order, with product
///   snapshots populated
pub fn apply_recipe(
    cart: &Cart,
    line_items: &[CartLineItem],
    recipe_items: &[RecipeItem],
) -> MergeOutcome {
    let mut working: Vec<CartLineItem> = line_items.to_vec();
    // Product ids in first-touch order; drives deterministic change order.
    let mut touched: Vec<String> = Vec::new();
    let mut delta = Money::zero();

    for item in recipe_items {
        match working
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            Some(line) => {
                line.quantity += item.quantity;
            }
            None => {
                working.push(CartLineItem::new(&cart.id, &item.product_id, item.quantity));
            }
        }

        if !touched.contains(&item.product_id) {
            touched.push(item.product_id.clone());
        }

        delta += item.unit_price().multiply_quantity(item.quantity);
    }

    let total = cart.total() + delta;

    let changes = touched
        .iter()
        .filter_map(|product_id| {
            working
                .iter()
                .find(|line| &line.product_id == product_id)
                .map(|line| LineItemChange::Upsert(line.clone()))
        })
        .collect();

    MergeOutcome {
        total_cents: total.cents(),
        changes,
    }
}

// =============================================================================
// Revert (RemoveRecipe)
// =============================================================================

/// Reverses a recipe's items from a cart.
///
/// ## Behavior
/// For each recipe item, in the recipe's stored order:
/// - no line item for the product: silent skip (removing what isn't present
///   is not an error)
/// - line item with current quantity `q`: `removed = min(quantity, q)`; the
///   price delta accumulates `unit_price × removed`; the line item is
///   deleted when `removed >= q`, otherwise reduced to `q - removed`
///
/// The new total is `max(0, cart.total - delta)` — the floor clamp. This is
/// the one place the cached total can legitimately diverge from the true sum
/// of remaining line items; the clamp is policy, not an error, and never
/// signals underflow.
///
/// ## Arguments
/// * `cart` - The target cart (source of the cached total)
/// * `line_items` - The cart's current line items
/// * `recipe_items` - The recipe's items, in stored order, with product
///   snapshots populated
pub fn revert_recipe(
    cart: &Cart,
    line_items: &[CartLineItem],
    recipe_items: &[RecipeItem],
) -> MergeOutcome {
    let mut working: Vec<CartLineItem> = line_items.to_vec();
    let mut deleted: Vec<CartLineItem> = Vec::new();
    let mut touched: Vec<String> = Vec::new();
    let mut delta = Money::zero();

    for item in recipe_items {
        let Some(idx) = working
            .iter()
            .position(|line| line.product_id == item.product_id)
        else {
            // Absent from the cart: nothing to remove for this product.
            continue;
        };

        let current = working[idx].quantity;
        let removed = item.quantity.min(current);

        delta += item.unit_price().multiply_quantity(removed);

        if !touched.contains(&item.product_id) {
            touched.push(item.product_id.clone());
        }

        if removed >= current {
            deleted.push(working.remove(idx));
        } else {
            working[idx].quantity = current - removed;
        }
    }

    let total = cart.total().sub_floor_zero(delta);

    let changes = touched
        .iter()
        .filter_map(|product_id| {
            if let Some(line) = deleted.iter().find(|l| &l.product_id == product_id) {
                Some(LineItemChange::Delete(line.clone()))
            } else {
                working
                    .iter()
                    .find(|l| &l.product_id == product_id)
                    .map(|line| LineItemChange::Upsert(line.clone()))
            }
        })
        .collect();

    MergeOutcome {
        total_cents: total.cents(),
        changes,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cart_with_total(total_cents: i64) -> Cart {
        let mut cart = Cart::new_empty();
        cart.total_cents = total_cents;
        cart
    }

    fn line_item(cart: &Cart, product_id: &str, quantity: i64) -> CartLineItem {
        CartLineItem {
            id: format!("line-{}", product_id),
            cart_id: cart.id.clone(),
            product_id: product_id.to_string(),
            quantity,
            created_at: Utc::now(),
        }
    }

    fn recipe_item(product_id: &str, name: &str, unit_price_cents: i64, quantity: i64) -> RecipeItem {
        RecipeItem {
            product_id: product_id.to_string(),
            product_name: name.to_string(),
            unit_price_cents,
            quantity,
        }
    }

    fn upserts(outcome: &MergeOutcome) -> Vec<(&str, i64)> {
        outcome
            .changes
            .iter()
            .filter_map(|c| match c {
                LineItemChange::Upsert(item) => Some((item.product_id.as_str(), item.quantity)),
                LineItemChange::Delete(_) => None,
            })
            .collect()
    }

    fn deletes(outcome: &MergeOutcome) -> Vec<&str> {
        outcome
            .changes
            .iter()
            .filter_map(|c| match c {
                LineItemChange::Delete(item) => Some(item.product_id.as_str()),
                LineItemChange::Upsert(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_apply_to_empty_cart_creates_line_items() {
        let cart = cart_with_total(0);
        let recipe = vec![
            recipe_item("tomatoes", "Tomatoes", 399, 2),
            recipe_item("onions", "Onions", 250, 1),
        ];

        let outcome = apply_recipe(&cart, &[], &recipe);

        assert_eq!(outcome.total_cents, 399 * 2 + 250);
        assert_eq!(
            upserts(&outcome),
            vec![("tomatoes", 2), ("onions", 1)],
        );
    }

    #[test]
    fn test_apply_aggregates_existing_quantity_without_duplicates() {
        let cart = cart_with_total(649);
        let lines = vec![line_item(&cart, "tomatoes", 1)];
        let recipe = vec![recipe_item("tomatoes", "Tomatoes", 399, 2)];

        let outcome = apply_recipe(&cart, &lines, &recipe);

        // One upsert for the existing line item, quantity bumped by exactly
        // the recipe quantity — never a second line item for the product.
        assert_eq!(upserts(&outcome), vec![("tomatoes", 3)]);
        assert_eq!(outcome.total_cents, 649 + 798);

        let LineItemChange::Upsert(item) = &outcome.changes[0] else {
            panic!("expected upsert");
        };
        assert_eq!(item.id, "line-tomatoes"); // reuses the existing row
    }

    #[test]
    fn test_apply_empty_recipe_is_noop() {
        let cart = cart_with_total(1234);

        let outcome = apply_recipe(&cart, &[], &[]);

        assert!(outcome.is_empty());
        assert_eq!(outcome.total_cents, 1234);
    }

    #[test]
    fn test_apply_duplicate_product_entries_are_additive() {
        // A recipe listing the same product twice processes both entries
        // independently; the second sees the first's bump.
        let cart = cart_with_total(0);
        let recipe = vec![
            recipe_item("eggs", "Eggs", 120, 2),
            recipe_item("eggs", "Eggs", 120, 3),
        ];

        let outcome = apply_recipe(&cart, &[], &recipe);

        assert_eq!(upserts(&outcome), vec![("eggs", 5)]);
        assert_eq!(outcome.total_cents, 120 * 5);
    }

    #[test]
    fn test_revert_partial_removal_reduces_quantity() {
        let cart = cart_with_total(1697);
        let lines = vec![line_item(&cart, "tomatoes", 3)];
        let recipe = vec![recipe_item("tomatoes", "Tomatoes", 399, 2)];

        let outcome = revert_recipe(&cart, &lines, &recipe);

        assert_eq!(upserts(&outcome), vec![("tomatoes", 1)]);
        assert_eq!(outcome.total_cents, 1697 - 798);
    }

    #[test]
    fn test_revert_full_removal_deletes_line_item() {
        let cart = cart_with_total(500);
        let lines = vec![line_item(&cart, "onions", 1)];
        let recipe = vec![recipe_item("onions", "Onions", 250, 1)];

        let outcome = revert_recipe(&cart, &lines, &recipe);

        assert_eq!(deletes(&outcome), vec!["onions"]);
        assert_eq!(outcome.total_cents, 250);
    }

    #[test]
    fn test_revert_over_removal_deletes_and_charges_only_present_quantity() {
        // Recipe wants 5 but the cart only holds 2: the line item is deleted
        // and only 2 × unit price comes off the total.
        let cart = cart_with_total(1000);
        let lines = vec![line_item(&cart, "milk", 2)];
        let recipe = vec![recipe_item("milk", "Milk", 300, 5)];

        let outcome = revert_recipe(&cart, &lines, &recipe);

        assert_eq!(deletes(&outcome), vec!["milk"]);
        assert_eq!(outcome.total_cents, 1000 - 600);
    }

    #[test]
    fn test_revert_absent_product_is_silently_skipped() {
        let cart = cart_with_total(649);
        let lines = vec![line_item(&cart, "tomatoes", 1)];
        let recipe = vec![
            recipe_item("caviar", "Caviar", 9999, 1),
            recipe_item("tomatoes", "Tomatoes", 399, 1),
        ];

        let outcome = revert_recipe(&cart, &lines, &recipe);

        // Only the present product is touched; the absent one costs nothing.
        assert_eq!(deletes(&outcome), vec!["tomatoes"]);
        assert_eq!(outcome.total_cents, 649 - 399);
    }

    #[test]
    fn test_revert_clamps_total_at_zero() {
        // The cached total is smaller than the removal delta (a prior clamp
        // or out-of-band edit): the clamp absorbs the underflow silently.
        let cart = cart_with_total(100);
        let lines = vec![line_item(&cart, "tomatoes", 2)];
        let recipe = vec![recipe_item("tomatoes", "Tomatoes", 399, 2)];

        let outcome = revert_recipe(&cart, &lines, &recipe);

        assert_eq!(outcome.total_cents, 0);
        assert_eq!(deletes(&outcome), vec!["tomatoes"]);
    }

    #[test]
    fn test_revert_empty_recipe_is_noop() {
        let cart = cart_with_total(777);
        let lines = vec![line_item(&cart, "tomatoes", 1)];

        let outcome = revert_recipe(&cart, &lines, &[]);

        assert!(outcome.is_empty());
        assert_eq!(outcome.total_cents, 777);
    }

    #[test]
    fn test_add_then_remove_restores_total() {
        // Round trip: apply then revert with no intervening operation
        // restores the cached total exactly (no clamp triggered).
        let cart = cart_with_total(649);
        let lines = vec![
            line_item(&cart, "tomatoes", 1),
            line_item(&cart, "onions", 1),
        ];
        let recipe = vec![
            recipe_item("tomatoes", "Tomatoes", 399, 2),
            recipe_item("onions", "Onions", 250, 1),
        ];

        let added = apply_recipe(&cart, &lines, &recipe);
        assert_eq!(added.total_cents, 1697);
        assert_eq!(upserts(&added), vec![("tomatoes", 3), ("onions", 2)]);

        // Rebuild the post-add cart state and revert.
        let mut after_add = cart.clone();
        after_add.total_cents = added.total_cents;
        let after_lines: Vec<CartLineItem> = added
            .changes
            .iter()
            .map(|c| c.line_item().clone())
            .collect();

        let removed = revert_recipe(&after_add, &after_lines, &recipe);
        assert_eq!(removed.total_cents, 649);
        assert_eq!(upserts(&removed), vec![("tomatoes", 1)]);
        assert_eq!(deletes(&removed), vec!["onions"]);
    }

    #[test]
    fn test_change_order_follows_recipe_order() {
        let cart = cart_with_total(0);
        let recipe = vec![
            recipe_item("c", "C", 1, 1),
            recipe_item("a", "A", 1, 1),
            recipe_item("b", "B", 1, 1),
        ];

        let outcome = apply_recipe(&cart, &[], &recipe);

        let order: Vec<&str> = outcome
            .changes
            .iter()
            .map(|c| c.line_item().product_id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_total_never_negative_across_sequences() {
        let recipe = vec![recipe_item("tomatoes", "Tomatoes", 399, 2)];

        // Start from a cart whose cached total undercounts its line items.
        let cart = cart_with_total(0);
        let lines = vec![line_item(&cart, "tomatoes", 4)];

        let first = revert_recipe(&cart, &lines, &recipe);
        assert_eq!(first.total_cents, 0);

        let mut after = cart.clone();
        after.total_cents = first.total_cents;
        let after_lines: Vec<CartLineItem> = first
            .changes
            .iter()
            .map(|c| c.line_item().clone())
            .collect();

        let second = revert_recipe(&after, &after_lines, &recipe);
        assert_eq!(second.total_cents, 0);
    }
}
