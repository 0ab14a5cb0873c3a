//! # Shared Application State
//!
//! State shared across HTTP handlers: the database handle and the per-cart
//! lock registry.
//!
//! ## Per-Cart Serialization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Per-Cart Mutual Exclusion                            │
//! │                                                                         │
//! │  Every add/remove is one read-modify-write over one cart:              │
//! │                                                                         │
//! │    load cart ──► load recipe ──► merge ──► persist                     │
//! │                                                                         │
//! │  Two concurrent merges against the SAME cart would race on the cached  │
//! │  total and on line-item quantities (lost updates). CartLocks hands     │
//! │  out one async Mutex per cart id; the service holds it for the whole   │
//! │  sequence.                                                              │
//! │                                                                         │
//! │  add_recipe(cart A) ──► lock A ──────► ... ──► unlock A                │
//! │  add_recipe(cart A) ──► lock A (waits) ─────► runs after              │
//! │  add_recipe(cart B) ──► lock B ──────► runs in parallel               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use mealcart_db::Database;

// =============================================================================
// Cart Locks
// =============================================================================

/// Registry of per-cart async locks.
///
/// Entries are created on first use and retained for the process lifetime;
/// one `Arc<Mutex<()>>` per cart is small and carts are few.
#[derive(Debug, Default)]
pub struct CartLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CartLocks {
    /// Creates an empty lock registry.
    pub fn new() -> Self {
        CartLocks {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Acquires the lock for one cart, waiting if another merge against the
    /// same cart is in flight. The guard must be held for the whole
    /// load → merge → persist sequence.
    pub async fn acquire(&self, cart_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(cart_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    db: Database,
    locks: CartLocks,
}

impl AppState {
    /// Creates application state around a database handle.
    pub fn new(db: Database) -> Self {
        AppState {
            db,
            locks: CartLocks::new(),
        }
    }

    /// The database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// The per-cart lock registry.
    pub fn locks(&self) -> &CartLocks {
        &self.locks
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_same_cart_serializes() {
        let locks = Arc::new(CartLocks::new());

        let guard = locks.acquire("cart-1").await;

        let entered = Arc::new(AtomicBool::new(false));
        let locks2 = locks.clone();
        let entered2 = entered.clone();
        let handle = tokio::spawn(async move {
            let _guard = locks2.acquire("cart-1").await;
            entered2.store(true, Ordering::SeqCst);
        });

        // The second acquire stays parked while the first guard is held.
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert!(!entered.load(Ordering::SeqCst));

        drop(guard);
        handle.await.unwrap();
        assert!(entered.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_different_carts_are_independent() {
        let locks = CartLocks::new();

        let _guard_a = locks.acquire("cart-a").await;
        // Acquiring a different cart completes immediately.
        let _guard_b = locks.acquire("cart-b").await;
    }
}
