//! # Cart Store
//!
//! Owns the live cart and keeps the persisted snapshot in lockstep with it.
//!
//! ## Persist Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persist-on-Mutation Cycle                          │
//! │                                                                         │
//! │   mutation ──► did the sequence change? ──► yes ──► save snapshot       │
//! │                        │                              │                 │
//! │                        no                      save failed?             │
//! │                        │                              │                 │
//! │                        ▼                              ▼                 │
//! │                     nothing                 warn-log and carry on;      │
//! │                                             memory stays authoritative  │
//! │                                                                         │
//! │  After every applied mutation the snapshot equals the in-memory cart    │
//! │  (except while a save failure persists, which is invisible to the       │
//! │  shopper by design).                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::warn;

use lavka_core::types::Product;
use lavka_core::Cart;

use crate::snapshot::CartSnapshotStore;

// =============================================================================
// Cart Store
// =============================================================================

/// The authoritative cart for the current session.
///
/// All mutations go through this type so the persisted snapshot can never
/// drift from the in-memory sequence. Collaborators get clones via
/// [`CartStore::snapshot`]; nothing outside this type can mutate the cart.
#[derive(Debug)]
pub struct CartStore<S: CartSnapshotStore> {
    cart: Cart,
    snapshots: S,
}

impl<S: CartSnapshotStore> CartStore<S> {
    /// Opens the store, rehydrating the cart persisted by a previous
    /// session (or starting empty).
    pub fn open(snapshots: S) -> Self {
        let cart = snapshots.load();
        CartStore { cart, snapshots }
    }

    // =========================================================================
    // Mutations (each one persists when it applies)
    // =========================================================================

    /// Adds a product: merges into a matching line or appends a new one.
    /// Products with an invalid price are ignored.
    pub fn add(&mut self, product: &Product) -> bool {
        let changed = self.cart.add(product);
        if changed {
            self.persist();
        }
        changed
    }

    /// Sets the quantity of the line at `index`; non-positive values and
    /// stale indices are no-ops.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        let changed = self.cart.set_quantity(index, quantity);
        if changed {
            self.persist();
        }
        changed
    }

    /// Sets the quantity of the line with the given id.
    pub fn set_quantity_by_id(&mut self, id: &str, quantity: i64) -> bool {
        let changed = self.cart.set_quantity_by_id(id, quantity);
        if changed {
            self.persist();
        }
        changed
    }

    /// Increments the line at `index` by one.
    pub fn increment(&mut self, index: usize) -> bool {
        let changed = self.cart.increment(index);
        if changed {
            self.persist();
        }
        changed
    }

    /// Decrements the line at `index` by one, floored at 1.
    pub fn decrement(&mut self, index: usize) -> bool {
        let changed = self.cart.decrement(index);
        if changed {
            self.persist();
        }
        changed
    }

    /// Removes the line at `index`.
    pub fn remove(&mut self, index: usize) -> bool {
        let changed = self.cart.remove(index);
        if changed {
            self.persist();
        }
        changed
    }

    /// Removes the line with the given id.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let changed = self.cart.remove_by_id(id);
        if changed {
            self.persist();
        }
        changed
    }

    /// Empties the cart. Called exactly once per order, on confirmed
    /// successful submission.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    // =========================================================================
    // Read-only Access
    // =========================================================================

    /// Returns a read-only point-in-time copy of the cart.
    pub fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Returns the total quantity across all lines (the cart badge count).
    pub fn total_quantity(&self) -> i64 {
        self.cart.total_quantity()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Mirrors the cart to the snapshot store. Failure is swallowed: the
    /// in-memory cart remains authoritative for this session.
    fn persist(&self) {
        if let Err(e) = self.snapshots.save(&self.cart) {
            warn!(error = %e, "Failed to persist cart snapshot; in-memory cart remains authoritative");
        }
    }
}

// =============================================================================
// Shared Cart Store
// =============================================================================

/// Cart store handle shared between the storefront bindings and the order
/// workflow.
///
/// ## Why a Mutex?
/// The storefront's event dispatch is effectively single-threaded, but the
/// order workflow runs on an async runtime, so the Rust compiler (rightly)
/// demands real synchronization. Mutations are quick; the lock is never
/// held across an await point.
pub struct SharedCartStore<S: CartSnapshotStore> {
    inner: Arc<Mutex<CartStore<S>>>,
}

impl<S: CartSnapshotStore> Clone for SharedCartStore<S> {
    fn clone(&self) -> Self {
        SharedCartStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CartSnapshotStore> SharedCartStore<S> {
    /// Wraps a cart store for shared access.
    pub fn new(store: CartStore<S>) -> Self {
        SharedCartStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Opens the underlying store and wraps it in one step.
    pub fn open(snapshots: S) -> Self {
        Self::new(CartStore::open(snapshots))
    }

    /// Executes a function with read access to the cart store.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore<S>) -> R,
    {
        let store = self.inner.lock().expect("cart mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the cart store.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore<S>) -> R,
    {
        let mut store = self.inner.lock().expect("cart mutex poisoned");
        f(&mut store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::snapshot::{JsonFileStore, MemoryStore};
    use lavka_core::types::Product;

    /// Snapshot store whose saves always fail, for the swallow-and-carry-on
    /// policy tests.
    struct BrokenStore;

    impl CartSnapshotStore for BrokenStore {
        fn load(&self) -> Cart {
            Cart::new()
        }

        fn save(&self, _cart: &Cart) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }
    }

    #[test]
    fn test_snapshot_tracks_every_mutation() {
        let mut store = CartStore::open(MemoryStore::new());
        let a = Product::sample("A", "Strawberries", 100);
        let b = Product::sample("B", "Basket", 50);

        store.add(&a);
        assert_eq!(store.snapshots.load(), store.snapshot());

        store.add(&b);
        store.set_quantity(0, 4);
        assert_eq!(store.snapshots.load(), store.snapshot());

        store.remove(1);
        assert_eq!(store.snapshots.load(), store.snapshot());

        store.clear();
        assert_eq!(store.snapshots.load(), store.snapshot());
        assert!(store.snapshots.load().is_empty());
    }

    #[test]
    fn test_noop_mutations_do_not_touch_the_snapshot() {
        let seeded = {
            let mut cart = Cart::new();
            cart.add(&Product::sample("A", "Strawberries", 100));
            cart
        };
        let mut store = CartStore::open(MemoryStore::seeded(seeded.clone()));

        assert!(!store.set_quantity(0, 0));
        assert!(!store.remove(9));
        assert!(!store.decrement(0));
        assert!(!store.add(&Product::sample("C", "Free-floating", -10)));

        assert_eq!(store.snapshots.load(), seeded);
    }

    #[test]
    fn test_rehydrates_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        {
            let mut store = CartStore::open(JsonFileStore::new(&path));
            store.add(&Product::sample("A", "Strawberries", 500));
            store.increment(0);
        }

        // Simulated process restart
        let store = CartStore::open(JsonFileStore::new(&path));
        assert_eq!(store.total_quantity(), 2);
        assert_eq!(store.snapshot().items()[0].id, "A");
    }

    #[test]
    fn test_save_failure_keeps_memory_authoritative() {
        let mut store = CartStore::open(BrokenStore);

        store.add(&Product::sample("A", "Strawberries", 500));
        store.increment(0);

        assert_eq!(store.total_quantity(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_shared_store_access() {
        let shared = SharedCartStore::open(MemoryStore::new());

        shared.with_cart_mut(|store| store.add(&Product::sample("A", "Strawberries", 100)));
        let quantity = shared.with_cart(|store| store.total_quantity());

        assert_eq!(quantity, 1);

        let clone = shared.clone();
        clone.with_cart_mut(|store| store.clear());
        assert!(shared.with_cart(|store| store.is_empty()));
    }
}
