//! # Snapshot Adapter
//!
//! Reads and writes the serialized cart under a fixed location. Pure
//! get/set with no business logic, mirroring the browser storage key the
//! original storefront used.
//!
//! ## Corruption Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load() NEVER fails.                                                    │
//! │                                                                         │
//! │  missing file      → empty cart   (first visit)                         │
//! │  unreadable file   → empty cart   (warn-logged)                         │
//! │  unparseable JSON  → empty cart   (warn-logged)                         │
//! │  zero-qty lines    → dropped      (hand-edited storage)                 │
//! │                                                                         │
//! │  Losing a stale cart is annoying; refusing to start over it is worse.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use lavka_core::types::LineItem;
use lavka_core::Cart;

use crate::error::StoreResult;

// =============================================================================
// Snapshot Store Trait
// =============================================================================

/// Storage seam for the persisted cart.
///
/// `load` is infallible by contract: any failure degrades to an empty cart.
/// `save` reports failure so the cart store can log it, but the cart store
/// never propagates it further.
pub trait CartSnapshotStore: Send {
    /// Loads the persisted cart, or an empty cart when nothing usable is
    /// stored.
    fn load(&self) -> Cart;

    /// Serializes and stores the cart.
    fn save(&self, cart: &Cart) -> StoreResult<()>;
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Snapshot store backed by a single JSON file: a plain array of line
/// items, identical to the order payload's `items` shape.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a file store at the given path. The file itself is created
    /// lazily on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl CartSnapshotStore for JsonFileStore {
    fn load(&self) -> Cart {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No cart snapshot yet, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read cart snapshot, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Vec<LineItem>>(&contents) {
            Ok(items) => Cart::from_items(items),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cart snapshot is corrupt, starting empty");
                Cart::new()
            }
        }
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename so a crash mid-write cannot leave a torn snapshot
        let tmp = self.path.with_extension("json.tmp");
        let contents = serde_json::to_string(cart)?;
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), lines = cart.len(), "Cart snapshot saved");
        Ok(())
    }
}

// =============================================================================
// In-Memory Store (tests, ephemeral sessions)
// =============================================================================

/// Snapshot store that mirrors the cart in memory only.
///
/// Used by tests to observe exactly what would have been persisted, and
/// usable for sessions that deliberately skip durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    mirrored: Mutex<Cart>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a cart, as if it had been persisted
    /// by an earlier session.
    pub fn seeded(cart: Cart) -> Self {
        MemoryStore {
            mirrored: Mutex::new(cart),
        }
    }

    /// Returns the last saved cart.
    pub fn mirrored(&self) -> Cart {
        self.mirrored.lock().expect("snapshot mutex poisoned").clone()
    }
}

impl CartSnapshotStore for MemoryStore {
    fn load(&self) -> Cart {
        self.mirrored()
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        *self.mirrored.lock().expect("snapshot mutex poisoned") = cart.clone();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lavka_core::types::Product;

    fn cart_with(items: &[(&str, i64)]) -> Cart {
        let mut cart = Cart::new();
        for (id, price) in items {
            cart.add(&Product::sample(id, id, *price));
        }
        cart
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cart.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cart.json"));

        let cart = cart_with(&[("A", 100), ("B", 50)]);
        store.save(&cart).unwrap();

        assert_eq!(store.load(), cart);
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, r#"{"cart": []}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_snapshot_is_a_plain_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        let store = JsonFileStore::new(&path);

        store.save(&cart_with(&[("A", 100)])).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.trim_start().starts_with('['));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/cart.json");
        let store = JsonFileStore::new(&path);

        store.save(&cart_with(&[("A", 100)])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_memory_store_mirrors_saves() {
        let store = MemoryStore::new();
        let cart = cart_with(&[("A", 100)]);

        store.save(&cart).unwrap();
        assert_eq!(store.mirrored(), cart);
        assert_eq!(store.load(), cart);
    }
}
