//! # lavka-store: Persisted Cart Snapshot
//!
//! This crate makes the cart durable. It provides the snapshot adapter
//! (one JSON file standing in for the browser's fixed storage key) and the
//! [`CartStore`] that owns the live cart and mirrors every mutation to disk.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence Flow                            │
//! │                                                                         │
//! │  Storefront event (add / quantity / remove)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   lavka-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐         ┌──────────────────────────────┐   │   │
//! │  │   │   CartStore   │ save()  │     CartSnapshotStore        │   │   │
//! │  │   │  (store.rs)   │────────►│      (snapshot.rs)           │   │   │
//! │  │   │               │         │                              │   │   │
//! │  │   │ live Cart +   │ load()  │  JsonFileStore  (disk)       │   │   │
//! │  │   │ persist cycle │◄────────│  MemoryStore    (tests)      │   │   │
//! │  │   └───────────────┘         └──────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart.json  — a plain JSON array of line items                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! - A missing or unparseable snapshot rehydrates as an EMPTY cart.
//!   Corruption is treated as emptiness, never as a fatal error.
//! - A failed save is logged and swallowed. The in-memory cart remains
//!   the source of truth for the rest of the session.
//! - Concurrent writers (another process on the same snapshot) are out of
//!   contract: last writer wins, as the original storage layer behaved.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod snapshot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use snapshot::{CartSnapshotStore, JsonFileStore, MemoryStore};
pub use store::{CartStore, SharedCartStore};
