//! # Store Configuration
//!
//! Where the cart snapshot lives on disk.
//!
//! ## Path Resolution (StoreConfig::resolve)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Path Priority                               │
//! │                                                                         │
//! │  1. LAVKA_CART_PATH environment variable (highest priority)            │
//! │                                                                         │
//! │  2. Platform data directory                                            │
//! │     ~/.local/share/shop/cart.json (Linux)                              │
//! │     ~/Library/Application Support/ru.lavka.shop/cart.json (macOS)      │
//! │                                                                         │
//! │  3. ./cart.json (last resort, e.g. containers without HOME)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `StoreConfig::at` bypasses resolution entirely with an explicit path.

use std::path::PathBuf;

use tracing::debug;

/// The fixed snapshot file name (the storage-key analog).
pub const SNAPSHOT_FILE_NAME: &str = "cart.json";

/// Configuration for the snapshot location.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Full path of the snapshot file.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Resolves the snapshot path from environment, platform defaults, and
    /// the last-resort relative fallback.
    pub fn resolve() -> Self {
        if let Ok(path) = std::env::var("LAVKA_CART_PATH") {
            debug!(%path, "Using cart snapshot path from environment");
            return StoreConfig { path: path.into() };
        }

        let path = Self::default_data_path().unwrap_or_else(|| PathBuf::from(SNAPSHOT_FILE_NAME));
        StoreConfig { path }
    }

    /// Uses an explicit snapshot path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        StoreConfig { path: path.into() }
    }

    /// Returns the platform-default snapshot path, if a data directory
    /// can be determined.
    fn default_data_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ru", "lavka", "shop")
            .map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE_NAME))
    }
}
