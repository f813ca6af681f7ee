//! # Order Configuration
//!
//! Where orders are sent, how long to wait for an answer, and what
//! delivery costs.
//!
//! ## Sources (highest priority first)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment variables                                               │
//! │     LAVKA_ORDER_URL, LAVKA_ORDER_TIMEOUT_SECS, LAVKA_DELIVERY_FEE       │
//! │                                                                         │
//! │  2. order.toml in the platform config directory                         │
//! │     ~/.config/lavka-shop/order.toml (Linux)                             │
//! │                                                                         │
//! │  3. Built-in defaults (relative endpoint works behind the same origin)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use lavka_core::{Money, DEFAULT_DELIVERY_FEE};

/// Default order endpoint, relative to the shop origin.
pub const DEFAULT_ORDER_URL: &str = "http://localhost:8000/api/order";

/// Default answer deadline in seconds. Past this, the attempt resolves as
/// unreachable rather than hanging the checkout forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config file name under the platform config directory.
const CONFIG_FILE_NAME: &str = "order.toml";

// =============================================================================
// Configuration
// =============================================================================

/// Order submission configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Order endpoint URL.
    pub url: String,

    /// Answer deadline in seconds.
    pub timeout_secs: u64,

    /// Flat delivery fee in whole currency units.
    pub delivery_fee: i64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        OrderConfig {
            url: DEFAULT_ORDER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            delivery_fee: DEFAULT_DELIVERY_FEE,
        }
    }
}

impl OrderConfig {
    /// Loads configuration from file and environment, falling back to
    /// defaults for anything unspecified. Never fails: a broken config
    /// file is warn-logged and skipped.
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();
        config.apply_env();

        if let Err(reason) = config.validate() {
            warn!(%reason, "Order configuration invalid, reverting to defaults");
            config = Self::default();
        }

        debug!(url = %config.url, timeout_secs = config.timeout_secs, "Order configuration resolved");
        config
    }

    /// Reads the TOML config file if one exists and parses.
    fn from_file() -> Option<Self> {
        let path = Self::config_path()?;
        let contents = std::fs::read_to_string(&path).ok()?;

        match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse order config, ignoring it");
                None
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ru", "lavka", "shop")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Applies environment variable overrides.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("LAVKA_ORDER_URL") {
            self.url = url;
        }
        if let Ok(secs) = std::env::var("LAVKA_ORDER_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                self.timeout_secs = secs;
            }
        }
        if let Ok(fee) = std::env::var("LAVKA_DELIVERY_FEE") {
            if let Ok(fee) = fee.parse() {
                self.delivery_fee = fee;
            }
        }
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.url).map_err(|e| format!("invalid order URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!("order URL must be http(s), got '{}'", url.scheme()));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }

        if self.delivery_fee < 0 {
            return Err("delivery_fee must not be negative".to_string());
        }

        Ok(())
    }

    /// Returns the answer deadline as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the delivery fee as [`Money`].
    pub fn delivery_fee(&self) -> Money {
        Money::from_units(self.delivery_fee)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
