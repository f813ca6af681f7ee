//! # lavka-core: Pure Business Logic for the Lavka Cart Engine
//!
//! This crate is the **heart** of the Lavka storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Lavka Engine Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Storefront (web frontend)                     │   │
//! │  │    Product cards ──► Cart rows ──► Order form ──► Notifications │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lavka-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  totals   │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │  compute  │  │   │
//! │  │   │ OrderReq  │  │  integer  │  │  add/set  │  │ breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │       lavka-store (snapshot)        lavka-order (submission)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, OrderRequest, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The ordered line-item sequence and its mutations
//! - [`totals`] - Derived subtotal/delivery/total breakdown
//! - [`error`] - Domain error types
//! - [`validation`] - Order form and quantity validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole currency units (i64)
//! 4. **Untrusted Input Degrades Softly**: malformed quantity edits and stale
//!    indices are no-ops, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use lavka_core::cart::Cart;
//! use lavka_core::money::Money;
//! use lavka_core::totals;
//! use lavka_core::types::Product;
//!
//! let mut cart = Cart::new();
//! cart.add(&Product::sample("strawberry", "Fresh strawberries", 500));
//! cart.add(&Product::sample("strawberry", "Fresh strawberries", 500));
//!
//! let breakdown = totals::compute(&cart, Money::from_units(300));
//! assert_eq!(breakdown.subtotal.units(), 1000);
//! assert_eq!(breakdown.total.units(), 1300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lavka_core::Money` instead of
// `use lavka_core::money::Money`

pub use cart::Cart;
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use totals::Totals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default flat delivery fee in whole currency units.
///
/// ## Why a constant?
/// The fee is a fixed business setting, not a computed value. The order
/// workflow reads it from configuration and falls back to this default.
pub const DEFAULT_DELIVERY_FEE: i64 = 300;
