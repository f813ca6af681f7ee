//! # Totals Calculator
//!
//! Pure derivation of the subtotal/delivery/total breakdown from a cart
//! snapshot.
//!
//! ## Why Recompute From Scratch?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Totals are DERIVED, never stored and never incrementally maintained.   │
//! │                                                                         │
//! │  Incremental totals drift: a missed update after one mutation leaves    │
//! │  the displayed total out of sync with the line items forever.           │
//! │                                                                         │
//! │  Recomputing Σ(price × quantity) on every read makes drift impossible   │
//! │  and costs nothing at cart sizes a shopper can produce.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;

// =============================================================================
// Totals
// =============================================================================

/// Derived totals breakdown for a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Totals {
    /// Sum of all line totals.
    pub subtotal: Money,

    /// Flat delivery fee; zero for an empty cart.
    pub delivery: Money,

    /// Grand total: subtotal + delivery.
    pub total: Money,
}

/// Computes the totals breakdown for a cart snapshot.
///
/// Pure and deterministic: the same snapshot and fee always yield the same
/// breakdown. The delivery fee applies only when there is something to
/// deliver.
///
/// ## Example
/// ```rust
/// use lavka_core::cart::Cart;
/// use lavka_core::money::Money;
/// use lavka_core::totals;
/// use lavka_core::types::Product;
///
/// let mut cart = Cart::new();
/// cart.add(&Product::sample("A", "Strawberries", 500));
///
/// let breakdown = totals::compute(&cart, Money::from_units(300));
/// assert_eq!(breakdown.total.units(), 800);
/// ```
pub fn compute(cart: &Cart, delivery_fee: Money) -> Totals {
    let subtotal: Money = cart.items().iter().map(|item| item.line_total()).sum();

    let delivery = if subtotal.is_positive() {
        delivery_fee
    } else {
        Money::zero()
    };

    Totals {
        subtotal,
        delivery,
        total: subtotal + delivery,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
