//! # Cart Module
//!
//! The ordered line-item sequence and its mutation operations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Mutations                                    │
//! │                                                                         │
//! │  Storefront Action         Operation              Sequence Change       │
//! │  ─────────────────         ─────────              ───────────────       │
//! │                                                                         │
//! │  Click product card ─────► add(product) ────────► merge or append       │
//! │                                                                         │
//! │  Edit quantity field ────► set_quantity(i, n) ──► items[i].qty = n      │
//! │                                                                         │
//! │  Click plus/minus ───────► increment/decrement ─► ±1, floored at 1      │
//! │                                                                         │
//! │  Click trash icon ───────► remove(i) ───────────► items.remove(i)       │
//! │                                                                         │
//! │  Order accepted ─────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Every operation reports whether it changed the sequence, so the        │
//! │  owning store knows when a fresh persist cycle is due.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Defensive No-ops
//! Index-based operations tolerate stale indices: a button click that lands
//! after a concurrent removal already shifted positions must not corrupt
//! state or panic. Out-of-range indices and unknown ids are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::types::{LineItem, Product};
use crate::validation;

// =============================================================================
// Cart
// =============================================================================

/// The ordered collection of line items for the current session.
///
/// ## Invariants
/// - At most one line item per distinct id (adding a matching product
///   increments quantity instead of appending a duplicate)
/// - Every line item has quantity >= 1
/// - Insertion order is display order
///
/// ## Persisted Format
/// Serializes transparently as a JSON array of line items, which is exactly
/// the shape the persisted snapshot and the order payload use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from previously persisted line items.
    ///
    /// Lines with a non-positive quantity are dropped rather than trusted;
    /// they can only come from hand-edited or corrupted storage.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Cart {
            items: items.into_iter().filter(|i| i.quantity >= 1).collect(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - If a line matches the product's id (or, failing that, its name):
    ///   increments that line's quantity by 1
    /// - Otherwise: appends a new line with quantity 1
    /// - A product with an invalid (negative) price is untrusted catalog
    ///   input and is ignored as a no-op
    ///
    /// Returns whether the cart changed.
    pub fn add(&mut self, product: &Product) -> bool {
        if validation::validate_price(product.price.units()).is_err() {
            return false;
        }

        let identity = product.identity();

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.id == identity || i.name == product.name)
        {
            item.quantity += 1;
            return true;
        }

        self.items.push(LineItem::from_product(product));
        true
    }

    /// Sets the quantity of the line at `index`.
    ///
    /// Non-positive quantities are rejected as a no-op; they guard against
    /// malformed direct edits of the quantity input field. Returns whether
    /// the cart changed.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        if validation::validate_quantity(quantity).is_err() {
            return false;
        }

        match self.items.get_mut(index) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Sets the quantity of the line with the given id. Same rules as
    /// [`Cart::set_quantity`], keyed by stable identity instead of position.
    pub fn set_quantity_by_id(&mut self, id: &str, quantity: i64) -> bool {
        let index = self.items.iter().position(|i| i.id == id);
        match index {
            Some(index) => self.set_quantity(index, quantity),
            None => false,
        }
    }

    /// Increments the quantity of the line at `index` by one.
    pub fn increment(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decrements the quantity of the line at `index` by one, floored at 1.
    ///
    /// Decrementing a line that is already at quantity 1 is a no-op; removal
    /// is a distinct, explicit operation.
    pub fn decrement(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Removes the line at `index`.
    ///
    /// Positions of subsequent lines shift down; callers must not cache
    /// indices across a remove.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    /// Removes the line with the given id.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // =========================================================================
    // Read-only Access
    // =========================================================================

    /// Returns the line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consumes the cart, yielding its line items. Used when a snapshot
    /// becomes an order payload.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines (the cart badge count).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_add_new_product_appends_with_quantity_one() {
        let mut cart = Cart::new();
        assert!(cart.add(&Product::sample("A", "Strawberries", 500)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_add_ignores_negative_price() {
        let mut cart = Cart::new();
        assert!(!cart.add(&Product::sample("A", "Strawberries", -500)));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = Cart::new();
        let product = Product::sample("A", "Strawberries", 500);

        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_matches_by_name_when_ids_absent() {
        let mut cart = Cart::new();
        let mut product = Product::sample("x", "Strawberries", 500);
        product.id = None;

        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, "Strawberries");
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_rejects_non_positive() {
        let mut cart = Cart::new();
        cart.add(&Product::sample("A", "Strawberries", 500));

        assert!(!cart.set_quantity(0, 0));
        assert!(!cart.set_quantity(0, -3));
        assert_eq!(cart.items()[0].quantity, 1);

        assert!(cart.set_quantity(0, 5));
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = Cart::new();
        cart.add(&Product::sample("A", "Strawberries", 500));

        assert!(!cart.decrement(0));
        assert_eq!(cart.items()[0].quantity, 1);

        assert!(cart.increment(0));
        assert!(cart.decrement(0));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_shifts_subsequent_indices() {
        let mut cart = Cart::new();
        cart.add(&Product::sample("A", "Strawberries", 100));
        cart.add(&Product::sample("B", "Basket", 50));

        assert!(cart.remove(0));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, "B");
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut cart = Cart::new();
        cart.add(&Product::sample("A", "Strawberries", 500));

        assert!(!cart.remove(7));
        assert!(!cart.increment(7));
        assert!(!cart.decrement(7));
        assert!(!cart.set_quantity(7, 2));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_identity_keyed_operations() {
        let mut cart = Cart::new();
        cart.add(&Product::sample("A", "Strawberries", 100));
        cart.add(&Product::sample("B", "Basket", 50));

        assert!(cart.set_quantity_by_id("B", 4));
        assert_eq!(cart.items()[1].quantity, 4);

        assert!(cart.remove_by_id("A"));
        assert_eq!(cart.len(), 1);

        assert!(!cart.set_quantity_by_id("missing", 2));
        assert!(!cart.remove_by_id("missing"));
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        let a = Product::sample("A", "Strawberries", 100);
        cart.add(&a);
        cart.add(&a);
        cart.add(&Product::sample("B", "Basket", 50));

        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_serializes_as_json_array() {
        let mut cart = Cart::new();
        cart.add(&Product::sample("A", "Strawberries", 500));

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "A");
    }

    #[test]
    fn test_from_items_drops_invalid_quantities() {
        let good = LineItem {
            id: "A".to_string(),
            name: "Strawberries".to_string(),
            price: Money::from_units(500),
            image: String::new(),
            unit: "kg".to_string(),
            quantity: 2,
        };
        let bad = LineItem {
            quantity: 0,
            ..good.clone()
        };

        let cart = Cart::from_items(vec![good, bad]);
        assert_eq!(cart.len(), 1);
    }
}
