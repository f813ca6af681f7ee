//! # Domain Types
//!
//! Core domain types used throughout the Lavka cart engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │  OrderRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  catalog shape  │──►│  id (stable)    │──►│  customer       │       │
//! │  │  id?, name      │   │  price (Money)  │   │  delivery slot  │       │
//! │  │  price, unit    │   │  quantity >= 1  │   │  items + totals │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ PaymentMethod   │   │   OrderForm     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Cash           │   │  checkout form  │                             │
//! │  │  CardOnline     │   │  data only      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Rule
//! A line item's stable id is the product id when the catalog provides one,
//! falling back to the product name. Matching on `add` checks id first,
//! then name, so a catalog without ids still deduplicates correctly.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::totals::Totals;

// =============================================================================
// Product (catalog descriptor)
// =============================================================================

/// A product descriptor as served by the catalog endpoint.
///
/// The engine never owns the catalog; it only accepts this shape in
/// [`crate::cart::Cart::add`]. Fields other than identity and price are
/// carried opaquely for display.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier. Some catalogs serve numeric ids, so anything
    /// scalar is normalized to a string on the way in.
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,

    /// Display name shown on product cards and in the cart.
    pub name: String,

    /// Optional marketing description (not used by the engine).
    #[serde(default)]
    pub description: Option<String>,

    /// Unit price in whole currency units.
    pub price: Money,

    /// Display unit, e.g. "kg" or "basket". Never interpreted numerically.
    #[serde(default)]
    pub unit: String,

    /// Opaque image reference.
    #[serde(default)]
    pub image: String,

    /// Image alt text (accessibility, not used by the engine).
    #[serde(default)]
    pub alt: Option<String>,

    /// Whether the product is currently offered.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Catalogs may serve ids as numbers or strings; normalize both to a string.
fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

impl Product {
    /// Returns the stable identity for this product: the catalog id when
    /// present, the name otherwise.
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Convenience constructor for examples and tests.
    pub fn sample(id: &str, name: &str, price: i64) -> Self {
        Product {
            id: Some(id.to_string()),
            name: name.to_string(),
            description: None,
            price: Money::from_units(price),
            unit: "kg".to_string(),
            image: String::new(),
            alt: None,
            active: true,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its quantity.
///
/// ## Price Freezing
/// The price is captured when the product is added. If the catalog price
/// changes later, the cart keeps showing what the shopper agreed to.
///
/// ## Invariant
/// `quantity >= 1` always. A line that would drop to zero is either kept at
/// one (decrement) or removed explicitly (remove); it never exists at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Stable identifier, unique within a cart.
    pub id: String,

    /// Display name (frozen at add time).
    pub name: String,

    /// Unit price in whole currency units (frozen at add time).
    pub price: Money,

    /// Opaque image reference (frozen at add time).
    pub image: String,

    /// Display unit, e.g. "kg" (frozen at add time).
    pub unit: String,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item from a catalog product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            id: product.identity().to_string(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            unit: product.unit.clone(),
            quantity: 1,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the shopper intends to pay.
///
/// The engine only forwards the selection; no payment processing happens
/// anywhere in this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[serde(rename = "cash")]
    Cash,

    /// Card payment online.
    #[serde(rename = "card")]
    CardOnline,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::CardOnline => write!(f, "card"),
        }
    }
}

// =============================================================================
// Checkout Form Data
// =============================================================================

/// Customer contact details from the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Requested delivery slot. Both fields are display strings chosen from the
/// form; the engine does not parse them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliverySlot {
    pub date: String,
    pub time: String,
}

/// Everything the checkout form collects, before cart data is attached.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderForm {
    pub customer: Customer,
    pub delivery: DeliverySlot,
    #[serde(default)]
    pub comment: Option<String>,
    pub payment: PaymentMethod,
}

// =============================================================================
// Order Request
// =============================================================================

/// The payload for one order submission attempt.
///
/// ## Lifecycle
/// Constructed once per submit attempt from the form plus a point-in-time
/// cart snapshot and freshly computed totals. Immutable afterwards and
/// discarded when the attempt resolves; never retried automatically.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderRequest {
    pub customer: Customer,
    pub delivery: DeliverySlot,
    #[serde(default)]
    pub comment: Option<String>,
    pub payment: PaymentMethod,
    /// Cart snapshot at submission time.
    pub items: Vec<LineItem>,
    /// Totals snapshot at submission time.
    pub totals: Totals,
}

impl OrderRequest {
    /// Assembles an order request from form data and cart state.
    pub fn assemble(form: OrderForm, items: Vec<LineItem>, totals: Totals) -> Self {
        OrderRequest {
            customer: form.customer,
            delivery: form.delivery,
            comment: form.comment,
            payment: form.payment,
            items,
            totals,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
