//! # Validation Module
//!
//! Input validation for the checkout boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront (HTML `required` attributes)                      │
//! │  ├── Basic format checks (empty fields)                                │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (engine boundary)                                │
//! │  ├── The form attributes are a UI affordance, bypassable via direct    │
//! │  │   API calls, so the engine re-checks before submitting              │
//! │  └── Required fields, sane lengths                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order backend                                                │
//! │  └── Business rules (out of our hands; shows up as a rejection)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::OrderForm;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (>= 1); the cart never holds a zero-quantity line
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    Ok(())
}

/// Validates a price in whole currency units.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for promotional items)
pub fn validate_price(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::MustBePositive { field: "price" });
    }

    Ok(())
}

// =============================================================================
// Order Form Validation
// =============================================================================

/// Maximum length accepted for the free-form order comment.
const MAX_COMMENT_LEN: usize = 1000;

/// Validates the checkout form before an order is submitted.
///
/// ## Rules
/// - Customer name, phone, and address are required
/// - Delivery date and time are required
/// - Phone must contain at least one digit
/// - Comment, if present, is capped at a sane length
///
/// Email is optional on the form, so it is not checked here.
pub fn validate_order_form(form: &OrderForm) -> ValidationResult<()> {
    require("name", &form.customer.name)?;
    require("phone", &form.customer.phone)?;
    require("address", &form.customer.address)?;
    require("delivery date", &form.delivery.date)?;
    require("delivery time", &form.delivery.time)?;

    if !form.customer.phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone",
            reason: "must contain at least one digit",
        });
    }

    if let Some(comment) = &form.comment {
        if comment.len() > MAX_COMMENT_LEN {
            return Err(ValidationError::TooLong {
                field: "comment",
                max: MAX_COMMENT_LEN,
            });
        }
    }

    Ok(())
}

fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customer, DeliverySlot, PaymentMethod};

    fn valid_form() -> OrderForm {
        OrderForm {
            customer: Customer {
                name: "Anna".to_string(),
                phone: "+7 900 000-00-00".to_string(),
                email: "anna@example.com".to_string(),
                address: "Lenina 1".to_string(),
            },
            delivery: DeliverySlot {
                date: "2026-09-01".to_string(),
                time: "10:00-12:00".to_string(),
            },
            comment: None,
            payment: PaymentMethod::Cash,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(500).is_ok());
        assert!(validate_price(-100).is_err());
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_order_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut form = valid_form();
        form.customer.name = "  ".to_string();
        assert!(validate_order_form(&form).is_err());

        let mut form = valid_form();
        form.delivery.date = String::new();
        assert!(validate_order_form(&form).is_err());
    }

    #[test]
    fn test_phone_needs_a_digit() {
        let mut form = valid_form();
        form.customer.phone = "call me".to_string();
        assert!(validate_order_form(&form).is_err());
    }

    #[test]
    fn test_overlong_comment_rejected() {
        let mut form = valid_form();
        form.comment = Some("x".repeat(2000));
        assert!(validate_order_form(&form).is_err());
    }
}
