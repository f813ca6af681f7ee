//! # Order Error Types
//!
//! Error types for the order submission workflow.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Error Categories                           │
//! │                                                                         │
//! │  Before any network I/O (the cart is untouched, nothing was sent):     │
//! │  ├── EmptyCart            nothing to order                             │
//! │  ├── SubmissionInFlight   another attempt holds the guard              │
//! │  └── Validation           the form is incomplete                       │
//! │                                                                         │
//! │  After the request went out (the cart is preserved for retry):        │
//! │  ├── Rejected             backend answered with a non-success status   │
//! │  └── Unreachable          no answer at all (transport / timeout)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use lavka_core::ValidationError;

/// Result type alias for order operations.
pub type OrderResult<T> = Result<T, OrderError>;

/// Errors from the order submission workflow.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The cart was empty when submission was requested. No request is sent.
    #[error("cannot submit an order for an empty cart")]
    EmptyCart,

    /// A submission attempt is already running. The caller should wait for
    /// it to resolve instead of firing a duplicate order.
    #[error("an order submission is already in flight")]
    SubmissionInFlight,

    /// The checkout form failed validation. No request is sent.
    #[error("invalid order form: {0}")]
    Validation(#[from] ValidationError),

    /// The backend received the order and answered with a non-success
    /// status. The order was NOT accepted.
    #[error("order rejected by the backend (status {status})")]
    Rejected { status: u16 },

    /// The backend never answered: connection failure, DNS, or timeout.
    /// Whether the order arrived is unknown; the cart is preserved.
    #[error("order backend unreachable: {reason}")]
    Unreachable { reason: String },
}

impl OrderError {
    /// Checks if resubmitting the same order can reasonably succeed.
    ///
    /// Pre-flight failures need the shopper to change something first;
    /// delivery failures are worth a plain retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Rejected { .. } | OrderError::Unreachable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_categories() {
        assert!(OrderError::Rejected { status: 500 }.is_retryable());
        assert!(OrderError::Unreachable {
            reason: "timed out".to_string()
        }
        .is_retryable());

        assert!(!OrderError::EmptyCart.is_retryable());
        assert!(!OrderError::SubmissionInFlight.is_retryable());
        assert!(!OrderError::Validation(ValidationError::Required { field: "name" }).is_retryable());
    }

    #[test]
    fn test_rejected_message_carries_status() {
        let err = OrderError::Rejected { status: 422 };
        assert!(err.to_string().contains("422"));
    }
}
