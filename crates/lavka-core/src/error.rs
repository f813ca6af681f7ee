//! # Error Types
//!
//! Domain-specific error types for lavka-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lavka-core errors (this file)                                         │
//! │  └── ValidationError  - Checkout input validation failures             │
//! │                                                                         │
//! │  lavka-store errors (separate crate)                                   │
//! │  └── StoreError       - Snapshot read/write failures (never surfaced)  │
//! │                                                                         │
//! │  lavka-order errors (separate crate)                                   │
//! │  └── OrderError       - Submission outcomes (empty cart, rejected, …)  │
//! │                                                                         │
//! │  Flow: ValidationError → OrderError → notification message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limit, etc.)
//! 3. Errors are enum variants, never String
//! 4. Malformed cart input (bad quantities, stale indices) is NOT an error:
//!    it is silently normalized at the cart boundary because it originates
//!    from untrusted UI/storage input, not programmer mistakes

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout input validation errors.
///
/// These occur when the order form doesn't meet requirements. Used for
/// early validation before the submission workflow touches the network.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Invalid format (e.g., a phone number with no digits).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
