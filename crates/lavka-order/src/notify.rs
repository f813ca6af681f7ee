//! # Notification Seam
//!
//! How the workflow tells the shopper what happened, without knowing
//! anything about the UI that displays it.
//!
//! The workflow emits a message and a severity; the storefront decides
//! whether that becomes a toast, a banner, or a console line. Mirrors the
//! emitter seam used elsewhere in the workspace: a trait at the boundary,
//! a no-op implementation for headless runs.

use tracing::info;

// =============================================================================
// Messages
// =============================================================================

/// Shown when submission is requested with nothing in the cart.
pub const MSG_CART_EMPTY: &str = "Your cart is empty. Add something first.";

/// Shown when the backend confirms the order.
pub const MSG_ORDER_ACCEPTED: &str =
    "Order placed! We will contact you to confirm the delivery.";

/// Shown when the backend answers but refuses the order.
pub const MSG_ORDER_REJECTED: &str =
    "Something went wrong while placing the order. Please contact us directly.";

/// Shown when the backend never answers.
pub const MSG_BACKEND_UNREACHABLE: &str =
    "Could not reach the shop. Please check your connection and try again.";

// =============================================================================
// Notifier Trait
// =============================================================================

/// Severity of a shopper-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Outbound notification seam.
///
/// Implementations must be cheap and non-blocking; the workflow calls
/// `notify` on its own async task.
pub trait Notifier: Send + Sync {
    /// Delivers one message to the shopper.
    fn notify(&self, message: &str, severity: Severity);
}

/// Notifier that only records to the log. Used in headless contexts and
/// as the default when no UI is attached.
#[derive(Debug, Default)]
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        info!(?severity, %message, "Notification (no UI attached)");
    }
}
