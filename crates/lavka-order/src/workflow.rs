//! # Order Submission Workflow
//!
//! Drives one order attempt from checkout form to resolved outcome.
//!
//! ## Attempt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Attempt Lifecycle                            │
//! │                                                                         │
//! │   Idle ──submit()──► guard taken? ──no──► SubmissionInFlight            │
//! │                          │yes                                           │
//! │                          ▼                                              │
//! │                    cart empty? ──yes──► EmptyCart      (nothing sent)   │
//! │                          │no                                            │
//! │                          ▼                                              │
//! │                    form valid? ──no──► Validation      (nothing sent)   │
//! │                          │yes                                           │
//! │                          ▼                                              │
//! │                 ONE place_order call                                    │
//! │                    │         │                                          │
//! │              accepted      refused / silent                             │
//! │                    │         │                                          │
//! │                    ▼         ▼                                          │
//! │            clear cart     keep cart     ◄── the ONLY path that clears   │
//! │            notify ok      notify error                                  │
//! │                                                                         │
//! │   The guard is released on EVERY exit path, including panics, via a     │
//! │   drop guard. A stuck checkout button is not a failure mode here.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use lavka_core::types::{OrderForm, OrderRequest};
use lavka_core::{totals, validation, Money, Totals};
use lavka_store::{CartSnapshotStore, SharedCartStore};

use crate::client::{DeliveryFault, OrderBackend};
use crate::error::{OrderError, OrderResult};
use crate::notify::{
    Notifier, Severity, MSG_BACKEND_UNREACHABLE, MSG_CART_EMPTY, MSG_ORDER_ACCEPTED,
    MSG_ORDER_REJECTED,
};

// =============================================================================
// Submit Receipt
// =============================================================================

/// Proof of a confirmed order, returned only when the backend accepted it.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// Unique id of this submission attempt (local, for logs and support).
    pub attempt_id: Uuid,

    /// When the backend confirmed the order.
    pub submitted_at: DateTime<Utc>,

    /// The totals the order was placed with.
    pub totals: Totals,
}

// =============================================================================
// Re-entrancy Guard
// =============================================================================

/// Releases the in-flight flag when the attempt resolves, however it
/// resolves.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// =============================================================================
// Order Workflow
// =============================================================================

/// The order submission workflow.
///
/// Holds the shared cart, the delivery backend, and the notification seam.
/// One instance serves the whole session; `submit` may be called from any
/// task but only one attempt runs at a time.
pub struct OrderWorkflow<B, S>
where
    B: OrderBackend,
    S: CartSnapshotStore,
{
    cart: SharedCartStore<S>,
    backend: B,
    notifier: Arc<dyn Notifier>,
    delivery_fee: Money,
    in_flight: AtomicBool,
}

impl<B, S> OrderWorkflow<B, S>
where
    B: OrderBackend,
    S: CartSnapshotStore,
{
    /// Creates a workflow over a shared cart and a delivery backend.
    pub fn new(
        cart: SharedCartStore<S>,
        backend: B,
        notifier: Arc<dyn Notifier>,
        delivery_fee: Money,
    ) -> Self {
        OrderWorkflow {
            cart,
            backend,
            notifier,
            delivery_fee,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Checks if an attempt is currently running.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits the current cart as an order.
    ///
    /// ## Outcomes
    /// - `Ok(receipt)`: the backend confirmed the order and the cart was
    ///   cleared. The ONLY path that empties the cart.
    /// - `Err(EmptyCart | SubmissionInFlight | Validation)`: rejected
    ///   before any network I/O; the cart is untouched.
    /// - `Err(Rejected | Unreachable)`: the attempt went out and failed;
    ///   the cart is preserved so the shopper can retry.
    pub async fn submit(&self, form: OrderForm) -> OrderResult<SubmitReceipt> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Submission requested while another attempt is in flight");
            return Err(OrderError::SubmissionInFlight);
        }
        let _guard = InFlightGuard {
            flag: &self.in_flight,
        };

        let snapshot = self.cart.with_cart(|store| store.snapshot());
        if snapshot.is_empty() {
            self.notifier.notify(MSG_CART_EMPTY, Severity::Error);
            return Err(OrderError::EmptyCart);
        }

        if let Err(e) = validation::validate_order_form(&form) {
            self.notifier.notify(&e.to_string(), Severity::Error);
            return Err(OrderError::Validation(e));
        }

        let breakdown = totals::compute(&snapshot, self.delivery_fee);
        let request = OrderRequest::assemble(form, snapshot.into_items(), breakdown);
        let attempt_id = Uuid::new_v4();

        info!(
            %attempt_id,
            lines = request.items.len(),
            total = %request.totals.total,
            "Submitting order"
        );

        match self.backend.place_order(&request).await {
            Ok(()) => {
                self.cart.with_cart_mut(|store| store.clear());
                self.notifier.notify(MSG_ORDER_ACCEPTED, Severity::Success);
                info!(%attempt_id, "Order confirmed, cart cleared");

                Ok(SubmitReceipt {
                    attempt_id,
                    submitted_at: Utc::now(),
                    totals: breakdown,
                })
            }
            Err(DeliveryFault::Rejected { status }) => {
                self.notifier.notify(MSG_ORDER_REJECTED, Severity::Error);
                warn!(%attempt_id, status, "Order rejected, cart preserved");
                Err(OrderError::Rejected { status })
            }
            Err(DeliveryFault::Unreachable { reason }) => {
                self.notifier
                    .notify(MSG_BACKEND_UNREACHABLE, Severity::Error);
                warn!(%attempt_id, %reason, "Order backend unreachable, cart preserved");
                Err(OrderError::Unreachable { reason })
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use lavka_core::types::{Customer, DeliverySlot, PaymentMethod, Product};
    use lavka_store::{CartStore, JsonFileStore, MemoryStore};

    use crate::notify::NoOpNotifier;

    /// Backend that replays scripted outcomes and counts calls. An optional
    /// gate parks each call until the test releases it.
    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<Result<(), DeliveryFault>>>,
        calls: AtomicUsize,
        gate: Option<Arc<tokio::sync::Semaphore>>,
    }

    impl ScriptedBackend {
        fn with(outcomes: Vec<Result<(), DeliveryFault>>) -> Self {
            ScriptedBackend {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn gated(
            outcomes: Vec<Result<(), DeliveryFault>>,
            gate: Arc<tokio::sync::Semaphore>,
        ) -> Self {
            ScriptedBackend {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
                gate: Some(gate),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl OrderBackend for ScriptedBackend {
        async fn place_order(&self, _request: &OrderRequest) -> Result<(), DeliveryFault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(()));

            if let Some(gate) = &self.gate {
                let permit = gate.acquire().await.unwrap();
                permit.forget();
            }

            outcome
        }
    }

    /// Notifier that captures everything it is told.
    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(String, Severity)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, severity: Severity) {
            self.messages
                .lock()
                .unwrap()
                .push((message.to_string(), severity));
        }
    }

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

    fn stocked_cart() -> SharedCartStore<MemoryStore> {
        let shared = SharedCartStore::new(CartStore::open(MemoryStore::new()));
        shared.with_cart_mut(|store| {
            store.add(&Product::sample("A", "Strawberries", 500));
            store.add(&Product::sample("A", "Strawberries", 500));
            store.add(&Product::sample("B", "Basket", 50));
        });
        shared
    }

    fn fee() -> Money {
        Money::from_units(300)
    }

    #[tokio::test]
    async fn test_empty_cart_submits_nothing() {
        let cart = SharedCartStore::new(CartStore::open(MemoryStore::new()));
        let backend = ScriptedBackend::with(vec![Ok(())]);
        let workflow = OrderWorkflow::new(cart, backend, Arc::new(NoOpNotifier), fee());

        let outcome = workflow.submit(valid_form()).await;

        assert!(matches!(outcome, Err(OrderError::EmptyCart)));
        assert_eq!(workflow.backend.calls(), 0);
        assert!(!workflow.is_submitting());
    }

    #[tokio::test]
    async fn test_invalid_form_submits_nothing() {
        let cart = stocked_cart();
        let backend = ScriptedBackend::with(vec![Ok(())]);
        let workflow = OrderWorkflow::new(cart.clone(), backend, Arc::new(NoOpNotifier), fee());

        let mut form = valid_form();
        form.customer.phone = String::new();
        let outcome = workflow.submit(form).await;

        assert!(matches!(outcome, Err(OrderError::Validation(_))));
        assert_eq!(workflow.backend.calls(), 0);
        assert!(!cart.with_cart(|store| store.is_empty()));
    }

    #[tokio::test]
    async fn test_success_clears_cart_and_notifies() {
        let cart = stocked_cart();
        let backend = ScriptedBackend::with(vec![Ok(())]);
        let notifier = Arc::new(RecordingNotifier::default());
        let workflow = OrderWorkflow::new(cart.clone(), backend, notifier.clone(), fee());

        let receipt = workflow.submit(valid_form()).await.unwrap();

        // 500 × 2 + 50 = 1050, plus 300 delivery
        assert_eq!(receipt.totals.subtotal.units(), 1050);
        assert_eq!(receipt.totals.total.units(), 1350);

        assert!(cart.with_cart(|store| store.is_empty()));
        assert!(!workflow.is_submitting());

        let messages = notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], (MSG_ORDER_ACCEPTED.to_string(), Severity::Success));
    }

    #[tokio::test]
    async fn test_success_clears_the_persisted_snapshot_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let cart = SharedCartStore::new(CartStore::open(JsonFileStore::new(&path)));
        cart.with_cart_mut(|store| store.add(&Product::sample("A", "Strawberries", 500)));

        let workflow = OrderWorkflow::new(
            cart,
            ScriptedBackend::with(vec![Ok(())]),
            Arc::new(NoOpNotifier),
            fee(),
        );
        workflow.submit(valid_form()).await.unwrap();

        // The clear went through the persist cycle like any other mutation
        let reopened = CartStore::open(JsonFileStore::new(&path));
        assert!(reopened.is_empty());
    }

    #[tokio::test]
    async fn test_rejection_preserves_cart() {
        let cart = stocked_cart();
        let backend = ScriptedBackend::with(vec![Err(DeliveryFault::Rejected { status: 500 })]);
        let notifier = Arc::new(RecordingNotifier::default());
        let workflow = OrderWorkflow::new(cart.clone(), backend, notifier.clone(), fee());

        let outcome = workflow.submit(valid_form()).await;

        assert!(matches!(outcome, Err(OrderError::Rejected { status: 500 })));
        assert_eq!(cart.with_cart(|store| store.total_quantity()), 3);
        assert!(!workflow.is_submitting());

        let messages = notifier.messages.lock().unwrap();
        assert_eq!(messages[0], (MSG_ORDER_REJECTED.to_string(), Severity::Error));
    }

    #[tokio::test]
    async fn test_unreachable_preserves_cart_and_allows_retry() {
        let cart = stocked_cart();
        let backend = ScriptedBackend::with(vec![
            Err(DeliveryFault::Unreachable {
                reason: "request timed out".to_string(),
            }),
            Ok(()),
        ]);
        let notifier = Arc::new(RecordingNotifier::default());
        let workflow = OrderWorkflow::new(cart.clone(), backend, notifier.clone(), fee());

        let first = workflow.submit(valid_form()).await;
        assert!(matches!(&first, Err(OrderError::Unreachable { .. })));
        assert!(first.unwrap_err().is_retryable());
        assert_eq!(cart.with_cart(|store| store.total_quantity()), 3);

        // The guard was released, so the retry goes straight through
        workflow.submit(valid_form()).await.unwrap();
        assert!(cart.with_cart(|store| store.is_empty()));
        assert_eq!(workflow.backend.calls(), 2);

        let messages = notifier.messages.lock().unwrap();
        assert_eq!(messages[0].1, Severity::Error);
        assert_eq!(messages[1].1, Severity::Success);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_refused() {
        let gate = Arc::new(tokio::sync::Semaphore::new(0));
        let cart = stocked_cart();
        let backend = ScriptedBackend::gated(vec![Ok(())], gate.clone());
        let workflow = Arc::new(OrderWorkflow::new(
            cart.clone(),
            backend,
            Arc::new(NoOpNotifier) as Arc<dyn Notifier>,
            fee(),
        ));

        let first = {
            let workflow = workflow.clone();
            tokio::spawn(async move { workflow.submit(valid_form()).await })
        };

        // Wait until the first attempt is parked inside the backend call
        while workflow.backend.calls() == 0 {
            tokio::task::yield_now().await;
        }
        assert!(workflow.is_submitting());

        let second = workflow.submit(valid_form()).await;
        assert!(matches!(second, Err(OrderError::SubmissionInFlight)));

        gate.add_permits(1);
        first.await.unwrap().unwrap();

        assert!(!workflow.is_submitting());
        assert_eq!(workflow.backend.calls(), 1);
        assert!(cart.with_cart(|store| store.is_empty()));
    }

    #[tokio::test]
    async fn test_exactly_one_request_per_attempt() {
        let cart = stocked_cart();
        let backend = ScriptedBackend::with(vec![Err(DeliveryFault::Rejected { status: 503 })]);
        let workflow = OrderWorkflow::new(cart, backend, Arc::new(NoOpNotifier), fee());

        let _ = workflow.submit(valid_form()).await;

        // No automatic retry on failure
        assert_eq!(workflow.backend.calls(), 1);
    }
}
