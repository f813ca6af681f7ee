//! End-to-end checkout demo: stock a cart, persist it, and submit the
//! order to the configured endpoint.
//!
//! Run against a local shop backend:
//! ```text
//! LAVKA_ORDER_URL=http://localhost:8000/api/order cargo run --example checkout
//! ```

use std::sync::Arc;

use lavka_core::types::{Customer, DeliverySlot, OrderForm, PaymentMethod, Product};
use lavka_order::{HttpBackend, Notifier, OrderConfig, OrderWorkflow, Severity};
use lavka_store::{JsonFileStore, SharedCartStore, StoreConfig};

/// Prints notifications to the terminal, standing in for the storefront's
/// toast component.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let tag = match severity {
            Severity::Success => "OK",
            Severity::Error => "!!",
        };
        println!("[{tag}] {message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store_config = StoreConfig::resolve();
    let cart = SharedCartStore::open(JsonFileStore::new(store_config.path));

    cart.with_cart_mut(|store| {
        store.add(&Product::sample("1", "Strawberries", 500));
        store.add(&Product::sample("1", "Strawberries", 500));
        store.add(&Product::sample("3", "Basket", 700));
    });
    println!("Cart holds {} items", cart.with_cart(|store| store.total_quantity()));

    let order_config = OrderConfig::load();
    let backend = HttpBackend::new(&order_config)?;
    let workflow = OrderWorkflow::new(
        cart.clone(),
        backend,
        Arc::new(ConsoleNotifier),
        order_config.delivery_fee(),
    );

    let form = OrderForm {
        customer: Customer {
            name: "Anna Petrova".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            email: "anna@example.com".to_string(),
            address: "Lenina 1, apt 5".to_string(),
        },
        delivery: DeliverySlot {
            date: "2026-09-01".to_string(),
            time: "10:00-12:00".to_string(),
        },
        comment: Some("Ring the doorbell twice".to_string()),
        payment: PaymentMethod::Cash,
    };

    match workflow.submit(form).await {
        Ok(receipt) => {
            println!(
                "Order {} confirmed at {}, total {}",
                receipt.attempt_id, receipt.submitted_at, receipt.totals.total
            );
        }
        Err(e) => {
            println!("Order not placed: {e}");
            if e.is_retryable() {
                println!("The cart is preserved; try again once the backend is up.");
            }
        }
    }

    Ok(())
}
