//! # lavka-order: Order Submission Workflow
//!
//! This crate turns a cart into an order. It owns the submission state
//! machine, the HTTP delivery backend, the notification seam, and the
//! endpoint configuration.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Submission Architecture                       │
//! │                                                                         │
//! │   checkout form (OrderForm)                                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────────────────────────────────────────────────────────┐     │
//! │   │                 OrderWorkflow (workflow.rs)                  │     │
//! │   │                                                              │     │
//! │   │  re-entrancy guard ─ empty-cart check ─ form validation      │     │
//! │   │        │                                                     │     │
//! │   │        ▼                                                     │     │
//! │   │  snapshot cart ──► compute totals ──► assemble OrderRequest  │     │
//! │   └──────────────────────────┬───────────────────────────────────┘     │
//! │                              │ one call, never retried                 │
//! │                              ▼                                         │
//! │   ┌──────────────────┐            ┌──────────────────┐                 │
//! │   │   OrderBackend   │            │     Notifier     │                 │
//! │   │   (client.rs)    │            │    (notify.rs)   │                 │
//! │   │                  │            │                  │                 │
//! │   │  HttpBackend     │            │  success / error │                 │
//! │   │  POST the JSON   │            │  toast seam      │                 │
//! │   └──────────────────┘            └──────────────────┘                 │
//! │                                                                         │
//! │   accepted  → clear cart, notify success, return receipt                │
//! │   refused   → keep cart,  notify error,   Err(Rejected)                 │
//! │   silent    → keep cart,  notify error,   Err(Unreachable)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod workflow;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{DeliveryFault, HttpBackend, OrderBackend};
pub use config::OrderConfig;
pub use error::{OrderError, OrderResult};
pub use notify::{NoOpNotifier, Notifier, Severity};
pub use workflow::{OrderWorkflow, SubmitReceipt};
