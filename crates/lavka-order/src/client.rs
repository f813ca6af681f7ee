//! # Order Delivery Backend
//!
//! The network seam: one trait for "hand this order to the backend", one
//! HTTP implementation of it.
//!
//! ## Outcome Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    HTTP Outcome → Delivery Outcome                      │
//! │                                                                         │
//! │  2xx status               →  Ok(())          order is in               │
//! │  any other status         →  Rejected        backend said no           │
//! │  connect / DNS / timeout  →  Unreachable     backend never answered    │
//! │                                                                         │
//! │  The response BODY is never inspected. The contract is status-only,     │
//! │  so the backend can evolve its response shape freely.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use lavka_core::types::OrderRequest;

use crate::config::OrderConfig;

// =============================================================================
// Delivery Fault
// =============================================================================

/// Why an order did not land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryFault {
    /// The backend answered with a non-success status.
    Rejected { status: u16 },

    /// The backend never answered (transport failure or deadline).
    Unreachable { reason: String },
}

// =============================================================================
// Backend Trait
// =============================================================================

/// One-shot order delivery seam.
///
/// Exactly one call per submission attempt; the workflow never retries on
/// its own. Test doubles implement this to script outcomes.
pub trait OrderBackend: Send + Sync {
    /// Delivers one order request and reports whether it was accepted.
    fn place_order(
        &self,
        request: &OrderRequest,
    ) -> impl std::future::Future<Output = Result<(), DeliveryFault>> + Send;
}

// =============================================================================
// HTTP Backend
// =============================================================================

/// Order backend speaking JSON-over-HTTP to the shop's order endpoint.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    /// Builds an HTTP backend from the order configuration. The answer
    /// deadline is baked into the client so every request carries it.
    pub fn new(config: &OrderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(HttpBackend {
            client,
            url: config.url.clone(),
        })
    }
}

impl OrderBackend for HttpBackend {
    async fn place_order(&self, request: &OrderRequest) -> Result<(), DeliveryFault> {
        debug!(url = %self.url, lines = request.items.len(), "Posting order");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                };
                warn!(%reason, "Order backend unreachable");
                DeliveryFault::Unreachable { reason }
            })?;

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Order accepted by backend");
            Ok(())
        } else {
            warn!(status = status.as_u16(), "Order rejected by backend");
            Err(DeliveryFault::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
