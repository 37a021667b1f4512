//! Order submission.

use crate::cart::CartStore;
use crate::checkout::{ContactFields, IntakeTransport, OrderPayload};
use crate::error::SubmitError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of a delivered order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    /// Exactly what was sent.
    pub payload: OrderPayload,
    /// Status code returned by the intake endpoint.
    pub status: u16,
}

/// Turns the cart plus contact details into a delivered order.
#[derive(Clone, Default)]
pub struct OrderPipeline {
    transport: Option<Arc<dyn IntakeTransport>>,
}

impl std::fmt::Debug for OrderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderPipeline")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl OrderPipeline {
    pub fn new(transport: Arc<dyn IntakeTransport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// A pipeline with no intake endpoint; every submit is `Unconfigured`.
    pub fn unconfigured() -> Self {
        Self { transport: None }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Submit the cart as an order.
    ///
    /// Contact fields are checked first, then configuration. The cart is
    /// snapshotted before delivery, so edits made while the request is in
    /// flight are not part of the order. On success the cart is cleared; on
    /// failure it is left untouched. An empty cart is submitted as a
    /// zero-subtotal order.
    pub async fn submit(
        &self,
        cart: &CartStore,
        contact: ContactFields,
    ) -> Result<OrderReceipt, SubmitError> {
        contact.validate()?;
        let transport = self.transport.as_ref().ok_or(SubmitError::Unconfigured)?;

        let payload = OrderPayload::new(contact, cart.snapshot(), Utc::now());

        match transport.deliver(&payload).await {
            Ok(status) => {
                cart.clear();
                tracing::info!(
                    lines = payload.items.len(),
                    pieces = payload.piece_count(),
                    subtotal = %payload.subtotal,
                    status,
                    "order submitted"
                );
                Ok(OrderReceipt { payload, status })
            }
            Err(e) => {
                tracing::warn!(error = %e, lines = payload.items.len(), "order submission failed");
                Err(e)
            }
        }
    }
}
