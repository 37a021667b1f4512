//! Checkout module.
//!
//! Contains the order payload, the submission pipeline and its intake
//! transport, and the plain-text messages used for the chat hand-off.

mod intake;
mod order;
mod pipeline;
mod summary;

pub use intake::{HttpIntake, IntakeTransport};
pub use order::{ContactFields, OrderPayload};
pub use pipeline::{OrderPipeline, OrderReceipt};
pub use summary::{CartSummary, ProductEnquiry, HELP_GREETING, ORDER_GREETING};
