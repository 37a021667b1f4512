//! Delivery of orders to the intake endpoint.

use crate::checkout::OrderPayload;
use crate::error::SubmitError;
use async_trait::async_trait;
use rupasara_data::FetchClient;

/// Hands an order to whatever records it.
#[async_trait]
pub trait IntakeTransport: Send + Sync {
    /// Deliver one order. Returns the endpoint's status code on success.
    async fn deliver(&self, payload: &OrderPayload) -> Result<u16, SubmitError>;
}

/// Best-effort JSON POST to a spreadsheet-backed webhook.
///
/// Any 2xx response counts as delivered. No retries.
#[derive(Debug, Clone)]
pub struct HttpIntake {
    client: FetchClient,
    url: String,
}

impl HttpIntake {
    pub fn new(client: FetchClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IntakeTransport for HttpIntake {
    async fn deliver(&self, payload: &OrderPayload) -> Result<u16, SubmitError> {
        let response = self
            .client
            .post(self.url.as_str())
            .json(payload)?
            .send()
            .await?
            .error_for_status()?;
        Ok(response.status)
    }
}
