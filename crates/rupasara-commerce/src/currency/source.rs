//! Where exchange rates come from.

use crate::currency::RateTable;
use crate::error::RateFetchError;
use crate::money::Currency;
use async_trait::async_trait;
use rupasara_data::{ClientRequestBuilder, FetchClient};
use serde_json::Value;

/// Public endpoint queried when none is configured.
pub const DEFAULT_RATES_ENDPOINT: &str = "https://api.exchangerate.host/latest";

/// A provider of base-relative exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch a complete, validated rate table.
    async fn fetch_rates(&self) -> Result<RateTable, RateFetchError>;
}

/// Rates from an exchangerate.host style HTTP endpoint.
///
/// Issues `GET {endpoint}?base=INR&symbols=INR,EUR,USD` without
/// authentication and expects `{ "rates": { "<CODE>": <factor> } }`.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: FetchClient,
    endpoint: String,
}

impl HttpRateSource {
    pub fn new(client: FetchClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self) -> ClientRequestBuilder {
        self.client
            .get(self.endpoint.as_str())
            .header("Accept", "application/json")
            .query("base", Currency::BASE.code())
            .query("symbols", Currency::symbols_param())
    }
}

impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new(FetchClient::new(), DEFAULT_RATES_ENDPOINT)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self) -> Result<RateTable, RateFetchError> {
        let body: Value = self.request().send().await?.error_for_status()?.json()?;
        RateTable::from_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let source = HttpRateSource::default();
        let request = source.request();
        let request = request.as_request();

        assert_eq!(request.method(), rupasara_data::Method::Get);
        assert_eq!(request.url(), DEFAULT_RATES_ENDPOINT);
        assert_eq!(
            request.query_pairs(),
            [
                ("base".to_string(), "INR".to_string()),
                ("symbols".to_string(), "INR,EUR,USD".to_string()),
            ]
        );
        assert_eq!(request.header_value("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let source = HttpRateSource::new(FetchClient::new(), "http://127.0.0.1:9/latest");
        let err = source.fetch_rates().await.unwrap_err();
        assert!(matches!(err, RateFetchError::Transport(_)));
    }
}
