//! HTTP client utilities for the RUPASARA storefront.
//!
//! A small builder API over `reqwest` with JSON helpers. The storefront makes
//! exactly two kinds of outbound calls (the exchange-rate lookup and the order
//! intake webhook), both of which go through [`FetchClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use rupasara_data::FetchClient;
//!
//! let client = FetchClient::new();
//!
//! let rates: serde_json::Value = client
//!     .get("https://api.exchangerate.host/latest")
//!     .query("base", "INR")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//!
//! client
//!     .post("https://script.google.com/macros/s/.../exec")
//!     .json(&payload)?
//!     .send()
//!     .await?
//!     .error_for_status()?;
//! ```

mod error;
mod request;
mod response;

use std::time::Duration;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client with the transport's default timeouts.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests fail with [`FetchError::Timeout`] after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            http: self.http.clone(),
            builder: RequestBuilder::new(method, url),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query-string pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Inspect the request that would be sent.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    ///
    /// Any status code counts as a response here; call
    /// [`Response::error_for_status`] to turn non-2xx into an error.
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.builder.method();
        let url = self.builder.url().to_string();
        tracing::debug!(method = method.as_str(), %url, "sending request");

        let response = self.builder.into_reqwest(&self.http).send().await?;
        let response = Response::read(response).await?;

        tracing::debug!(method = method.as_str(), %url, status = response.status, "received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_post_target_the_given_url() {
        let client = FetchClient::new();

        let get = client.get("https://api.exchangerate.host/latest");
        assert_eq!(get.as_request().method(), Method::Get);
        assert_eq!(get.as_request().url(), "https://api.exchangerate.host/latest");

        let post = client.post("https://intake.example/hook");
        assert_eq!(post.as_request().method(), Method::Post);
        assert_eq!(post.as_request().url(), "https://intake.example/hook");
    }

    #[test]
    fn test_builder_carries_headers_and_query() {
        let req = FetchClient::new()
            .get("https://rates.example/latest")
            .header("Accept", "application/json")
            .query("base", "INR");

        assert_eq!(req.as_request().header_value("Accept"), Some("application/json"));
        assert_eq!(
            req.as_request().query_pairs(),
            &[("base".to_string(), "INR".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_request_error() {
        let client = FetchClient::with_timeout(Duration::from_secs(2)).unwrap();
        let result = client.get("http://127.0.0.1:9/latest").send().await;
        assert!(matches!(
            result,
            Err(FetchError::RequestError(_)) | Err(FetchError::Timeout)
        ));
    }
}
