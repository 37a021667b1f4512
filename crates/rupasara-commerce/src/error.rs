//! Commerce error types.

use crate::money::Currency;
use rupasara_data::FetchError;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The compiled-in taxonomy could not be loaded.
    #[error("Invalid catalog configuration: {0}")]
    InvalidCatalog(String),

    /// The preference store could not be updated.
    #[error("Preference store error: {0}")]
    Preferences(#[from] rupasara_cache::CacheError),

    /// Exchange rate refresh failed.
    #[error(transparent)]
    Rates(#[from] RateFetchError),

    /// Order submission failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Why a rate refresh produced no usable table.
///
/// Always recovered by keeping the rates already in effect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateFetchError {
    /// The request never produced a response.
    #[error("Rate request failed: {0}")]
    Transport(String),

    /// The rate endpoint answered with a non-2xx status.
    #[error("Rate endpoint returned HTTP {0}")]
    Status(u16),

    /// The body was not the expected `{ "rates": { .. } }` shape.
    #[error("Malformed rate response: {0}")]
    Malformed(String),

    /// A supported currency had no factor.
    #[error("Rate response is missing {0}")]
    Incomplete(Currency),

    /// A factor was present but unusable.
    #[error("Invalid rate for {currency}: {value}")]
    Invalid { currency: Currency, value: String },
}

impl From<FetchError> for RateFetchError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::HttpError { status, .. } => RateFetchError::Status(status),
            FetchError::ParseError(msg) | FetchError::JsonError(msg) => {
                RateFetchError::Malformed(msg)
            }
            other => RateFetchError::Transport(other.to_string()),
        }
    }
}

/// Order submission errors, surfaced to the shopper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A required contact field was blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// No intake endpoint is configured.
    #[error("No order intake endpoint is configured")]
    Unconfigured,

    /// The intake endpoint could not be reached or rejected the order.
    #[error("Failed to submit order: {0}")]
    SubmitFailed(String),
}

impl From<FetchError> for SubmitError {
    fn from(e: FetchError) -> Self {
        SubmitError::SubmitFailed(e.to_string())
    }
}
