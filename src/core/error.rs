//! Error types for fetching rates and converting amounts.

use thiserror::Error;

/// Why a rate refresh failed. The store keeps its last good table on any of these.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to parse rate response: {0}")]
    Malformed(String),

    #[error("Rate response has no rates field")]
    MissingRates,

    #[error("Invalid rate {value} for currency: {code}")]
    InvalidRate { code: String, value: f64 },

    #[error("Rate response is for base {actual}, expected {expected}")]
    BaseMismatch { expected: String, actual: String },
}

/// Why a single conversion could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}
