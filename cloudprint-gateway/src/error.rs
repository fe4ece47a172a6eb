//! Gateway error types

use thiserror::Error;

/// Gateway error type
///
/// Single-item operations surface these to their caller unretried.
/// Batched status polling never propagates them; it maps each failed
/// item to `DeviceState::QueryFailed` instead.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Invalid or missing configuration
    #[error("config error: {0}")]
    Config(String),

    /// Non-success HTTP status from the vendor endpoint
    #[error("transport error: HTTP status {status}")]
    Transport { status: u16 },

    /// Request failed before a status was available
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Vendor-reported failure (non-zero result code)
    ///
    /// The vendor message is kept intact for caller-level translation.
    #[error("vendor error {code}: {message}")]
    Vendor { code: i64, message: String },

    /// Response decoded but missing the expected payload
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
