//! Error types for price lookups.

use thiserror::Error;

/// Errors that can occur while fetching a current price.
///
/// Callers in the accounting core map every variant to "no enrichment for
/// this position"; none of these aborts a pipeline run.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No source knows the requested symbol.
    #[error("Symbol not found: {0}")]
    NotFound(String),

    /// A provider-specific failure (transport, authentication, malformed
    /// response).
    #[error("Provider error: {provider}: {message}")]
    ProviderError { provider: String, message: String },

    /// The lookup did not complete within the configured timeout.
    #[error("Timeout waiting for provider: {provider}")]
    Timeout { provider: String },

    /// The provider answered but the payload could not be used.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
