//! Error types for the `simstore` crate.

use thiserror::Error;

/// Errors that can occur in store, metric, and ingestion operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A metric name was not found in the registry.
    #[error("unknown distance metric '{name}'")]
    UnknownMetric {
        /// The name that failed to resolve.
        name: String,
    },

    /// The embedding provider returned a batch whose length does not match
    /// the number of input texts.
    #[error("embedding batch size mismatch: expected {expected}, got {actual}")]
    BatchSizeMismatch {
        /// Number of texts sent to the provider.
        expected: usize,
        /// Number of embeddings the provider returned.
        actual: usize,
    },

    /// The embedding provider failed (network, auth, rate limit, ...).
    ///
    /// Provider failures are propagated unchanged; the store adds no retry
    /// policy of its own.
    #[error("embedding provider error ({provider}): {message}")]
    Provider {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector's dimension does not match the store's fixed dimension.
    ///
    /// Only raised when dimension enforcement is enabled in
    /// [`StoreConfig`](crate::config::StoreConfig).
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension fixed by the first inserted record.
        expected: usize,
        /// The dimension of the offending vector.
        actual: usize,
    },

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
