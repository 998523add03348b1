//! Configuration for the vector store.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metric::DEFAULT_METRIC;

/// Configuration parameters for a [`VectorStore`](crate::store::VectorStore).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// The metric used when a search does not name one.
    pub default_metric: String,
    /// When true, the first inserted record fixes the store's vector
    /// dimension and later mismatches (inserts or search queries) fail with
    /// [`Error::DimensionMismatch`](crate::error::Error::DimensionMismatch).
    /// Off by default: the store accepts mixed dimensions and leaves
    /// consistency to the caller.
    pub enforce_dimensions: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { default_metric: DEFAULT_METRIC.to_string(), enforce_dimensions: false }
    }
}

impl StoreConfig {
    /// Create a new builder for constructing a [`StoreConfig`].
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`StoreConfig`].
#[derive(Debug, Clone, Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the default search metric name.
    pub fn default_metric(mut self, name: impl Into<String>) -> Self {
        self.config.default_metric = name.into();
        self
    }

    /// Enable or disable dimension enforcement.
    pub fn enforce_dimensions(mut self, enforce: bool) -> Self {
        self.config.enforce_dimensions = enforce;
        self
    }

    /// Build the [`StoreConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `default_metric` is empty. Whether the
    /// name resolves to a registered metric is checked when the store is
    /// built, against its registry.
    pub fn build(self) -> Result<StoreConfig> {
        if self.config.default_metric.is_empty() {
            return Err(Error::Config("default_metric must not be empty".to_string()));
        }
        Ok(self.config)
    }
}
