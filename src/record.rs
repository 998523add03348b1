//! Data types for stored records and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form attribute metadata attached to a record.
///
/// Values are JSON scalars or lists; common attributes include `source`,
/// `type`, `page`, `chunk_id`, and `total_chunks`, but the store imposes no
/// schema beyond what a caller's [`MetadataFilter`](crate::filter::MetadataFilter)
/// references.
pub type Metadata = HashMap<String, Value>;

/// A keyed vector with its metadata.
///
/// The key is typically the source text the vector was embedded from, and is
/// unique per store: a later insert under the same key replaces the vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorRecord {
    /// Unique identifier for the record.
    pub key: String,
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// Attribute metadata used for filtering.
    #[serde(default)]
    pub metadata: Metadata,
}

impl VectorRecord {
    /// Create a record with empty metadata.
    pub fn new(key: impl Into<String>, vector: Vec<f32>) -> Self {
        Self { key: key.into(), vector, metadata: Metadata::new() }
    }

    /// Attach metadata to the record.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A search hit: a record key paired with its similarity score and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The key of the matched record.
    pub key: String,
    /// The similarity score (higher is more similar).
    pub score: f32,
    /// The matched record's metadata.
    pub metadata: Metadata,
}
