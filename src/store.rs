//! The in-memory vector store: keyed records, metadata filtering, and exact
//! k-nearest-neighbor search.
//!
//! The store does no internal locking. Mutation takes `&mut self` and reads
//! take `&self`, so the borrow checker enforces the single-writer /
//! concurrent-reader discipline; callers sharing a store across tasks wrap
//! it in `tokio::sync::RwLock` (or equivalent) themselves. The only await
//! points are the calls into the [`EmbeddingProvider`].

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, error, info};

use crate::config::StoreConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{Error, Result};
use crate::filter::MetadataFilter;
use crate::metric::MetricRegistry;
use crate::record::{Metadata, SearchResult, VectorRecord};

/// An in-memory, exact (brute-force) similarity-search store.
///
/// Records are kept in an insertion-ordered map, which makes search
/// tie-breaks deterministic: equal scores rank in insertion order. Records
/// are upserted by key and never deleted; a record's lifetime equals the
/// store's.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use simstore::{MockEmbeddingProvider, VectorStore};
///
/// let mut store = VectorStore::new(Arc::new(MockEmbeddingProvider::new(16)));
/// store.build_from_texts(&texts).await?;
/// let results = store.search_by_text("banana smoothie", 3, None, None).await?;
/// ```
pub struct VectorStore {
    records: IndexMap<String, VectorRecord>,
    metrics: MetricRegistry,
    embedder: Arc<dyn EmbeddingProvider>,
    config: StoreConfig,
    /// Fixed by the first insert when `enforce_dimensions` is on.
    dimensions: Option<usize>,
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("records", &self.records)
            .field("config", &self.config)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

impl VectorStore {
    /// Create a store with the default configuration and the built-in
    /// metric registry.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            records: IndexMap::new(),
            metrics: MetricRegistry::new(),
            embedder,
            config: StoreConfig::default(),
            dimensions: None,
        }
    }

    /// Create a new [`VectorStoreBuilder`].
    pub fn builder() -> VectorStoreBuilder {
        VectorStoreBuilder::default()
    }

    /// Return a reference to the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Return a reference to the metric registry.
    pub fn metrics(&self) -> &MetricRegistry {
        &self.metrics
    }

    /// Return a mutable reference to the metric registry, for runtime
    /// registration of additional metrics.
    pub fn metrics_mut(&mut self) -> &mut MetricRegistry {
        &mut self.metrics
    }

    /// The number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The stored keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// The stored records, in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &VectorRecord> {
        self.records.values()
    }

    /// Look up a record by key.
    pub fn get(&self, key: &str) -> Option<&VectorRecord> {
        self.records.get(key)
    }

    /// Upsert a record.
    ///
    /// The vector is replaced unconditionally. Metadata is replaced only
    /// when `metadata` is non-empty: re-inserting with an empty map keeps
    /// whatever metadata the key already had, so callers can refresh a
    /// vector without re-supplying attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when dimension enforcement is
    /// enabled and `vector` does not match the store's fixed dimension.
    /// With enforcement off (the default) this never fails.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        vector: Vec<f32>,
        metadata: Metadata,
    ) -> Result<()> {
        self.check_insert_dimension(vector.len())?;
        match self.records.entry(key.into()) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.vector = vector;
                if !metadata.is_empty() {
                    record.metadata = metadata;
                }
                debug!(key = %entry.key(), "replaced record");
            }
            Entry::Vacant(entry) => {
                debug!(key = %entry.key(), "inserted record");
                let record = VectorRecord {
                    key: entry.key().clone(),
                    vector,
                    metadata,
                };
                entry.insert(record);
            }
        }
        Ok(())
    }

    /// Insert a [`VectorRecord`], with the same upsert semantics as
    /// [`insert`](VectorStore::insert).
    pub fn insert_record(&mut self, record: VectorRecord) -> Result<()> {
        self.insert(record.key, record.vector, record.metadata)
    }

    /// Look up a vector and its metadata by key.
    ///
    /// An unknown key is never an error: it yields `(None, {})`.
    pub fn retrieve(&self, key: &str) -> (Option<&[f32]>, Metadata) {
        match self.records.get(key) {
            Some(record) => (Some(record.vector.as_slice()), record.metadata.clone()),
            None => (None, Metadata::new()),
        }
    }

    /// All stored metadata, keyed by record key.
    pub fn all_metadata(&self) -> HashMap<String, Metadata> {
        self.records
            .iter()
            .map(|(key, record)| (key.clone(), record.metadata.clone()))
            .collect()
    }

    /// The keys whose metadata satisfies every criterion of `filter`, in
    /// insertion order.
    ///
    /// Pure and side-effect free; runs in time proportional to store size.
    pub fn filter_by_metadata(&self, filter: &MetadataFilter) -> Vec<String> {
        self.records
            .values()
            .filter(|record| filter.matches(&record.metadata))
            .map(|record| record.key.clone())
            .collect()
    }

    /// Exact k-nearest-neighbor search over all stored records.
    ///
    /// Scans every record, drops those failing `filter` (when supplied),
    /// scores the survivors with the named metric (the configured default
    /// when `metric` is `None`), and returns the top `k` by descending
    /// score. Fewer than `k` matches is not an error; an empty store or an
    /// empty filtered set yields an empty vec. Equal scores rank in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMetric`] for an unregistered metric name, or
    /// [`Error::DimensionMismatch`] when dimension enforcement is enabled
    /// and the query dimension does not match the store's.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
        metric: Option<&str>,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>> {
        self.check_query_dimension(query.len())?;
        let name = metric.unwrap_or(&self.config.default_metric);
        let score = self.metrics.resolve(name)?;

        let mut scored: Vec<SearchResult> = self
            .records
            .values()
            .filter(|record| filter.map_or(true, |f| f.matches(&record.metadata)))
            .map(|record| SearchResult {
                key: record.key.clone(),
                score: score(query, &record.vector),
                metadata: record.metadata.clone(),
            })
            .collect();

        // Stable sort: equal scores keep their insertion-order scan positions.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(metric = name, k, returned = scored.len(), "search complete");
        Ok(scored)
    }

    /// Embed `query_text` with the provider (one call) and delegate to
    /// [`search`](VectorStore::search).
    ///
    /// # Errors
    ///
    /// Propagates provider failures as [`Error::Provider`] unchanged, plus
    /// everything [`search`](VectorStore::search) can return.
    pub async fn search_by_text(
        &self,
        query_text: &str,
        k: usize,
        metric: Option<&str>,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>> {
        let query = self.embedder.embed(query_text).await?;
        self.search(&query, k, metric, filter)
    }

    /// Like [`search_by_text`](VectorStore::search_by_text), but projects
    /// the results down to the matched keys.
    pub async fn search_by_text_keys(
        &self,
        query_text: &str,
        k: usize,
        metric: Option<&str>,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<String>> {
        let results = self.search_by_text(query_text, k, metric, filter).await?;
        Ok(results.into_iter().map(|result| result.key).collect())
    }

    /// Populate the store from ordered `(text, metadata)` pairs with exactly
    /// one batched embedding request, inserting each resulting vector under
    /// its source text as key.
    ///
    /// The batch length is validated against the input length before any
    /// insertion happens, so a mismatching provider leaves the store
    /// untouched. Duplicate input texts overwrite under upsert semantics:
    /// the later pair wins. Dropping the returned future before the
    /// provider call resolves inserts nothing.
    ///
    /// Returns the number of pairs ingested.
    ///
    /// # Errors
    ///
    /// - [`Error::Provider`] — the embedding call failed; propagated
    ///   unchanged.
    /// - [`Error::BatchSizeMismatch`] — the provider broke the length/order
    ///   contract; nothing was inserted.
    /// - [`Error::DimensionMismatch`] — under opt-in enforcement; pairs
    ///   before the offending one remain inserted (no rollback).
    pub async fn build_from_pairs(&mut self, pairs: &[(String, Metadata)]) -> Result<usize> {
        if pairs.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = pairs.iter().map(|(text, _)| text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != pairs.len() {
            error!(
                expected = pairs.len(),
                actual = embeddings.len(),
                "embedding provider returned a mismatched batch"
            );
            return Err(Error::BatchSizeMismatch {
                expected: pairs.len(),
                actual: embeddings.len(),
            });
        }

        for ((text, metadata), embedding) in pairs.iter().zip(embeddings) {
            self.insert(text.clone(), embedding, metadata.clone())?;
        }

        info!(count = pairs.len(), "built store from pairs");
        Ok(pairs.len())
    }

    /// Populate the store from bare texts, with empty metadata.
    ///
    /// Same single-batch contract and errors as
    /// [`build_from_pairs`](VectorStore::build_from_pairs).
    pub async fn build_from_texts(&mut self, texts: &[String]) -> Result<usize> {
        let pairs: Vec<(String, Metadata)> =
            texts.iter().map(|text| (text.clone(), Metadata::new())).collect();
        self.build_from_pairs(&pairs).await
    }

    fn check_insert_dimension(&mut self, actual: usize) -> Result<()> {
        if !self.config.enforce_dimensions {
            return Ok(());
        }
        match self.dimensions {
            Some(expected) if expected != actual => {
                Err(Error::DimensionMismatch { expected, actual })
            }
            Some(_) => Ok(()),
            None => {
                self.dimensions = Some(actual);
                Ok(())
            }
        }
    }

    fn check_query_dimension(&self, actual: usize) -> Result<()> {
        if !self.config.enforce_dimensions {
            return Ok(());
        }
        match self.dimensions {
            Some(expected) if expected != actual => {
                Err(Error::DimensionMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for constructing a [`VectorStore`].
///
/// Only the embedding provider is required; configuration and metric
/// registry fall back to their defaults.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use simstore::{MockEmbeddingProvider, StoreConfig, VectorStore};
///
/// let store = VectorStore::builder()
///     .embedding_provider(Arc::new(MockEmbeddingProvider::new(16)))
///     .config(StoreConfig::builder().enforce_dimensions(true).build()?)
///     .build()?;
/// # Ok::<(), simstore::Error>(())
/// ```
#[derive(Default)]
pub struct VectorStoreBuilder {
    config: Option<StoreConfig>,
    metrics: Option<MetricRegistry>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
}

impl VectorStoreBuilder {
    /// Set the store configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the metric registry.
    pub fn metrics(mut self, metrics: MetricRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Build the [`VectorStore`], validating that the configured default
    /// metric resolves in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the embedding provider is missing or
    /// the default metric is not registered.
    pub fn build(self) -> Result<VectorStore> {
        let embedder = self
            .embedding_provider
            .ok_or_else(|| Error::Config("embedding_provider is required".to_string()))?;
        let config = self.config.unwrap_or_default();
        let metrics = self.metrics.unwrap_or_default();

        if !metrics.contains(&config.default_metric) {
            return Err(Error::Config(format!(
                "default metric '{}' is not registered",
                config.default_metric
            )));
        }

        Ok(VectorStore { records: IndexMap::new(), metrics, embedder, config, dimensions: None })
    }
}
