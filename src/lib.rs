//! # simstore
//!
//! An in-memory vector store and similarity-search engine: keyed embedding
//! vectors with structured metadata, exact k-nearest-neighbor search under
//! pluggable distance metrics, and metadata filtering.
//!
//! ## Overview
//!
//! - [`VectorStore`] — insertion-ordered keyed collection with upsert,
//!   lookup, metadata filtering, KNN search, and single-batch ingestion.
//! - [`MetricRegistry`] — named scoring functions (`cosine`, `euclidean`,
//!   `manhattan`, `dot_product`, `chebyshev`), extensible at runtime.
//! - [`EmbeddingProvider`] — async boundary to the embedding backend;
//!   [`OpenAiEmbeddings`](openai::OpenAiEmbeddings) (feature `openai`) and
//!   [`MockEmbeddingProvider`] ship in-crate.
//! - [`MetadataFilter`] — conjunction of scalar-equality and any-of
//!   criteria over record metadata.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use simstore::{MetadataFilter, VectorStore};
//! use simstore::openai::OpenAiEmbeddings;
//! use serde_json::json;
//!
//! let mut store = VectorStore::new(Arc::new(OpenAiEmbeddings::from_env()?));
//! store.build_from_pairs(&pairs).await?;
//!
//! let food = MetadataFilter::new().equals("category", json!("food"));
//! let hits = store.search_by_text("banana smoothie", 5, Some("cosine"), Some(&food)).await?;
//! ```
//!
//! Search is always exact brute force; every metric scores
//! larger-is-more-similar and results come back in descending score order
//! with insertion-order tie-breaks. The store holds no locks of its own —
//! share it across tasks behind `tokio::sync::RwLock` if you need to.

pub mod config;
pub mod embedding;
pub mod error;
pub mod filter;
pub mod metric;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;
pub mod record;
pub mod store;

pub use config::StoreConfig;
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use filter::{FilterValue, MetadataFilter};
pub use metric::MetricRegistry;
pub use mock::MockEmbeddingProvider;
pub use record::{Metadata, SearchResult, VectorRecord};
pub use store::{VectorStore, VectorStoreBuilder};
