//! Embedding provider trait for turning text into vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates embedding vectors from text.
///
/// Implementations wrap a concrete embedding backend behind a unified async
/// interface. The default [`embed_batch`](EmbeddingProvider::embed_batch)
/// calls [`embed`](EmbeddingProvider::embed) once per input; backends with a
/// native batch endpoint should override it so bulk ingestion costs one
/// round-trip.
///
/// Batch contract: the returned vectors must correspond to the input texts
/// pairwise, same length and same order. The store validates the length and
/// fails ingestion with
/// [`Error::BatchSizeMismatch`](crate::error::Error::BatchSizeMismatch) when
/// a provider violates it.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The dimensionality of vectors this provider produces.
    fn dimensions(&self) -> usize;
}
