//! Tests for single-batch ingestion and text-based search.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use simstore::{
    EmbeddingProvider, Error, Metadata, MetadataFilter, MockEmbeddingProvider, Result,
    VectorStore,
};

fn meta(pairs: &[(&str, serde_json::Value)]) -> Metadata {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn pair(text: &str, metadata: Metadata) -> (String, Metadata) {
    (text.to_string(), metadata)
}

/// A provider that drops the last embedding from every batch, violating the
/// length/order contract.
struct ShortBatchProvider {
    inner: MockEmbeddingProvider,
}

#[async_trait]
impl EmbeddingProvider for ShortBatchProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.inner.embed(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut batch = self.inner.embed_batch(texts).await?;
        batch.pop();
        Ok(batch)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}

/// A provider that always fails, for propagation tests.
struct FailingProvider;

#[async_trait]
impl EmbeddingProvider for FailingProvider {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(Error::Provider { provider: "Failing".into(), message: "rate limited".into() })
    }

    fn dimensions(&self) -> usize {
        16
    }
}

#[tokio::test]
async fn build_from_pairs_inserts_every_pair() {
    let mut store = VectorStore::new(Arc::new(MockEmbeddingProvider::new(16)));
    let pairs = vec![
        pair("cat food is tasty", meta(&[("category", json!("food"))])),
        pair("I love bananas", meta(&[("category", json!("food"))])),
        pair("rockets launch to orbit", meta(&[("category", json!("space"))])),
    ];

    let count = store.build_from_pairs(&pairs).await.unwrap();
    assert_eq!(count, 3);
    assert_eq!(store.len(), 3);

    let (vector, metadata) = store.retrieve("I love bananas");
    assert!(vector.is_some());
    assert_eq!(metadata, meta(&[("category", json!("food"))]));
}

#[tokio::test]
async fn build_from_pairs_duplicate_text_later_pair_wins() {
    let mut store = VectorStore::new(Arc::new(MockEmbeddingProvider::new(16)));
    let pairs = vec![
        pair("a", Metadata::new()),
        pair("a", meta(&[("x", json!(1))])),
    ];

    store.build_from_pairs(&pairs).await.unwrap();
    assert_eq!(store.len(), 1);

    let (vector, metadata) = store.retrieve("a");
    assert!(vector.is_some());
    assert_eq!(metadata, meta(&[("x", json!(1))]));
}

#[tokio::test]
async fn mismatched_batch_fails_and_inserts_nothing() {
    let provider = ShortBatchProvider { inner: MockEmbeddingProvider::new(16) };
    let mut store = VectorStore::new(Arc::new(provider));
    let pairs = vec![pair("a", Metadata::new()), pair("b", Metadata::new())];

    let err = store.build_from_pairs(&pairs).await.unwrap_err();
    assert!(matches!(err, Error::BatchSizeMismatch { expected: 2, actual: 1 }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn provider_failure_propagates_unchanged() {
    let mut store = VectorStore::new(Arc::new(FailingProvider));
    let pairs = vec![pair("a", Metadata::new())];

    let err = store.build_from_pairs(&pairs).await.unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));

    let err = store.search_by_text("anything", 1, None, None).await.unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));
}

#[tokio::test]
async fn build_from_texts_uses_empty_metadata() {
    let mut store = VectorStore::new(Arc::new(MockEmbeddingProvider::new(16)));
    let texts = vec!["alpha".to_string(), "beta".to_string()];

    let count = store.build_from_texts(&texts).await.unwrap();
    assert_eq!(count, 2);

    let (vector, metadata) = store.retrieve("alpha");
    assert!(vector.is_some());
    assert!(metadata.is_empty());
}

#[tokio::test]
async fn empty_input_skips_the_provider_call() {
    let mut store = VectorStore::new(Arc::new(FailingProvider));
    assert_eq!(store.build_from_pairs(&[]).await.unwrap(), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn filtered_text_search_returns_only_matching_category() {
    let mut store = VectorStore::new(Arc::new(MockEmbeddingProvider::new(16)));
    let pairs = vec![
        pair("cat food is tasty", meta(&[("category", json!("food"))])),
        pair("I love bananas", meta(&[("category", json!("food"))])),
        pair("rockets launch to orbit", meta(&[("category", json!("space"))])),
    ];
    store.build_from_pairs(&pairs).await.unwrap();

    let filter = MetadataFilter::new().equals("category", json!("food"));
    let results = store
        .search_by_text("banana smoothie", 5, Some("cosine"), Some(&filter))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(result.metadata, meta(&[("category", json!("food"))]));
        assert!((-1.0..=1.0).contains(&result.score));
    }
    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[tokio::test]
async fn key_projection_returns_keys_in_rank_order() {
    let mut store = VectorStore::new(Arc::new(MockEmbeddingProvider::new(16)));
    let texts = vec![
        "I love bananas".to_string(),
        "rockets launch to orbit".to_string(),
    ];
    store.build_from_texts(&texts).await.unwrap();

    let keys = store.search_by_text_keys("I love bananas", 1, None, None).await.unwrap();
    assert_eq!(keys, vec!["I love bananas".to_string()]);
}
