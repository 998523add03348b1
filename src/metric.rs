//! Distance metrics and the metric registry.
//!
//! Every metric maps two vectors to a score where **larger means more
//! similar**; true distances (euclidean, manhattan, chebyshev) are negated so
//! all rankings sort descending. Metrics are selected by name through a
//! [`MetricRegistry`], which callers may extend at runtime without touching
//! the store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// The metric used when a search does not name one.
pub const DEFAULT_METRIC: &str = "cosine";

/// A pure scoring function over two vectors.
///
/// Dereferences to its inner closure, so it can be called directly:
/// `metric(&a, &b)`.
#[derive(Clone)]
pub struct MetricFn(Arc<dyn Fn(&[f32], &[f32]) -> f32 + Send + Sync>);

impl std::ops::Deref for MetricFn {
    type Target = dyn Fn(&[f32], &[f32]) -> f32 + Send + Sync;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl std::fmt::Debug for MetricFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MetricFn")
    }
}

/// Cosine similarity: dot product over the product of L2 norms, in [-1, 1].
///
/// Returns 0.0 if either vector has zero magnitude; zero-norm vectors never
/// produce NaN scores.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Negated euclidean (L2) distance between two vectors.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    -a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt()
}

/// Negated manhattan (L1) distance between two vectors.
pub fn manhattan_distance(a: &[f32], b: &[f32]) -> f32 {
    -a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum::<f32>()
}

/// Raw dot product, unnormalized.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Negated chebyshev (L∞) distance: the largest per-component difference.
pub fn chebyshev_distance(a: &[f32], b: &[f32]) -> f32 {
    -a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0f32, f32::max)
}

/// A registry of named scoring functions.
///
/// Owned by (or injected into) a [`VectorStore`](crate::store::VectorStore);
/// there is no process-wide metric table. [`MetricRegistry::new`] registers
/// the five built-in metrics; additional metrics can be registered at any
/// time.
///
/// # Example
///
/// ```rust
/// use simstore::metric::MetricRegistry;
///
/// let mut registry = MetricRegistry::new();
/// registry.register("inverted_l2", |a, b| {
///     1.0 / (1.0 + a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt())
/// });
/// let metric = registry.resolve("inverted_l2").unwrap();
/// assert_eq!(metric(&[1.0], &[1.0]), 1.0);
/// ```
#[derive(Clone)]
pub struct MetricRegistry {
    metrics: HashMap<String, MetricFn>,
}

impl MetricRegistry {
    /// Create a registry with the built-in metrics registered:
    /// `cosine`, `euclidean`, `manhattan`, `dot_product`, `chebyshev`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("cosine", cosine_similarity);
        registry.register("euclidean", euclidean_distance);
        registry.register("manhattan", manhattan_distance);
        registry.register("dot_product", dot_product);
        registry.register("chebyshev", chebyshev_distance);
        registry
    }

    /// Create a registry with no metrics registered.
    pub fn empty() -> Self {
        Self { metrics: HashMap::new() }
    }

    /// Register a metric under a name, replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, metric: F)
    where
        F: Fn(&[f32], &[f32]) -> f32 + Send + Sync + 'static,
    {
        self.metrics.insert(name.into(), MetricFn(Arc::new(metric)));
    }

    /// Look up a metric by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMetric`] if no metric is registered under
    /// `name`.
    pub fn resolve(&self, name: &str) -> Result<MetricFn> {
        self.metrics
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMetric { name: name.to_string() })
    }

    /// Whether a metric is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// The names of all registered metrics, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.metrics.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricRegistry").field("metrics", &self.names()).finish()
    }
}
