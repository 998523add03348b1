//! Known-value tests for the built-in metrics and the registry.

use simstore::Error;
use simstore::metric::{
    MetricRegistry, chebyshev_distance, cosine_similarity, dot_product, euclidean_distance,
    manhattan_distance,
};

#[test]
fn cosine_known_values() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), -1.0);
}

#[test]
fn cosine_zero_norm_yields_zero_not_nan() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
}

#[test]
fn distances_are_negated_so_closer_scores_higher() {
    // 3-4-5 triangle: L2 = 5, L1 = 7, L∞ = 4.
    assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), -5.0);
    assert_eq!(manhattan_distance(&[0.0, 0.0], &[3.0, 4.0]), -7.0);
    assert_eq!(chebyshev_distance(&[0.0, 0.0], &[3.0, 4.0]), -4.0);

    // Identical vectors are the most similar under all three.
    assert_eq!(euclidean_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    assert_eq!(manhattan_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    assert_eq!(chebyshev_distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
}

#[test]
fn dot_product_is_raw_inner_product() {
    assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    assert_eq!(dot_product(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
}

#[test]
fn registry_resolves_all_builtins() {
    let registry = MetricRegistry::new();
    assert_eq!(
        registry.names(),
        vec!["chebyshev", "cosine", "dot_product", "euclidean", "manhattan"]
    );
    for name in registry.names() {
        assert!(registry.resolve(name).is_ok());
    }
}

#[test]
fn registry_rejects_unknown_names() {
    let registry = MetricRegistry::new();
    let err = registry.resolve("hamming").unwrap_err();
    assert!(matches!(err, Error::UnknownMetric { name } if name == "hamming"));
}

#[test]
fn registry_supports_runtime_registration() {
    let mut registry = MetricRegistry::empty();
    assert!(!registry.contains("cosine"));

    registry.register("cosine", cosine_similarity);
    let metric = registry.resolve("cosine").unwrap();
    assert_eq!(metric(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
}
