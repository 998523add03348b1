//! Metadata filter criteria and matching.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Metadata;

/// An expected value for one filter criterion.
///
/// `Scalar` requires exact equality with the record's attribute value;
/// `AnyOf` accepts any attribute value contained in the set.
// AnyOf must precede Scalar: untagged deserialization tries variants in
// order, and JSON arrays are membership sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FilterValue {
    /// The attribute value must be a member of this list.
    AnyOf(Vec<Value>),
    /// The attribute value must equal this value.
    Scalar(Value),
}

impl FilterValue {
    /// Whether an attribute value satisfies this criterion.
    pub fn accepts(&self, actual: &Value) -> bool {
        match self {
            FilterValue::Scalar(expected) => actual == expected,
            FilterValue::AnyOf(expected) => expected.contains(actual),
        }
    }
}

/// A conjunction of criteria over a record's metadata.
///
/// A record matches iff every criterion attribute is present in its metadata
/// and accepted by the corresponding [`FilterValue`]; a missing attribute is
/// always a non-match. An empty filter matches every record.
///
/// # Example
///
/// ```rust
/// use simstore::filter::MetadataFilter;
/// use serde_json::json;
///
/// let filter = MetadataFilter::new()
///     .equals("source", json!("manual.pdf"))
///     .any_of("category", vec![json!("food"), json!("animals")]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MetadataFilter {
    criteria: HashMap<String, FilterValue>,
}

impl MetadataFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-equality criterion.
    pub fn equals(mut self, attribute: impl Into<String>, value: Value) -> Self {
        self.criteria.insert(attribute.into(), FilterValue::Scalar(value));
        self
    }

    /// Add a membership criterion: the attribute must hold one of `values`.
    pub fn any_of(mut self, attribute: impl Into<String>, values: Vec<Value>) -> Self {
        self.criteria.insert(attribute.into(), FilterValue::AnyOf(values));
        self
    }

    /// Add a criterion with an explicit [`FilterValue`].
    pub fn criterion(mut self, attribute: impl Into<String>, value: FilterValue) -> Self {
        self.criteria.insert(attribute.into(), value);
        self
    }

    /// Whether the filter has no criteria.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Whether `metadata` satisfies every criterion.
    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.criteria
            .iter()
            .all(|(attribute, expected)| metadata.get(attribute).is_some_and(|v| expected.accepts(v)))
    }
}
