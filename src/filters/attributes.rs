//! Attribute constraint filter.

use super::Filter;
use crate::catalog::ProductRecord;
use std::collections::BTreeMap;

/// Keeps products carrying every required attribute with an equal value.
pub struct AttributeFilter {
    required: BTreeMap<String, String>,
}

impl AttributeFilter {
    /// Creates a filter requiring all of the given attributes.
    pub fn new(required: BTreeMap<String, String>) -> Self {
        Self { required }
    }
}

impl Filter for AttributeFilter {
    fn matches(&self, product: &ProductRecord) -> bool {
        self.required.iter().all(|(key, value)| product.attributes.get(key) == Some(value))
    }

    fn description(&self) -> String {
        let pairs: Vec<String> = self.required.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("Attributes: {}", pairs.join(", "))
    }
}
