//! Product filtering with composable filters.

pub mod attributes;
pub mod region;

use crate::catalog::{ProductRecord, Region, ServiceDescriptor};
use std::collections::BTreeMap;

pub use attributes::AttributeFilter;
pub use region::RegionFilter;

/// Trait for filtering catalog products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &ProductRecord) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &ProductRecord) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the scan-mode filter chain.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds the region filter for a service.
    pub fn region(mut self, service: &'static ServiceDescriptor, region: Region) -> Self {
        self.chain.add(RegionFilter::new(service, region));
        self
    }

    /// Adds an attribute constraint filter. Unset or empty constraints add nothing.
    pub fn attributes(mut self, required: Option<&BTreeMap<String, String>>) -> Self {
        if let Some(required) = required.filter(|r| !r.is_empty()) {
            self.chain.add(AttributeFilter::new(required.clone()));
        }
        self
    }

    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
