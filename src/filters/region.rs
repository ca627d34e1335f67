//! Region filter driven by the per-service family schema.

use super::Filter;
use crate::catalog::{ProductRecord, Region, ServiceDescriptor};
use tracing::trace;

/// Keeps products whose region attribute names the requested region.
///
/// The attribute to read depends on the product family; families the
/// service schema does not model never match.
pub struct RegionFilter {
    service: &'static ServiceDescriptor,
    region: Region,
}

impl RegionFilter {
    /// Creates a region filter for a service.
    pub fn new(service: &'static ServiceDescriptor, region: Region) -> Self {
        Self { service, region }
    }

    /// Returns the value of the product's region attribute, if modeled.
    pub fn location<'a>(&self, product: &'a ProductRecord) -> Option<&'a str> {
        let family = product.product_family.as_deref()?;
        let Some(key) = self.service.region_attribute(family) else {
            trace!("SKU {}: family {} not modeled for {}", product.sku, family, self.service.key);
            return None;
        };
        product.attribute(key)
    }
}

impl Filter for RegionFilter {
    fn matches(&self, product: &ProductRecord) -> bool {
        self.location(product) == Some(self.region.display_name())
    }

    fn description(&self) -> String {
        format!("Region = {}", self.region.display_name())
    }
}
