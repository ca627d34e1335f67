//! Static per-service schema for the price list.
//!
//! Each service key maps to the provider's offer code and to the attribute
//! that carries the region for every product family we understand. Families
//! missing from a descriptor are not modeled and get skipped during a scan.
//!
//! **Adding a service**: find the offer code in the catalog index, then list
//! each product family with the attribute its location lives under
//! (`location` for most, `fromLocation` for data transfer).

use crate::error::PricingError;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Region-bearing attribute for most product families.
pub const LOCATION: &str = "location";

/// Region-bearing attribute for data transfer, which is priced at the source.
pub const FROM_LOCATION: &str = "fromLocation";

/// Schema for one catalog service.
#[derive(Debug)]
pub struct ServiceDescriptor {
    /// Key callers use to pick the service, e.g. `s3`
    pub key: &'static str,
    /// Offer code in the catalog index, e.g. `AmazonS3`
    pub offer_code: &'static str,
    families: HashMap<&'static str, &'static str>,
}

impl ServiceDescriptor {
    fn new(
        key: &'static str,
        offer_code: &'static str,
        families: &[(&'static str, &'static str)],
    ) -> Self {
        Self { key, offer_code, families: families.iter().copied().collect() }
    }

    /// Returns the attribute holding the region for a product family.
    pub fn region_attribute(&self, product_family: &str) -> Option<&'static str> {
        self.families.get(product_family).copied()
    }

    /// Returns the modeled product families, sorted by name.
    pub fn families(&self) -> Vec<(&'static str, &'static str)> {
        let mut families: Vec<_> = self.families.iter().map(|(f, a)| (*f, *a)).collect();
        families.sort_unstable();
        families
    }
}

static SERVICES: LazyLock<HashMap<&'static str, ServiceDescriptor>> = LazyLock::new(|| {
    [
        ServiceDescriptor::new(
            "ec2",
            "AmazonEC2",
            &[
                ("Data Transfer", FROM_LOCATION),
                ("Compute Instance", LOCATION),
                ("IP Address", LOCATION),
                ("Dedicated Host", LOCATION),
            ],
        ),
        ServiceDescriptor::new(
            "ses",
            "AmazonSES",
            &[("Data Transfer", FROM_LOCATION), ("Sending Email", LOCATION)],
        ),
        ServiceDescriptor::new(
            "ddb",
            "AmazonDynamoDB",
            &[
                ("Data Transfer", FROM_LOCATION),
                ("Database Storage", LOCATION),
                ("Provisioned IOPS", LOCATION),
            ],
        ),
        ServiceDescriptor::new(
            "s3",
            "AmazonS3",
            &[
                ("Data Transfer", FROM_LOCATION),
                ("API Request", LOCATION),
                ("Storage", LOCATION),
                ("Fee", LOCATION),
            ],
        ),
    ]
    .into_iter()
    .map(|d| (d.key, d))
    .collect()
});

/// Looks up a service descriptor by key.
pub fn lookup(key: &str) -> Option<&'static ServiceDescriptor> {
    SERVICES.get(key)
}

/// Looks up a service descriptor, failing with [`PricingError::InvalidService`].
pub fn check_service(key: &str) -> Result<&'static ServiceDescriptor, PricingError> {
    lookup(key).ok_or_else(|| PricingError::InvalidService(key.to_string(), keys().join(", ")))
}

/// Returns all service keys, sorted.
pub fn keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = SERVICES.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Returns all service descriptors, sorted by key.
pub fn all() -> Vec<&'static ServiceDescriptor> {
    keys().into_iter().filter_map(lookup).collect()
}
