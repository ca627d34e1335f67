//! Price list catalog: HTTP access, caching, static schema, and data models.

pub mod cache;
pub mod client;
pub mod index;
pub mod models;
pub mod regions;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::ResponseCache;
pub use client::{CatalogClient, CatalogFetch};
pub use models::{CatalogDetails, IndexDocument, MatchResult, OfferFile, PriceMatches, ProductRecord};
pub use regions::Region;
pub use services::ServiceDescriptor;
