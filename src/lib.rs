//! aws-offers - Query the AWS price list catalog from the command line
//!
//! Resolves a service's current offer file through the catalog index and
//! narrows its products down by region and attribute constraints.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod filters;
pub mod format;
pub mod pricing;

pub use catalog::{CatalogClient, CatalogFetch, MatchResult, PriceMatches, Region};
pub use config::Config;
pub use context::{PricingContext, Term};
pub use error::PricingError;
pub use pricing::{get_details, get_prices};
