//! Domain errors raised by catalog lookups and pricing queries.

use thiserror::Error;

/// Errors with a meaning callers may want to match on.
///
/// Transport and parse failures are not listed here; they travel as
/// `anyhow::Error` with context attached at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid service: {0}. Valid services: {1}")]
    InvalidService(String, String),

    #[error("Invalid term: '{0}'. Valid terms: OnDemand, Reserved")]
    InvalidTerm(String),

    #[error("Offer code {0} is not published in the catalog index")]
    UnknownOffer(String),

    #[error("SKU {0} not found in offer file")]
    SkuNotFound(String),

    #[error("SKU {sku} has no {term} pricing")]
    TermNotFound { term: String, sku: String },
}
