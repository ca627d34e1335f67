//! Data models for the catalog index, offer files, and match results.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Root index document listing every published offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    #[serde(default)]
    pub format_version: String,
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub publication_date: String,
    /// Offer code -> offer entry
    #[serde(default)]
    pub offers: BTreeMap<String, OfferEntry>,
}

impl IndexDocument {
    /// Returns the relative URL of the current offer file for an offer code.
    pub fn current_version_url(&self, offer_code: &str) -> Option<&str> {
        self.offers.get(offer_code).map(|o| o.current_version_url.as_str())
    }

    /// Returns the published offer codes, sorted.
    pub fn offer_codes(&self) -> Vec<&str> {
        self.offers.keys().map(String::as_str).collect()
    }

    /// Summarizes the index for display.
    pub fn details(&self) -> CatalogDetails {
        CatalogDetails {
            format_version: self.format_version.clone(),
            publication_date: self.publication_date.clone(),
            offers: self.offers.keys().cloned().collect(),
        }
    }
}

/// One offer in the root index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferEntry {
    #[serde(default)]
    pub offer_code: String,
    #[serde(default)]
    pub version_index_url: String,
    pub current_version_url: String,
}

/// Per-service offer file with products and their terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferFile {
    #[serde(default)]
    pub format_version: String,
    pub offer_code: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub publication_date: String,
    /// SKU -> product
    #[serde(default)]
    pub products: HashMap<String, ProductRecord>,
    /// Term name (`OnDemand`, `Reserved`) -> SKU -> term record
    #[serde(default)]
    pub terms: HashMap<String, HashMap<String, TermRecord>>,
}

impl OfferFile {
    /// Returns the term record for a SKU under the given term, if priced.
    pub fn term(&self, term: &str, sku: &str) -> Option<&TermRecord> {
        self.terms.get(term).and_then(|skus| skus.get(sku))
    }
}

/// A priceable product configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_family: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ProductRecord {
    /// Returns an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Offer term code -> term offer for one SKU.
pub type TermRecord = BTreeMap<String, TermOffer>;

/// Pricing for a SKU under one offer term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermOffer {
    #[serde(default)]
    pub offer_term_code: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub effective_date: String,
    #[serde(default)]
    pub price_dimensions: BTreeMap<String, PriceDimension>,
    #[serde(default)]
    pub term_attributes: BTreeMap<String, String>,
}

/// A single rate within a term offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDimension {
    #[serde(default)]
    pub rate_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_range: Option<String>,
    #[serde(default)]
    pub unit: String,
    /// Currency code -> decimal string
    #[serde(default)]
    pub price_per_unit: BTreeMap<String, String>,
    #[serde(default)]
    pub applies_to: Vec<String>,
}

/// A product that matched a query, with its term pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub offer_code: String,
    pub product: ProductRecord,
    pub term: TermRecord,
}

impl MatchResult {
    /// Returns the first price dimension, ordered by term and rate code.
    pub fn first_dimension(&self) -> Option<&PriceDimension> {
        self.term.values().flat_map(|offer| offer.price_dimensions.values()).next()
    }
}

/// SKU -> match, key-sorted so rendered output is stable.
pub type PriceMatches = BTreeMap<String, MatchResult>;

/// Summary of the catalog index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDetails {
    pub format_version: String,
    pub publication_date: String,
    pub offers: Vec<String>,
}
