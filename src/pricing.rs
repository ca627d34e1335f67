//! Catalog details and price queries.

use crate::catalog::index::fetch_offer_file;
use crate::catalog::services::{self, ServiceDescriptor};
use crate::catalog::{CatalogDetails, CatalogFetch, MatchResult, OfferFile, PriceMatches, Region};
use crate::context::{PricingContext, Term};
use crate::error::PricingError;
use crate::filters::FilterChainBuilder;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// Logs and returns the metadata of the context's catalog index.
pub fn get_details(pc: &PricingContext) -> CatalogDetails {
    let details = pc.index().details();

    info!("  Format Version: {}", details.format_version);
    info!("Publication Date: {}", details.publication_date);
    info!("          Offers: {}", details.offers.join(", "));

    details
}

/// Fetches the service's offer file and returns the matching SKUs.
///
/// The service key is checked before the offer file is requested.
pub async fn get_prices(
    client: &(impl CatalogFetch + ?Sized),
    pc: &PricingContext,
) -> Result<PriceMatches> {
    let service = services::check_service(pc.service())?;

    info!("Service Alias: {}", service.offer_code);
    info!("       Region: {}", pc.region());
    info!("Product Terms: {}", pc.terms());

    let offer_file = fetch_offer_file(client, pc.root_url(), pc.index(), service.offer_code)
        .await
        .with_context(|| format!("Failed to load offer file for {}", service.offer_code))?;

    let products = match_products(pc, service, &offer_file)?;

    let rendered = serde_json::to_string_pretty(&products).context("Failed to render products")?;
    info!("       Products:{}", rendered);

    Ok(products)
}

/// Applies the context to an already loaded offer file.
pub fn match_products(
    pc: &PricingContext,
    service: &'static ServiceDescriptor,
    offer_file: &OfferFile,
) -> Result<PriceMatches, PricingError> {
    match pc.sku() {
        Some(sku) => {
            debug!("Getting specific product SKU: {}", sku);
            let matched = lookup_sku(offer_file, pc.terms(), sku)?;
            Ok(PriceMatches::from([(sku.to_string(), matched)]))
        }
        None => Ok(scan(offer_file, service, pc.region(), pc.terms(), pc.attributes())),
    }
}

/// Builds the match for one SKU without any region or attribute checks.
pub fn lookup_sku(offer_file: &OfferFile, term: Term, sku: &str) -> Result<MatchResult, PricingError> {
    let product =
        offer_file.products.get(sku).ok_or_else(|| PricingError::SkuNotFound(sku.to_string()))?;

    let term_record = offer_file.term(term.as_str(), sku).ok_or_else(|| PricingError::TermNotFound {
        term: term.to_string(),
        sku: sku.to_string(),
    })?;

    Ok(MatchResult {
        offer_code: offer_file.offer_code.clone(),
        product: product.clone(),
        term: term_record.clone(),
    })
}

/// Walks every product, keeping those in the region, priced under the
/// term, and carrying every constraint attribute.
pub fn scan(
    offer_file: &OfferFile,
    service: &'static ServiceDescriptor,
    region: Region,
    term: Term,
    attributes: Option<&BTreeMap<String, String>>,
) -> PriceMatches {
    let in_region = FilterChainBuilder::new().region(service, region).build();
    let constraints = FilterChainBuilder::new().attributes(attributes).build();

    if !constraints.is_empty() {
        debug!("Active filters: {}", constraints.descriptions().join(", "));
    }

    let mut matches = PriceMatches::new();

    for (sku, product) in &offer_file.products {
        if !in_region.matches(product) {
            trace!("SKU {} not in region {}", sku, region);
            continue;
        }
        debug!("Found product SKU: {} in region: {}", sku, region);

        let Some(term_record) = offer_file.term(term.as_str(), sku) else {
            debug!("SKU {} filtered vs. Terms: {}", sku, term);
            continue;
        };

        if !constraints.matches(product) {
            debug!("SKU {} filtered vs. attributes", sku);
            continue;
        }

        matches.insert(
            sku.clone(),
            MatchResult {
                offer_code: offer_file.offer_code.clone(),
                product: product.clone(),
                term: term_record.clone(),
            },
        );
    }

    debug!("Matched {} of {} products", matches.len(), offer_file.products.len());
    matches
}
