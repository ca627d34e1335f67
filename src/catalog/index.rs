//! Resolving offers through the catalog index and fetching offer files.

use crate::catalog::client::CatalogFetch;
use crate::catalog::models::{IndexDocument, OfferFile};
use crate::error::PricingError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Public price list endpoint.
pub const DEFAULT_ROOT_URL: &str = "https://pricing.us-east-1.amazonaws.com";

/// Path of the root index below the endpoint.
pub const INDEX_PATH: &str = "/offers/v1.0/aws/index.json";

/// Builds the absolute URL of the root index.
pub fn index_url(root: &str) -> String {
    format!("{}{}", root.trim_end_matches('/'), INDEX_PATH)
}

/// Resolves an offer code to the absolute URL of its current offer file.
pub fn offer_url(root: &str, index: &IndexDocument, offer_code: &str) -> Result<String, PricingError> {
    index
        .current_version_url(offer_code)
        .map(|relative| format!("{}{}", root.trim_end_matches('/'), relative))
        .ok_or_else(|| PricingError::UnknownOffer(offer_code.to_string()))
}

/// Fetches a URL and parses the body as JSON.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &(impl CatalogFetch + ?Sized),
    url: &str,
) -> Result<T> {
    let body = client.fetch(url).await?;
    serde_json::from_str(&body).with_context(|| format!("Failed to parse JSON from {}", url))
}

/// Fetches and parses the root index document.
pub async fn fetch_index(client: &(impl CatalogFetch + ?Sized), root: &str) -> Result<IndexDocument> {
    let url = index_url(root);
    debug!("Fetching catalog index: {}", url);
    fetch_json(client, &url).await
}

/// Fetches the current offer file for an offer code.
pub async fn fetch_offer_file(
    client: &(impl CatalogFetch + ?Sized),
    root: &str,
    index: &IndexDocument,
    offer_code: &str,
) -> Result<OfferFile> {
    let url = offer_url(root, index, offer_code)?;
    info!("          URL: {}", url);

    let offer: OfferFile = fetch_json(client, &url).await?;
    debug!("Offer file {} has {} products", offer.offer_code, offer.products.len());
    Ok(offer)
}
