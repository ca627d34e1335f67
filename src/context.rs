//! Query settings for one pricing lookup session.

use crate::catalog::index::{fetch_index, DEFAULT_ROOT_URL};
use crate::catalog::{CatalogFetch, IndexDocument, Region};
use crate::error::PricingError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Pricing model a SKU is quoted under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Term {
    #[default]
    OnDemand,
    Reserved,
}

impl Term {
    /// Returns the term name as it appears in offer files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::OnDemand => "OnDemand",
            Term::Reserved => "Reserved",
        }
    }
}

impl FromStr for Term {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ondemand" => Ok(Term::OnDemand),
            "reserved" => Ok(Term::Reserved),
            _ => Err(PricingError::InvalidTerm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Term {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region, service, term and constraints for a query, plus the catalog index.
///
/// The index is fetched once when the context is built and reused for every
/// query made through it. A context is meant for one query session at a
/// time; changing the term or constraints while a scan runs is not supported.
#[derive(Debug, Clone)]
pub struct PricingContext {
    region: Region,
    service: String,
    root_url: String,
    index: IndexDocument,
    sku: Option<String>,
    term: Option<Term>,
    attributes: Option<BTreeMap<String, String>>,
}

impl PricingContext {
    /// Builds a context against the public price list endpoint.
    pub async fn new(
        client: &(impl CatalogFetch + ?Sized),
        region: Region,
        service: impl Into<String>,
    ) -> Result<Self> {
        Self::with_root(client, region, service, DEFAULT_ROOT_URL).await
    }

    /// Builds a context against a custom endpoint, fetching its index.
    pub async fn with_root(
        client: &(impl CatalogFetch + ?Sized),
        region: Region,
        service: impl Into<String>,
        root_url: impl Into<String>,
    ) -> Result<Self> {
        let root_url = root_url.into();
        let index = fetch_index(client, &root_url).await.context("Failed to load catalog index")?;
        debug!("Loaded catalog index with {} offers", index.offers.len());

        Ok(Self::from_index(region, service, root_url, index))
    }

    /// Builds a context around an already fetched index.
    pub fn from_index(
        region: Region,
        service: impl Into<String>,
        root_url: impl Into<String>,
        index: IndexDocument,
    ) -> Self {
        Self {
            region,
            service: service.into(),
            root_url: root_url.into(),
            index,
            sku: None,
            term: None,
            attributes: None,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn index(&self) -> &IndexDocument {
        &self.index
    }

    /// Returns the selected term, `OnDemand` unless set.
    pub fn terms(&self) -> Term {
        self.term.unwrap_or_default()
    }

    /// Selects the term from caller input, case-insensitively.
    pub fn set_terms(&mut self, value: &str) -> Result<(), PricingError> {
        self.term = Some(value.parse()?);
        Ok(())
    }

    pub fn set_term(&mut self, term: Term) {
        self.term = Some(term);
    }

    /// Returns the attribute constraints, if any were added.
    pub fn attributes(&self) -> Option<&BTreeMap<String, String>> {
        self.attributes.as_ref()
    }

    /// Merges attribute constraints into the existing set.
    ///
    /// Later values replace earlier ones for the same key. An empty input
    /// leaves the constraints untouched.
    pub fn add_attribute<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }

        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .extend(values.map(|(k, v)| (k.into(), v.into())));
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    /// Pins the query to one SKU, bypassing region and attribute filtering.
    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.sku = Some(sku.into());
    }

    pub fn clear_sku(&mut self) {
        self.sku = None;
    }
}
