//! In-memory catalog used by unit tests.

use crate::catalog::client::CatalogFetch;
use crate::catalog::index::index_url;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub const INDEX_FIXTURE: &str = include_str!("../../tests/fixtures/index.json");
pub const S3_FIXTURE: &str = include_str!("../../tests/fixtures/s3_offer.json");
pub const EC2_FIXTURE: &str = include_str!("../../tests/fixtures/ec2_offer.json");

/// Serves canned bodies by URL and records every request.
pub struct MockCatalog {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockCatalog {
    /// A catalog serving nothing.
    pub fn empty() -> Self {
        Self { bodies: HashMap::new(), requests: Mutex::new(Vec::new()) }
    }

    /// A catalog serving the index and the S3 and EC2 offer file fixtures under `root`.
    pub fn new(root: &str) -> Self {
        Self::empty()
            .with_body(&index_url(root), INDEX_FIXTURE)
            .with_body(&format!("{}/offers/v1.0/aws/AmazonS3/current/index.json", root), S3_FIXTURE)
            .with_body(&format!("{}/offers/v1.0/aws/AmazonEC2/current/index.json", root), EC2_FIXTURE)
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogFetch for MockCatalog {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some(body) => Ok(body.clone()),
            None => anyhow::bail!("Request for {} failed with status: 404 Not Found", url),
        }
    }
}
