//! Integration tests for catalog queries using fixture files.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_offers::catalog::index::index_url;
use aws_offers::catalog::ResponseCache;
use aws_offers::commands::{PriceQuery, PricesCommand};
use aws_offers::config::OutputFormat;
use aws_offers::{
    get_details, get_prices, CatalogClient, CatalogFetch, Config, PricingContext, PricingError,
    Region, Term,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_FIXTURE: &str = include_str!("fixtures/index.json");
const S3_FIXTURE: &str = include_str!("fixtures/s3_offer.json");

const ROOT: &str = "http://pricing.test";
const S3_PATH: &str = "/offers/v1.0/aws/AmazonS3/current/index.json";

/// Serves fixture bodies by URL and records every request.
struct FixtureCatalog {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FixtureCatalog {
    fn new() -> Self {
        let bodies = HashMap::from([
            (index_url(ROOT), INDEX_FIXTURE.to_string()),
            (format!("{}{}", ROOT, S3_PATH), S3_FIXTURE.to_string()),
        ]);
        Self { bodies, requests: Mutex::new(Vec::new()) }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogFetch for FixtureCatalog {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies.get(url).cloned().ok_or_else(|| anyhow!("no fixture for {}", url))
    }
}

async fn context(client: &FixtureCatalog, region: Region, service: &str) -> PricingContext {
    PricingContext::with_root(client, region, service, ROOT).await.unwrap()
}

#[tokio::test]
async fn test_details_from_fixture_index() {
    let client = FixtureCatalog::new();
    let pc = context(&client, Region::UsEast1, "s3").await;

    let details = get_details(&pc);
    assert_eq!(details.format_version, "v1.0");
    assert_eq!(details.publication_date, "2016-03-28T22:51:13Z");
    assert!(details.offers.contains(&"AmazonS3".to_string()));
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn test_region_scan_us_east() {
    let client = FixtureCatalog::new();
    let pc = context(&client, Region::UsEast1, "s3").await;

    let matches = get_prices(&client, &pc).await.unwrap();
    let skus: Vec<&str> = matches.keys().map(String::as_str).collect();
    assert_eq!(skus, vec!["S3API00003", "S3DTX00004", "S3GLC00002", "S3STD00001"]);

    for (sku, matched) in &matches {
        assert_eq!(matched.offer_code, "AmazonS3");
        assert_eq!(&matched.product.sku, sku);
        assert!(!matched.term.is_empty());
    }
}

#[tokio::test]
async fn test_constraints_narrow_scan() {
    let client = FixtureCatalog::new();
    let mut pc = context(&client, Region::UsEast1, "s3").await;
    let all = get_prices(&client, &pc).await.unwrap();

    pc.add_attribute([("volumeType", "Standard")]);
    let narrowed = get_prices(&client, &pc).await.unwrap();

    assert_eq!(narrowed.keys().collect::<Vec<_>>(), vec!["S3STD00001"]);
    assert!(narrowed.keys().all(|sku| all.contains_key(sku)));
    assert!(narrowed.len() < all.len());
}

#[tokio::test]
async fn test_invalid_service_makes_no_offer_request() {
    let client = FixtureCatalog::new();
    let pc = context(&client, Region::UsEast1, "bogus").await;

    let err = get_prices(&client, &pc).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PricingError>(),
        Some(PricingError::InvalidService(service, _)) if service == "bogus"
    ));
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn test_direct_sku() {
    let client = FixtureCatalog::new();
    let mut pc = context(&client, Region::UsWest2, "s3").await;
    pc.add_attribute([("volumeType", "Amazon Glacier")]);
    pc.set_sku("S3STD00005");

    let matches = get_prices(&client, &pc).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches["S3STD00005"].product.attribute("location"), Some("EU (Ireland)"));

    pc.set_sku("ABC123");
    let err = get_prices(&client, &pc).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<PricingError>(),
        Some(&PricingError::SkuNotFound("ABC123".into()))
    );
}

#[tokio::test]
async fn test_reserved_term() {
    let client = FixtureCatalog::new();
    let mut pc = context(&client, Region::UsEast1, "s3").await;
    pc.set_terms("reserved").unwrap();
    assert_eq!(pc.terms(), Term::Reserved);

    let matches = get_prices(&client, &pc).await.unwrap();
    let offer = matches["S3STD00001"].term.values().next().unwrap();
    assert_eq!(offer.term_attributes["LeaseContractLength"], "1yr");
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
async fn test_unpublished_offer() {
    let client = FixtureCatalog::new();
    let mut index: serde_json::Value = serde_json::from_str(INDEX_FIXTURE).unwrap();
    index["offers"].as_object_mut().unwrap().remove("AmazonEC2");

    let pc = PricingContext::from_index(
        Region::UsEast1,
        "ec2",
        ROOT,
        serde_json::from_value(index).unwrap(),
    );

    let err = get_prices(&client, &pc).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<PricingError>(),
        Some(&PricingError::UnknownOffer("AmazonEC2".into()))
    );
    assert_eq!(client.request_count(), 0);
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/offers/v1.0/aws/index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_FIXTURE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_prices_command_over_http() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path(S3_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(S3_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        root_url: server.uri(),
        region: Region::EuWest1,
        format: OutputFormat::Csv,
        cache: false,
        ..Config::default()
    };
    let query = PriceQuery { service: "s3".into(), ..PriceQuery::default() };

    let output = PricesCommand::new(config).execute(&query).await.unwrap();
    let rows: Vec<&str> = output.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("S3DTX00006,"));
    assert!(rows[1].starts_with("S3STD00005,"));
}

#[tokio::test]
async fn test_offer_file_served_from_cache_on_304() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();
    mount_catalog(&server).await;

    Mock::given(method("GET"))
        .and(path(S3_PATH))
        .and(header("If-None-Match", "\"s3-v1\""))
        .respond_with(ResponseTemplate::new(304))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(S3_PATH))
        .respond_with(
            ResponseTemplate::new(200).insert_header("ETag", "\"s3-v1\"").set_body_string(S3_FIXTURE),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = Config { root_url: server.uri(), ..Config::default() };
    let client =
        CatalogClient::with_cache(&config, Some(ResponseCache::new(cache_dir.path()))).unwrap();
    let pc = PricingContext::with_root(&client, Region::UsEast1, "s3", server.uri()).await.unwrap();

    let first = get_prices(&client, &pc).await.unwrap();
    let second = get_prices(&client, &pc).await.unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(first.keys().collect::<Vec<_>>(), second.keys().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_http_error_aborts_query() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path(S3_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = Config { root_url: server.uri(), cache: false, ..Config::default() };
    let client = CatalogClient::new(&config).unwrap();
    let pc = PricingContext::with_root(&client, Region::UsEast1, "s3", server.uri()).await.unwrap();

    let err = get_prices(&client, &pc).await.unwrap_err();
    let chain = format!("{:#}", err);
    assert!(chain.contains("Failed to load offer file for AmazonS3"));
    assert!(chain.contains("503"));
}
