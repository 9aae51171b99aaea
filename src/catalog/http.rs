//! HTTP catalog source.
//!
//! Fetches the storefront's static product feed — a JSON document of
//! the shape `{"products": [...]}` — exactly once at startup.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::CatalogSource;
use crate::types::{Catalog, CarouselError, ProductRecord};

/// Feed fetch timeout. The load is one-shot, so generous but bounded.
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Wire shape of the feed document.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    products: Vec<ProductRecord>,
}

pub struct HttpCatalogSource {
    http: Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Catalog> {
        debug!(url = %self.url, "Fetching product feed");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CarouselError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CarouselError::Fetch(format!("HTTP {status} from {}", self.url)).into());
        }

        let feed: FeedDocument = response
            .json()
            .await
            .map_err(|e| CarouselError::Decode(e.to_string()))?;

        Ok(Catalog::new(feed.products))
    }
}
