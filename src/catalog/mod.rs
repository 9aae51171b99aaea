//! Catalog loading.
//!
//! Defines the `CatalogSource` trait (one-shot async retrieval of the
//! product feed) and the startup policy around it: a load failure is
//! logged once and the carousel simply never starts — no retry, no
//! fallback content.

pub mod http;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

use crate::types::Catalog;

/// Abstraction over where the product feed comes from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Retrieve the full ordered catalog. Called once at startup.
    async fn fetch(&self) -> Result<Catalog>;
}

/// Fetch the catalog once, applying the startup failure policy.
///
/// Returns `None` on any failure; the caller must not start the
/// scheduler in that case. An empty catalog is a successful load.
pub async fn load_catalog(source: &dyn CatalogSource) -> Option<Catalog> {
    match source.fetch().await {
        Ok(catalog) => {
            info!(products = catalog.len(), "Catalog loaded");
            Some(catalog)
        }
        Err(e) => {
            error!(error = %e, "Catalog load failed — carousel will not start");
            None
        }
    }
}
