//! Shared fixtures for integration tests.
//!
//! Deterministic catalog builder plus a paused-clock stepping helper —
//! all carousel behavior is observed through the in-memory stage.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use vitrine::catalog::CatalogSource;
use vitrine::types::{Catalog, ProductRecord};

/// Catalog of `n` products named `P0..P{n-1}`. Every third product is
/// discounted and `P0` carries a THC lab result, so renderer branches
/// are exercised end to end.
pub fn sample_catalog(n: usize) -> Catalog {
    let records: Vec<ProductRecord> = (0..n)
        .map(|i| {
            let discount = if i % 3 == 0 {
                format!(r#", "discountedPrice": {}"#, 5 + i)
            } else {
                String::new()
            };
            let labs = if i == 0 {
                r#", "labResults": [{"labTest": "THC", "value": 22}]"#
            } else {
                ""
            };
            serde_json::from_str(&format!(
                r#"{{"name": "P{i}", "category": "Flower", "image": "img/p{i}.png", "price": {}{discount}{labs}}}"#,
                10 + i
            ))
            .unwrap()
        })
        .collect();
    Catalog::new(records)
}

/// A catalog source that always fails, for the terminal-failure path.
pub struct FailingSource;

#[async_trait]
impl CatalogSource for FailingSource {
    async fn fetch(&self) -> Result<Catalog> {
        Err(anyhow!("connection refused"))
    }
}

/// Advance the paused tokio clock and let woken tasks run.
pub async fn step(duration: Duration) {
    // Let freshly spawned tasks reach their first await before the
    // clock moves.
    tokio::task::yield_now().await;
    tokio::time::advance(duration).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}
