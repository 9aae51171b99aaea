//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every field has a default matching the stock storefront carousel, so
//! a missing config file is not an error — the display runs as shipped.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub display: DisplayConfig,
    pub carousel: CarouselConfig,
}

/// Where the product feed lives.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    /// Static JSON resource with the `{"products": [...]}` shape.
    pub url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/products.json".to_string(),
        }
    }
}

/// Named display elements the host page provides.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    /// Container element under which batch layers are inserted.
    pub root: String,
    /// Path element cards travel along.
    pub path: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            root: "carousel-root".to_string(),
            path: "carousel-path".to_string(),
        }
    }
}

/// Carousel pacing. Defaults are the stock storefront values.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CarouselConfig {
    /// Cards spawned per cycle.
    pub batch_size: usize,
    /// Seconds a card takes to traverse the full path.
    pub cycle_duration_secs: f64,
    /// Seconds between successive cards' animation start within a batch.
    pub stagger_delay_secs: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            cycle_duration_secs: 18.0,
            stagger_delay_secs: 3.5,
        }
    }
}

impl CarouselConfig {
    pub fn cycle_duration(&self) -> Duration {
        Duration::from_secs_f64(self.cycle_duration_secs)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_secs_f64(self.stagger_delay_secs)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    /// A missing file yields the default configuration.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}
