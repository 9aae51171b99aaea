//! Shared types for the VITRINE carousel.
//!
//! These types form the data model used across all modules: the product
//! catalog as loaded from the storefront's static feed, the visual state
//! vocabulary the animation engine writes to the stage, and the single
//! domain error class (catalog load).

use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Product records
// ---------------------------------------------------------------------------

/// One lab-test entry attached to a product (e.g. `{"labTest": "THC", "value": 22}`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    #[serde(default)]
    pub lab_test: String,
    #[serde(default)]
    pub value: Decimal,
}

/// A single product as it appears in the storefront feed.
///
/// Every field is tolerated missing — the feed is loosely shaped and
/// absent display fields render as empty text rather than erroring.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Image reference (URL or asset path), passed through verbatim.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: Decimal,
    /// Sale price. `None` or zero means the product is not discounted.
    #[serde(default)]
    pub discounted_price: Option<Decimal>,
    /// Ordered lab-test results. `None` when the feed omits the field.
    #[serde(default)]
    pub lab_results: Option<Vec<LabResult>>,
}

impl ProductRecord {
    /// Whether a real discount applies (present and strictly positive).
    pub fn has_discount(&self) -> bool {
        self.discounted_price
            .map(|d| d > Decimal::ZERO)
            .unwrap_or(false)
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ${}",
            self.name,
            self.category,
            self.price.normalize()
        )
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The full ordered product list, loaded once at startup and immutable
/// thereafter. Shared into the scheduler behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ProductRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`. Callers pass indices from the batch selector,
    /// which guarantees them in range for a non-empty catalog.
    pub fn record(&self, index: usize) -> &ProductRecord {
        &self.records[index]
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }
}

// ---------------------------------------------------------------------------
// Visual state
// ---------------------------------------------------------------------------

/// Opacity/scale pair written onto a card by fade/scale tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f64,
    pub scale: f64,
}

impl VisualState {
    /// Initial mount state: invisible and shrunk, centered anchor.
    pub const HIDDEN: VisualState = VisualState { opacity: 0.0, scale: 0.5 };

    /// Fully entered state.
    pub const VISIBLE: VisualState = VisualState { opacity: 1.0, scale: 1.0 };

    /// Exit target: faded out and slightly shrunk.
    pub const EXITED: VisualState = VisualState { opacity: 0.0, scale: 0.8 };
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// The carousel's only real failure class: the one-shot catalog load.
/// Everything downstream of a loaded catalog is infallible by design.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    #[error("Catalog fetch failed: {0}")]
    Fetch(String),

    #[error("Catalog response malformed: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
