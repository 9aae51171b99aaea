//! Card renderer.
//!
//! Pure mapping from a `ProductRecord` to a `CardView` — the display
//! model a stage mounts. Formatting rules live here and nowhere else:
//! the price line (struck-through original when discounted) and the THC
//! line (present only when a lab result named exactly "THC" exists).

use rust_decimal::Decimal;

use crate::types::ProductRecord;

/// Lab-test name that surfaces on the card. Exact match, case-sensitive.
const THC_TEST_NAME: &str = "THC";

// ---------------------------------------------------------------------------
// Display model
// ---------------------------------------------------------------------------

/// The price portion of a card.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLine {
    /// Single price, no discount.
    Regular(String),
    /// Original price shown struck-through and de-emphasised,
    /// followed by the discounted price.
    Discounted { original: String, discounted: String },
}

/// A fully formatted product card, ready to mount on a stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: PriceLine,
    /// Formatted THC line (e.g. `"THC: 22%"`), absent when the record
    /// carries no matching lab result.
    pub thc: Option<String>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render one record into a card view. No validation: missing fields
/// come through as empty strings, which is the accepted degraded look.
pub fn render_card(record: &ProductRecord) -> CardView {
    let price = if record.has_discount() {
        PriceLine::Discounted {
            original: format_price(&record.price),
            // has_discount() guarantees presence
            discounted: format_price(&record.discounted_price.unwrap_or_default()),
        }
    } else {
        PriceLine::Regular(format_price(&record.price))
    };

    let thc = record.lab_results.as_ref().and_then(|labs| {
        labs.iter()
            .find(|lab| lab.lab_test == THC_TEST_NAME)
            .map(|lab| format!("THC: {}%", lab.value.normalize()))
    });

    CardView {
        name: record.name.clone(),
        category: record.category.clone(),
        image: record.image.clone(),
        price,
        thc,
    }
}

/// `$N` with no synthetic trailing zeros: `50.00` → `$50`, `49.5` → `$49.5`.
fn format_price(price: &Decimal) -> String {
    format!("${}", price.normalize())
}

impl CardView {
    /// Card markup for stages that speak HTML. Layout classes only;
    /// positioning and animation are applied by the stage and engine.
    pub fn to_html(&self) -> String {
        let price = match &self.price {
            PriceLine::Regular(p) => format!(r#"<span class="price">{p}</span>"#),
            PriceLine::Discounted {
                original,
                discounted,
            } => format!(
                r#"<s class="price-original">{original}</s> <span class="price-discounted">{discounted}</span>"#
            ),
        };

        let thc = self
            .thc
            .as_deref()
            .map(|line| format!(r#"<div class="product-thc">{line}</div>"#))
            .unwrap_or_default();

        format!(
            concat!(
                r#"<div class="product-card">"#,
                r#"<img class="product-image" src="{image}" alt="{name}">"#,
                r#"<div class="product-name">{name}</div>"#,
                r#"<div class="product-category">{category}</div>"#,
                r#"<div class="product-price">{price}</div>"#,
                "{thc}",
                "</div>"
            ),
            image = self.image,
            name = self.name,
            category = self.category,
            price = price,
            thc = thc,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
