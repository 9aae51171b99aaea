//! VITRINE — Looping product showcase carousel.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! fetches the product catalog once, and runs the cycle scheduler with
//! graceful shutdown. A failed catalog load is terminal: it is logged
//! and the display never starts.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use vitrine::animation::clock::ClockEngine;
use vitrine::catalog;
use vitrine::catalog::http::HttpCatalogSource;
use vitrine::config::AppConfig;
use vitrine::engine::scheduler::{CycleScheduler, Pacing};
use vitrine::stage::memory::MemoryStage;
use vitrine::stage::Stage;

const BANNER: &str = r#"
 __     _____ _____ ____  ___ _   _ _____
 \ \   / /_ _|_   _|  _ \|_ _| \ | | ____|
  \ \ / / | |  | | | |_) || ||  \| |  _|
   \ V /  | |  | | |  _ < | || |\  | |___
    \_/  |___| |_| |_| \_\___|_| \_|_____|

    Storefront Showcase Carousel
    v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppConfig::load("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        feed = %cfg.catalog.url,
        root = %cfg.display.root,
        path = %cfg.display.path,
        batch_size = cfg.carousel.batch_size,
        cycle_duration_secs = cfg.carousel.cycle_duration_secs,
        stagger_delay_secs = cfg.carousel.stagger_delay_secs,
        "VITRINE starting up"
    );

    // -- Load the catalog (one shot, terminal on failure) ----------------

    let source = HttpCatalogSource::new(&cfg.catalog.url)?;
    let Some(loaded) = catalog::load_catalog(&source).await else {
        // Already logged; the carousel simply never starts.
        return Ok(());
    };
    let catalog = Arc::new(loaded);

    // -- Wire the display and run ----------------------------------------

    let stage: Arc<dyn Stage> = Arc::new(MemoryStage::new(&cfg.display.root));
    let engine = Arc::new(ClockEngine::new(stage.clone()));

    let scheduler = CycleScheduler::new(
        catalog,
        stage,
        engine,
        Pacing::from(&cfg.carousel),
        &cfg.display.path,
    );

    scheduler
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    info!("VITRINE shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vitrine=info"));

    let json_logging = std::env::var("VITRINE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
