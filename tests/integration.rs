//! End-to-end carousel behavior against the in-memory stage.
//!
//! Everything runs under the paused tokio clock: the tests advance time
//! explicitly and assert what the stage looks like at each instant —
//! cadence, round-robin coverage, batch disposal, and shutdown drain.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use common::{sample_catalog, step, FailingSource};
use vitrine::animation::clock::ClockEngine;
use vitrine::catalog::load_catalog;
use vitrine::engine::scheduler::{CycleScheduler, Pacing};
use vitrine::stage::memory::MemoryStage;
use vitrine::stage::Stage;
use vitrine::types::VisualState;

/// Spawn a carousel over `products` records with stock pacing.
/// Returns the stage, the shutdown trigger, and the running task.
fn carousel(products: usize) -> (Arc<MemoryStage>, oneshot::Sender<()>, JoinHandle<()>) {
    let stage = Arc::new(MemoryStage::new("carousel-root"));
    let engine = Arc::new(ClockEngine::new(stage.clone() as Arc<dyn Stage>));
    let scheduler = CycleScheduler::new(
        Arc::new(sample_catalog(products)),
        stage.clone(),
        engine,
        Pacing::default(),
        "carousel-path",
    );
    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(scheduler.run(async {
        let _ = rx.await;
    }));
    (stage, tx, task)
}

#[tokio::test(start_paused = true)]
async fn first_tick_mounts_a_hidden_batch() {
    let (stage, _tx, _task) = carousel(6);

    step(Duration::ZERO).await;

    assert_eq!(stage.live_layers(), 1);
    let layer = stage.layer_ids()[0];
    let cards = stage.cards_in(layer);
    assert_eq!(cards.len(), 3);
    for card in cards {
        let state = stage.card_state(card).unwrap();
        assert_eq!(state.visual, VisualState::HIDDEN);
        assert_eq!(state.path_progress, 0.0);
    }
    assert_eq!(stage.mounted_names(), vec!["P0", "P1", "P2"]);
}

#[tokio::test(start_paused = true)]
async fn cycles_start_at_fixed_cadence() {
    let (stage, _tx, _task) = carousel(6);

    step(Duration::ZERO).await;
    assert_eq!(stage.layers_created(), 1);

    // Just before the 10.5s cadence: nothing new.
    step(Duration::from_millis(10_400)).await;
    assert_eq!(stage.layers_created(), 1);

    // Crossing 10.5s: second cycle.
    step(Duration::from_millis(200)).await;
    assert_eq!(stage.layers_created(), 2);

    // Crossing 21s: third cycle — cadence independent of the 18s traversal.
    step(Duration::from_millis(10_500)).await;
    assert_eq!(stage.layers_created(), 3);
}

#[tokio::test(start_paused = true)]
async fn batches_walk_the_catalog_round_robin() {
    let (stage, _tx, _task) = carousel(6);

    step(Duration::ZERO).await;
    assert_eq!(stage.mounted_names(), vec!["P0", "P1", "P2"]);

    step(Duration::from_millis(10_600)).await;
    assert_eq!(
        stage.mounted_names(),
        vec!["P0", "P1", "P2", "P3", "P4", "P5"]
    );

    // Third cycle wraps to the start while the first two are still live.
    step(Duration::from_millis(10_600)).await;
    assert_eq!(
        stage.mounted_names(),
        vec!["P0", "P0", "P1", "P1", "P2", "P2", "P3", "P4", "P5"]
    );
}

#[tokio::test(start_paused = true)]
async fn cards_complete_their_traversal() {
    let (stage, _tx, _task) = carousel(6);

    step(Duration::ZERO).await;
    let first_card = stage.cards_in(stage.layer_ids()[0])[0];

    // Entrance lands at 1.5s.
    step(Duration::from_millis(1_600)).await;
    assert_eq!(
        stage.card_state(first_card).unwrap().visual,
        VisualState::VISIBLE
    );

    // Path and exit land at 18s for the first stagger slot.
    step(Duration::from_millis(16_700)).await;
    let state = stage.card_state(first_card).unwrap();
    assert_eq!(state.path_progress, 1.0);
    assert_eq!(state.visual, VisualState::EXITED);
}

#[tokio::test(start_paused = true)]
async fn batch_is_disposed_exactly_once_after_its_span() {
    let (stage, _tx, _task) = carousel(6);

    step(Duration::ZERO).await;
    let first_layer = stage.layer_ids()[0];

    // Span is (3 - 1) * 3.5 + 18 = 25s. Just before: still live.
    step(Duration::from_millis(24_800)).await;
    assert_eq!(stage.removal_count(first_layer), 0);

    step(Duration::from_millis(400)).await;
    assert_eq!(stage.removal_count(first_layer), 1);

    // Never removed again.
    step(Duration::from_secs(40)).await;
    assert_eq!(stage.removal_count(first_layer), 1);
}

#[tokio::test(start_paused = true)]
async fn live_batches_peak_at_steady_state_overlap() {
    let (stage, _tx, _task) = carousel(6);

    assert_eq!(Pacing::default().steady_state_overlap(), 3);

    // Batches start at 0, 10.5, 21, 31.5s and live 25s each.
    // At t = 32s: batches from 10.5, 21, and 31.5 are all live.
    step(Duration::from_secs(32)).await;
    assert_eq!(stage.live_layers(), 3);

    // The overlap never exceeds the steady-state peak.
    for _ in 0..20 {
        step(Duration::from_secs(3)).await;
        assert!(stage.live_layers() <= 3);
    }
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_new_cycles_and_drains_in_flight() {
    let (stage, tx, task) = carousel(6);

    step(Duration::from_millis(21_100)).await;
    assert_eq!(stage.layers_created(), 3);

    tx.send(()).unwrap();
    // Drain: in-flight batches finish their spans, then the run ends.
    task.await.unwrap();

    assert_eq!(stage.layers_created(), 3);
    assert_eq!(stage.live_layers(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_catalog_load_never_touches_the_stage() {
    let stage = Arc::new(MemoryStage::new("carousel-root"));

    let catalog = load_catalog(&FailingSource).await;
    assert!(catalog.is_none());

    // Policy: without a catalog, no scheduler is ever constructed.
    step(Duration::from_secs(60)).await;
    assert_eq!(stage.layers_created(), 0);
    assert_eq!(stage.live_layers(), 0);
}
