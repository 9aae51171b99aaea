//! Cycle scheduler.
//!
//! Drives the unbounded batch sequence: a repeating interval at the
//! batch cadence (`batch_size * stagger`, independent of the traversal
//! duration) selects the next round-robin window, renders and mounts its
//! cards on a fresh layer, plays the batch timeline, and disposes the
//! layer when the timeline completes. The scheduler owns the cycle
//! index; stopping the loop is expressed by the shutdown future, after
//! which in-flight batches drain naturally.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::animation::{build_batch_timeline, AnimationEngine, OscillatorSpec};
use crate::config::CarouselConfig;
use crate::engine::selector::select_batch;
use crate::render::render_card;
use crate::stage::Stage;
use crate::types::{Catalog, VisualState};

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

/// The three carousel pacing knobs, resolved to durations.
#[derive(Debug, Clone)]
pub struct Pacing {
    pub batch_size: usize,
    pub cycle_duration: Duration,
    pub stagger: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from(&CarouselConfig::default())
    }
}

impl From<&CarouselConfig> for Pacing {
    fn from(cfg: &CarouselConfig) -> Self {
        Self {
            batch_size: cfg.batch_size,
            cycle_duration: cfg.cycle_duration(),
            stagger: cfg.stagger(),
        }
    }
}

impl Pacing {
    /// Time between successive cycle starts. Fixed, drift-free, and
    /// independent of the traversal duration.
    pub fn cadence(&self) -> Duration {
        // A zero-card batch still needs a non-zero tick period.
        self.stagger * self.batch_size.max(1) as u32
    }

    /// Lifetime of a batch of `cards` cards: last stagger offset plus
    /// the full traversal.
    pub fn batch_span(&self, cards: usize) -> Duration {
        match cards {
            0 => Duration::ZERO,
            n => self.stagger * (n - 1) as u32 + self.cycle_duration,
        }
    }

    /// Peak number of batches alive at once at steady state.
    pub fn steady_state_overlap(&self) -> usize {
        let span = self.batch_span(self.batch_size).as_secs_f64();
        let cadence = self.cadence().as_secs_f64();
        (span / cadence).ceil() as usize
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

pub struct CycleScheduler {
    catalog: Arc<Catalog>,
    stage: Arc<dyn Stage>,
    engine: Arc<dyn AnimationEngine>,
    pacing: Pacing,
    /// Named path element cards travel along.
    path_element: String,
    /// Monotonic, starts at 0, never resets.
    cycle_index: u64,
    in_flight: Vec<JoinHandle<()>>,
}

impl CycleScheduler {
    pub fn new(
        catalog: Arc<Catalog>,
        stage: Arc<dyn Stage>,
        engine: Arc<dyn AnimationEngine>,
        pacing: Pacing,
        path_element: &str,
    ) -> Self {
        Self {
            catalog,
            stage,
            engine,
            pacing,
            path_element: path_element.to_string(),
            cycle_index: 0,
            in_flight: Vec::new(),
        }
    }

    pub fn cycle_index(&self) -> u64 {
        self.cycle_index
    }

    /// Run until `shutdown` resolves, then drain in-flight batches.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        let cadence = self.pacing.cadence();
        info!(
            products = self.catalog.len(),
            batch_size = self.pacing.batch_size,
            cadence_secs = cadence.as_secs_f64(),
            steady_state_batches = self.pacing.steady_state_overlap(),
            "Carousel running"
        );

        let mut interval = tokio::time::interval(cadence);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.in_flight.retain(|h| !h.is_finished());
                    self.spawn_cycle();
                }
                _ = &mut shutdown => {
                    info!(cycles = self.cycle_index, "Shutdown — no further cycles");
                    break;
                }
            }
        }

        let draining: Vec<_> = self.in_flight.drain(..).collect();
        if !draining.is_empty() {
            info!(batches = draining.len(), "Draining in-flight batches");
        }
        let _ = join_all(draining).await;
    }

    /// One cycle tick: select, render, mount, animate, and arrange
    /// disposal. Infallible by design — any failure is upstream at
    /// catalog load.
    fn spawn_cycle(&mut self) {
        let cycle = self.cycle_index;
        self.cycle_index += 1;

        let indices = select_batch(self.catalog.len(), self.pacing.batch_size, cycle);
        if indices.is_empty() {
            debug!(cycle, "Empty catalog, nothing to spawn");
            return;
        }

        let layer = self.stage.create_layer();
        let mut cards = Vec::with_capacity(indices.len());
        for &idx in &indices {
            let view = render_card(self.catalog.record(idx));
            cards.push(self.stage.mount_card(layer, view, VisualState::HIDDEN));
        }

        let timeline = build_batch_timeline(
            &cards,
            &self.path_element,
            self.pacing.cycle_duration,
            self.pacing.stagger,
        );
        let span = timeline.span();
        info!(
            cycle,
            cards = cards.len(),
            span_secs = span.as_secs_f64(),
            "Batch spawned"
        );

        // Idle oscillators are owned by the batch so disposal stops them
        // along with everything else on the layer.
        let oscillators: Vec<_> = cards
            .iter()
            .flat_map(|&card| {
                [
                    self.engine.oscillate(OscillatorSpec::wobble(card)),
                    self.engine.oscillate(OscillatorSpec::breathe(card)),
                ]
            })
            .collect();

        let stage = Arc::clone(&self.stage);
        let engine = Arc::clone(&self.engine);
        let handle = tokio::spawn(async move {
            engine.play(timeline).await;
            for osc in oscillators {
                osc.stop();
            }
            stage.remove_layer(layer);
            debug!(cycle, "Batch disposed");
        });
        self.in_flight.push(handle);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::clock::ClockEngine;
    use crate::stage::memory::MemoryStage;

    #[test]
    fn test_cadence_is_batch_size_times_stagger() {
        let pacing = Pacing::default();
        assert_eq!(pacing.cadence(), Duration::from_millis(10_500));
    }

    #[test]
    fn test_cadence_ignores_cycle_duration() {
        let mut pacing = Pacing::default();
        pacing.cycle_duration = Duration::from_secs(90);
        assert_eq!(pacing.cadence(), Duration::from_millis(10_500));
    }

    #[test]
    fn test_batch_span() {
        let pacing = Pacing::default();
        // (3 - 1) * 3.5 + 18 = 25s
        assert_eq!(pacing.batch_span(3), Duration::from_secs(25));
        assert_eq!(pacing.batch_span(1), Duration::from_secs(18));
        assert_eq!(pacing.batch_span(0), Duration::ZERO);
    }

    #[test]
    fn test_steady_state_overlap_defaults_to_three() {
        // span 25s over cadence 10.5s
        assert_eq!(Pacing::default().steady_state_overlap(), 3);
    }

    #[test]
    fn test_pacing_from_config() {
        let cfg = CarouselConfig {
            batch_size: 4,
            cycle_duration_secs: 12.0,
            stagger_delay_secs: 2.0,
        };
        let pacing = Pacing::from(&cfg);
        assert_eq!(pacing.batch_size, 4);
        assert_eq!(pacing.cadence(), Duration::from_secs(8));
        assert_eq!(pacing.batch_span(4), Duration::from_secs(18));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_catalog_spawns_nothing() {
        let stage = Arc::new(MemoryStage::new("root"));
        let engine = Arc::new(ClockEngine::new(stage.clone() as Arc<dyn Stage>));
        let scheduler = CycleScheduler::new(
            Arc::new(Catalog::default()),
            stage.clone(),
            engine,
            Pacing::default(),
            "p",
        );

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(scheduler.run(async {
            let _ = rx.await;
        }));

        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;

        assert_eq!(stage.layers_created(), 0);
        let _ = tx.send(());
        let _ = task.await;
    }
}
