//! Clock-driven animation engine.
//!
//! Reference `AnimationEngine` built on tokio timers. It does not
//! interpolate frames — that stays with the host display — but it
//! honours every scheduling contract: tween endpoints land on the stage
//! at their deadlines, `play` resolves exactly at the timeline span, and
//! oscillators swing between rest and peak until stopped.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::trace;

use super::{AnimationEngine, OscillatorHandle, OscillatorSpec, Timeline};
use crate::stage::Stage;

pub struct ClockEngine {
    stage: Arc<dyn Stage>,
}

impl ClockEngine {
    pub fn new(stage: Arc<dyn Stage>) -> Self {
        Self { stage }
    }
}

#[async_trait]
impl AnimationEngine for ClockEngine {
    async fn play(&self, timeline: Timeline) {
        let started = Instant::now();

        // Endpoint playback: apply each tween's final value at its end
        // time, in order. The last deadline equals the timeline span, so
        // returning after the loop is exactly "timeline complete".
        let mut events: Vec<_> = timeline
            .tweens()
            .iter()
            .map(|t| (t.at + t.duration, t.card, t.kind.final_update()))
            .collect();
        events.sort_by_key(|(deadline, _, _)| *deadline);

        for (deadline, card, update) in events {
            sleep_until(started + deadline).await;
            trace!(card = ?card, update = ?update, "Tween landed");
            self.stage.update_card(card, update);
        }
    }

    fn oscillate(&self, spec: OscillatorSpec) -> OscillatorHandle {
        let stage = Arc::clone(&self.stage);
        let task = tokio::spawn(async move {
            loop {
                sleep(spec.period).await;
                stage.update_card(spec.card, spec.update_for(spec.peak));
                sleep(spec.period).await;
                stage.update_card(spec.card, spec.update_for(spec.rest()));
            }
        });
        OscillatorHandle::new(task)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
