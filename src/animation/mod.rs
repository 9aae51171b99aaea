//! Animation engine seam.
//!
//! Defines the `AnimationEngine` trait the scheduler drives, the
//! timeline/tween model, and the per-card oscillator specs. Property
//! interpolation is the host engine's business; this crate only cares
//! about when tweens start, when they land, and when a timeline is done.

pub mod clock;
pub mod oscillator;
pub mod timeline;

use async_trait::async_trait;
use tokio::task::JoinHandle;

pub use oscillator::{OscillatorKind, OscillatorSpec};
pub use timeline::{build_batch_timeline, Ease, Timeline, Tween, TweenKind};

/// Handle to a running oscillator. Dropping the handle does not stop the
/// oscillation; the owning batch calls [`OscillatorHandle::stop`] at
/// disposal so no animation outlives its card.
#[derive(Debug)]
pub struct OscillatorHandle {
    task: JoinHandle<()>,
}

impl OscillatorHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stop the oscillation immediately.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Abstraction over the host animation engine.
///
/// Implementations interpolate visual properties over time and write
/// them to the stage. Both operations are infallible: a timeline always
/// completes after its span, an oscillator runs until stopped.
#[async_trait]
pub trait AnimationEngine: Send + Sync {
    /// Play a batch timeline to completion. Resolves once every tween
    /// has finished (after [`Timeline::span`]).
    async fn play(&self, timeline: Timeline);

    /// Start an indefinitely looping, reversing oscillation.
    fn oscillate(&self, spec: OscillatorSpec) -> OscillatorHandle;
}
