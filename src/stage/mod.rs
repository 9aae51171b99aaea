//! Display surface abstraction.
//!
//! Defines the `Stage` trait the carousel drives. A stage owns the
//! display root: it creates an isolated layer per batch, mounts rendered
//! cards into layers, applies visual updates written by the animation
//! engine, and removes whole layers at batch disposal.
//!
//! Layers never intercept pointer input — they are pure overlay chrome.

pub mod memory;

use uuid::Uuid;

use crate::render::CardView;
use crate::types::VisualState;

/// Handle to a batch's isolated visual subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a single mounted card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

/// One visual property write, as produced by tweens and oscillators.
#[derive(Debug, Clone, PartialEq)]
pub enum CardUpdate {
    /// Fade/scale tween endpoint.
    Visual(VisualState),
    /// Parametric position along the motion path, 0.0–1.0.
    PathProgress(f64),
    /// Wobble oscillator: rotation in degrees around the card center.
    RotationDeg(f64),
    /// Breathe oscillator: multiplicative scale factor around 1.0.
    BreatheScale(f64),
}

/// Abstraction over the concrete display surface.
///
/// Implementations synchronize internally; the carousel shares one stage
/// across batch tasks behind an `Arc`. All operations are infallible by
/// design — there is no error path below the catalog load.
pub trait Stage: Send + Sync {
    /// Create an isolated, non-interactive layer for one batch.
    fn create_layer(&self) -> LayerId;

    /// Mount a rendered card into a layer in its initial visual state.
    fn mount_card(&self, layer: LayerId, view: CardView, initial: VisualState) -> CardId;

    /// Apply a visual property write to a mounted card.
    /// Writes to cards of an already-removed layer are dropped silently.
    fn update_card(&self, card: CardId, update: CardUpdate);

    /// Remove a layer and every card in it. Sole cleanup entry point.
    fn remove_layer(&self, layer: LayerId);
}
