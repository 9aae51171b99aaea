//! Per-card idle oscillators.
//!
//! Each card carries two independent, indefinitely looping, reversing
//! oscillations on top of the batch timeline: a small rotation wobble
//! and a scale breathe. Periods are randomized per card within a fixed
//! range so the batch never moves in lockstep. Unlike the timeline,
//! oscillators have no natural end — the batch stops them at disposal.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

use crate::stage::{CardId, CardUpdate};

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

/// Peak wobble rotation, degrees.
pub const WOBBLE_DEGREES: f64 = 4.0;

/// Wobble leg duration range, seconds (one direction of the yoyo).
pub const WOBBLE_PERIOD_SECS: RangeInclusive<f64> = 2.0..=4.0;

/// Peak breathe growth above normal scale.
pub const BREATHE_FACTOR: f64 = 0.04;

/// Breathe leg duration range, seconds.
pub const BREATHE_PERIOD_SECS: RangeInclusive<f64> = 2.5..=5.0;

// ---------------------------------------------------------------------------
// Spec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorKind {
    Wobble,
    Breathe,
}

/// One looping, reversing oscillation on a single card.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorSpec {
    pub card: CardId,
    pub kind: OscillatorKind,
    /// Value at the far end of each swing.
    pub peak: f64,
    /// Duration of one leg (rest → peak, or peak → rest).
    pub period: Duration,
}

impl OscillatorSpec {
    /// Rotation wobble with a randomized period.
    pub fn wobble(card: CardId) -> Self {
        Self {
            card,
            kind: OscillatorKind::Wobble,
            peak: WOBBLE_DEGREES,
            period: random_period(WOBBLE_PERIOD_SECS),
        }
    }

    /// Scale breathe with a randomized period.
    pub fn breathe(card: CardId) -> Self {
        Self {
            card,
            kind: OscillatorKind::Breathe,
            peak: 1.0 + BREATHE_FACTOR,
            period: random_period(BREATHE_PERIOD_SECS),
        }
    }

    /// Resting value the yoyo returns to.
    pub fn rest(&self) -> f64 {
        match self.kind {
            OscillatorKind::Wobble => 0.0,
            OscillatorKind::Breathe => 1.0,
        }
    }

    /// Stage write for a given oscillator value.
    pub fn update_for(&self, value: f64) -> CardUpdate {
        match self.kind {
            OscillatorKind::Wobble => CardUpdate::RotationDeg(value),
            OscillatorKind::Breathe => CardUpdate::BreatheScale(value),
        }
    }
}

fn random_period(range: RangeInclusive<f64>) -> Duration {
    Duration::from_secs_f64(rand::thread_rng().gen_range(range))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
