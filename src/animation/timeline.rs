//! Batch timeline construction.
//!
//! A timeline is the scoped set of time-offset tweens animating one
//! batch from entry to exit. Layout is pure arithmetic over the carousel
//! pacing: card `i` starts at `i * stagger`, travels the path for the
//! full cycle duration, fades in quickly, and fades out over the final
//! stretch of its traversal.

use std::time::Duration;

use crate::stage::{CardId, CardUpdate};
use crate::types::VisualState;

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

/// Seconds for the entrance fade/scale.
pub const ENTRANCE_SECS: f64 = 1.5;

/// Fraction of the path traversal at which the exit fade begins.
pub const EXIT_AT_FRACTION: f64 = 0.85;

/// Fraction of the path traversal the exit fade lasts.
pub const EXIT_DURATION_FRACTION: f64 = 0.15;

// ---------------------------------------------------------------------------
// Tween model
// ---------------------------------------------------------------------------

/// Easing applied by the host engine over a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    /// Accelerating (exit fades).
    In,
    /// Decelerating (entrance fades).
    Out,
    /// Smooth acceleration and deceleration (path traversal).
    InOut,
}

/// What a tween animates.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenKind {
    /// Parametric travel along a named path element. Cards do not
    /// auto-rotate to the path tangent.
    Path { element: String, from: f64, to: f64 },
    /// Opacity/scale interpolation between two visual states.
    FadeScale { from: VisualState, to: VisualState },
}

impl TweenKind {
    /// The stage write this tween lands on at completion.
    pub fn final_update(&self) -> CardUpdate {
        match self {
            TweenKind::Path { to, .. } => CardUpdate::PathProgress(*to),
            TweenKind::FadeScale { to, .. } => CardUpdate::Visual(*to),
        }
    }
}

/// One time-offset animation within a batch timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub card: CardId,
    pub kind: TweenKind,
    /// Offset from timeline start.
    pub at: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

/// The scoped grouping of tweens owned by one batch. Completes once all
/// tweens finish; its span bounds the batch's lifetime.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new(tweens: Vec<Tween>) -> Self {
        Self { tweens }
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Total running time: the latest tween end.
    /// For `n` staggered cards this is `(n - 1) * stagger + cycle_duration`.
    pub fn span(&self) -> Duration {
        self.tweens
            .iter()
            .map(|t| t.at + t.duration)
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Batch layout
// ---------------------------------------------------------------------------

/// Build the timeline for one batch of mounted cards.
///
/// Per card at stagger slot `i`, offset `i * stagger`:
/// - path tween 0 → 1 over `cycle_duration`, in-out eased;
/// - entrance fade/scale hidden → visible over [`ENTRANCE_SECS`], out
///   eased, starting at the same offset;
/// - exit fade/scale visible → exited at `offset + 0.85 * cycle_duration`
///   over `0.15 * cycle_duration`, in eased.
pub fn build_batch_timeline(
    cards: &[CardId],
    path_element: &str,
    cycle_duration: Duration,
    stagger: Duration,
) -> Timeline {
    let mut tweens = Vec::with_capacity(cards.len() * 3);

    for (i, &card) in cards.iter().enumerate() {
        let at = stagger * i as u32;

        tweens.push(Tween {
            card,
            kind: TweenKind::Path {
                element: path_element.to_string(),
                from: 0.0,
                to: 1.0,
            },
            at,
            duration: cycle_duration,
            ease: Ease::InOut,
        });

        tweens.push(Tween {
            card,
            kind: TweenKind::FadeScale {
                from: VisualState::HIDDEN,
                to: VisualState::VISIBLE,
            },
            at,
            duration: Duration::from_secs_f64(ENTRANCE_SECS),
            ease: Ease::Out,
        });

        tweens.push(Tween {
            card,
            kind: TweenKind::FadeScale {
                from: VisualState::VISIBLE,
                to: VisualState::EXITED,
            },
            at: at + cycle_duration.mul_f64(EXIT_AT_FRACTION),
            duration: cycle_duration.mul_f64(EXIT_DURATION_FRACTION),
            ease: Ease::In,
        });
    }

    Timeline::new(tweens)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CYCLE: Duration = Duration::from_secs(18);
    const STAGGER: Duration = Duration::from_millis(3500);

    fn cards(n: usize) -> Vec<CardId> {
        (0..n).map(|_| CardId::new()).collect()
    }

    #[test]
    fn test_three_tweens_per_card() {
        let tl = build_batch_timeline(&cards(3), "carousel-path", CYCLE, STAGGER);
        assert_eq!(tl.tweens().len(), 9);
    }

    #[test]
    fn test_stagger_offsets() {
        let ids = cards(3);
        let tl = build_batch_timeline(&ids, "carousel-path", CYCLE, STAGGER);
        for (i, &card) in ids.iter().enumerate() {
            let path = tl
                .tweens()
                .iter()
                .find(|t| t.card == card && matches!(t.kind, TweenKind::Path { .. }))
                .unwrap();
            assert_eq!(path.at, STAGGER * i as u32);
            assert_eq!(path.duration, CYCLE);
            assert_eq!(path.ease, Ease::InOut);
        }
    }

    #[test]
    fn test_entrance_layout() {
        let ids = cards(2);
        let tl = build_batch_timeline(&ids, "p", CYCLE, STAGGER);
        let entrance = tl
            .tweens()
            .iter()
            .find(|t| {
                t.card == ids[1]
                    && matches!(&t.kind, TweenKind::FadeScale { from, .. } if *from == VisualState::HIDDEN)
            })
            .unwrap();
        assert_eq!(entrance.at, STAGGER);
        assert_eq!(entrance.duration, Duration::from_millis(1500));
        assert_eq!(entrance.ease, Ease::Out);
    }

    #[test]
    fn test_exit_layout() {
        let ids = cards(2);
        let tl = build_batch_timeline(&ids, "p", CYCLE, STAGGER);
        let exit = tl
            .tweens()
            .iter()
            .find(|t| {
                t.card == ids[1]
                    && matches!(&t.kind, TweenKind::FadeScale { to, .. } if *to == VisualState::EXITED)
            })
            .unwrap();
        // 3.5 + 0.85 * 18 = 18.8s in, lasting 0.15 * 18 = 2.7s
        assert_eq!(exit.at, Duration::from_millis(18_800));
        assert_eq!(exit.duration, Duration::from_millis(2_700));
        assert_eq!(exit.ease, Ease::In);
    }

    #[test]
    fn test_span_formula() {
        // (n - 1) * stagger + cycle_duration
        let tl = build_batch_timeline(&cards(3), "p", CYCLE, STAGGER);
        assert_eq!(tl.span(), Duration::from_secs(25));

        let tl = build_batch_timeline(&cards(1), "p", CYCLE, STAGGER);
        assert_eq!(tl.span(), CYCLE);
    }

    #[test]
    fn test_empty_batch_empty_timeline() {
        let tl = build_batch_timeline(&[], "p", CYCLE, STAGGER);
        assert!(tl.is_empty());
        assert_eq!(tl.span(), Duration::ZERO);
    }

    #[test]
    fn test_path_element_carried_through() {
        let tl = build_batch_timeline(&cards(1), "display-arc", CYCLE, STAGGER);
        let TweenKind::Path { element, from, to } = &tl.tweens()[0].kind else {
            panic!("first tween should be the path tween");
        };
        assert_eq!(element, "display-arc");
        assert_eq!(*from, 0.0);
        assert_eq!(*to, 1.0);
    }

    #[test]
    fn test_final_updates() {
        let tl = build_batch_timeline(&cards(1), "p", CYCLE, STAGGER);
        let finals: Vec<CardUpdate> =
            tl.tweens().iter().map(|t| t.kind.final_update()).collect();
        assert!(finals.contains(&CardUpdate::PathProgress(1.0)));
        assert!(finals.contains(&CardUpdate::Visual(VisualState::VISIBLE)));
        assert!(finals.contains(&CardUpdate::Visual(VisualState::EXITED)));
    }
}
