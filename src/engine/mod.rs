//! Carousel engine.
//!
//! The two pieces with real logic: round-robin batch selection over the
//! catalog, and the cycle scheduler that spawns, animates, and disposes
//! batches at a fixed cadence.

pub mod scheduler;
pub mod selector;
