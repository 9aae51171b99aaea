//! VITRINE — Looping product showcase carousel.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod animation;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod render;
pub mod stage;
pub mod types;
