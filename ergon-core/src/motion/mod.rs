//! Motion tracking
//!
//! Turns a raw encoder count into per-tick displacement.

pub mod tracker;

pub use tracker::{EncoderTracker, Polarity};
