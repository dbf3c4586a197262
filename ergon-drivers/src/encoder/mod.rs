//! Encoder drivers
//!
//! - Quadrature decoder: turns A/B level changes into signed steps
//! - Shared count: lock-free step accumulator read by the control loop

pub mod quadrature;
pub mod shared;

pub use quadrature::QuadratureDecoder;
pub use shared::SharedCount;
