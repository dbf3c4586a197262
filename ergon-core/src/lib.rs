//! Board-agnostic core logic for the Ergon torque controller
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (encoder counter, motor output, byte source)
//! - Encoder displacement tracking
//! - Operator command intake
//! - Energy ledger and torque gate
//! - The control loop that ties them together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod control;
pub mod energy;
pub mod motion;
pub mod traits;

pub use control::{ControlLoop, StatusSnapshot, TickReport};
