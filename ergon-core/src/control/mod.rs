//! Control loop
//!
//! Fuses commanded torque, encoder displacement and the energy ledger into
//! one drive decision per tick.

pub mod cycle;
pub mod report;

pub use cycle::ControlLoop;
pub use report::{StatusSnapshot, TickReport};
