//! Energy accounting and drive gating
//!
//! The ledger tracks how much work the operator has granted; the gate
//! refuses to drive the motor once that grant is spent.

pub mod gate;
pub mod ledger;

pub use gate::TorqueGate;
pub use ledger::EnergyLedger;
