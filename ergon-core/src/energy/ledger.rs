//! Energy ledger
//!
//! A signed accumulator of work units. Commands credit it, motion debits it
//! by `displacement * torque`. Negative balances are valid: they record
//! overspend and keep the gate closed until enough credit arrives.
//!
//! The balance is an `i64` and every update saturates. A wrap would flip
//! the sign of the balance and open the gate, so saturation is the only
//! acceptable overflow behavior here.

/// Signed energy accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnergyLedger {
    balance: i64,
}

impl EnergyLedger {
    /// Create an empty ledger (balance 0)
    pub const fn new() -> Self {
        Self { balance: 0 }
    }

    /// Add energy to the ledger
    pub fn credit(&mut self, amount: i64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Remove energy from the ledger
    ///
    /// A negative amount (motion against the commanded torque) increases
    /// the balance.
    pub fn debit(&mut self, amount: i64) {
        self.balance = self.balance.saturating_sub(amount);
    }

    /// Debit the work done by moving `delta` ticks at `torque`
    pub fn debit_motion(&mut self, delta: i64, torque: i32) {
        self.debit(delta.saturating_mul(torque as i64));
    }

    /// Current balance
    pub const fn balance(&self) -> i64 {
        self.balance
    }

    /// Check if any energy remains
    pub const fn is_positive(&self) -> bool {
        self.balance > 0
    }
}
