//! Torque gate
//!
//! Maps `(commanded torque, ledger balance)` to a [`Drive`]:
//!
//! | balance | torque | drive                  |
//! |---------|--------|------------------------|
//! | <= 0    | any    | stopped                |
//! | > 0     | > 0    | `torque`, forward      |
//! | > 0     | < 0    | `|torque|`, reverse    |
//! | > 0     | 0      | stopped                |

use crate::traits::Drive;

/// Stateless drive decision
#[derive(Debug, Clone, Copy, Default)]
pub struct TorqueGate;

impl TorqueGate {
    /// Decide the drive for a commanded torque and ledger balance
    ///
    /// Total over all inputs: `i32::MIN` maps to a magnitude of 2^31.
    pub const fn decide(torque: i32, balance: i64) -> Drive {
        if balance <= 0 {
            return Drive::STOP;
        }

        if torque > 0 {
            Drive::forward(torque.unsigned_abs())
        } else if torque < 0 {
            Drive::reverse(torque.unsigned_abs())
        } else {
            Drive::STOP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_forward_drive() {
        assert_eq!(TorqueGate::decide(50, 1000), Drive::forward(50));
    }

    #[test]
    fn test_reverse_drive() {
        assert_eq!(TorqueGate::decide(-30, 30), Drive::reverse(30));
    }

    #[test]
    fn test_zero_torque_is_neutral() {
        let drive = TorqueGate::decide(0, 1000);
        assert_eq!(drive.magnitude, 0);
        assert!(drive.forward);
    }

    #[test]
    fn test_empty_budget_stops() {
        assert!(TorqueGate::decide(255, 0).is_stopped());
        assert!(TorqueGate::decide(-255, -5).is_stopped());
    }

    #[test]
    fn test_extreme_values() {
        assert_eq!(
            TorqueGate::decide(i32::MIN, i64::MAX),
            Drive::reverse(1u32 << 31)
        );
        assert_eq!(
            TorqueGate::decide(i32::MAX, 1),
            Drive::forward(i32::MAX as u32)
        );
        assert!(TorqueGate::decide(i32::MIN, i64::MIN).is_stopped());
    }

    proptest! {
        #[test]
        fn prop_no_budget_no_drive(torque in any::<i32>(), balance in i64::MIN..=0) {
            prop_assert_eq!(TorqueGate::decide(torque, balance).magnitude, 0);
        }

        #[test]
        fn prop_positive_budget_passes_torque(torque in any::<i32>(), balance in 1..=i64::MAX) {
            let drive = TorqueGate::decide(torque, balance);
            prop_assert_eq!(drive.magnitude, torque.unsigned_abs());
            prop_assert_eq!(drive.forward, torque >= 0);
        }

        #[test]
        fn prop_decide_is_idempotent(torque in any::<i32>(), balance in any::<i64>()) {
            prop_assert_eq!(
                TorqueGate::decide(torque, balance),
                TorqueGate::decide(torque, balance)
            );
        }
    }
}
