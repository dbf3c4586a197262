//! Shared encoder count
//!
//! The edge-handling task adds decoded steps; the control loop reads the
//! running total through [`EncoderCounter`]. Lives in a `static`, so the
//! writer and the reader never hold a lock across an await point.

use portable_atomic::{AtomicI64, Ordering};

use ergon_core::traits::EncoderCounter;

/// Atomic 64-bit step counter
#[derive(Debug)]
pub struct SharedCount {
    count: AtomicI64,
}

impl Default for SharedCount {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedCount {
    /// Create a counter at zero
    pub const fn new() -> Self {
        Self {
            count: AtomicI64::new(0),
        }
    }

    /// Add a decoded step (wraps on overflow)
    pub fn add(&self, steps: i64) {
        if steps != 0 {
            self.count.fetch_add(steps, Ordering::Relaxed);
        }
    }

    /// Current count
    pub fn get(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Reset to zero
    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

impl EncoderCounter for &SharedCount {
    fn count(&self) -> i64 {
        self.get()
    }

    fn clear(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_read() {
        let shared = SharedCount::new();
        shared.add(5);
        shared.add(-2);
        shared.add(0);
        assert_eq!(shared.get(), 3);
    }

    #[test]
    fn test_counter_trait() {
        static COUNT: SharedCount = SharedCount::new();
        let mut counter = &COUNT;

        COUNT.add(10);
        assert_eq!(counter.count(), 10);
        counter.clear();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_wraps_on_overflow() {
        let shared = SharedCount::new();
        shared.add(i64::MAX);
        shared.add(1);
        assert_eq!(shared.get(), i64::MIN);
    }
}
