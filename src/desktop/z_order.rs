use std::sync::atomic::{AtomicU64, Ordering};

/// Desktop-wide stacking counter. Every window creation and every focus
/// takes the next value, so the most recently touched window is on top.
#[derive(Debug, Default)]
pub struct ZOrderCounter {
    current: AtomicU64,
}

impl ZOrderCounter {
    pub const fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Advance the counter and return the new value. The first call
    /// returns 1.
    pub fn next_value(&self) -> u64 {
        self.current.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The most recently handed out value (0 before any).
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_strictly_increase() {
        let counter = ZOrderCounter::new();
        assert_eq!(counter.current(), 0);
        let a = counter.next_value();
        let b = counter.next_value();
        assert_eq!(a, 1);
        assert!(b > a);
        assert_eq!(counter.current(), b);
    }
}
