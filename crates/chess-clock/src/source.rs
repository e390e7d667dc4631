//! Monotonic time sources.
//!
//! The clock only ever asks "how many seconds since some fixed origin", so any
//! monotonic timeline works. Wall-clock time is never consulted.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub trait TimeSource {
    /// Seconds elapsed on a monotonic timeline.
    fn now(&self) -> f64;
}

/// Real time, measured from the moment the source was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicSource {
    origin: Instant,
}

impl MonotonicSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicSource {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A timeline that only moves when told to. Clones share the same timeline, so a
/// test can keep one handle and give another to the clock.
#[derive(Debug, Clone, Default)]
pub struct ManualSource {
    now: Rc<Cell<f64>>,
}

impl ManualSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, seconds: f64) {
        if seconds > self.now.get() {
            self.now.set(seconds);
        }
    }
}

impl TimeSource for ManualSource {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_source_is_shared_and_monotonic() {
        let source = ManualSource::new();
        let handle = source.clone();
        handle.advance(2.5);
        assert_eq!(source.now(), 2.5);
        handle.set(1.0);
        assert_eq!(source.now(), 2.5);
        handle.set(10.0);
        assert_eq!(source.now(), 10.0);
    }

    #[test]
    fn test_monotonic_source_never_goes_back() {
        let source = MonotonicSource::new();
        let a = source.now();
        let b = source.now();
        assert!(b >= a);
    }
}
