//! Scoped wall-clock measurement of single index calls.
//!
//! [`measure`] brackets exactly one closure with two [`Instant`] reads. Callers
//! keep logging, formatting and cloning outside the closure so the window holds
//! only the index operation.

use std::time::{Duration, Instant};

use serde::Serialize;

/// A value paired with the time it took to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timed<T> {
    /// Result of the measured call.
    pub value: T,
    /// Elapsed wall-clock time of the call.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Transforms the value, keeping the original elapsed time.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }
}

impl<T> Timed<Option<T>> {
    /// Moves the timing inside the option.
    pub fn transpose(self) -> Option<Timed<T>> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Runs `op` once and returns its result with the elapsed time.
#[inline]
pub fn measure<T>(op: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = op();
    let elapsed = start.elapsed();
    (out, elapsed)
}

/// Same as [`measure`] but packs the pair into a [`Timed`].
#[inline]
pub fn measure_timed<T>(op: impl FnOnce() -> T) -> Timed<T> {
    let (value, elapsed) = measure(op);
    Timed { value, elapsed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_returns_result_and_nonzero_window_for_sleep() {
        let (out, elapsed) = measure(|| {
            std::thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(out, 7);
        assert!(elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn transpose_keeps_elapsed() {
        let timed = Timed {
            value: Some("x"),
            elapsed: Duration::from_nanos(42),
        };
        let inner = timed.transpose().expect("some");
        assert_eq!(inner.value, "x");
        assert_eq!(inner.elapsed, Duration::from_nanos(42));

        let empty: Timed<Option<u8>> = Timed {
            value: None,
            elapsed: Duration::ZERO,
        };
        assert!(empty.transpose().is_none());
    }
}
