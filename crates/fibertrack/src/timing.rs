//! Debounce and throttle decorators
//!
//! Wrappers over a plain callback, one per subscription. Nothing here owns
//! a timer: time is passed in explicitly, and pending debounced calls fire
//! when the owner polls them.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Boxed callback receiving a borrowed value
pub type Callback<T> = Box<dyn FnMut(&T)>;

/// Millisecond time source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock (milliseconds since the Unix epoch)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default()
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn set(&self, ms: f64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

/// Trailing-edge debounce: only the last value of a burst is delivered,
/// once `wait_ms` passed without a new call.
pub struct Debounced<T> {
    callback: Callback<T>,
    wait_ms: f64,
    pending: Option<(T, f64)>,
}

/// Wrap `callback` in a [`Debounced`]
pub fn debounce<T>(wait_ms: f64, callback: impl FnMut(&T) + 'static) -> Debounced<T> {
    Debounced {
        callback: Box::new(callback),
        wait_ms,
        pending: None,
    }
}

impl<T> Debounced<T> {
    /// Replace the pending value and restart the quiet period
    pub fn call(&mut self, value: T, now_ms: f64) {
        self.pending = Some((value, now_ms + self.wait_ms));
    }

    /// Deliver the pending value if its quiet period elapsed
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let due = self.deadline().is_some_and(|deadline| now_ms >= deadline);
        due && self.flush()
    }

    /// Deliver the pending value now
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((value, _)) => {
                (self.callback)(&value);
                true
            }
            None => false,
        }
    }

    /// Drop the pending value without delivering it
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

impl<T> fmt::Debug for Debounced<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait_ms", &self.wait_ms)
            .field("deadline", &self.deadline())
            .finish()
    }
}

/// Leading-edge throttle: a call fires unless another fired within the
/// last `interval_ms`; suppressed calls are dropped.
pub struct Throttled<T> {
    callback: Callback<T>,
    interval_ms: f64,
    last_fired: Option<f64>,
}

/// Wrap `callback` in a [`Throttled`]
pub fn throttle<T>(interval_ms: f64, callback: impl FnMut(&T) + 'static) -> Throttled<T> {
    Throttled {
        callback: Box::new(callback),
        interval_ms,
        last_fired: None,
    }
}

impl<T> Throttled<T> {
    /// Deliver `value` unless throttled; reports whether it fired
    pub fn call(&mut self, value: &T, now_ms: f64) -> bool {
        if let Some(last) = self.last_fired {
            if now_ms - last < self.interval_ms {
                return false;
            }
        }
        self.last_fired = Some(now_ms);
        (self.callback)(value);
        true
    }

    /// Reset the window so the next call fires
    pub fn cancel(&mut self) {
        self.last_fired = None;
    }
}

impl<T> fmt::Debug for Throttled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("interval_ms", &self.interval_ms)
            .field("last_fired", &self.last_fired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl FnMut(&u32) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &u32| sink.borrow_mut().push(*v))
    }

    #[test]
    fn test_debounce_delivers_last_of_burst() {
        let (seen, callback) = recorder();
        let mut debounced = debounce(100.0, callback);

        debounced.call(1, 0.0);
        debounced.call(2, 50.0);
        debounced.call(3, 90.0);
        assert!(!debounced.poll(150.0));
        assert!(debounced.poll(190.0));
        assert!(!debounced.poll(500.0));

        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn test_debounce_cancel_and_flush() {
        let (seen, callback) = recorder();
        let mut debounced = debounce(100.0, callback);

        debounced.call(1, 0.0);
        assert!(debounced.cancel());
        assert!(!debounced.poll(1_000.0));

        debounced.call(2, 0.0);
        assert_eq!(debounced.deadline(), Some(100.0));
        assert!(debounced.flush());
        assert!(!debounced.is_pending());

        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_throttle_leading_edge() {
        let (seen, callback) = recorder();
        let mut throttled = throttle(100.0, callback);

        assert!(throttled.call(&1, 0.0));
        assert!(!throttled.call(&2, 40.0));
        assert!(!throttled.call(&3, 99.0));
        assert!(throttled.call(&4, 100.0));

        throttled.cancel();
        assert!(throttled.call(&5, 120.0));

        assert_eq!(*seen.borrow(), vec![1, 4, 5]);
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(10.0);
        let view = clock.clone();
        clock.advance(5.0);
        assert_eq!(view.now_ms(), 15.0);
        view.set(1.0);
        assert_eq!(clock.now_ms(), 1.0);
    }

    #[test]
    fn test_system_clock_is_epoch_millis() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_ms() > 1_577_836_800_000.0);
    }
}
