use jiff::Timestamp;

/// Source of the current time.
///
/// Expiry is always derived from a clock reading rather than stored as a
/// flag, so swapping the clock is enough to test boundary behaviour.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock.
    fn now(&self) -> Timestamp;
}

/// A clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-util"))]
mod manual {
    use super::Clock;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::{Arc, Mutex, PoisonError};

    /// A clock that only moves when told to.
    ///
    /// Clones share the same underlying time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        inner: Arc<Mutex<Timestamp>>,
    }

    impl ManualClock {
        pub fn new(now: Timestamp) -> Self {
            Self {
                inner: Arc::new(Mutex::new(now)),
            }
        }

        /// Sets the clock to `target`, even if it lies in the past.
        pub fn set(&self, target: Timestamp) {
            *self
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = target;
        }

        /// Moves the clock forward by `by`.
        pub fn advance(&self, by: SignedDuration) {
            let mut now = self
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            *self
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
        }
    }
}
