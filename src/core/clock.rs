//! Time sources.
//!
//! Everything time-dependent in the crate (the mismatch flip-back delay and
//! the session timer) reads milliseconds from a shared [`Clock`]. Real hosts use
//! [`SystemClock`]; tests drive a [`ManualClock`] forward explicitly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds since an arbitrary, clock-specific origin.
pub type Millis = u64;

/// A monotonic millisecond source.
pub trait Clock {
    /// Current time in milliseconds.
    fn now(&self) -> Millis;
}

impl std::fmt::Debug for dyn Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock").field("now", &self.now()).finish()
    }
}

/// Shared handle to a clock.
pub type SharedClock = Rc<dyn Clock>;

/// Wall clock backed by [`Instant`], counting from its creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock starting at zero now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Create a shared handle to a new system clock.
    #[must_use]
    pub fn shared() -> SharedClock {
        Rc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Virtual clock that only moves when told to.
///
/// ```
/// use memo_grid::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance(250);
/// assert_eq!(clock.now(), 250);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at time zero behind an `Rc`, ready to share.
    #[must_use]
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Move time forward.
    pub fn advance(&self, millis: Millis) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, millis: Millis) {
        if millis > self.now.get() {
            self.now.set(millis);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0);

        clock.advance(800);
        clock.advance(200);
        assert_eq!(clock.now(), 1000);
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new();
        clock.set(500);
        clock.set(100);
        assert_eq!(clock.now(), 500);
    }

    #[test]
    fn test_shared_manual_clock_as_trait_object() {
        let manual = ManualClock::shared();
        let shared: SharedClock = manual.clone();

        manual.advance(42);
        assert_eq!(shared.now(), 42);
    }

    #[test]
    fn test_system_clock_starts_near_zero() {
        let clock = SystemClock::new();
        assert!(clock.now() < 1000);
    }
}
