//! Restartable elapsed-time counter.
//!
//! A [`Timer`] is either stopped or running. While running it produces a
//! `tick` notification once per period; stopping keeps the accumulated time so
//! a later `start` resumes from it, and `reset` zeroes it.
//!
//! The timer never schedules anything itself. The host calls [`Timer::poll`]
//! (usually through the game controller's `tick`) and the timer delivers every
//! tick whose time has come, reading time from the injected clock.
//!
//! ```
//! use memo_grid::core::ManualClock;
//! use memo_grid::timer::Timer;
//!
//! let clock = ManualClock::shared();
//! let mut timer = Timer::new(clock.clone());
//!
//! timer.start();
//! clock.advance(2_500);
//! timer.poll();
//! assert_eq!(timer.format("S", 0), "2");
//! ```

mod format;

pub use format::{format_millis, TimeParts, DEFAULT_PATTERN};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Millis, SharedClock};

/// Default tick period.
pub const TICK_PERIOD_MS: Millis = 1000;

/// Running state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
}

/// Why listeners are being notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeReason {
    Start,
    Tick,
    Stop,
    Reset,
}

/// Notification delivered to timer listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerChange {
    pub reason: ChangeReason,
    /// Elapsed milliseconds at the time of the change.
    pub value: Millis,
}

/// Handle returned by [`Timer::on_change`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&TimerChange, &Timer)>;

/// Elapsed-time counter with change notifications.
pub struct Timer {
    clock: SharedClock,
    period: Millis,
    state: TimerState,
    /// Value reported with the last change.
    value: Millis,
    /// Value carried over from earlier runs.
    carried: Millis,
    /// Clock reading when the current run started.
    baseline: Millis,
    next_tick_at: Millis,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u32,
}

impl Timer {
    /// Create a stopped timer with the default one-second period.
    pub fn new(clock: SharedClock) -> Self {
        Self::with_period(clock, TICK_PERIOD_MS)
    }

    /// Create a stopped timer with a custom tick period.
    ///
    /// A zero period is treated as one millisecond.
    pub fn with_period(clock: SharedClock, period: Millis) -> Self {
        Self {
            clock,
            period: period.max(1),
            state: TimerState::Stopped,
            value: 0,
            carried: 0,
            baseline: 0,
            next_tick_at: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Start counting. Does nothing if already running.
    pub fn start(&mut self) -> &mut Self {
        if self.state == TimerState::Running {
            return self;
        }

        let now = self.clock.now();
        self.state = TimerState::Running;
        self.carried = self.value;
        self.baseline = now;
        self.next_tick_at = now.saturating_add(self.period);
        trace!(carried = self.carried, "timer started");

        self.notify(ChangeReason::Start);
        self
    }

    /// Stop counting, keeping the elapsed time. Idempotent.
    pub fn stop(&mut self) -> &mut Self {
        if self.state == TimerState::Stopped {
            return self;
        }

        self.poll();
        self.value = self.running_value(self.clock.now());
        self.state = TimerState::Stopped;
        trace!(value = self.value, "timer stopped");

        self.notify(ChangeReason::Stop);
        self
    }

    /// Stop if running and zero the elapsed time.
    pub fn reset(&mut self) -> &mut Self {
        self.stop();
        self.carried = 0;
        self.value = 0;

        self.notify(ChangeReason::Reset);
        self
    }

    /// Deliver every tick that is due. Returns how many were delivered.
    pub fn poll(&mut self) -> usize {
        if self.state != TimerState::Running {
            return 0;
        }

        let now = self.clock.now();
        let mut delivered = 0;
        while self.next_tick_at <= now {
            self.value = self.running_value(self.next_tick_at);
            self.next_tick_at += self.period;
            delivered += 1;
            self.notify(ChangeReason::Tick);
        }
        delivered
    }

    /// Register a change listener. Any number may be registered.
    pub fn on_change(&mut self, listener: impl FnMut(&TimerChange, &Timer) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Is the timer counting?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Elapsed milliseconds as of the last notification.
    #[must_use]
    pub fn value(&self) -> Millis {
        self.value
    }

    /// Elapsed milliseconds right now, including a partial period.
    #[must_use]
    pub fn elapsed(&self) -> Millis {
        match self.state {
            TimerState::Running => self.running_value(self.clock.now()),
            TimerState::Stopped => self.value,
        }
    }

    /// Tick period.
    #[must_use]
    pub fn period(&self) -> Millis {
        self.period
    }

    /// Format the last notified value. See [`format_millis`].
    #[must_use]
    pub fn format(&self, pattern: &str, pad: usize) -> String {
        format_millis(self.value, pattern, pad)
    }

    fn running_value(&self, at: Millis) -> Millis {
        self.carried + at.saturating_sub(self.baseline)
    }

    fn notify(&mut self, reason: ChangeReason) {
        if self.listeners.is_empty() {
            return;
        }

        let change = TimerChange {
            reason,
            value: self.value,
        };
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(&change, self);
        }
        self.listeners = listeners;
    }
}

impl std::fmt::Display for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(DEFAULT_PATTERN, 0))
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("state", &self.state)
            .field("value", &self.value)
            .field("period", &self.period)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
