//! Timers built from event listeners
//!
//! A timer is a listener whose predicate compares a clock against a
//! deadline. Listeners are polled once per update, so a timer fires on the
//! first update at or past its deadline, never between updates.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::listener::EventListener;

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall clock measured from its creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Clock that only moves when told to; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Fires `action` once, `delay` after creation
pub fn after(
    clock: Rc<dyn Clock>,
    delay: Duration,
    action: impl FnMut() + 'static,
) -> EventListener {
    let deadline = clock.now() + delay;
    EventListener::once(move || clock.now() >= deadline, action)
}

/// Fires `action` every `interval`, re-arming from the time it fired
pub fn every(
    clock: Rc<dyn Clock>,
    interval: Duration,
    action: impl FnMut() + 'static,
) -> EventListener {
    let mut deadline = clock.now() + interval;
    EventListener::new(
        move || {
            let now = clock.now();
            if now < deadline {
                return false;
            }
            deadline = now + interval;
            true
        },
        action,
    )
}
