//! Event listeners: predicate + action pairs polled every update

use std::fmt;

/// Runs `action` whenever `check` holds at update time
///
/// A run-once listener fires at most once; after that neither its predicate
/// nor its action is evaluated again.
pub struct EventListener {
    check: Box<dyn FnMut() -> bool>,
    action: Box<dyn FnMut()>,
    run_once: bool,
    already_ran: bool,
}

impl EventListener {
    /// Listener that fires every update its predicate holds
    pub fn new(check: impl FnMut() -> bool + 'static, action: impl FnMut() + 'static) -> Self {
        Self {
            check: Box::new(check),
            action: Box::new(action),
            run_once: false,
            already_ran: false,
        }
    }

    /// Listener that fires the first time its predicate holds, then never again
    pub fn once(check: impl FnMut() -> bool + 'static, action: impl FnMut() + 'static) -> Self {
        Self {
            run_once: true,
            ..Self::new(check, action)
        }
    }

    /// Evaluates the predicate and runs the action if it holds
    ///
    /// Returns whether the action ran.
    pub fn update(&mut self) -> bool {
        if self.is_spent() || !(self.check)() {
            return false;
        }
        (self.action)();
        self.already_ran = true;
        true
    }

    pub fn run_once(&self) -> bool {
        self.run_once
    }

    pub fn already_ran(&self) -> bool {
        self.already_ran
    }

    /// A run-once listener that has fired
    pub fn is_spent(&self) -> bool {
        self.run_once && self.already_ran
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("run_once", &self.run_once)
            .field("already_ran", &self.already_ran)
            .finish_non_exhaustive()
    }
}
