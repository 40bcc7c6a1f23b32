//! Input context: the single owner of process-wide input state
//!
//! Holds the current/previous flat input snapshots, the key-hold set, the
//! warp queue and the per-frame canonical event queue. One polling pass per
//! frame drains the platform, translates every raw event, then appends the
//! synthetic hold events.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use super::events::{Event, KeyEvent};
use super::hold::KeyHoldSet;
use super::platform::Platform;
use super::state::InputState;
use super::translate::Translator;
use super::warp::WarpQueue;
use crate::app::config::InputConfig;

pub struct InputContext {
    config: InputConfig,
    state: InputState,
    holds: KeyHoldSet,
    warps: WarpQueue,
    /// Canonical events of the current frame, oldest first
    queue: VecDeque<Event>,
    /// Number of completed polling passes
    frame: u64,
    /// Debug: events generated by the last polling pass
    last_events: Vec<String>,
}

impl InputContext {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            state: InputState::new(),
            holds: KeyHoldSet::new(),
            warps: WarpQueue::new(),
            queue: VecDeque::new(),
            frame: 0,
            last_events: Vec::new(),
        }
    }

    /// Runs one polling pass and returns the number of queued events
    ///
    /// Snapshots the previous frame, translates every pending platform event
    /// in arrival order, then appends one `KeyHold` per held key.
    pub fn poll(&mut self, platform: &mut dyn Platform) -> usize {
        if !self.queue.is_empty() {
            debug!(
                dropped = self.queue.len(),
                "Discarding events that were never dispatched"
            );
            self.queue.clear();
        }

        self.state.begin_frame();

        while let Some(raw) = platform.poll_event() {
            let modifiers = platform.modifiers();
            let mut translator = Translator {
                state: self.state.current_mut(),
                holds: &mut self.holds,
                warps: &mut self.warps,
            };
            if let Some(event) = translator.translate(raw, modifiers) {
                self.queue.push_back(event);
            }
        }

        if self.config.synthesize_key_holds {
            let modifiers = platform.modifiers();
            for key in self.holds.iter() {
                self.queue
                    .push_back(Event::KeyHold(KeyEvent { key, modifiers }));
            }
        }

        self.frame += 1;
        self.last_events.clear();
        self.last_events
            .extend(self.queue.iter().map(|event| format!("{:?}", event)));

        trace!(frame = self.frame, events = self.queue.len(), "Polled input");
        self.queue.len()
    }

    /// Moves the cursor and arranges for the platform's echo to be swallowed
    ///
    /// The flat state is updated immediately so queries made before the next
    /// poll already see the new position.
    pub fn warp_cursor_to(&mut self, platform: &mut dyn Platform, x: i32, y: i32) {
        let from = self.state.cursor();
        self.warps.push(from, x, y);

        if !platform.warp_mouse(x, y) {
            warn!(x, y, "Platform refused cursor warp");
            self.warps.cancel_last();
            return;
        }

        let mouse = &mut self.state.current_mut().mouse;
        mouse.x = x;
        mouse.y = y;
    }

    /// Hands the queued events over for dispatch, leaving the queue empty
    pub fn take_events(&mut self) -> VecDeque<Event> {
        std::mem::take(&mut self.queue)
    }

    /// Events queued by the last poll and not yet taken
    pub fn queued(&self) -> impl Iterator<Item = &Event> {
        self.queue.iter()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn holds(&self) -> &KeyHoldSet {
        &self.holds
    }

    pub fn pending_warps(&self) -> &WarpQueue {
        &self.warps
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Get events generated last frame (for debugging)
    pub fn debug_last_events(&self) -> &[String] {
        &self.last_events
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
