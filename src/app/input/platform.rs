//! Platform boundary
//!
//! The input core talks to the windowing system only through [`Platform`]:
//! a raw event queue, the live modifier state, cursor warping and the two
//! display side effects (close and resize).

use std::collections::VecDeque;

use winit::event::MouseButton as PlatformButton;
use winit::keyboard::PhysicalKey;

use super::events::Modifiers;

/// Device-level event as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    KeyDown(PhysicalKey),
    KeyUp(PhysicalKey),
    MouseButtonDown {
        button: PlatformButton,
        x: i32,
        y: i32,
    },
    MouseButtonUp {
        button: PlatformButton,
        x: i32,
        y: i32,
    },
    MouseMotion {
        x: i32,
        y: i32,
        rel_x: i32,
        rel_y: i32,
    },
    /// Wheel movement in notches
    MouseWheel {
        amount: i32,
    },
    Quit,
    Resized {
        width: u32,
        height: u32,
    },
    FocusLost,
    FocusGained,
    CursorLeft,
    CursorEntered,
}

/// Windowing system as seen by the input core
pub trait Platform {
    /// Pops the oldest pending raw event
    fn poll_event(&mut self) -> Option<RawEvent>;

    /// Live modifier state at the time of the call
    fn modifiers(&self) -> Modifiers;

    /// Moves the cursor; returns false if the platform could not do it
    fn warp_mouse(&mut self, x: i32, y: i32) -> bool;

    fn close_display(&mut self);

    fn resize_display(&mut self, width: u32, height: u32);
}

/// Headless platform fed from a script of raw events
///
/// Used by tests and replays. Warps are recorded and, when echoing is
/// enabled, answered with a motion event at the target like a real cursor
/// warp would be.
#[derive(Debug, Default)]
pub struct ScriptedPlatform {
    pending: VecDeque<RawEvent>,
    modifiers: Modifiers,
    cursor: (i32, i32),
    echo_warps: bool,
    refuse_warps: bool,
    warps: Vec<(i32, i32)>,
    closed: bool,
    resized: Option<(u32, u32)>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every warp with a motion event at the warp target
    pub fn with_warp_echo(mut self) -> Self {
        self.echo_warps = true;
        self
    }

    /// Make every warp fail, as on platforms without cursor warping
    pub fn with_warps_refused(mut self) -> Self {
        self.refuse_warps = true;
        self
    }

    /// Queues a raw event for the next poll
    pub fn push(&mut self, event: RawEvent) {
        if let RawEvent::MouseMotion { x, y, .. } = event {
            self.cursor = (x, y);
        }
        self.pending.push_back(event);
    }

    /// Queues a motion to an absolute position, relative to the last one
    pub fn move_to(&mut self, x: i32, y: i32) {
        let (last_x, last_y) = self.cursor;
        self.push(RawEvent::MouseMotion {
            x,
            y,
            rel_x: x.saturating_sub(last_x),
            rel_y: y.saturating_sub(last_y),
        });
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Every successful warp target, in call order
    pub fn warps(&self) -> &[(i32, i32)] {
        &self.warps
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn requested_size(&self) -> Option<(u32, u32)> {
        self.resized
    }
}

impl Platform for ScriptedPlatform {
    fn poll_event(&mut self) -> Option<RawEvent> {
        self.pending.pop_front()
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn warp_mouse(&mut self, x: i32, y: i32) -> bool {
        if self.refuse_warps {
            return false;
        }
        self.warps.push((x, y));
        if self.echo_warps {
            self.move_to(x, y);
        }
        true
    }

    fn close_display(&mut self) {
        self.closed = true;
    }

    fn resize_display(&mut self, width: u32, height: u32) {
        self.resized = Some((width, height));
    }
}
