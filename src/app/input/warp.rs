//! Mouse warp filter
//!
//! Cursor warps issued by the engine itself (look-around cameras recenter the
//! cursor every frame) come back from the platform as motion events. The
//! queue remembers each pending warp so its echo can be swallowed instead of
//! being mistaken for user input.
//!
//! Single-threaded only: the warp issuer and the translator must run on the
//! same thread, and the platform must echo warps in the order they were made.

use std::collections::VecDeque;

/// A self-inflicted cursor reposition awaiting its echo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseWarp {
    pub x: i32,
    pub y: i32,
    /// Target minus the cursor position at warp time
    pub rel_x: i32,
    pub rel_y: i32,
}

/// How a platform motion relates to the pending warps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpMatch {
    /// No warp pending; the motion is user input
    Genuine,
    /// The motion is the echo of this warp
    Echo(MouseWarp),
    /// A warp was pending but the motion went elsewhere: the platform folded
    /// the echo into real movement
    Coalesced(MouseWarp),
}

/// FIFO of pending warps
#[derive(Debug, Clone, Default)]
pub struct WarpQueue {
    pending: VecDeque<MouseWarp>,
}

impl WarpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warp from `from` to `(x, y)`
    pub fn push(&mut self, from: (i32, i32), x: i32, y: i32) -> MouseWarp {
        let warp = MouseWarp {
            x,
            y,
            rel_x: x.saturating_sub(from.0),
            rel_y: y.saturating_sub(from.1),
        };
        self.pending.push_back(warp);
        warp
    }

    /// Withdraws the most recent warp (the platform refused it)
    pub fn cancel_last(&mut self) -> Option<MouseWarp> {
        self.pending.pop_back()
    }

    pub fn peek(&self) -> Option<&MouseWarp> {
        self.pending.front()
    }

    /// Classifies a platform motion, consuming the oldest warp if one is
    /// pending
    pub fn filter(&mut self, x: i32, y: i32) -> WarpMatch {
        match self.pending.pop_front() {
            None => WarpMatch::Genuine,
            Some(warp) if warp.x == x && warp.y == y => WarpMatch::Echo(warp),
            Some(warp) => WarpMatch::Coalesced(warp),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
