//! Flat input representation
//!
//! `FlatInputRep` answers "is this key or button down right now" and where the
//! cursor is. `InputState` keeps the current and the previous frame copy so
//! edges can be read off the pair.

use enum_map::EnumMap;

use super::keys::{KeyCode, MouseButton};

/// Held state of every canonical key plus the mouse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatInputRep {
    pub keys: EnumMap<KeyCode, bool>,
    pub mouse: MouseState,
}

/// Cursor position, scroll accumulator and button state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    /// Sum of this frame's scroll notches
    pub scroll: i32,
    pub buttons: MouseButtons,
}

/// Held state of the three canonical mouse buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtons {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl MouseButtons {
    pub fn get(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }

    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Right => self.right = down,
        }
    }
}

impl FlatInputRep {
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys[key]
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse.buttons.get(button)
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.mouse.x, self.mouse.y)
    }
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    fn from_frames(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, false) => Self::Released,
            (false, true) => Self::JustPressed,
            (true, true) => Self::Pressed,
            (true, false) => Self::JustReleased,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    /// Returns true if button was just released this frame
    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }
}

/// Current and previous frame snapshots
///
/// The previous copy is overwritten only at the start of a polling pass, so it
/// is stable for the whole of the frame's dispatch.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: FlatInputRep,
    previous: FlatInputRep,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &FlatInputRep {
        &self.current
    }

    pub fn previous(&self) -> &FlatInputRep {
        &self.previous
    }

    pub(crate) fn current_mut(&mut self) -> &mut FlatInputRep {
        &mut self.current
    }

    /// Starts a polling pass: snapshot current into previous and clear the
    /// per-frame scroll accumulator
    pub(crate) fn begin_frame(&mut self) {
        self.previous.clone_from(&self.current);
        self.current.mouse.scroll = 0;
    }

    pub fn key(&self, key: KeyCode) -> ButtonState {
        ButtonState::from_frames(self.previous.keys[key], self.current.keys[key])
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key)
    }

    pub fn mouse_button(&self, button: MouseButton) -> ButtonState {
        ButtonState::from_frames(
            self.previous.is_button_down(button),
            self.current.is_button_down(button),
        )
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.current.cursor()
    }

    /// Cursor movement between the previous and the current frame
    pub fn cursor_delta(&self) -> (i32, i32) {
        (
            self.current.mouse.x.saturating_sub(self.previous.mouse.x),
            self.current.mouse.y.saturating_sub(self.previous.mouse.y),
        )
    }

    pub fn scroll(&self) -> i32 {
        self.current.mouse.scroll
    }
}
