//! Canonical input events
//!
//! The closed vocabulary every platform event is translated into before it is
//! dispatched to the current input frame.

use enum_map::Enum;

use super::keys::{KeyCode, MouseButton};

/// Modifier keys held when a key event was translated
///
/// Sampled from the platform's live modifier state, not inferred from the
/// event itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub left_shift: bool,
    pub right_shift: bool,
    pub left_ctrl: bool,
    pub right_ctrl: bool,
    pub left_alt: bool,
    pub right_alt: bool,
}

impl Modifiers {
    /// Either shift key is held
    pub fn shift(self) -> bool {
        self.left_shift || self.right_shift
    }

    /// Either control key is held
    pub fn ctrl(self) -> bool {
        self.left_ctrl || self.right_ctrl
    }

    /// Either alt key is held
    pub fn alt(self) -> bool {
        self.left_alt || self.right_alt
    }

    /// No modifier is held
    pub fn is_empty(self) -> bool {
        self == Self::default()
    }
}

/// Payload of the four keyboard events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Mouse button press or release at a window position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseKeyEvent {
    pub button: MouseButton,
    pub x: i32,
    pub y: i32,
}

/// Cursor movement: new position and motion relative to the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMoveEvent {
    pub x: i32,
    pub y: i32,
    pub rel_x: i32,
    pub rel_y: i32,
}

/// Wheel movement in notches; positive scrolls up/away from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseScrollEvent {
    pub amount: i32,
    pub x: i32,
    pub y: i32,
}

/// Canonical input event
///
/// Each variant carries only its own payload, so a handler can never read
/// fields belonging to another tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Event {
    #[default]
    None,

    KeyPress(KeyEvent),
    KeyHold(KeyEvent),
    KeyRepeat(KeyEvent),
    KeyRelease(KeyEvent),

    MouseKeyPress(MouseKeyEvent),
    MouseKeyRelease(MouseKeyEvent),
    MouseMove(MouseMoveEvent),
    MouseScroll(MouseScrollEvent),

    WindowExit,
    WindowResize { width: u32, height: u32 },
    WindowLoseFocus,
    WindowRegainFocus,
    WindowMouseLeave,
    WindowMouseEnter,
}

/// Tag of an [`Event`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum EventKind {
    None,
    KeyPress,
    KeyHold,
    KeyRepeat,
    KeyRelease,
    MouseKeyPress,
    MouseKeyRelease,
    MouseMove,
    MouseScroll,
    WindowExit,
    WindowResize,
    WindowLoseFocus,
    WindowRegainFocus,
    WindowMouseLeave,
    WindowMouseEnter,
}

impl EventKind {
    /// Every tag of the canonical vocabulary
    pub fn all() -> impl Iterator<Item = EventKind> {
        (0..<Self as Enum>::LENGTH).map(<Self as Enum>::from_usize)
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::None => EventKind::None,
            Event::KeyPress(_) => EventKind::KeyPress,
            Event::KeyHold(_) => EventKind::KeyHold,
            Event::KeyRepeat(_) => EventKind::KeyRepeat,
            Event::KeyRelease(_) => EventKind::KeyRelease,
            Event::MouseKeyPress(_) => EventKind::MouseKeyPress,
            Event::MouseKeyRelease(_) => EventKind::MouseKeyRelease,
            Event::MouseMove(_) => EventKind::MouseMove,
            Event::MouseScroll(_) => EventKind::MouseScroll,
            Event::WindowExit => EventKind::WindowExit,
            Event::WindowResize { .. } => EventKind::WindowResize,
            Event::WindowLoseFocus => EventKind::WindowLoseFocus,
            Event::WindowRegainFocus => EventKind::WindowRegainFocus,
            Event::WindowMouseLeave => EventKind::WindowMouseLeave,
            Event::WindowMouseEnter => EventKind::WindowMouseEnter,
        }
    }

    /// Key payload for the four keyboard tags
    pub fn key_event(&self) -> Option<&KeyEvent> {
        match self {
            Event::KeyPress(key)
            | Event::KeyHold(key)
            | Event::KeyRepeat(key)
            | Event::KeyRelease(key) => Some(key),
            _ => None,
        }
    }
}
