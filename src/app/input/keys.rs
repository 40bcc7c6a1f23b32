//! Canonical key and mouse button vocabulary
//!
//! Every device-specific code is mapped onto these enums before it reaches the
//! event queue. Codes with no canonical counterpart map to `None` and are
//! dropped by the translator.

use enum_map::Enum;
use winit::keyboard::KeyCode as WinitKey;

/// Canonical key code
///
/// The declaration order is the key-code order used when synthesizing
/// hold events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum)]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Number row
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Arrows
    Up,
    Down,
    Left,
    Right,

    // Editing and navigation
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    CapsLock,

    // Modifiers
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,

    // Punctuation
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Grave,
    Comma,
    Period,
    Slash,
}

impl KeyCode {
    /// Maps a winit physical key code onto the canonical vocabulary
    pub fn from_winit(key: WinitKey) -> Option<Self> {
        use WinitKey as WK;
        let key = match key {
            WK::KeyA => Self::A,
            WK::KeyB => Self::B,
            WK::KeyC => Self::C,
            WK::KeyD => Self::D,
            WK::KeyE => Self::E,
            WK::KeyF => Self::F,
            WK::KeyG => Self::G,
            WK::KeyH => Self::H,
            WK::KeyI => Self::I,
            WK::KeyJ => Self::J,
            WK::KeyK => Self::K,
            WK::KeyL => Self::L,
            WK::KeyM => Self::M,
            WK::KeyN => Self::N,
            WK::KeyO => Self::O,
            WK::KeyP => Self::P,
            WK::KeyQ => Self::Q,
            WK::KeyR => Self::R,
            WK::KeyS => Self::S,
            WK::KeyT => Self::T,
            WK::KeyU => Self::U,
            WK::KeyV => Self::V,
            WK::KeyW => Self::W,
            WK::KeyX => Self::X,
            WK::KeyY => Self::Y,
            WK::KeyZ => Self::Z,

            WK::Digit0 => Self::Num0,
            WK::Digit1 => Self::Num1,
            WK::Digit2 => Self::Num2,
            WK::Digit3 => Self::Num3,
            WK::Digit4 => Self::Num4,
            WK::Digit5 => Self::Num5,
            WK::Digit6 => Self::Num6,
            WK::Digit7 => Self::Num7,
            WK::Digit8 => Self::Num8,
            WK::Digit9 => Self::Num9,

            WK::F1 => Self::F1,
            WK::F2 => Self::F2,
            WK::F3 => Self::F3,
            WK::F4 => Self::F4,
            WK::F5 => Self::F5,
            WK::F6 => Self::F6,
            WK::F7 => Self::F7,
            WK::F8 => Self::F8,
            WK::F9 => Self::F9,
            WK::F10 => Self::F10,
            WK::F11 => Self::F11,
            WK::F12 => Self::F12,

            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,
            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,

            WK::Space => Self::Space,
            WK::Enter | WK::NumpadEnter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Backspace => Self::Backspace,
            WK::Tab => Self::Tab,
            WK::Insert => Self::Insert,
            WK::Delete => Self::Delete,
            WK::Home => Self::Home,
            WK::End => Self::End,
            WK::PageUp => Self::PageUp,
            WK::PageDown => Self::PageDown,
            WK::CapsLock => Self::CapsLock,

            WK::ShiftLeft => Self::LeftShift,
            WK::ShiftRight => Self::RightShift,
            WK::ControlLeft => Self::LeftCtrl,
            WK::ControlRight => Self::RightCtrl,
            WK::AltLeft => Self::LeftAlt,
            WK::AltRight => Self::RightAlt,

            WK::Minus => Self::Minus,
            WK::Equal => Self::Equals,
            WK::BracketLeft => Self::LeftBracket,
            WK::BracketRight => Self::RightBracket,
            WK::Backslash => Self::Backslash,
            WK::Semicolon => Self::Semicolon,
            WK::Quote => Self::Apostrophe,
            WK::Backquote => Self::Grave,
            WK::Comma => Self::Comma,
            WK::Period => Self::Period,
            WK::Slash => Self::Slash,

            _ => return None,
        };
        Some(key)
    }

    /// All canonical keys in key-code order
    pub fn all() -> impl Iterator<Item = KeyCode> {
        (0..<Self as Enum>::LENGTH).map(<Self as Enum>::from_usize)
    }
}

/// Canonical mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Maps a winit mouse button; extra buttons have no canonical code
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            winit::event::MouseButton::Right => Some(Self::Right),
            _ => None,
        }
    }
}
