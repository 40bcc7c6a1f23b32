//! Input frames: the receivers of canonical events
//!
//! Exactly one frame is current at a time (see [`Dispatcher`](super::Dispatcher)).
//! Each canonical event is routed to the matching callback on it. Input
//! callbacks return `true` when they consumed the event; a frame that wraps a
//! fallback frame re-invokes the same callback on it otherwise.

use std::any::Any;

use tracing::info;

use super::context::InputContext;
use super::events::{Event, KeyEvent, MouseKeyEvent, MouseMoveEvent, MouseScrollEvent};
use super::platform::Platform;
use super::state::InputState;

/// Per-event context handed to input frames
pub struct FrameCx<'a> {
    input: &'a mut InputContext,
    platform: &'a mut dyn Platform,
    next_frame: Option<Option<Box<dyn InputFrame>>>,
}

impl<'a> FrameCx<'a> {
    pub fn new(input: &'a mut InputContext, platform: &'a mut dyn Platform) -> Self {
        Self {
            input,
            platform,
            next_frame: None,
        }
    }

    pub fn state(&self) -> &InputState {
        self.input.state()
    }

    /// Moves the cursor without the move coming back as user input
    pub fn warp_cursor_to(&mut self, x: i32, y: i32) {
        self.input.warp_cursor_to(self.platform, x, y);
    }

    pub fn close_display(&mut self) {
        self.platform.close_display();
    }

    pub fn resize_display(&mut self, width: u32, height: u32) {
        self.platform.resize_display(width, height);
    }

    /// Replaces the current input frame once this event has been handled
    ///
    /// `None` drops all further input until a frame is set again.
    pub fn set_current_input_frame(&mut self, frame: Option<Box<dyn InputFrame>>) {
        self.next_frame = Some(frame);
    }

    pub(crate) fn take_frame_switch(&mut self) -> Option<Option<Box<dyn InputFrame>>> {
        self.next_frame.take()
    }
}

/// Engine default for a window close request: close the display
pub fn default_window_exit(cx: &mut FrameCx<'_>) {
    info!("Window exit requested, closing display");
    cx.close_display();
}

/// Engine default for a window resize: resize the display to match
pub fn default_window_resize(cx: &mut FrameCx<'_>, width: u32, height: u32) {
    cx.resize_display(width, height);
}

/// Receiver of canonical input events
///
/// Every callback has a safe default: input callbacks ignore the event and
/// report it unconsumed, window exit and resize apply the engine defaults.
pub trait InputFrame {
    /// Name of this frame for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn on_key_press(&mut self, _cx: &mut FrameCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_repeat(&mut self, _cx: &mut FrameCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_hold(&mut self, _cx: &mut FrameCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_release(&mut self, _cx: &mut FrameCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_mouse_key_press(&mut self, _cx: &mut FrameCx<'_>, _event: &MouseKeyEvent) -> bool {
        false
    }

    fn on_mouse_key_release(&mut self, _cx: &mut FrameCx<'_>, _event: &MouseKeyEvent) -> bool {
        false
    }

    fn on_mouse_move(&mut self, _cx: &mut FrameCx<'_>, _event: &MouseMoveEvent) -> bool {
        false
    }

    fn on_mouse_scroll(&mut self, _cx: &mut FrameCx<'_>, _event: &MouseScrollEvent) -> bool {
        false
    }

    fn on_window_exit(&mut self, cx: &mut FrameCx<'_>) {
        default_window_exit(cx);
    }

    fn on_window_resize(&mut self, cx: &mut FrameCx<'_>, width: u32, height: u32) {
        default_window_resize(cx, width, height);
    }

    fn on_window_lose_keyboard_focus(&mut self, _cx: &mut FrameCx<'_>) {}

    fn on_window_regain_keyboard_focus(&mut self, _cx: &mut FrameCx<'_>) {}

    fn on_window_mouse_leave(&mut self, _cx: &mut FrameCx<'_>) {}

    fn on_window_mouse_enter(&mut self, _cx: &mut FrameCx<'_>) {}

    /// Downcast to concrete type for accessing frame-specific methods
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Routes one event to the matching callback; returns whether it was consumed
///
/// Window events have no consumption signal and always report `true`.
pub fn route_event(frame: &mut dyn InputFrame, event: &Event, cx: &mut FrameCx<'_>) -> bool {
    match event {
        Event::None => false,
        Event::KeyPress(key) => frame.on_key_press(cx, key),
        Event::KeyHold(key) => frame.on_key_hold(cx, key),
        Event::KeyRepeat(key) => frame.on_key_repeat(cx, key),
        Event::KeyRelease(key) => frame.on_key_release(cx, key),
        Event::MouseKeyPress(button) => frame.on_mouse_key_press(cx, button),
        Event::MouseKeyRelease(button) => frame.on_mouse_key_release(cx, button),
        Event::MouseMove(motion) => frame.on_mouse_move(cx, motion),
        Event::MouseScroll(scroll) => frame.on_mouse_scroll(cx, scroll),
        Event::WindowExit => {
            frame.on_window_exit(cx);
            true
        }
        Event::WindowResize { width, height } => {
            frame.on_window_resize(cx, *width, *height);
            true
        }
        Event::WindowLoseFocus => {
            frame.on_window_lose_keyboard_focus(cx);
            true
        }
        Event::WindowRegainFocus => {
            frame.on_window_regain_keyboard_focus(cx);
            true
        }
        Event::WindowMouseLeave => {
            frame.on_window_mouse_leave(cx);
            true
        }
        Event::WindowMouseEnter => {
            frame.on_window_mouse_enter(cx);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::keys::KeyCode;
    use crate::app::input::platform::ScriptedPlatform;

    /// Frame that keeps every default
    struct Inert;

    impl InputFrame for Inert {
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct Counter {
        presses: usize,
    }

    impl InputFrame for Counter {
        fn on_key_press(&mut self, _cx: &mut FrameCx<'_>, _event: &KeyEvent) -> bool {
            self.presses += 1;
            true
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_defaults_ignore_input_and_apply_window_defaults() {
        let mut input = InputContext::default();
        let mut platform = ScriptedPlatform::new();
        let mut frame = Inert;

        {
            let mut cx = FrameCx::new(&mut input, &mut platform);
            let press = Event::KeyPress(KeyEvent::new(KeyCode::A));
            assert!(!route_event(&mut frame, &press, &mut cx));
            route_event(
                &mut frame,
                &Event::WindowResize {
                    width: 640,
                    height: 480,
                },
                &mut cx,
            );
            route_event(&mut frame, &Event::WindowExit, &mut cx);
        }

        assert_eq!(platform.requested_size(), Some((640, 480)));
        assert!(platform.is_closed());
    }

    #[test]
    fn test_route_reaches_overridden_callback() {
        let mut input = InputContext::default();
        let mut platform = ScriptedPlatform::new();
        let mut frame = Counter::default();
        let mut cx = FrameCx::new(&mut input, &mut platform);

        assert!(route_event(
            &mut frame,
            &Event::KeyPress(KeyEvent::new(KeyCode::Enter)),
            &mut cx
        ));
        assert!(!route_event(
            &mut frame,
            &Event::KeyRelease(KeyEvent::new(KeyCode::Enter)),
            &mut cx
        ));
        assert!(!route_event(&mut frame, &Event::None, &mut cx));
        assert_eq!(frame.presses, 1);
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Inert.name().ends_with("Inert"));
    }

    #[test]
    fn test_warp_through_context() {
        let mut input = InputContext::default();
        let mut platform = ScriptedPlatform::new();
        {
            let mut cx = FrameCx::new(&mut input, &mut platform);
            cx.warp_cursor_to(50, 60);
            assert_eq!(cx.state().cursor(), (50, 60));
        }
        assert_eq!(platform.warps(), &[(50, 60)]);
        assert_eq!(input.pending_warps().len(), 1);
    }
}
