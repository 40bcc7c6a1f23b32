//! Raw input collection from winit events
//!
//! [`WinitBackend`] is the [`Platform`] the demo application runs on. winit
//! pushes window events at us between frames; they are buffered as
//! [`RawEvent`]s until the next polling pass drains them.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::ModifiersKeyState;
use winit::window::Window;

use super::events::Modifiers;
use super::platform::{Platform, RawEvent};

/// Collects raw input from winit events and performs display side effects
pub struct WinitBackend {
    window: Option<Arc<Window>>,
    pending: VecDeque<RawEvent>,
    /// Last cursor position reported by the window system
    cursor: Option<(i32, i32)>,
    modifiers: Modifiers,
    pixels_per_line: f32,
    exit_requested: bool,
}

impl WinitBackend {
    /// Creates a backend with no window attached yet
    pub fn new(pixels_per_line: f32) -> Self {
        Self {
            window: None,
            pending: VecDeque::new(),
            cursor: None,
            modifiers: Modifiers::default(),
            pixels_per_line: pixels_per_line.max(1.0),
            exit_requested: false,
        }
    }

    pub fn attach_window(&mut self, window: Arc<Window>) {
        self.window = Some(window);
    }

    /// Returns true once after the input core asked to close the display
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        let raw = match event {
            WindowEvent::KeyboardInput { event, .. } => match event.state {
                ElementState::Pressed => RawEvent::KeyDown(event.physical_key),
                ElementState::Released => RawEvent::KeyUp(event.physical_key),
            },

            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                let (left_shift, right_shift) = sides(
                    state.shift_key(),
                    modifiers.lshift_state(),
                    modifiers.rshift_state(),
                );
                let (left_ctrl, right_ctrl) = sides(
                    state.control_key(),
                    modifiers.lcontrol_state(),
                    modifiers.rcontrol_state(),
                );
                let (left_alt, right_alt) = sides(
                    state.alt_key(),
                    modifiers.lalt_state(),
                    modifiers.ralt_state(),
                );
                self.modifiers = Modifiers {
                    left_shift,
                    right_shift,
                    left_ctrl,
                    right_ctrl,
                    left_alt,
                    right_alt,
                };
                return;
            }

            WindowEvent::CursorMoved { position, .. } => {
                // `as` saturates, so off-screen positions clamp to the i32 range
                let x = position.x.round() as i32;
                let y = position.y.round() as i32;
                let (last_x, last_y) = self.cursor.unwrap_or((x, y));
                self.cursor = Some((x, y));
                RawEvent::MouseMotion {
                    x,
                    y,
                    rel_x: x.saturating_sub(last_x),
                    rel_y: y.saturating_sub(last_y),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self.cursor.unwrap_or_default();
                match state {
                    ElementState::Pressed => RawEvent::MouseButtonDown {
                        button: *button,
                        x,
                        y,
                    },
                    ElementState::Released => RawEvent::MouseButtonUp {
                        button: *button,
                        x,
                        y,
                    },
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Convert MouseScrollDelta to whole notches; `as` saturates huge deltas
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y.round() as i32,
                    MouseScrollDelta::PixelDelta(pos) => {
                        (pos.y as f32 / self.pixels_per_line).round() as i32
                    }
                };
                if amount == 0 {
                    return;
                }
                RawEvent::MouseWheel { amount }
            }

            WindowEvent::CloseRequested => RawEvent::Quit,
            WindowEvent::Resized(size) => RawEvent::Resized {
                width: size.width,
                height: size.height,
            },
            WindowEvent::Focused(true) => RawEvent::FocusGained,
            WindowEvent::Focused(false) => RawEvent::FocusLost,
            WindowEvent::CursorLeft { .. } => RawEvent::CursorLeft,
            WindowEvent::CursorEntered { .. } => RawEvent::CursorEntered,

            _ => return,
        };

        self.pending.push_back(raw);
    }

    /// Number of raw events waiting for the next poll
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Resolves which side of a modifier pair is down
///
/// Some platforms only report that "a shift key" is held; that counts as the
/// left one.
fn sides(any: bool, left: ModifiersKeyState, right: ModifiersKeyState) -> (bool, bool) {
    let left = left == ModifiersKeyState::Pressed;
    let right = right == ModifiersKeyState::Pressed;
    if any && !left && !right {
        (true, false)
    } else {
        (left && any, right && any)
    }
}

impl Platform for WinitBackend {
    fn poll_event(&mut self) -> Option<RawEvent> {
        self.pending.pop_front()
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn warp_mouse(&mut self, x: i32, y: i32) -> bool {
        let Some(window) = &self.window else {
            debug!(x, y, "Cursor warp before window creation ignored");
            return false;
        };
        match window.set_cursor_position(PhysicalPosition::new(x, y)) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Cursor warp unsupported");
                false
            }
        }
    }

    fn close_display(&mut self) {
        self.exit_requested = true;
    }

    fn resize_display(&mut self, width: u32, height: u32) {
        if let Some(window) = &self.window {
            // The window system answers with a Resized event if it differs
            let _ = window.request_inner_size(PhysicalSize::new(width, height));
        }
    }
}
