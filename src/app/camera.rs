//! First-person look camera driven by input events
//!
//! Installed as the GUI manager's extra frame, so it only sees what the GUI
//! leaves unconsumed. Holding the right mouse button looks around: every
//! genuine move rotates the view and warps the cursor back to the window
//! center. The warp's echo never comes back as a move event.

use std::any::Any;

use tracing::debug;

use crate::app::config::InputConfig;
use crate::app::input::{
    FrameCx, InputFrame, KeyCode, KeyEvent, MouseButton, MouseKeyEvent, MouseMoveEvent,
    default_window_resize,
};

const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone)]
pub struct LookCamera {
    /// Degrees, 0 looks down -Z
    yaw: f32,
    /// Degrees, clamped to +-89
    pitch: f32,
    position: [f32; 3],
    sensitivity: f32,
    move_speed: f32,
    looking: bool,
    center: (i32, i32),
}

impl LookCamera {
    pub fn new(config: &InputConfig, width: u32, height: u32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            position: [0.0; 3],
            sensitivity: config.look_sensitivity,
            move_speed: config.move_speed,
            looking: false,
            center: center_of(width, height),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn is_looking(&self) -> bool {
        self.looking
    }

    /// Window point the cursor is pinned to while looking
    pub fn center(&self) -> (i32, i32) {
        self.center
    }

    /// Rotate by a cursor delta in pixels
    pub fn look(&mut self, rel_x: i32, rel_y: i32) {
        self.yaw = (self.yaw + rel_x as f32 * self.sensitivity).rem_euclid(360.0);
        self.pitch =
            (self.pitch - rel_y as f32 * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move along the ground plane relative to the current yaw
    pub fn walk(&mut self, forward: f32, right: f32) {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        self.position[0] += (forward * sin + right * cos) * self.move_speed;
        self.position[2] += (-forward * cos + right * sin) * self.move_speed;
    }
}

fn center_of(width: u32, height: u32) -> (i32, i32) {
    ((width / 2) as i32, (height / 2) as i32)
}

impl InputFrame for LookCamera {
    fn name(&self) -> &str {
        "LookCamera"
    }

    fn on_key_press(&mut self, cx: &mut FrameCx<'_>, event: &KeyEvent) -> bool {
        if event.key != KeyCode::Escape {
            return false;
        }
        debug!("Escape pressed, closing display");
        cx.close_display();
        true
    }

    fn on_key_hold(&mut self, _cx: &mut FrameCx<'_>, event: &KeyEvent) -> bool {
        let (forward, right) = match event.key {
            KeyCode::W => (1.0, 0.0),
            KeyCode::S => (-1.0, 0.0),
            KeyCode::A => (0.0, -1.0),
            KeyCode::D => (0.0, 1.0),
            _ => return false,
        };
        self.walk(forward, right);
        true
    }

    fn on_mouse_key_press(&mut self, cx: &mut FrameCx<'_>, event: &MouseKeyEvent) -> bool {
        if event.button != MouseButton::Right {
            return false;
        }
        self.looking = true;
        cx.warp_cursor_to(self.center.0, self.center.1);
        true
    }

    fn on_mouse_key_release(&mut self, _cx: &mut FrameCx<'_>, event: &MouseKeyEvent) -> bool {
        if event.button != MouseButton::Right {
            return false;
        }
        self.looking = false;
        true
    }

    fn on_mouse_move(&mut self, cx: &mut FrameCx<'_>, event: &MouseMoveEvent) -> bool {
        if !self.looking {
            return false;
        }
        self.look(event.rel_x, event.rel_y);
        cx.warp_cursor_to(self.center.0, self.center.1);
        true
    }

    fn on_window_resize(&mut self, cx: &mut FrameCx<'_>, width: u32, height: u32) {
        self.center = center_of(width, height);
        default_window_resize(cx, width, height);
    }

    fn on_window_lose_keyboard_focus(&mut self, _cx: &mut FrameCx<'_>) {
        self.looking = false;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::{Event, InputContext, ScriptedPlatform, route_event};

    fn camera() -> LookCamera {
        LookCamera::new(&InputConfig::default(), 640, 480)
    }

    fn right(pressed: bool) -> Event {
        let event = MouseKeyEvent {
            button: MouseButton::Right,
            x: 10,
            y: 10,
        };
        if pressed {
            Event::MouseKeyPress(event)
        } else {
            Event::MouseKeyRelease(event)
        }
    }

    fn moved(rel_x: i32, rel_y: i32) -> Event {
        Event::MouseMove(MouseMoveEvent {
            x: 320 + rel_x,
            y: 240 + rel_y,
            rel_x,
            rel_y,
        })
    }

    #[test]
    fn test_right_drag_looks_and_recenters() {
        let mut input = InputContext::default();
        let mut platform = ScriptedPlatform::new();
        let mut cam = camera();
        {
            let mut cx = FrameCx::new(&mut input, &mut platform);
            assert!(!route_event(&mut cam, &moved(5, 5), &mut cx));
            assert!(route_event(&mut cam, &right(true), &mut cx));
            assert!(route_event(&mut cam, &moved(20, -10), &mut cx));
            assert!(route_event(&mut cam, &right(false), &mut cx));
            assert!(!route_event(&mut cam, &moved(20, 0), &mut cx));
        }

        assert!((cam.yaw() - 3.0).abs() < 1e-4);
        assert!((cam.pitch() - 1.5).abs() < 1e-4);
        assert_eq!(platform.warps(), &[(320, 240), (320, 240)]);
        assert!(!cam.is_looking());
    }

    #[test]
    fn test_pitch_is_clamped_and_yaw_wraps() {
        let mut cam = camera();
        cam.look(0, -10_000);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        cam.look(-200, 0);
        assert!((cam.yaw() - 330.0).abs() < 1e-3);
    }

    #[test]
    fn test_hold_keys_walk() {
        let mut input = InputContext::default();
        let mut platform = ScriptedPlatform::new();
        let mut cam = camera();
        let mut cx = FrameCx::new(&mut input, &mut platform);

        for _ in 0..10 {
            route_event(&mut cam, &Event::KeyHold(KeyEvent::new(KeyCode::W)), &mut cx);
        }
        assert!(!route_event(
            &mut cam,
            &Event::KeyHold(KeyEvent::new(KeyCode::Q)),
            &mut cx
        ));

        let [x, y, z] = cam.position();
        assert!(x.abs() < 1e-4);
        assert_eq!(y, 0.0);
        assert!((z + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_recenters_and_resizes_display() {
        let mut input = InputContext::default();
        let mut platform = ScriptedPlatform::new();
        let mut cam = camera();
        route_event(
            &mut cam,
            &Event::WindowResize {
                width: 1000,
                height: 800,
            },
            &mut FrameCx::new(&mut input, &mut platform),
        );
        assert_eq!(cam.center(), (500, 400));
        assert_eq!(platform.requested_size(), Some((1000, 800)));
    }

    #[test]
    fn test_escape_closes_display() {
        let mut input = InputContext::default();
        let mut platform = ScriptedPlatform::new();
        let mut cam = camera();
        route_event(
            &mut cam,
            &Event::KeyPress(KeyEvent::new(KeyCode::Escape)),
            &mut FrameCx::new(&mut input, &mut platform),
        );
        assert!(platform.is_closed());
    }
}
