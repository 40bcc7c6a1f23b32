//! Built-in widgets

use std::any::Any;
use std::fmt;

use tracing::debug;

use super::element::{ElementCx, Widget};
use super::geometry::Rect;
use super::render::{Fill, Renderer};
use crate::app::input::{KeyCode, KeyEvent, MouseButton, MouseKeyEvent, MouseMoveEvent};

/// Inert container; draws its fill and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct Panel;

impl Widget for Panel {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Clickable button
///
/// A click is a left press followed by a left release while still hovered,
/// or Enter/Space while focused.
#[derive(Default)]
pub struct Button {
    hover_fill: Fill,
    pressed_fill: Fill,
    hovered: bool,
    pressed: bool,
    focused: bool,
    clicks: u32,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_click(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(action));
        self
    }

    pub fn with_hover_fill(mut self, fill: Fill) -> Self {
        self.hover_fill = fill;
        self
    }

    pub fn with_pressed_fill(mut self, fill: Fill) -> Self {
        self.pressed_fill = fill;
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    fn click(&mut self, cx: &ElementCx<'_>) {
        self.clicks += 1;
        debug!(element = %cx.id(), clicks = self.clicks, "Button clicked");
        if let Some(action) = self.on_click.as_mut() {
            action();
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .field("focused", &self.focused)
            .field("clicks", &self.clicks)
            .finish_non_exhaustive()
    }
}

impl Widget for Button {
    fn on_mouse_enter(&mut self, _cx: &mut ElementCx<'_>, _event: &MouseMoveEvent) -> bool {
        self.hovered = true;
        true
    }

    fn on_mouse_leave(&mut self, _cx: &mut ElementCx<'_>) -> bool {
        self.hovered = false;
        self.pressed = false;
        true
    }

    fn on_mouse_key_press(&mut self, _cx: &mut ElementCx<'_>, event: &MouseKeyEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        self.pressed = true;
        true
    }

    fn on_mouse_key_release(&mut self, cx: &mut ElementCx<'_>, event: &MouseKeyEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        let was_pressed = std::mem::take(&mut self.pressed);
        if was_pressed && self.hovered {
            self.click(cx);
        }
        true
    }

    fn on_gain_focus(&mut self, _cx: &mut ElementCx<'_>) -> bool {
        self.focused = true;
        true
    }

    fn on_lose_focus(&mut self, _cx: &mut ElementCx<'_>) -> bool {
        self.focused = false;
        true
    }

    fn on_key_press(&mut self, cx: &mut ElementCx<'_>, event: &KeyEvent) -> bool {
        match event.key {
            KeyCode::Enter | KeyCode::Space => {
                self.click(cx);
                true
            }
            _ => false,
        }
    }

    fn on_render(&self, renderer: &mut dyn Renderer, rect: Rect, fill: &Fill) {
        let fill = if self.pressed && !self.pressed_fill.is_none() {
            &self.pressed_fill
        } else if self.hovered && !self.hover_fill.is_none() {
            &self.hover_fill
        } else {
            fill
        };
        renderer.draw_rect(rect, fill);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Horizontal slider over `0.0..=1.0`
///
/// Dragging captures the pointer so the knob keeps following the cursor
/// outside the track. Arrow keys step the value while focused.
pub struct Slider {
    value: f32,
    step: f32,
    knob_width: i32,
    knob_fill: Fill,
    dragging: bool,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            step: 0.1,
            knob_width: 8,
            knob_fill: Fill::flat(230, 230, 230),
            dragging: false,
            on_change: None,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn with_knob_fill(mut self, fill: Fill) -> Self {
        self.knob_fill = fill;
        self
    }

    pub fn on_change(mut self, action: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(action));
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn set_value(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        if value == self.value {
            return;
        }
        self.value = value;
        if let Some(action) = self.on_change.as_mut() {
            action(value);
        }
    }

    fn set_from_cursor(&mut self, rect: Rect, x: i32) {
        if rect.w <= 0 {
            return;
        }
        self.set_value((i64::from(x) - i64::from(rect.x)) as f32 / rect.w as f32);
    }

    fn knob_rect(&self, rect: Rect) -> Rect {
        let travel = rect.w.saturating_sub(self.knob_width).max(0);
        let offset = (travel as f32 * self.value).round() as i32;
        Rect::new(
            rect.x.saturating_add(offset),
            rect.y,
            self.knob_width.min(rect.w),
            rect.h,
        )
    }

    fn step_by_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Left | KeyCode::Down => self.set_value(self.value - self.step),
            KeyCode::Right | KeyCode::Up => self.set_value(self.value + self.step),
            _ => return false,
        }
        true
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("value", &self.value)
            .field("step", &self.step)
            .field("dragging", &self.dragging)
            .finish_non_exhaustive()
    }
}

impl Widget for Slider {
    fn on_mouse_move_inside(&mut self, cx: &mut ElementCx<'_>, event: &MouseMoveEvent) -> bool {
        if self.dragging {
            self.set_from_cursor(cx.rect(), event.x);
        }
        true
    }

    fn on_mouse_key_press(&mut self, cx: &mut ElementCx<'_>, event: &MouseKeyEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        self.dragging = true;
        cx.capture_mouse();
        self.set_from_cursor(cx.rect(), event.x);
        true
    }

    fn on_mouse_key_release(&mut self, cx: &mut ElementCx<'_>, event: &MouseKeyEvent) -> bool {
        if event.button != MouseButton::Left || !self.dragging {
            return false;
        }
        self.dragging = false;
        cx.release_mouse();
        true
    }

    fn on_key_press(&mut self, _cx: &mut ElementCx<'_>, event: &KeyEvent) -> bool {
        self.step_by_key(event.key)
    }

    fn on_key_repeat(&mut self, _cx: &mut ElementCx<'_>, event: &KeyEvent) -> bool {
        self.step_by_key(event.key)
    }

    fn on_render(&self, renderer: &mut dyn Renderer, rect: Rect, fill: &Fill) {
        renderer.draw_rect(rect, fill);
        renderer.draw_rect(self.knob_rect(rect), &self.knob_fill);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::app::gui::element::{CaptureRequest, ElementId};
    use crate::app::gui::render::DrawList;
    use crate::app::input::InputState;

    fn left(x: i32, y: i32) -> MouseKeyEvent {
        MouseKeyEvent {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    fn moved(x: i32, y: i32) -> MouseMoveEvent {
        MouseMoveEvent {
            x,
            y,
            rel_x: 0,
            rel_y: 0,
        }
    }

    #[test]
    fn test_button_clicks_on_release_while_hovered() {
        let input = InputState::new();
        let clicked = Rc::new(Cell::new(0));
        let counter = clicked.clone();
        let mut button = Button::new().on_click(move || counter.set(counter.get() + 1));
        let mut cx = ElementCx::new(ElementId::next(), Rect::new(0, 0, 10, 10), &input);

        button.on_mouse_enter(&mut cx, &moved(1, 1));
        button.on_mouse_key_press(&mut cx, &left(1, 1));
        assert!(button.is_pressed());
        button.on_mouse_key_release(&mut cx, &left(1, 1));

        // Leaving cancels the pending press
        button.on_mouse_key_press(&mut cx, &left(1, 1));
        button.on_mouse_leave(&mut cx);
        button.on_mouse_key_release(&mut cx, &left(1, 1));

        assert_eq!(clicked.get(), 1);
        assert_eq!(button.clicks(), 1);
    }

    #[test]
    fn test_button_renders_hover_fill() {
        let input = InputState::new();
        let hover = Fill::flat(0, 255, 0);
        let mut button = Button::new().with_hover_fill(hover);
        let mut cx = ElementCx::new(ElementId::next(), Rect::new(0, 0, 10, 10), &input);
        button.on_mouse_enter(&mut cx, &moved(1, 1));

        let mut list = DrawList::new();
        button.on_render(&mut list, Rect::new(0, 0, 10, 10), &Fill::flat(9, 9, 9));
        assert_eq!(list.commands()[0].fill, hover);
    }

    #[test]
    fn test_slider_drag_captures_and_tracks_cursor() {
        let input = InputState::new();
        let rect = Rect::new(100, 0, 200, 20);
        let mut slider = Slider::new(0.0);

        let mut cx = ElementCx::new(ElementId::next(), rect, &input);
        assert!(slider.on_mouse_key_press(&mut cx, &left(150, 10)));
        assert_eq!(cx.capture_request(), Some(CaptureRequest::Capture));
        assert!((slider.value() - 0.25).abs() < 1e-6);

        let mut cx = ElementCx::new(ElementId::next(), rect, &input);
        slider.on_mouse_move_inside(&mut cx, &moved(500, 10));
        assert_eq!(slider.value(), 1.0);

        slider.on_mouse_key_release(&mut cx, &left(500, 10));
        assert_eq!(cx.capture_request(), Some(CaptureRequest::Release));
        assert!(!slider.is_dragging());

        // Not dragging: moves no longer change the value
        slider.on_mouse_move_inside(&mut cx, &moved(100, 10));
        assert_eq!(slider.value(), 1.0);
    }

    #[test]
    fn test_slider_arrow_keys_step_and_clamp() {
        let input = InputState::new();
        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        let mut slider = Slider::new(0.95).on_change(move |_| counter.set(counter.get() + 1));
        let mut cx = ElementCx::new(ElementId::next(), Rect::new(0, 0, 100, 10), &input);

        assert!(slider.on_key_press(&mut cx, &KeyEvent::new(KeyCode::Right)));
        assert_eq!(slider.value(), 1.0);
        assert!(slider.on_key_repeat(&mut cx, &KeyEvent::new(KeyCode::Right)));
        assert_eq!(changes.get(), 1);

        assert!(slider.on_key_press(&mut cx, &KeyEvent::new(KeyCode::Left)));
        assert!((slider.value() - 0.9).abs() < 1e-6);
        assert!(!slider.on_key_press(&mut cx, &KeyEvent::new(KeyCode::W)));
    }

    #[test]
    fn test_slider_renders_track_and_knob() {
        let slider = Slider::new(1.0);
        let mut list = DrawList::new();
        slider.on_render(&mut list, Rect::new(0, 0, 108, 10), &Fill::flat(40, 40, 40));
        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[1].rect, Rect::new(100, 0, 8, 10));
    }
}
