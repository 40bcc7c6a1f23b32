//! GUI manager: hover, keyboard focus and pointer capture over an element forest
//!
//! The manager is itself an [`InputFrame`]. It turns canonical mouse and key
//! events into per-element enter/leave/press/release/focus callbacks and
//! forwards whatever the elements leave unconsumed to an optional extra frame.
//!
//! All three references (`moused_over`, `clicked_on`, `keyboard_focus`) are
//! element ids; an id whose element has been removed resolves to nothing.

use std::any::Any;

use tracing::{debug, trace};

use super::element::{CaptureRequest, Element, ElementCx, ElementId, Widget};
use super::render::Renderer;
use crate::app::input::{
    FrameCx, InputFrame, InputState, KeyEvent, MouseKeyEvent, MouseMoveEvent, MouseScrollEvent,
    default_window_exit, default_window_resize,
};

#[derive(Default)]
pub struct GuiManager {
    /// Top-level elements in insertion order; later elements are on top
    elements: Vec<Element>,
    moused_over: Option<ElementId>,
    clicked_on: Option<ElementId>,
    keyboard_focus: Option<ElementId>,
    extra_frame: Option<Box<dyn InputFrame>>,
}

impl GuiManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_frame(mut self, frame: Box<dyn InputFrame>) -> Self {
        self.extra_frame = Some(frame);
        self
    }

    /// Replaces the fallback frame, returning the old one
    pub fn set_extra_frame(
        &mut self,
        frame: Option<Box<dyn InputFrame>>,
    ) -> Option<Box<dyn InputFrame>> {
        std::mem::replace(&mut self.extra_frame, frame)
    }

    pub fn extra_frame_mut(&mut self) -> Option<&mut (dyn InputFrame + 'static)> {
        self.extra_frame.as_deref_mut()
    }

    /// Downcast the fallback frame to its concrete type
    pub fn extra_as<T: InputFrame + 'static>(&mut self) -> Option<&mut T> {
        self.extra_frame
            .as_deref_mut()
            .and_then(|frame| frame.as_any_mut().downcast_mut::<T>())
    }

    /// Adds a top-level element above all existing ones
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        debug!(element = %id, rect = ?element.rect(), "Adding GUI element");
        self.elements.push(element);
        id
    }

    /// Detaches an element and its subtree
    ///
    /// Hover, capture and focus references into the removed subtree are
    /// cleared without notifying the removed elements.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let top_level = self.elements.iter().position(|element| element.id() == id);
        let removed = match top_level {
            Some(index) => self.elements.remove(index),
            None => self
                .elements
                .iter_mut()
                .find_map(|element| element.remove_child(id))?,
        };

        for slot in [
            &mut self.moused_over,
            &mut self.clicked_on,
            &mut self.keyboard_focus,
        ] {
            if slot.is_some_and(|held| removed.find(held).is_some()) {
                *slot = None;
            }
        }

        debug!(element = %id, "Removed GUI element");
        Some(removed)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find_map(|element| element.find(id))
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find_map(|element| element.find_mut(id))
    }

    pub fn widget<T: Widget>(&self, id: ElementId) -> Option<&T> {
        self.element(id).and_then(Element::widget::<T>)
    }

    pub fn widget_mut<T: Widget>(&mut self, id: ElementId) -> Option<&mut T> {
        self.element_mut(id).and_then(Element::widget_mut::<T>)
    }

    pub fn moused_over(&self) -> Option<ElementId> {
        self.moused_over
    }

    pub fn clicked_on(&self) -> Option<ElementId> {
        self.clicked_on
    }

    pub fn keyboard_focus(&self) -> Option<ElementId> {
        self.keyboard_focus
    }

    /// Whether `id` holds keyboard focus or is an ancestor of the element that does
    pub fn is_focused(&self, id: ElementId) -> bool {
        let mut cursor = self.keyboard_focus;
        while let Some(current) = cursor {
            if current == id {
                return true;
            }
            cursor = self.element(current).and_then(Element::parent);
        }
        false
    }

    /// Topmost visible element containing the point
    ///
    /// Elements are tested depth-first in insertion order and the last match
    /// wins, so children beat their parents and later siblings beat earlier ones.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ElementId> {
        let mut hit = None;
        for element in &self.elements {
            element.hit_test(x, y, &mut hit);
        }
        hit
    }

    /// Polls every element's listeners
    pub fn update(&mut self) {
        for element in &mut self.elements {
            element.update();
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        for element in &self.elements {
            element.render(renderer);
        }
    }

    /// Runs a widget callback on `id` and applies its capture request
    ///
    /// Stale ids report the event unconsumed.
    fn send(
        &mut self,
        id: ElementId,
        input: &InputState,
        callback: impl FnOnce(&mut dyn Widget, &mut ElementCx<'_>) -> bool,
    ) -> bool {
        let Some(element) = self.element_mut(id) else {
            trace!(element = %id, "Dropping callback for removed element");
            return false;
        };
        let (consumed, capture) = element.deliver(input, callback);

        match capture {
            Some(CaptureRequest::Capture) => {
                trace!(element = %id, "Pointer captured");
                self.clicked_on = Some(id);
            }
            Some(CaptureRequest::Release) if self.clicked_on == Some(id) => {
                trace!(element = %id, "Pointer released");
                self.clicked_on = None;
            }
            _ => {}
        }
        consumed
    }

    /// Capture holder, if it still exists
    fn live_capture(&mut self) -> Option<ElementId> {
        let held = self.clicked_on?;
        if self.element(held).is_some() {
            return Some(held);
        }
        self.clicked_on = None;
        None
    }

    fn forward(
        &mut self,
        cx: &mut FrameCx<'_>,
        callback: impl FnOnce(&mut dyn InputFrame, &mut FrameCx<'_>) -> bool,
    ) -> bool {
        match self.extra_frame.as_deref_mut() {
            Some(frame) => callback(frame, cx),
            None => false,
        }
    }

    fn track_mouse(&mut self, input: &InputState, event: &MouseMoveEvent) -> bool {
        let target = self
            .live_capture()
            .or_else(|| self.hit_test(event.x, event.y));

        match (self.moused_over, target) {
            (None, None) => {}
            (Some(old), Some(new)) if old == new => {
                self.send(new, input, |widget, ecx| {
                    widget.on_mouse_move_inside(ecx, event)
                });
            }
            (old, new) => {
                if let Some(old) = old {
                    self.send(old, input, |widget, ecx| widget.on_mouse_leave(ecx));
                }
                self.moused_over = new;
                if let Some(new) = new {
                    self.send(new, input, |widget, ecx| widget.on_mouse_enter(ecx, event));
                }
            }
        }

        self.moused_over.is_some()
    }

    fn press(&mut self, input: &InputState, event: &MouseKeyEvent) -> bool {
        let Some(hovered) = self.moused_over else {
            if let Some(old) = self.keyboard_focus.take() {
                debug!(element = %old, "Keyboard focus cleared");
                self.send(old, input, |widget, ecx| widget.on_lose_focus(ecx));
            }
            return false;
        };

        if self.keyboard_focus != Some(hovered) {
            if let Some(old) = self.keyboard_focus.take() {
                self.send(old, input, |widget, ecx| widget.on_lose_focus(ecx));
            }
            debug!(element = %hovered, "Keyboard focus changed");
            self.keyboard_focus = Some(hovered);
            self.send(hovered, input, |widget, ecx| widget.on_gain_focus(ecx));
        }

        self.send(hovered, input, |widget, ecx| {
            widget.on_mouse_key_press(ecx, event)
        });
        true
    }

    fn release(&mut self, input: &InputState, event: &MouseKeyEvent) -> bool {
        let Some(target) = self.live_capture().or(self.moused_over) else {
            return false;
        };
        self.send(target, input, |widget, ecx| {
            widget.on_mouse_key_release(ecx, event)
        });
        true
    }

    fn to_focus(
        &mut self,
        input: &InputState,
        callback: impl FnOnce(&mut dyn Widget, &mut ElementCx<'_>) -> bool,
    ) -> bool {
        match self.keyboard_focus {
            Some(focus) => self.send(focus, input, callback),
            None => false,
        }
    }
}

impl InputFrame for GuiManager {
    fn name(&self) -> &str {
        "GuiManager"
    }

    fn on_key_press(&mut self, cx: &mut FrameCx<'_>, event: &KeyEvent) -> bool {
        self.to_focus(cx.state(), |widget, ecx| widget.on_key_press(ecx, event))
            || self.forward(cx, |frame, cx| frame.on_key_press(cx, event))
    }

    fn on_key_repeat(&mut self, cx: &mut FrameCx<'_>, event: &KeyEvent) -> bool {
        self.to_focus(cx.state(), |widget, ecx| widget.on_key_repeat(ecx, event))
            || self.forward(cx, |frame, cx| frame.on_key_repeat(cx, event))
    }

    fn on_key_hold(&mut self, cx: &mut FrameCx<'_>, event: &KeyEvent) -> bool {
        self.to_focus(cx.state(), |widget, ecx| widget.on_key_hold(ecx, event))
            || self.forward(cx, |frame, cx| frame.on_key_hold(cx, event))
    }

    fn on_key_release(&mut self, cx: &mut FrameCx<'_>, event: &KeyEvent) -> bool {
        self.to_focus(cx.state(), |widget, ecx| widget.on_key_release(ecx, event))
            || self.forward(cx, |frame, cx| frame.on_key_release(cx, event))
    }

    fn on_mouse_key_press(&mut self, cx: &mut FrameCx<'_>, event: &MouseKeyEvent) -> bool {
        self.press(cx.state(), event)
            || self.forward(cx, |frame, cx| frame.on_mouse_key_press(cx, event))
    }

    fn on_mouse_key_release(&mut self, cx: &mut FrameCx<'_>, event: &MouseKeyEvent) -> bool {
        self.release(cx.state(), event)
            || self.forward(cx, |frame, cx| frame.on_mouse_key_release(cx, event))
    }

    fn on_mouse_move(&mut self, cx: &mut FrameCx<'_>, event: &MouseMoveEvent) -> bool {
        self.track_mouse(cx.state(), event)
            || self.forward(cx, |frame, cx| frame.on_mouse_move(cx, event))
    }

    fn on_mouse_scroll(&mut self, cx: &mut FrameCx<'_>, event: &MouseScrollEvent) -> bool {
        let consumed = match self.moused_over {
            Some(hovered) => self.send(hovered, cx.state(), |widget, ecx| {
                widget.on_mouse_scroll(ecx, event)
            }),
            None => false,
        };
        consumed || self.forward(cx, |frame, cx| frame.on_mouse_scroll(cx, event))
    }

    fn on_window_exit(&mut self, cx: &mut FrameCx<'_>) {
        match self.extra_frame.as_deref_mut() {
            Some(frame) => frame.on_window_exit(cx),
            None => default_window_exit(cx),
        }
    }

    fn on_window_resize(&mut self, cx: &mut FrameCx<'_>, width: u32, height: u32) {
        match self.extra_frame.as_deref_mut() {
            Some(frame) => frame.on_window_resize(cx, width, height),
            None => default_window_resize(cx, width, height),
        }
    }

    fn on_window_lose_keyboard_focus(&mut self, cx: &mut FrameCx<'_>) {
        if let Some(frame) = self.extra_frame.as_deref_mut() {
            frame.on_window_lose_keyboard_focus(cx);
        }
    }

    fn on_window_regain_keyboard_focus(&mut self, cx: &mut FrameCx<'_>) {
        if let Some(frame) = self.extra_frame.as_deref_mut() {
            frame.on_window_regain_keyboard_focus(cx);
        }
    }

    fn on_window_mouse_leave(&mut self, cx: &mut FrameCx<'_>) {
        if let Some(hovered) = self.moused_over.take() {
            self.send(hovered, cx.state(), |widget, ecx| widget.on_mouse_leave(ecx));
        }
        if let Some(frame) = self.extra_frame.as_deref_mut() {
            frame.on_window_mouse_leave(cx);
        }
    }

    fn on_window_mouse_enter(&mut self, cx: &mut FrameCx<'_>) {
        if let Some(frame) = self.extra_frame.as_deref_mut() {
            frame.on_window_mouse_enter(cx);
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
