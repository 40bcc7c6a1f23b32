//! GUI element tree
//!
//! An [`Element`] exclusively owns its children; the parent link is an
//! [`ElementId`] used only for focus-ancestry queries. Behavior lives in a
//! boxed [`Widget`], which receives an [`ElementCx`] on every callback.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::geometry::Rect;
use super::listener::EventListener;
use super::render::{Fill, Renderer};
use super::widgets::Panel;
use crate::app::input::{InputState, KeyEvent, MouseKeyEvent, MouseMoveEvent, MouseScrollEvent};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique element identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocates a fresh id
    pub fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer capture change requested by a widget callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    Capture,
    Release,
}

/// Context handed to a widget callback
pub struct ElementCx<'a> {
    id: ElementId,
    rect: Rect,
    input: &'a InputState,
    capture: Option<CaptureRequest>,
    listeners: Vec<EventListener>,
}

impl<'a> ElementCx<'a> {
    pub fn new(id: ElementId, rect: Rect, input: &'a InputState) -> Self {
        Self {
            id,
            rect,
            input,
            capture: None,
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn input(&self) -> &InputState {
        self.input
    }

    /// Routes every mouse move to this element until released
    pub fn capture_mouse(&mut self) {
        self.capture = Some(CaptureRequest::Capture);
    }

    /// Gives up pointer capture if this element holds it
    pub fn release_mouse(&mut self) {
        self.capture = Some(CaptureRequest::Release);
    }

    /// Attaches a listener to this element after the callback returns
    pub fn add_listener(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn capture_request(&self) -> Option<CaptureRequest> {
        self.capture
    }

    pub(crate) fn finish(self) -> (Option<CaptureRequest>, Vec<EventListener>) {
        (self.capture, self.listeners)
    }
}

/// Element behavior
///
/// Boolean returns report whether the event was consumed; an unconsumed key
/// or scroll event falls through to the manager's extra frame.
pub trait Widget: Any {
    fn on_mouse_enter(&mut self, _cx: &mut ElementCx<'_>, _event: &MouseMoveEvent) -> bool {
        false
    }

    fn on_mouse_leave(&mut self, _cx: &mut ElementCx<'_>) -> bool {
        false
    }

    fn on_mouse_move_inside(&mut self, _cx: &mut ElementCx<'_>, _event: &MouseMoveEvent) -> bool {
        false
    }

    fn on_mouse_key_press(&mut self, _cx: &mut ElementCx<'_>, _event: &MouseKeyEvent) -> bool {
        false
    }

    fn on_mouse_key_release(&mut self, _cx: &mut ElementCx<'_>, _event: &MouseKeyEvent) -> bool {
        false
    }

    fn on_mouse_scroll(&mut self, _cx: &mut ElementCx<'_>, _event: &MouseScrollEvent) -> bool {
        false
    }

    fn on_gain_focus(&mut self, _cx: &mut ElementCx<'_>) -> bool {
        false
    }

    fn on_lose_focus(&mut self, _cx: &mut ElementCx<'_>) -> bool {
        false
    }

    fn on_key_press(&mut self, _cx: &mut ElementCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_repeat(&mut self, _cx: &mut ElementCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_hold(&mut self, _cx: &mut ElementCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_key_release(&mut self, _cx: &mut ElementCx<'_>, _event: &KeyEvent) -> bool {
        false
    }

    fn on_render(&self, renderer: &mut dyn Renderer, rect: Rect, fill: &Fill) {
        renderer.draw_rect(rect, fill);
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub struct Element {
    id: ElementId,
    rect: Rect,
    fill: Fill,
    visible: bool,
    parent: Option<ElementId>,
    widget: Box<dyn Widget>,
    listeners: Vec<EventListener>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(rect: Rect, widget: impl Widget) -> Self {
        Self {
            id: ElementId::next(),
            rect,
            fill: Fill::None,
            visible: true,
            parent: None,
            widget: Box::new(widget),
            listeners: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Inert container element
    pub fn panel(rect: Rect) -> Self {
        Self::new(rect, Panel)
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_listener(mut self, listener: EventListener) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn fill(&self) -> &Fill {
        &self.fill
    }

    pub fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn listeners(&self) -> &[EventListener] {
        &self.listeners
    }

    /// Adopts `child`; returns false if a node with its id is already in this subtree
    pub fn add_child(&mut self, mut child: Element) -> bool {
        if self.find(child.id).is_some() {
            debug!(parent = %self.id, child = %child.id, "Rejected adoption of an element already in the tree");
            return false;
        }
        child.parent = Some(self.id);
        self.children.push(child);
        true
    }

    /// Detaches the descendant `id` with its subtree
    pub fn remove_child(&mut self, id: ElementId) -> Option<Element> {
        if let Some(index) = self.children.iter().position(|child| child.id == id) {
            let mut child = self.children.remove(index);
            child.parent = None;
            return Some(child);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_child(id))
    }

    pub fn add_listener(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Polls this node's listeners, then its children's
    ///
    /// Run-once listeners that have fired are dropped afterwards.
    pub fn update(&mut self) {
        for listener in &mut self.listeners {
            listener.update();
        }
        self.listeners.retain(|listener| !listener.is_spent());

        for child in &mut self.children {
            child.update();
        }
    }

    pub fn widget<T: Widget>(&self) -> Option<&T> {
        self.widget.as_any().downcast_ref::<T>()
    }

    pub fn widget_mut<T: Widget>(&mut self) -> Option<&mut T> {
        self.widget.as_any_mut().downcast_mut::<T>()
    }

    /// This node or a descendant with the given id
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Depth-first pre-order hit test; every later match overwrites `hit`
    pub fn hit_test(&self, x: i32, y: i32, hit: &mut Option<ElementId>) {
        if !self.visible {
            return;
        }
        if self.rect.contains(x, y) {
            *hit = Some(self.id);
        }
        for child in &self.children {
            child.hit_test(x, y, hit);
        }
    }

    /// Renders this node, then its children; hidden subtrees are skipped
    pub fn render(&self, renderer: &mut dyn Renderer) {
        if !self.visible {
            return;
        }
        renderer.begin_element(self.id, self.rect);
        self.widget.on_render(renderer, self.rect, &self.fill);
        for child in &self.children {
            child.render(renderer);
        }
    }

    /// Runs one widget callback and collects what it asked for
    pub(crate) fn deliver<R>(
        &mut self,
        input: &InputState,
        callback: impl FnOnce(&mut dyn Widget, &mut ElementCx<'_>) -> R,
    ) -> (R, Option<CaptureRequest>) {
        let mut cx = ElementCx::new(self.id, self.rect, input);
        let result = callback(self.widget.as_mut(), &mut cx);
        let (capture, listeners) = cx.finish();
        self.listeners.extend(listeners);
        (result, capture)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("fill", &self.fill)
            .field("visible", &self.visible)
            .field("parent", &self.parent)
            .field("listeners", &self.listeners.len())
            .field("children", &self.children)
            .finish()
    }
}
