//! Retained-mode GUI on top of the input pipeline
//!
//! A [`GuiManager`] owns a forest of [`Element`]s and is installed as the
//! current input frame. It tracks the hovered, captured and keyboard-focused
//! elements and forwards whatever they leave unconsumed to an extra frame
//! (typically the game or camera controller).

mod element;
mod geometry;
mod listener;
mod manager;
mod render;
pub mod timer;
mod widgets;

pub use element::{CaptureRequest, Element, ElementCx, ElementId, Widget};
pub use geometry::Rect;
pub use listener::EventListener;
pub use manager::GuiManager;
pub use render::{Color, DrawCommand, DrawList, Fill, Renderer, TextureHandle};
pub use timer::{Clock, ManualClock, SystemClock};
pub use widgets::{Button, Panel, Slider};
