//! Input event pipeline
//!
//! Turns raw platform input into a canonical event stream and routes it
//! through the single current input frame:
//!
//! ```text
//! Platform (winit / scripted) ──▶ Translator + warp filter ──▶ event queue
//!                                                               │
//!                                     key-hold synthesizer ─────┤ (appended)
//!                                                               ▼
//!                                         Dispatcher ──▶ current InputFrame
//!                                                        (GuiManager → extra frame)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut input = InputContext::new(config.input.clone());
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.set_current_input_frame(Some(Box::new(gui)));
//!
//! // In window_event()
//! backend.handle_window_event(&event);
//!
//! // Once per frame
//! pump_frame(&mut input, &mut backend, &mut dispatcher);
//! ```

mod collector;
mod context;
mod dispatch;
mod events;
mod frame;
mod hold;
mod keys;
mod platform;
mod state;
mod translate;
mod warp;

// Re-export public API
pub use collector::WinitBackend;
pub use context::InputContext;
pub use dispatch::{Dispatcher, pump_frame};
pub use events::{
    Event, EventKind, KeyEvent, Modifiers, MouseKeyEvent, MouseMoveEvent, MouseScrollEvent,
};
pub use frame::{FrameCx, InputFrame, default_window_exit, default_window_resize, route_event};
pub use hold::KeyHoldSet;
pub use keys::{KeyCode, MouseButton};
pub use platform::{Platform, RawEvent, ScriptedPlatform};
pub use state::{ButtonState, FlatInputRep, InputState, MouseButtons, MouseState};
pub use warp::{MouseWarp, WarpMatch, WarpQueue};
