//! Hearth
//!
//! An input event pipeline and GUI focus/dispatch engine on top of winit.

/// Input pipeline, GUI and the demo application shell
pub mod app;

/// Build metadata (version, target, compiler)
pub mod build_info;
