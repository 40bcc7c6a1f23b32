//! Window creation from configuration

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use crate::app::config::WindowConfig;

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

/// Configured window size in whole pixels, used before the window exists
pub fn initial_size(config: &WindowConfig) -> (u32, u32) {
    (
        config.width.max(1.0).round() as u32,
        config.height.max(1.0).round() as u32,
    )
}
