//! Application module
//!
//! The input pipeline and GUI core, plus the winit shell that runs them.

pub mod camera;
pub mod config;
pub mod error;
pub mod gui;
pub mod input;
mod runner;
mod window;

pub use camera::LookCamera;
pub use self::config::{AppConfig, InputConfig, WindowConfig};
pub use error::AppError;
pub use runner::{App, demo_screen, run};
pub use window::{initial_size, window_attributes_from_config};
