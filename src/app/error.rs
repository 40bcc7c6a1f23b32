//! Application shell errors
//!
//! The input and GUI core never fail; only bringing up the window system can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("event loop failure: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
