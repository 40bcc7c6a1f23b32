//! Main application handler for the demo

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::camera::LookCamera;
use super::config::AppConfig;
use super::error::AppError;
use super::gui::{Button, DrawList, Element, Fill, GuiManager, Rect, Slider, SystemClock, timer};
use super::input::{Dispatcher, InputContext, WinitBackend, pump_frame};
use super::window::{initial_size, window_attributes_from_config};
use crate::build_info;

/// Demo application: one window, a GUI screen and a look camera behind it
pub struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    backend: WinitBackend,
    input: InputContext,
    dispatcher: Dispatcher,
    draw_list: DrawList,
    last_update: Option<Instant>,
}

impl App {
    /// Creates the application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, version = %build_info::BUILD.tag(), "Starting");
        info!(?config.window, "Window configuration");
        debug!(?config.input, "Input configuration");

        let mut dispatcher = Dispatcher::new();
        dispatcher.set_current_input_frame(Some(Box::new(demo_screen(&config))));

        Self {
            backend: WinitBackend::new(config.input.pixels_per_scroll_line),
            input: InputContext::new(config.input.clone()),
            config,
            window: None,
            dispatcher,
            draw_list: DrawList::new(),
            last_update: None,
        }
    }

    /// Creates the application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        Self::new(config)
    }

    pub fn dispatcher(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    fn render(&mut self) {
        self.draw_list.clear();
        if let Some(gui) = self.dispatcher.current_as::<GuiManager>() {
            gui.render(&mut self.draw_list);
        }
        trace!(commands = self.draw_list.len(), "Recorded GUI draw list");
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Builds the demo screen: a panel holding a button and a slider, with the
/// look camera receiving whatever the GUI does not consume
pub fn demo_screen(config: &AppConfig) -> GuiManager {
    let (width, height) = initial_size(&config.window);
    let clock = Rc::new(SystemClock::new());
    let clicks = Rc::new(Cell::new(0u32));

    let counter = clicks.clone();
    let button = Element::new(
        Rect::new(24, 24, 160, 32),
        Button::new()
            .with_hover_fill(Fill::flat(90, 120, 200))
            .with_pressed_fill(Fill::flat(40, 60, 140))
            .on_click(move || {
                counter.set(counter.get() + 1);
                info!(clicks = counter.get(), "Demo button clicked");
            }),
    )
    .with_fill(Fill::flat(60, 90, 170));

    let slider = Element::new(
        Rect::new(24, 72, 160, 16),
        Slider::new(0.5).on_change(|value| debug!(value, "Demo slider moved")),
    )
    .with_fill(Fill::flat(50, 50, 50));

    let panel = Element::panel(Rect::new(16, 16, 176, 88))
        .with_fill(Fill::Gradient {
            top: rgb::RGBA8::new(30, 30, 36, 230),
            bottom: rgb::RGBA8::new(16, 16, 20, 230),
        })
        .with_child(button)
        .with_child(slider)
        .with_listener(timer::after(clock.clone(), Duration::from_secs(3), || {
            info!("Hold the right mouse button to look around, W/A/S/D to move")
        }))
        .with_listener(timer::every(clock, Duration::from_secs(30), move || {
            debug!(clicks = clicks.get(), "Demo button click count")
        }));

    let mut gui = GuiManager::new().with_extra_frame(Box::new(LookCamera::new(
        &config.input,
        width,
        height,
    )));
    gui.add_element(panel);
    gui
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );

                let window = Arc::new(window);
                self.backend.attach_window(window.clone());
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        trace!(dt = ?(now - last_update), "Frame");
        self.last_update = Some(now);

        // Input first so the GUI update sees this frame's state
        pump_frame(&mut self.input, &mut self.backend, &mut self.dispatcher);

        if let Some(gui) = self.dispatcher.current_as::<GuiManager>() {
            gui.update();
        }

        if self.backend.take_exit_request() {
            info!("Display closed, exiting");
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Raw input is buffered and handled at the next pump
        self.backend.handle_window_event(&event);

        if let WindowEvent::RedrawRequested = event {
            self.render();
        }
    }
}

/// Runs the demo until the display is closed
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
