//! Render-side interface for GUI elements
//!
//! The GUI never produces pixels itself. Each visible element is handed to a
//! [`Renderer`] once per frame with its rectangle and fill; [`DrawList`] is a
//! headless renderer that records the resulting commands for a backend (or a
//! test) to consume.

use rgb::RGBA8;

use super::element::ElementId;
use super::geometry::Rect;

pub type Color = RGBA8;

/// Opaque handle to a texture owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// How an element's rectangle is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    /// Nothing is drawn
    #[default]
    None,
    Flat(Color),
    /// Vertical two-color gradient
    Gradient { top: Color, bottom: Color },
    Texture(TextureHandle),
}

impl Fill {
    pub fn flat(r: u8, g: u8, b: u8) -> Self {
        Fill::Flat(RGBA8::new(r, g, b, 255))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }
}

/// Receiver of element draw calls
pub trait Renderer {
    /// Called before an element's render callback runs
    fn begin_element(&mut self, _id: ElementId, _rect: Rect) {}

    fn draw_rect(&mut self, rect: Rect, fill: &Fill);
}

/// One recorded fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    /// Element whose render callback issued the command
    pub element: Option<ElementId>,
    pub rect: Rect,
    pub fill: Fill,
}

/// Renderer that records draw commands in submission order
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    current: Option<ElementId>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all commands (called at the start of each frame)
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = None;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued while rendering `id`
    pub fn commands_for(&self, id: ElementId) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |command| command.element == Some(id))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Renderer for DrawList {
    fn begin_element(&mut self, id: ElementId, _rect: Rect) {
        self.current = Some(id);
    }

    fn draw_rect(&mut self, rect: Rect, fill: &Fill) {
        if fill.is_none() || rect.is_empty() {
            return;
        }
        self.commands.push(DrawCommand {
            element: self.current,
            rect,
            fill: *fill,
        });
    }
}
