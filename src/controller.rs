use crate::color::Color;
use crate::error::PaintError;
use crate::grid::GridSurface;
use crate::store;
use crate::toolbar::ToolbarIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Pointer and touch input on the canvas, with targets already resolved to
/// cell indices. `None` means nothing was under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasEvent {
    PointerDown { target: Option<usize> },
    PointerMove { target: Option<usize> },
    PointerUp,
    PointerLeave,
    TouchStart { target: Option<usize> },
    /// One target per active touch point, in host order.
    TouchMove { touches: Vec<Option<usize>> },
    TouchEnd,
}

/// Whether the host should suppress its default handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Consumed,
    Ignored,
}

/// Paints the canvas with the active color and picks colors off the palette.
#[derive(Debug, Clone)]
pub struct PaintController {
    canvas: GridSurface,
    palette: GridSurface,
    active: Color,
    toolbar: ToolbarIndicator,
    state: DragState,
}

impl PaintController {
    pub fn new(canvas: GridSurface, palette: GridSurface, toolbar: ToolbarIndicator) -> Self {
        let mut controller = Self {
            canvas,
            palette,
            active: Color::WHITE,
            toolbar,
            state: DragState::Idle,
        };
        controller.set_active_color(Color::WHITE);
        controller
    }

    pub fn canvas(&self) -> &GridSurface {
        &self.canvas
    }

    pub fn palette(&self) -> &GridSurface {
        &self.palette
    }

    pub fn toolbar(&self) -> &ToolbarIndicator {
        &self.toolbar
    }

    pub fn active_color(&self) -> Color {
        self.active
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Update the active color and the toolbar swatch together.
    pub fn set_active_color(&mut self, color: Color) {
        self.active = color;
        self.toolbar.mirror(color);
        log::debug!("active color is now {color}");
    }

    pub fn handle_canvas(&mut self, event: CanvasEvent) -> Propagation {
        match event {
            CanvasEvent::PointerDown { target } | CanvasEvent::TouchStart { target } => {
                self.paint(target);
                self.transition(DragState::Dragging);
                Propagation::Consumed
            }
            CanvasEvent::PointerUp | CanvasEvent::PointerLeave | CanvasEvent::TouchEnd => {
                self.transition(DragState::Idle);
                Propagation::Consumed
            }
            CanvasEvent::PointerMove { target } => {
                if self.state == DragState::Idle {
                    return Propagation::Ignored;
                }
                self.paint(target);
                Propagation::Consumed
            }
            CanvasEvent::TouchMove { touches } => {
                if self.state == DragState::Idle {
                    return Propagation::Ignored;
                }
                for target in touches {
                    self.paint(target);
                }
                Propagation::Consumed
            }
        }
    }

    /// Adopt the clicked palette cell's fill as the active color.
    ///
    /// The palette itself is never repainted.
    pub fn click_palette(&mut self, target: Option<usize>) -> Option<Color> {
        let color = self.palette.fill(target?)?;
        self.set_active_color(color);
        Some(color)
    }

    /// Replace the canvas fills with a saved snapshot.
    pub fn load_canvas(&mut self, data: &[Color]) -> Result<(), PaintError> {
        store::deserialize(&mut self.canvas, data)
    }

    pub(crate) fn canvas_mut(&mut self) -> &mut GridSurface {
        &mut self.canvas
    }

    fn paint(&mut self, target: Option<usize>) {
        let Some(index) = target else {
            return;
        };
        if !self.canvas.set_fill(index, self.active) {
            log::trace!("no canvas cell at index {index}");
        }
    }

    fn transition(&mut self, next: DragState) {
        if self.state != next {
            log::debug!("paint state {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }
}
