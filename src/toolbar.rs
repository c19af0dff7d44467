use crate::color::Color;
use crate::grid::{Cell, Point};

/// Round swatch mirroring the active color.
///
/// Only [`PaintController::set_active_color`](crate::controller::PaintController::set_active_color)
/// changes its fill.
#[derive(Debug, Clone)]
pub struct ToolbarIndicator {
    swatch: Cell,
}

impl ToolbarIndicator {
    /// A swatch in the first toolbar slot, half a cell in from the corner.
    pub fn new(scale: f64, initial: Color) -> Self {
        let mut swatch = Cell::circle(Point::new(0.5, 0.5), scale);
        swatch.fill = initial;
        Self { swatch }
    }

    pub fn fill(&self) -> Color {
        self.swatch.fill
    }

    pub fn swatch(&self) -> &Cell {
        &self.swatch
    }

    pub(crate) fn mirror(&mut self, color: Color) {
        self.swatch.fill = color;
    }
}
