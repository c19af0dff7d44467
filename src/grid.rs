use crate::color::Color;

/// Cell scale shared by the canvas and the palette.
pub const DEFAULT_SCALE: f64 = 4.0;

/// Largest number of cells a single population may create.
pub const MAX_CELLS: usize = 1 << 20;

/// Outline drawn around every grid cell to separate neighbours.
pub const GRID_STROKE: Stroke = Stroke {
    width: 0.2,
    color: Color::new(0xf5, 0xf5, 0xf6),
    opacity: 1.0,
};

/// Size of a surface in viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Number of whole cells that fit along each axis at `scale`.
    pub fn cells_at(self, scale: f64) -> (usize, usize) {
        if !(scale.is_finite() && scale > 0.0) {
            return (0, 0);
        }
        let fit = |extent: f64| (extent / scale).floor().max(0.0) as usize;
        (fit(self.width), fit(self.height))
    }

    /// Total cells at `scale`, or `None` when the grid exceeds [`MAX_CELLS`].
    pub fn cell_count(self, scale: f64) -> Option<usize> {
        let (columns, rows) = self.cells_at(scale);
        columns.checked_mul(rows).filter(|n| *n <= MAX_CELLS)
    }
}

/// A position in viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `origin` is the top-left corner.
    Rect,
    /// `origin` is the centre; the radius is half the size.
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    pub opacity: f64,
}

/// One paintable unit of a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
    pub origin: Point,
    pub size: f64,
    pub shape: Shape,
    pub fill: Color,
    pub stroke: Stroke,
}

impl Cell {
    /// A square cell covering grid position `(col, row)`.
    pub fn rect(col: usize, row: usize, scale: f64) -> Self {
        Self {
            col,
            row,
            origin: Point::new(col as f64 * scale, row as f64 * scale),
            size: scale,
            shape: Shape::Rect,
            fill: Color::WHITE,
            stroke: GRID_STROKE,
        }
    }

    /// A round cell centred on `center`, given in grid units.
    pub fn circle(center: Point, scale: f64) -> Self {
        Self {
            col: center.x.max(0.0) as usize,
            row: center.y.max(0.0) as usize,
            origin: Point::new(center.x * scale, center.y * scale),
            size: scale,
            shape: Shape::Circle,
            fill: Color::WHITE,
            stroke: GRID_STROKE,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        match self.shape {
            Shape::Rect => {
                p.x >= self.origin.x
                    && p.x < self.origin.x + self.size
                    && p.y >= self.origin.y
                    && p.y < self.origin.y + self.size
            }
            Shape::Circle => {
                let (dx, dy) = (p.x - self.origin.x, p.y - self.origin.y);
                let r = self.size / 2.0;
                dx * dx + dy * dy <= r * r
            }
        }
    }
}

/// An addressable 2-D grid of paintable cells, stored column-major.
#[derive(Debug, Clone, Default)]
pub struct GridSurface {
    cells: Vec<Cell>,
    columns: usize,
    rows: usize,
    scale: f64,
}

impl GridSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a surface and populate it once.
    pub fn with_viewport(viewport: Viewport, scale: f64) -> Self {
        let mut surface = Self::new();
        surface.populate(viewport, scale);
        surface
    }

    /// Append `floor(w/scale) * floor(h/scale)` white cells, outer loop over
    /// columns, and return the new cells.
    ///
    /// Calling this twice appends a second copy of the grid.
    pub fn populate(&mut self, viewport: Viewport, scale: f64) -> &mut [Cell] {
        let (columns, rows) = viewport.cells_at(scale);
        let Some(count) = viewport.cell_count(scale) else {
            log::warn!(
                "viewport {}x{} at scale {scale} exceeds {MAX_CELLS} cells",
                viewport.width,
                viewport.height
            );
            let end = self.cells.len();
            return &mut self.cells[end..];
        };
        if count == 0 {
            log::warn!(
                "viewport {}x{} at scale {scale} holds no cells",
                viewport.width,
                viewport.height
            );
        }
        if !self.cells.is_empty() {
            log::warn!(
                "surface already holds {} cells; appending {}",
                self.cells.len(),
                count
            );
        }

        let start = self.cells.len();
        self.cells.reserve(count);
        for x in 0..columns {
            for y in 0..rows {
                self.cells.push(Cell::rect(x, y, scale));
            }
        }
        self.columns = columns;
        self.rows = rows;
        self.scale = scale;

        log::debug!("populated {columns}x{rows} cells at scale {scale}");
        &mut self.cells[start..]
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn fill(&self, index: usize) -> Option<Color> {
        self.cells.get(index).map(|c| c.fill)
    }

    /// Returns false when `index` names no cell.
    pub fn set_fill(&mut self, index: usize, color: Color) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.fill = color;
                true
            }
            None => false,
        }
    }

    /// Index of the cell at grid position `(col, row)`, using the dimensions
    /// of the most recent population.
    pub fn index_of(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.columns || row >= self.rows {
            return None;
        }
        let index = col * self.rows + row;
        (index < self.cells.len()).then_some(index)
    }

    /// Resolve a viewport point to the topmost cell containing it.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.cells.iter().rposition(|cell| cell.contains(point))
    }
}
