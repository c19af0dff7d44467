use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::controller::{DragState, PaintController};
use crate::grid::GridSurface;

/// Terminal columns used to draw one grid cell, so cells look square.
pub const CELL_WIDTH: u16 = 2;

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: AppColor) -> Color {
    if c.relative_luminance() > 0.4 {
        Color::Black
    } else {
        Color::White
    }
}

/// Renders a grid surface as blocks of background color, one cell per
/// `CELL_WIDTH` columns and one row.
pub struct GridWidget<'a> {
    surface: &'a GridSurface,
    title: &'a str,
}

impl<'a> GridWidget<'a> {
    pub fn new(surface: &'a GridSurface, title: &'a str) -> Self {
        Self { surface, title }
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        for cell in self.surface.cells() {
            let (Ok(col), Ok(row)) = (u16::try_from(cell.col), u16::try_from(cell.row)) else {
                continue;
            };
            let x = inner.x.saturating_add(col.saturating_mul(CELL_WIDTH));
            let y = inner.y.saturating_add(row);
            if y >= inner.bottom() {
                continue;
            }
            for dx in 0..CELL_WIDTH {
                let x = x.saturating_add(dx);
                if x >= inner.right() {
                    break;
                }
                if let Some(term_cell) = buf.cell_mut((x, y)) {
                    term_cell.set_symbol(" ").set_bg(to_color(cell.fill));
                }
            }
        }
    }
}

/// The active color swatch plus state and key hints.
pub struct ToolbarWidget<'a> {
    controller: &'a PaintController,
    status: &'a str,
}

impl<'a> ToolbarWidget<'a> {
    pub fn new(controller: &'a PaintController, status: &'a str) -> Self {
        Self { controller, status }
    }
}

impl Widget for ToolbarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Tools");
        let inner = block.inner(area);
        block.render(area, buf);

        let fill = self.controller.toolbar().fill();
        let state = match self.controller.state() {
            DragState::Idle => "idle",
            DragState::Dragging => "painting",
        };

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!(" {fill} "),
                Style::default().bg(to_color(fill)).fg(contrast_fg(fill)),
            ),
            Span::raw("  "),
            Span::styled(state, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "  q quit  s save  r reload  ",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(self.status, Style::default().fg(Color::Yellow)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
