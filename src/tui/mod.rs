pub mod widgets;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};

use crate::config::AppConfig;
use crate::controller::{CanvasEvent, PaintController};
use crate::grid::{GridSurface, Point};
use crate::store;

use widgets::{GridWidget, ToolbarWidget, CELL_WIDTH};

/// Screen regions from the most recent draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Areas {
    pub toolbar: Rect,
    pub canvas: Rect,
    pub palette: Rect,
}

impl Areas {
    /// Stack toolbar, canvas and palette, each sized to its grid plus borders.
    pub fn compute(area: Rect, canvas: &GridSurface, palette: &GridSurface) -> Self {
        let width = |s: &GridSurface| {
            let cols = u16::try_from(s.columns()).unwrap_or(u16::MAX);
            cols.saturating_mul(CELL_WIDTH).saturating_add(2)
        };
        let height = |s: &GridSurface| {
            u16::try_from(s.rows())
                .unwrap_or(u16::MAX)
                .saturating_add(2)
        };

        let [toolbar, canvas_row, palette_row, _] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(height(canvas)),
            Constraint::Length(height(palette)),
            Constraint::Min(0),
        ])
        .areas(area);

        let clamp_width = |row: Rect, w: u16| Rect {
            width: row.width.min(w),
            ..row
        };
        Self {
            toolbar,
            canvas: clamp_width(canvas_row, width(canvas)),
            palette: clamp_width(palette_row, width(palette)),
        }
    }
}

/// State for the interactive terminal painter.
pub struct App {
    pub controller: PaintController,
    pub file: Option<PathBuf>,
    pub status: String,
    pub areas: Areas,
    pub should_quit: bool,
}

impl App {
    /// Build the surfaces and load the canvas snapshot if one exists.
    pub fn new(config: &AppConfig) -> Self {
        let mut app = Self {
            controller: config.build_controller(),
            file: config.file.clone(),
            status: String::new(),
            areas: Areas::default(),
            should_quit: false,
        };
        if app.file.as_deref().is_some_and(|p| p.exists()) {
            app.reload();
        }
        app
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.areas = Areas::compute(
            frame.area(),
            self.controller.canvas(),
            self.controller.palette(),
        );
        frame.render_widget(
            ToolbarWidget::new(&self.controller, &self.status),
            self.areas.toolbar,
        );
        frame.render_widget(
            GridWidget::new(self.controller.canvas(), "Canvas"),
            self.areas.canvas,
        );
        frame.render_widget(
            GridWidget::new(self.controller.palette(), "Palette"),
            self.areas.palette,
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let on_canvas = self.canvas_target(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match on_canvas {
                Some(target) => {
                    self.controller
                        .handle_canvas(CanvasEvent::PointerDown { target });
                }
                None => {
                    let target = self.palette_target(mouse.column, mouse.row);
                    if let Some(color) = self.controller.click_palette(target) {
                        self.status = format!("picked {color}");
                    }
                }
            },
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                let event = match on_canvas {
                    Some(target) => CanvasEvent::PointerMove { target },
                    None => CanvasEvent::PointerLeave,
                };
                self.controller.handle_canvas(event);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.controller.handle_canvas(CanvasEvent::PointerUp);
            }
            _ => {}
        }
    }

    /// `Some(target)` when the position is inside the canvas block, where
    /// `target` is the cell under it, if any.
    fn canvas_target(&self, column: u16, row: u16) -> Option<Option<usize>> {
        let inner = Block::bordered().inner(self.areas.canvas);
        inner
            .contains(Position::new(column, row))
            .then(|| resolve(self.controller.canvas(), inner, column, row))
    }

    fn palette_target(&self, column: u16, row: u16) -> Option<usize> {
        let inner = Block::bordered().inner(self.areas.palette);
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        resolve(self.controller.palette(), inner, column, row)
    }

    fn save(&mut self) {
        let Some(path) = self.file.clone() else {
            self.status = "no --file given".to_string();
            return;
        };
        self.status = match store::write_to(self.controller.canvas(), &path) {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => {
                log::error!("{e:#}");
                format!("save failed: {e:#}")
            }
        };
    }

    fn reload(&mut self) {
        let Some(path) = self.file.clone() else {
            self.status = "no --file given".to_string();
            return;
        };
        self.status = match store::read_from(self.controller.canvas_mut(), &path) {
            Ok(()) => format!("loaded {}", path.display()),
            Err(e) => {
                log::error!("{e:#}");
                format!("load failed: {e:#}")
            }
        };
    }
}

/// Map a terminal position inside `inner` to the cell centred under it.
fn resolve(surface: &GridSurface, inner: Rect, column: u16, row: u16) -> Option<usize> {
    let col = column.checked_sub(inner.x)? / CELL_WIDTH;
    let row = row.checked_sub(inner.y)?;
    let scale = surface.scale();
    surface.hit_test(Point::new(
        (f64::from(col) + 0.5) * scale,
        (f64::from(row) + 0.5) * scale,
    ))
}

/// Launch the terminal painter and restore the terminal on exit.
pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let result = run_in_alternate_screen(&mut app);
    let restored = restore_terminal();
    result.and(restored)
}

fn run_in_alternate_screen(app: &mut App) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    event_loop(&mut terminal, app)
}

/// Leave raw mode and the alternate screen; safe to call after a partial setup.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;
    Ok(())
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.draw(frame))?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
    Ok(())
}
