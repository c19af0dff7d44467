use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::bands::generate_palette;
use crate::cli::Args;
use crate::color::{ChannelOrder, Color};
use crate::controller::PaintController;
use crate::grid::{GridSurface, Viewport, MAX_CELLS};
use crate::toolbar::ToolbarIndicator;

/// Validated startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub canvas: Viewport,
    pub palette: Viewport,
    pub scale: f64,
    pub channel_order: ChannelOrder,
    pub file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let config = Self {
            canvas: args.canvas,
            palette: args.palette,
            scale: args.scale,
            channel_order: args.channel_order,
            file: args.file.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            bail!("scale must be a positive number, got {}", self.scale);
        }
        for (name, viewport) in [("canvas", self.canvas), ("palette", self.palette)] {
            let Some(count) = viewport.cell_count(self.scale) else {
                bail!(
                    "{name} viewport {}x{} too large at scale {} (limit {MAX_CELLS} cells)",
                    viewport.width,
                    viewport.height,
                    self.scale
                );
            };
            if count == 0 {
                bail!(
                    "{name} viewport {}x{} holds no cells at scale {}",
                    viewport.width,
                    viewport.height,
                    self.scale
                );
            }
        }
        let palette_cells = self.palette_cells();
        if palette_cells % 4 != 0 {
            bail!(
                "palette holds {palette_cells} cells; it must split into 4 equal bands"
            );
        }
        Ok(())
    }

    pub fn palette_cells(&self) -> usize {
        self.palette.cell_count(self.scale).unwrap_or_default()
    }

    /// Build the generated palette surface.
    pub fn build_palette(&self) -> GridSurface {
        let mut palette = GridSurface::new();
        let cells = palette.populate(self.palette, self.scale);
        generate_palette(cells, self.channel_order);
        palette
    }

    /// Build both surfaces and the toolbar, wired into a controller.
    pub fn build_controller(&self) -> PaintController {
        let canvas = GridSurface::with_viewport(self.canvas, self.scale);
        let toolbar = ToolbarIndicator::new(self.scale, Color::WHITE);
        PaintController::new(canvas, self.build_palette(), toolbar)
    }
}
