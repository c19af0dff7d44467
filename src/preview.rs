use std::io::Write;

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor};

use crate::bands::PaletteBands;
use crate::grid::GridSurface;

/// Print each palette band as a labelled row of truecolor blocks.
pub fn print_palette(out: &mut impl Write, palette: &GridSurface) -> Result<()> {
    let bands = PaletteBands::split(palette.len());
    for (kind, range) in bands.iter() {
        queue!(out, Print(format!("{:>10} ", kind.name())))?;
        for cell in &palette.cells()[range] {
            let c = cell.fill;
            queue!(
                out,
                SetBackgroundColor(TermColor::Rgb {
                    r: c.r,
                    g: c.g,
                    b: c.b
                }),
                Print("  ")
            )?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}
