use std::path::PathBuf;

use clap::Parser;

use crate::color::ChannelOrder;
use crate::grid::{Viewport, DEFAULT_SCALE};

/// Paint pixel art in the terminal from a generated HSV palette.
#[derive(Parser, Debug)]
#[command(name = "pixpaint", version, about)]
pub struct Args {
    /// Canvas viewport in units, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport, default_value = "128x80")]
    pub canvas: Viewport,

    /// Palette viewport in units, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport, default_value = "128x16")]
    pub palette: Viewport,

    /// Units per cell, shared by canvas and palette
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Channel order used when formatting generated colors
    #[arg(long, value_enum, default_value_t = ChannelOrder::Rgb)]
    pub channel_order: ChannelOrder,

    /// Canvas snapshot: loaded at startup if present, written on save
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the generated palette bands and exit
    #[arg(long)]
    pub preview: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Parse `WIDTHxHEIGHT` into a viewport.
pub fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let dim = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .ok_or_else(|| format!("invalid dimension '{part}' in '{s}'"))
    };
    Ok(Viewport::new(dim(w)?, dim(h)?))
}
