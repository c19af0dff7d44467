use std::ops::Range;

use crate::color::{ChannelOrder, Hsv};
use crate::grid::Cell;

/// The four palette sweeps, in the order they occupy the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    Saturation,
    Hue,
    Value,
    Greyscale,
}

impl BandKind {
    pub const ORDER: [BandKind; 4] = [
        BandKind::Saturation,
        BandKind::Hue,
        BandKind::Value,
        BandKind::Greyscale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BandKind::Saturation => "Saturation",
            BandKind::Hue => "Hue",
            BandKind::Value => "Value",
            BandKind::Greyscale => "Greyscale",
        }
    }

    /// Fixed (saturation, value) for the hue-sweep bands.
    pub fn fixed_sv(self) -> Option<(f64, f64)> {
        match self {
            BandKind::Saturation => Some((0.5, 1.0)),
            BandKind::Hue => Some((1.0, 1.0)),
            BandKind::Value => Some((1.0, 0.5)),
            BandKind::Greyscale => None,
        }
    }
}

/// How a palette's cell sequence is split into quarter bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteBands {
    ranges: [Range<usize>; 4],
}

impl PaletteBands {
    /// Split `len` cells into four contiguous bands of `len / 4`; the
    /// greyscale band takes any remainder.
    pub fn split(len: usize) -> Self {
        let m = len / 4;
        Self {
            ranges: [0..m, m..2 * m, 2 * m..3 * m, 3 * m..len],
        }
    }

    pub fn range(&self, kind: BandKind) -> Range<usize> {
        self.ranges[kind as usize].clone()
    }

    pub fn band_of(&self, index: usize) -> Option<BandKind> {
        BandKind::ORDER
            .into_iter()
            .zip(self.ranges.iter())
            .find(|(_, range)| range.contains(&index))
            .map(|(kind, _)| kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BandKind, Range<usize>)> + '_ {
        BandKind::ORDER.into_iter().zip(self.ranges.iter().cloned())
    }
}

/// Step between consecutive samples of a band of `len` cells, spanning the
/// full `span` inclusive at both ends. Single-cell bands sample 0 only.
fn sweep_step(len: usize, span: f64) -> f64 {
    if len > 1 {
        span / (len - 1) as f64
    } else {
        0.0
    }
}

/// Fill `cells` with a hue sweep from 0° to 360° at fixed `s` and `v`.
pub fn assign_colors(cells: &mut [Cell], s: f64, v: f64, order: ChannelOrder) {
    let mul = sweep_step(cells.len(), 360.0);
    for (i, cell) in cells.iter_mut().enumerate() {
        let h = i as f64 * mul;
        cell.fill = Hsv::new(h / 360.0, s, v).to_color(order);
    }
}

/// Fill `cells` with a linear grey ramp from black to white.
pub fn assign_greyscale(cells: &mut [Cell], order: ChannelOrder) {
    let inc = sweep_step(cells.len(), 1.0);
    for (i, cell) in cells.iter_mut().enumerate() {
        cell.fill = Hsv::new(0.0, 0.0, i as f64 * inc).to_color(order);
    }
}

/// Color a palette's cells band by band and return the split used.
pub fn generate_palette(cells: &mut [Cell], order: ChannelOrder) -> PaletteBands {
    if cells.len() % 4 != 0 {
        log::warn!(
            "palette of {} cells is not divisible by 4; greyscale band absorbs the remainder",
            cells.len()
        );
    }

    let bands = PaletteBands::split(cells.len());
    for (kind, range) in bands.iter() {
        let band = &mut cells[range];
        match kind.fixed_sv() {
            Some((s, v)) => assign_colors(band, s, v, order),
            None => assign_greyscale(band, order),
        }
        log::debug!("generated {} band of {} cells", kind.name(), band.len());
    }
    bands
}
