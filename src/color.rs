use std::fmt;
use std::str::FromStr;

use palette::{LinSrgb, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::PaintError;

/// Displayable cell color.
/// Wraps sRGB u8 components; this is the only form stored in cells and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Order in which computed channels are written into a [`Color`].
///
/// `Rbg` reproduces palettes generated by the legacy formatter, which wrote
/// the blue channel into the green slot and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
}

/// Normalized hue/saturation/value triple used while generating palettes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in [0, 1); 1.0 wraps to 0.
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    pub fn to_color(self, order: ChannelOrder) -> Color {
        hsv_to_color(self.h, self.s, self.v, order)
    }
}

/// Convert HSV to a displayable color using the six-sector hexagon table.
///
/// Channels are rounded to the nearest integer after scaling to [0, 255].
pub fn hsv_to_color(h: f64, s: f64, v: f64, order: ChannelOrder) -> Color {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let (r, g, b) = (to_channel(r), to_channel(g), to_channel(b));
    match order {
        ChannelOrder::Rgb => Color::new(r, g, b),
        ChannelOrder::Rbg => Color::new(r, b, g),
    }
}

fn to_channel(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self, PaintError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaintError::invalid_color(hex, "expected 6 hex digits"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| PaintError::invalid_color(hex, e.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Parse CSS functional notation, `rgb(255,0, 0)`. Whitespace around
    /// components is ignored.
    pub fn from_css(css: &str) -> Result<Self, PaintError> {
        let inner = css
            .trim()
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| PaintError::invalid_color(css, "expected rgb(r,g,b)"))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(PaintError::invalid_color(
                css,
                format!("expected 3 components, got {}", parts.len()),
            ));
        }
        let channel = |s: &str| {
            s.parse::<u8>()
                .map_err(|e| PaintError::invalid_color(css, e.to_string()))
        };
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
        ))
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Serialize to CSS functional notation `rgb(r,g,b)`.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// WCAG 2.0 relative luminance, computed on linearized sRGB.
    pub fn relative_luminance(self) -> f32 {
        let linear: LinSrgb<f32> = self.to_srgb_u8().into_format::<f32>().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl FromStr for Color {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("rgb(") {
            Self::from_css(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = PaintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const GREEN: Color = Color::new(0, 255, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_color(0.0, 1.0, 1.0, ChannelOrder::Rgb), RED);
        assert_eq!(hsv_to_color(1.0 / 3.0, 1.0, 1.0, ChannelOrder::Rgb), GREEN);
        assert_eq!(hsv_to_color(2.0 / 3.0, 1.0, 1.0, ChannelOrder::Rgb), BLUE);
    }

    #[test]
    fn secondary_hues() {
        assert_eq!(
            hsv_to_color(1.0 / 6.0, 1.0, 1.0, ChannelOrder::Rgb),
            Color::new(255, 255, 0)
        );
        assert_eq!(
            hsv_to_color(0.5, 1.0, 1.0, ChannelOrder::Rgb),
            Color::new(0, 255, 255)
        );
        assert_eq!(
            hsv_to_color(5.0 / 6.0, 1.0, 1.0, ChannelOrder::Rgb),
            Color::new(255, 0, 255)
        );
    }

    #[test]
    fn hue_one_wraps_to_red() {
        assert_eq!(hsv_to_color(1.0, 1.0, 1.0, ChannelOrder::Rgb), RED);
    }

    #[test]
    fn legacy_order_swaps_green_and_blue() {
        assert_eq!(hsv_to_color(1.0 / 3.0, 1.0, 1.0, ChannelOrder::Rbg), BLUE);
        assert_eq!(hsv_to_color(2.0 / 3.0, 1.0, 1.0, ChannelOrder::Rbg), GREEN);
        assert_eq!(hsv_to_color(0.0, 1.0, 1.0, ChannelOrder::Rbg), RED);
    }

    #[test]
    fn half_value_rounds_to_128() {
        // 0.5 * 255 = 127.5 rounds up
        assert_eq!(
            hsv_to_color(0.0, 0.0, 0.5, ChannelOrder::Rgb),
            Color::new(128, 128, 128)
        );
    }

    #[test]
    fn half_saturation_red() {
        assert_eq!(
            hsv_to_color(0.0, 0.5, 1.0, ChannelOrder::Rgb),
            Color::new(255, 128, 128)
        );
    }

    #[test]
    fn out_of_range_input_stays_in_gamut() {
        let c = hsv_to_color(0.25, 2.0, 1.5, ChannelOrder::Rgb);
        assert_eq!(c.g, 255);
        assert_eq!(c.b, 0);
    }

    #[test]
    fn negative_hue_uses_euclidean_sector() {
        // -1/6 sits in sector 5 (magenta to red)
        let c = hsv_to_color(-1.0 / 12.0, 1.0, 1.0, ChannelOrder::Rgb);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 0);
    }

    #[test]
    fn hex_round_trip() {
        let original = Color::from_hex("#ff8800").unwrap();
        assert_eq!(original, Color::new(255, 136, 0));
        assert_eq!(original.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_uppercase_and_bare() {
        assert_eq!(Color::from_hex("FF8800").unwrap().to_hex(), "#ff8800");
    }

    #[test]
    fn hex_invalid() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
    }

    #[test]
    fn hex_rejects_signs() {
        assert!(Color::from_hex("#+f+f+f").is_err());
        assert!(Color::from_hex("-1-1-1").is_err());
    }

    #[test]
    fn hsv_struct_matches_free_function() {
        let hsv = Hsv::new(1.0 / 3.0, 1.0, 1.0);
        assert_eq!(hsv.to_color(ChannelOrder::Rgb), GREEN);
        assert_eq!(hsv.to_color(ChannelOrder::Rbg), BLUE);
        assert_eq!(
            Hsv::new(0.1, 0.4, 0.7).to_color(ChannelOrder::Rgb),
            hsv_to_color(0.1, 0.4, 0.7, ChannelOrder::Rgb)
        );
    }

    #[test]
    fn css_accepts_legacy_spacing() {
        assert_eq!(Color::from_css("rgb(255,0, 0)").unwrap(), RED);
        assert_eq!(Color::from_css(" rgb( 1 , 2 , 3 ) ").unwrap(), Color::new(1, 2, 3));
    }

    #[test]
    fn css_rejects_malformed() {
        assert!(Color::from_css("rgb(1,2)").is_err());
        assert!(Color::from_css("rgb(1,2,300)").is_err());
        assert!(Color::from_css("rgba(1,2,3,4)").is_err());
    }

    #[test]
    fn display_is_css() {
        assert_eq!(RED.to_string(), "rgb(255,0,0)");
        assert_eq!(format!("{}", Color::WHITE), Color::WHITE.to_css());
    }

    #[test]
    fn from_str_dispatches_on_form() {
        assert_eq!("#ffffff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("rgb(0,0,0)".parse::<Color>().unwrap(), Color::BLACK);
    }

    #[test]
    fn serde_uses_css_string() {
        let json = serde_json::to_string(&RED).unwrap();
        assert_eq!(json, "\"rgb(255,0,0)\"");
        let back: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(back, GREEN);
    }

    #[test]
    fn relative_luminance_extremes() {
        assert!(Color::BLACK.relative_luminance() < 0.001);
        assert!((Color::WHITE.relative_luminance() - 1.0).abs() < 0.001);
    }

    #[test]
    fn srgb_conversion() {
        let c = Color::new(12, 34, 56);
        assert_eq!(Color::from(c.to_srgb_u8()), c);
    }
}
