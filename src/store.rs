use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::PaintError;
use crate::grid::GridSurface;

/// On-disk form of a surface: fills in cell order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub values: Vec<Color>,
}

/// Read every cell's fill, in cell order.
pub fn serialize(surface: &GridSurface) -> Vec<Color> {
    surface.cells().iter().map(|c| c.fill).collect()
}

/// Overwrite each cell's fill positionally.
///
/// Nothing is written unless `data` has exactly one color per cell.
pub fn deserialize(surface: &mut GridSurface, data: &[Color]) -> Result<(), PaintError> {
    if data.len() != surface.len() {
        return Err(PaintError::LengthMismatch {
            expected: surface.len(),
            found: data.len(),
        });
    }
    for (cell, color) in surface.cells_mut().iter_mut().zip(data) {
        cell.fill = *color;
    }
    Ok(())
}

pub fn to_json(surface: &GridSurface) -> Result<String, PaintError> {
    let snapshot = Snapshot {
        values: serialize(surface),
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Decode a whole snapshot before applying it.
pub fn from_json(surface: &mut GridSurface, json: &str) -> Result<(), PaintError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    deserialize(surface, &snapshot.values)
}

pub fn write_to(surface: &GridSurface, path: &Path) -> Result<()> {
    let content = to_json(surface)?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write canvas to {}", path.display()))?;
    log::info!("saved {} cells to {}", surface.len(), path.display());
    Ok(())
}

pub fn read_from(surface: &mut GridSurface, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read canvas from {}", path.display()))?;
    from_json(surface, &content)
        .with_context(|| format!("failed to load canvas from {}", path.display()))?;
    log::info!("loaded {} cells from {}", surface.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Viewport;

    fn surface() -> GridSurface {
        GridSurface::with_viewport(Viewport::new(8.0, 8.0), 4.0)
    }

    #[test]
    fn serialize_follows_cell_order() {
        let mut s = surface();
        s.set_fill(2, Color::BLACK);
        let values = serialize(&s);
        assert_eq!(
            values,
            vec![Color::WHITE, Color::WHITE, Color::BLACK, Color::WHITE]
        );
    }

    #[test]
    fn deserialize_overwrites_positionally() {
        let mut s = surface();
        let data = [
            Color::new(1, 1, 1),
            Color::new(2, 2, 2),
            Color::new(3, 3, 3),
            Color::new(4, 4, 4),
        ];
        deserialize(&mut s, &data).unwrap();
        assert_eq!(serialize(&s), data.to_vec());
    }

    #[test]
    fn deserialize_rejects_wrong_length_without_writing() {
        let mut s = surface();
        let err = deserialize(&mut s, &[Color::BLACK; 3]).unwrap_err();
        assert!(matches!(
            err,
            PaintError::LengthMismatch {
                expected: 4,
                found: 3
            }
        ));
        assert!(serialize(&s).iter().all(|c| *c == Color::WHITE));
    }

    #[test]
    fn json_uses_values_wrapper() {
        let s = surface();
        let json = to_json(&s).unwrap();
        assert!(json.starts_with("{\"values\":[\"rgb(255,255,255)\""));
    }

    #[test]
    fn json_with_bad_color_leaves_surface_untouched() {
        let mut s = surface();
        let json = r##"{"values":["#000000","#000000","#000000","nope"]}"##;
        assert!(matches!(
            from_json(&mut s, json),
            Err(PaintError::Json(_))
        ));
        assert!(serialize(&s).iter().all(|c| *c == Color::WHITE));
    }

    #[test]
    fn json_accepts_legacy_spacing() {
        let mut s = surface();
        let json = r#"{"values":["rgb(255,0, 0)","rgb(0,255, 0)","rgb(0,0, 255)","rgb(0,0, 0)"]}"#;
        from_json(&mut s, json).unwrap();
        assert_eq!(s.fill(0), Some(Color::new(255, 0, 0)));
        assert_eq!(s.fill(3), Some(Color::BLACK));
    }

    #[test]
    fn read_missing_file_has_path_context() {
        let mut s = surface();
        let err = read_from(&mut s, Path::new("/nonexistent/canvas.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/canvas.json"));
    }
}
