//! Absolute placement of anchored drawings.

use crate::model::Drawing;

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Convert EMU to inches.
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMU_PER_INCH
}

/// Offset of an anchored drawing from its anchor origin, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
}

impl Position {
    /// CSS declarations placing a container at this position.
    pub fn to_css(&self) -> String {
        format!(
            "position: absolute; left: {}in; top: {}in;",
            self.x, self.y
        )
    }
}

/// Extract the absolute position of a drawing.
///
/// Returns `None` when the drawing has no anchor, when either axis has no
/// offset (e.g. it is aligned rather than offset), or when an offset is not
/// an integer. Callers lay such drawings out inline.
pub fn extract_position(drawing: &Drawing) -> Option<Position> {
    let anchor = drawing.anchor.as_ref()?;
    let x = parse_offset(anchor.horizontal.as_deref())?;
    let y = parse_offset(anchor.vertical.as_deref())?;

    Some(Position {
        x: emu_to_inches(x),
        y: emu_to_inches(y),
    })
}

fn parse_offset(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Unparsable anchor offset {:?}: {}", raw, e);
            None
        }
    }
}
