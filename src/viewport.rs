use serde::{Deserialize, Serialize};

use crate::motion::FLOOR_MARGIN;
use crate::wave::CHAR_WIDTH;

/// Field pixels covered by one terminal column
pub const PX_PER_COL: f64 = CHAR_WIDTH;
/// Field pixels covered by one terminal row
pub const PX_PER_ROW: f64 = FLOOR_MARGIN;

/// Play-field dimensions in field pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(cols as f64 * PX_PER_COL, rows as f64 * PX_PER_ROW)
    }

    /// Cell (column, row) a field position lands on inside a `cols` x `rows` area
    pub fn to_cell(&self, left: f64, top: f64, cols: u16, rows: u16) -> (u16, u16) {
        let scale = |v: f64, extent: f64, cells: u16| -> u16 {
            if extent <= 0.0 || cells == 0 {
                return 0;
            }
            let cell = (v / extent * cells as f64).floor();
            cell.clamp(0.0, (cells - 1) as f64) as u16
        };
        (
            scale(left, self.width, cols),
            scale(top, self.height, rows),
        )
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
