// this_file: crates/sigil-layout/src/grid.rs

//! Practice grid geometry, one square per glyph cell.

use sigil_core::GridKind;

/// A straight guide line in content space (font units, Y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// One grid square; its lower-left corner sits at `(x, 0)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub x: f64,
    pub size: f64,
}

impl GridCell {
    pub const fn new(x: f64, size: f64) -> Self {
        Self { x, size }
    }

    /// Guide lines inside the border, in drawing order.
    ///
    /// Square cells have none; 田 adds the vertical and horizontal center
    /// lines; 米 adds both diagonals after those.
    pub fn guides(&self, kind: GridKind) -> Vec<Line> {
        let mut lines = Vec::with_capacity(4);
        let (x0, x1) = (self.x, self.x + self.size);
        let half = self.size / 2.0;

        if kind.has_center_guides() {
            lines.push(Line::new(x0 + half, 0.0, x0 + half, self.size));
            lines.push(Line::new(x0, half, x1, half));
        }
        if kind.has_diagonals() {
            lines.push(Line::new(x0, 0.0, x1, self.size));
            lines.push(Line::new(x0, self.size, x1, 0.0));
        }
        lines
    }
}

/// Cells for a row of `count` glyphs, or nothing when no grid is drawn
pub fn grid_cells(kind: GridKind, count: usize, cell: f64) -> Vec<GridCell> {
    if kind.is_none() {
        return Vec::new();
    }
    (0..count)
        .map(|i| GridCell::new(cell * i as f64, cell))
        .collect()
}
