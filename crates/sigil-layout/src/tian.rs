// this_file: crates/sigil-layout/src/tian.rs

//! Fitting a glyph into a 田字格 cell
//!
//! The glyph's ink box is scaled to `frac` of the cell and its center moved
//! onto the cell's cross point `(cell/2, cell/2)`. Coordinates stay in font
//! units, Y-up, relative to the cell's lower-left corner.

use sigil_core::{Bounds, Transform};

/// How the ink box was scaled to reach the target size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Same factor on both axes; the longer side reaches the target
    Uniform,
    /// Each axis scaled independently to exactly the target
    Anisotropic,
}

impl FitMode {
    pub fn from_preserve_aspect(preserve_aspect: bool) -> Self {
        if preserve_aspect {
            FitMode::Uniform
        } else {
            FitMode::Anisotropic
        }
    }
}

impl std::fmt::Display for FitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitMode::Uniform => write!(f, "uniform"),
            FitMode::Anisotropic => write!(f, "anisotropic"),
        }
    }
}

/// Transform that centers `bounds` in a cell at `frac` of its size.
///
/// `None` for glyphs without ink or with a zero-width or zero-height box;
/// those are placed in their cell without scaling.
pub fn tian_fit(bounds: Option<&Bounds>, cell: f64, frac: f64, mode: FitMode) -> Option<Transform> {
    let bounds = bounds.filter(|b| !b.is_degenerate())?;

    let target = cell * frac;
    let (sx, sy) = match mode {
        FitMode::Anisotropic => (target / bounds.width(), target / bounds.height()),
        FitMode::Uniform => {
            let s = (target / bounds.width()).min(target / bounds.height());
            (s, s)
        }
    };

    let (cx, cy) = bounds.center();
    let half = cell / 2.0;
    Some(Transform::new(sx, sy, half - cx * sx, half - cy * sy))
}
