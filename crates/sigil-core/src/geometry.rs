// this_file: crates/sigil-core/src/geometry.rs

//! Axis-aligned boxes and the scale-plus-translate transforms that move
//! glyphs from font units into canvas space.

/// Axis-aligned rectangle in font units (Y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    pub const fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Zero or negative extent along either axis
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Image of this box under `transform`, re-normalized so min <= max.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let (x0, y0) = transform.apply(self.x_min, self.y_min);
        let (x1, y1) = transform.apply(self.x_max, self.y_max);
        Self::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }
}

/// Affine map without rotation or skew: `(x, y) -> (sx·x + tx, sy·y + ty)`
///
/// Equivalent to the 2×3 matrix `[sx 0 tx; 0 sy ty]`, written in SVG
/// order as `matrix(sx 0 0 sy tx ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const fn new(sx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self { sx, sy, tx, ty }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, sy, 0.0, 0.0)
    }

    /// Apply `self` first, then `next`.
    pub fn then(&self, next: &Self) -> Self {
        Self {
            sx: next.sx * self.sx,
            sy: next.sy * self.sy,
            tx: next.sx * self.tx + next.tx,
            ty: next.sy * self.ty + next.ty,
        }
    }

    /// Shorthand for `self.then(&Transform::translate(dx, dy))`
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        self.then(&Self::translate(dx, dy))
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.sx * x + self.tx, self.sy * y + self.ty)
    }

    /// `[a b c d e f]` in SVG `matrix()` order
    pub fn to_matrix(&self) -> [f64; 6] {
        [self.sx, 0.0, 0.0, self.sy, self.tx, self.ty]
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_translation(&self) -> bool {
        self.sx == 1.0 && self.sy == 1.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
