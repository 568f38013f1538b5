// this_file: crates/sigil-layout/src/lib.rs

//! Canvas geometry for sigil documents
//!
//! Turns resolved glyphs and a [`RenderConfig`] into a [`CanvasLayout`]:
//! view box size, optional pixel size, where each glyph goes, the grid
//! squares behind them, and where the Pinyin lines sit. Nothing here
//! produces markup; the serializer only formats what this crate decides.
//!
//! ## Coordinates
//!
//! Glyphs, grid lines and cells live in *content space*: font units, Y-up,
//! with the baseline of the row at `y = 0` and cell `i` spanning
//! `[i·cell, (i+1)·cell]`. The whole content space is drawn through one
//! flip, `translate(origin) scale(1 -1)`, so outlines are emitted exactly
//! as stored in the font. Annotations are positioned directly in canvas
//! space (Y-down).

pub mod grid;
pub mod tian;

use sigil_core::{
    types::GlyphRecord,
    units::quantize,
    BboxMode, Bounds, GridKind, PinyinPosition, RenderConfig, Transform,
};

pub use grid::{grid_cells, GridCell, Line};
pub use tian::{tian_fit, FitMode};

/// How the canvas was sized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One glyph, canvas hugs its ink box
    Tight,
    /// One fixed-size cell per glyph
    Cells,
}

/// Explicit output size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

/// A glyph and where it goes in content space
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub record: GlyphRecord,
    pub transform: Transform,
}

/// One line of Pinyin, centered on `x` with its baseline at `y` (canvas space)
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Everything the serializer needs to draw one document
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLayout {
    pub mode: LayoutMode,
    pub view_box_width: f64,
    pub view_box_height: f64,
    pub pixel_size: Option<PixelSize>,
    /// Canvas position of the content-space origin (before the Y flip)
    pub origin: (f64, f64),
    pub cells: Vec<GridCell>,
    pub glyphs: Vec<PlacedGlyph>,
    pub annotations: Vec<Annotation>,
    /// Reserved Pinyin block above / below the content
    pub pinyin_top: f64,
    pub pinyin_bottom: f64,
}

impl CanvasLayout {
    /// The content-to-canvas transform: shift to `origin`, flip Y
    pub fn content_transform(&self) -> Transform {
        Transform::new(1.0, -1.0, self.origin.0, self.origin.1)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

/// Computes canvas layouts for one font's em size and one configuration
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    config: &'a RenderConfig,
    units_per_em: f64,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a RenderConfig, units_per_em: u16) -> Self {
        Self {
            config,
            units_per_em: f64::from(units_per_em),
        }
    }

    /// Lays out `glyphs` in a row with `annotations[i]` over glyph `i`.
    ///
    /// A single glyph in tight mode, with no grid and no annotation, gets a
    /// canvas sized to its ink. Everything else uses fixed cells.
    pub fn layout(&self, mut glyphs: Vec<GlyphRecord>, annotations: &[String]) -> CanvasLayout {
        let annotated = annotations.iter().any(|text| !text.is_empty());
        let tight = glyphs.len() == 1
            && self.config.bbox_mode == BboxMode::Tight
            && self.config.grid.is_none()
            && !annotated;

        if tight {
            if let Some(glyph) = glyphs.pop() {
                return self.layout_tight(glyph);
            }
        }
        self.layout_cells(glyphs, annotations)
    }

    /// Canvas for one glyph sized to its ink box plus margins.
    ///
    /// A glyph without ink uses `(0, 0, advance, em)`, or half an em wide
    /// when the advance is zero.
    pub fn layout_tight(&self, glyph: GlyphRecord) -> CanvasLayout {
        let margin = self.config.margin;
        let content = glyph.bounds.unwrap_or_else(|| self.fallback_box(&glyph));
        let content_h = content.height();

        let view_box_width = quantize(content.width() + 2.0 * margin);
        let view_box_height = quantize(content_h + 2.0 * margin);

        let transform = Transform::translate(-content.x_min, -content.y_min);

        log::debug!(
            "Tight layout for U+{:04X}: view box {view_box_width}×{view_box_height}",
            glyph.codepoint
        );

        CanvasLayout {
            mode: LayoutMode::Tight,
            view_box_width,
            view_box_height,
            pixel_size: self.pixel_size(view_box_width, view_box_height),
            origin: (margin, margin + content_h),
            cells: Vec::new(),
            glyphs: vec![PlacedGlyph {
                record: glyph,
                transform,
            }],
            annotations: Vec::new(),
            pinyin_top: 0.0,
            pinyin_bottom: 0.0,
        }
    }

    /// One `cell_size` square per glyph, left to right.
    pub fn layout_cells(
        &self,
        glyphs: impl IntoIterator<Item = GlyphRecord>,
        annotations: &[String],
    ) -> CanvasLayout {
        let config = self.config;
        let cell = config.cell_size;
        let margin = config.margin;

        let glyphs: Vec<PlacedGlyph> = glyphs
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let transform = self.cell_transform(&record, i);
                PlacedGlyph { record, transform }
            })
            .collect();
        let count = glyphs.len();

        let (pinyin_top, pinyin_bottom) = if annotations.iter().any(|text| !text.is_empty()) {
            match config.pinyin_position {
                PinyinPosition::Top => (config.pinyin_block(), 0.0),
                PinyinPosition::Bottom => (0.0, config.pinyin_block()),
            }
        } else {
            (0.0, 0.0)
        };

        let canvas_height = cell + 2.0 * margin + pinyin_top + pinyin_bottom;
        let view_box_width = quantize(count as f64 * cell + 2.0 * margin);
        let view_box_height = quantize(canvas_height);

        let baseline = match config.pinyin_position {
            PinyinPosition::Top => margin + config.pinyin_size,
            PinyinPosition::Bottom => canvas_height - margin - config.pinyin_size * 0.2,
        };
        let annotations = annotations
            .iter()
            .take(count)
            .enumerate()
            .filter(|(_, text)| !text.is_empty())
            .map(|(i, text)| Annotation {
                text: text.clone(),
                x: margin + (i as f64 + 0.5) * cell,
                y: baseline,
            })
            .collect();

        log::debug!(
            "Cell layout: {count} cell(s) of {cell}, grid {}, view box {view_box_width}×{view_box_height}",
            config.grid
        );

        CanvasLayout {
            mode: LayoutMode::Cells,
            view_box_width,
            view_box_height,
            pixel_size: self.pixel_size(view_box_width, view_box_height),
            origin: (margin, margin + pinyin_top + cell),
            cells: grid_cells(config.grid, count, cell),
            glyphs,
            annotations,
            pinyin_top,
            pinyin_bottom,
        }
    }

    /// Placement of glyph `index` inside its cell.
    ///
    /// 田 grids fit the ink box around the cell's cross point; every other
    /// case puts the glyph origin at the cell's lower-left corner.
    pub fn cell_transform(&self, glyph: &GlyphRecord, index: usize) -> Transform {
        let cell = self.config.cell_size;
        let offset = cell * index as f64;

        if self.config.grid == GridKind::Tian {
            let mode = FitMode::from_preserve_aspect(self.config.tian_preserve_aspect);
            if let Some(fit) = tian_fit(glyph.bounds.as_ref(), cell, self.config.tian_frac, mode) {
                return fit.translated(offset, 0.0);
            }
        }
        Transform::translate(offset, 0.0)
    }

    fn fallback_box(&self, glyph: &GlyphRecord) -> Bounds {
        let width = if glyph.advance_width > 0.0 {
            glyph.advance_width
        } else {
            self.units_per_em / 2.0
        };
        Bounds::new(0.0, 0.0, width, self.units_per_em)
    }

    fn pixel_size(&self, view_box_width: f64, view_box_height: f64) -> Option<PixelSize> {
        let height = self.config.pixel_height?;
        if view_box_height <= 0.0 {
            return None;
        }
        Some(PixelSize {
            width: view_box_width * height / view_box_height,
            height,
        })
    }
}
