//! Sigil Core: the vocabulary every stage shares
//!
//! A conversion runs in three steps, strictly in sequence:
//!
//! 1. **Resolve** - a [`GlyphSource`] turns code points into [`types::GlyphRecord`]s
//! 2. **Lay out** - geometry for the canvas, grid cells, glyph placement and Pinyin
//! 3. **Serialize** - the layout becomes a self-contained SVG document
//!
//! This crate holds what those stages pass between each other: glyph and
//! font records, the [`geometry`] primitives, the resolved
//! [`RenderConfig`], number formatting and parsing in [`units`], and the
//! error taxonomy in [`error`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod traits;
pub mod units;

pub use config::{BboxMode, GridKind, PinyinPosition, RenderConfig, RenderOptions};
pub use error::{Result, SigilError};
pub use geometry::{Bounds, Transform};
pub use traits::GlyphSource;

/// The data structures that flow between stages
pub mod types {
    use crate::geometry::Bounds;

    /// One drawing command in font units (Y-up)
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum PathCommand {
        MoveTo(f64, f64),
        LineTo(f64, f64),
        QuadTo {
            ctrl_x: f64,
            ctrl_y: f64,
            x: f64,
            y: f64,
        },
        CurveTo {
            ctrl1_x: f64,
            ctrl1_y: f64,
            ctrl2_x: f64,
            ctrl2_y: f64,
            x: f64,
            y: f64,
        },
        Close,
    }

    /// Everything the pipeline needs to know about one glyph
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlyphRecord {
        pub codepoint: u32,
        pub glyph_name: String,
        pub outline: Vec<PathCommand>,
        /// Ink bounds; `None` when the outline is empty
        pub bounds: Option<Bounds>,
        pub advance_width: f64,
    }

    impl GlyphRecord {
        /// A glyph with no outline, such as a space
        pub fn empty(codepoint: u32, glyph_name: impl Into<String>, advance_width: f64) -> Self {
            Self {
                codepoint,
                glyph_name: glyph_name.into(),
                outline: Vec::new(),
                bounds: None,
                advance_width,
            }
        }

        pub fn has_outline(&self) -> bool {
            !self.outline.is_empty()
        }

        /// The code point as a `char`, if it is a scalar value
        pub fn character(&self) -> Option<char> {
            char::from_u32(self.codepoint)
        }
    }

    /// Result of looking up a code point
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlyphLookup {
        pub record: GlyphRecord,
        /// The character map had no entry; `record` is the missing glyph
        pub missing: bool,
    }

    impl GlyphLookup {
        pub fn found(record: GlyphRecord) -> Self {
            Self {
                record,
                missing: false,
            }
        }

        pub fn missing(record: GlyphRecord) -> Self {
            Self {
                record,
                missing: true,
            }
        }
    }

    /// Font-wide metrics, one per loaded face
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FontMetrics {
        /// Always positive; fonts declaring zero are rejected at load
        pub units_per_em: u16,
        pub display_name: String,
    }
}
