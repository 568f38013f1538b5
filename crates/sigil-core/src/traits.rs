//! The seam between font parsing and everything built on top of it
//!
//! Layout and serialization never touch font tables. They see glyphs only
//! through [`GlyphSource`], which lets tests drive the whole pipeline with
//! a hand-built stub instead of a font file.
//!
//! ```ignore
//! struct StubSource {
//!     metrics: FontMetrics,
//! }
//!
//! impl GlyphSource for StubSource {
//!     fn metrics(&self) -> &FontMetrics {
//!         &self.metrics
//!     }
//!
//!     fn resolve(&self, codepoint: u32) -> GlyphLookup {
//!         GlyphLookup::found(GlyphRecord::empty(codepoint, "space", 250.0))
//!     }
//! }
//! ```

use crate::types::{FontMetrics, GlyphLookup};

/// Anything that can turn a code point into glyph geometry.
///
/// Implementations must be read-only after construction so one source can
/// serve many conversions, sequentially or from several threads.
pub trait GlyphSource: Send + Sync {
    /// Font-wide metrics shared by every glyph
    fn metrics(&self) -> &FontMetrics;

    /// Look up a code point.
    ///
    /// A code point missing from the character map is not an error: the
    /// font's missing glyph is returned with [`GlyphLookup::missing`] set.
    fn resolve(&self, codepoint: u32) -> GlyphLookup;

    /// Whether the character map covers `codepoint`
    fn has_glyph(&self, codepoint: u32) -> bool {
        !self.resolve(codepoint).missing
    }
}
