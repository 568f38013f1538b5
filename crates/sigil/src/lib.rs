//! sigil - glyphs to SVG, with Chinese practice grids and Pinyin
//!
//! sigil draws characters from a font file as standalone SVG documents:
//! 1. Glyph resolution (code point → outline, bounds, advance)
//! 2. Pinyin reconciliation (one tone-marked token per character)
//! 3. Layout (canvas, 方/田/米 grid cells, glyph placement)
//! 4. Serialization (one self-contained SVG document)
//!
//! # Example
//!
//! ```ignore
//! use sigil::prelude::*;
//! use sigil::fontdb::Font;
//!
//! let font = Font::from_file("NotoSerifSC-Regular.otf")?;
//! let mut options = RenderOptions::default();
//! options.grid = GridKind::Tian;
//! let config = options.resolve(font.units_per_em())?;
//!
//! let result = Converter::new(font).convert_text("中", Some("zhong1"), &config)?;
//! ```
//!
//! # Feature Flags
//!
//! - `fontdb` (default): load fonts from disk through skrifa/read-fonts

mod converter;

pub use converter::{Conversion, Converter};
pub use sigil_core::{
    config, error, geometry, traits, types, units, BboxMode, GridKind, PinyinPosition,
    RenderConfig, RenderOptions,
};

#[cfg(feature = "fontdb")]
pub use sigil_fontdb as fontdb;

pub use sigil_export_svg as export_svg;
pub use sigil_layout as layout;
pub use sigil_pinyin as pinyin;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{Conversion, Converter};
    pub use sigil_core::{
        error::{Result, SigilError},
        traits::GlyphSource,
        types::{FontMetrics, GlyphLookup, GlyphRecord},
        BboxMode, GridKind, PinyinPosition, RenderConfig, RenderOptions,
    };
}
