//! One conversion request, start to finish

// this_file: crates/sigil/src/converter.rs

use std::borrow::Cow;

use sigil_core::{
    error::{ParseError, Result},
    traits::GlyphSource,
    units::output_file_name,
    BboxMode, RenderConfig,
};
use sigil_export_svg::SvgExporter;
use sigil_layout::{CanvasLayout, LayoutEngine};

/// Converter for glyphs from one source: Resolve → Reconcile → Lay out → Serialize
///
/// The source is only read, so one converter can serve any number of
/// requests, including from several threads at once.
///
/// ```ignore
/// use sigil::{Converter, RenderOptions};
/// use sigil::fontdb::Font;
///
/// let font = Font::from_file("NotoSansSC-Regular.otf")?;
/// let config = RenderOptions::default().resolve(font.units_per_em())?;
/// let converter = Converter::new(font);
///
/// let result = converter.convert_text("你好", Some("ni3 hao3"), &config)?;
/// std::fs::write(&result.file_name, &result.document)?;
/// ```
pub struct Converter<S: GlyphSource> {
    source: S,
}

/// The outcome of one conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The complete SVG document
    pub document: String,
    /// Default file name derived from the code points (`U+4F60-U+597D.svg`)
    pub file_name: String,
    /// Configuration actually used, after any forced mode change
    pub config: RenderConfig,
    pub layout: CanvasLayout,
    /// Code points the font had no glyph for
    pub missing: Vec<u32>,
}

impl<S: GlyphSource> Converter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Convert every character of `text`
    pub fn convert_text(
        &self,
        text: &str,
        pinyin: Option<&str>,
        config: &RenderConfig,
    ) -> Result<Conversion> {
        let codepoints: Vec<u32> = text.chars().map(u32::from).collect();
        self.convert(&codepoints, pinyin, config)
    }

    /// Convert a sequence of code points into one document.
    ///
    /// A single code point without grid or Pinyin keeps the configured
    /// bounding-box mode; anything else is laid out in em-sized cells.
    pub fn convert(
        &self,
        codepoints: &[u32],
        pinyin: Option<&str>,
        config: &RenderConfig,
    ) -> Result<Conversion> {
        if codepoints.is_empty() {
            return Err(ParseError::EmptyCharacter.into());
        }

        let metrics = self.source.metrics();

        let mut missing = Vec::new();
        let glyphs = codepoints
            .iter()
            .map(|&codepoint| {
                let lookup = self.source.resolve(codepoint);
                if lookup.missing {
                    missing.push(codepoint);
                }
                lookup.record
            })
            .collect::<Vec<_>>();

        let annotations = sigil_pinyin::normalize(pinyin, codepoints.len());
        let config = effective_config(config, codepoints.len(), &annotations);
        log::debug!(
            "Converting {} code point(s) in {} mode",
            codepoints.len(),
            config.bbox_mode
        );

        let layout = LayoutEngine::new(&config, metrics.units_per_em).layout(glyphs, &annotations);
        let document = SvgExporter::new(&config).export(&layout, metrics)?;

        Ok(Conversion {
            document,
            file_name: output_file_name(codepoints),
            config: config.into_owned(),
            layout,
            missing,
        })
    }
}

/// Grids, annotations and multi-glyph rows need a fixed cell, so they
/// switch the request to em mode; the caller's config is left untouched.
fn effective_config<'c>(
    config: &'c RenderConfig,
    count: usize,
    annotations: &[String],
) -> Cow<'c, RenderConfig> {
    let annotated = annotations.iter().any(|text| !text.is_empty());
    let needs_cells = count != 1 || !config.grid.is_none() || annotated;
    if needs_cells && config.bbox_mode != BboxMode::Em {
        Cow::Owned(config.with_bbox_mode(BboxMode::Em))
    } else {
        Cow::Borrowed(config)
    }
}
