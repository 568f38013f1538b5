//! Font loading for sigil: from bytes on disk to glyph records
//!
//! The first stage of the pipeline. A [`Font`] owns the raw file bytes and
//! parses tables on demand, so one loaded face can be shared across threads
//! and serve any number of conversions.
//!
//! ## Collections
//!
//! TrueType/OpenType collections (`.ttc`, `.otc`) hold several faces. Pick
//! one with the face index; an index past the end fails at load time with
//! [`FontLoadError::InvalidFaceIndex`] instead of silently reading face 0.

pub mod outline;

use std::fs;
use std::io;
use std::path::Path;

use read_fonts::{
    types::{GlyphId, GlyphId16},
    FileRef, FontRef as ReadFontRef, TableProvider,
};
use skrifa::{
    instance::{LocationRef, Size},
    outline::DrawSettings,
    string::StringId,
    MetadataProvider,
};

use sigil_core::{
    error::{FontLoadError, Result},
    traits::GlyphSource,
    types::{FontMetrics, GlyphLookup, GlyphRecord},
    units::codepoint_label,
};

use crate::outline::RecordingPen;

/// One face of a font file, loaded and validated
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    face_count: u32,
    family_name: Option<String>,
    subfamily_name: Option<String>,
    metrics: FontMetrics,
}

impl Font {
    /// Opens the first face of a font file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face of a font file
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => FontLoadError::FileNotFound(path.display().to_string()),
            _ => FontLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let fallback_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Self::from_data_index(data, face_index, fallback_name)
    }

    /// Loads a face from raw bytes.
    ///
    /// `fallback_name` is used as the display name when the font's name
    /// table has neither a full name nor a family name.
    pub fn from_data_index(
        data: Vec<u8>,
        face_index: u32,
        fallback_name: Option<String>,
    ) -> Result<Self> {
        let face_count = count_faces(&data)?;
        if face_index >= face_count {
            return Err(FontLoadError::InvalidFaceIndex {
                index: face_index,
                count: face_count,
            }
            .into());
        }

        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map_err(|_| FontLoadError::InvalidData)?
            .units_per_em();
        if units_per_em == 0 {
            return Err(FontLoadError::InvalidUnitsPerEm.into());
        }

        let full_name = english_name(&font_ref, StringId::FULL_NAME);
        let family_name = english_name(&font_ref, StringId::FAMILY_NAME);
        let subfamily_name = english_name(&font_ref, StringId::SUBFAMILY_NAME);
        let display_name = display_name(
            full_name.as_deref(),
            family_name.as_deref(),
            subfamily_name.as_deref(),
            fallback_name.as_deref(),
        );

        log::debug!(
            "Loaded face {face_index}/{face_count} '{display_name}' (unitsPerEm {units_per_em})"
        );

        Ok(Font {
            data,
            face_index,
            face_count,
            family_name,
            subfamily_name,
            metrics: FontMetrics {
                units_per_em,
                display_name,
            },
        })
    }

    /// Face index inside a collection (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Number of faces in the file this face came from
    pub fn face_count(&self) -> u32 {
        self.face_count
    }

    pub fn units_per_em(&self) -> u16 {
        self.metrics.units_per_em
    }

    pub fn display_name(&self) -> &str {
        &self.metrics.display_name
    }

    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    pub fn subfamily_name(&self) -> Option<&str> {
        self.subfamily_name.as_deref()
    }

    /// Number of glyphs declared by `maxp`
    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| u32::from(maxp.num_glyphs())))
    }

    /// Number of code points the character map covers
    pub fn mapped_codepoints(&self) -> usize {
        self.font_ref()
            .map(|font| font.charmap().mappings().count())
            .unwrap_or(0)
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    fn glyph_record(&self, font: &ReadFontRef<'_>, codepoint: u32, gid: GlyphId) -> GlyphRecord {
        let advance_width = font
            .hmtx()
            .ok()
            .and_then(|hmtx| hmtx.advance(gid))
            .map(f64::from)
            .unwrap_or_else(|| f64::from(self.metrics.units_per_em));

        let mut pen = RecordingPen::new();
        if let Some(glyph) = font.outline_glyphs().get(gid) {
            let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
            if let Err(err) = glyph.draw(settings, &mut pen) {
                log::warn!(
                    "could not draw outline for {} (gid {}): {err}",
                    codepoint_label(codepoint),
                    gid.to_u32()
                );
                pen = RecordingPen::new();
            }
        }
        let (outline, bounds) = pen.finish();

        GlyphRecord {
            codepoint,
            glyph_name: glyph_name(font, gid),
            outline,
            bounds,
            advance_width,
        }
    }
}

impl GlyphSource for Font {
    fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    fn resolve(&self, codepoint: u32) -> GlyphLookup {
        let Some(font) = self.font_ref() else {
            // Parsed once already at load time
            return GlyphLookup::missing(GlyphRecord::empty(
                codepoint,
                ".notdef",
                f64::from(self.metrics.units_per_em),
            ));
        };

        match font.charmap().map(codepoint).filter(|gid| gid.to_u32() != 0) {
            Some(gid) => GlyphLookup::found(self.glyph_record(&font, codepoint, gid)),
            None => {
                log::warn!(
                    "{} not in font; exporting '.notdef'.",
                    codepoint_label(codepoint)
                );
                GlyphLookup::missing(self.glyph_record(&font, codepoint, GlyphId::new(0)))
            }
        }
    }

    fn has_glyph(&self, codepoint: u32) -> bool {
        self.font_ref()
            .and_then(|font| font.charmap().map(codepoint))
            .is_some_and(|gid| gid.to_u32() != 0)
    }
}

/// Number of faces in a font file or collection
pub fn count_faces(data: &[u8]) -> Result<u32> {
    match FileRef::new(data).map_err(|_| FontLoadError::InvalidData)? {
        FileRef::Font(_) => Ok(1),
        FileRef::Collection(collection) => Ok(collection.len()),
    }
}

fn english_name(font: &ReadFontRef<'_>, id: StringId) -> Option<String> {
    font.localized_strings(id)
        .english_or_first()
        .map(|name| name.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Human-readable font name: full name, else family plus a non-regular
/// subfamily, else the fallback (usually the file name).
pub fn display_name(
    full_name: Option<&str>,
    family_name: Option<&str>,
    subfamily_name: Option<&str>,
    fallback: Option<&str>,
) -> String {
    if let Some(full) = full_name.map(str::trim).filter(|s| !s.is_empty()) {
        return full.to_string();
    }

    if let Some(family) = family_name.map(str::trim).filter(|s| !s.is_empty()) {
        return match subfamily_name.map(str::trim) {
            Some(sub) if !sub.is_empty() && !sub.eq_ignore_ascii_case("regular") => {
                format!("{family} {sub}")
            }
            _ => family.to_string(),
        };
    }

    fallback
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

fn glyph_name(font: &ReadFontRef<'_>, gid: GlyphId) -> String {
    let id = gid.to_u32();
    if id == 0 {
        return ".notdef".to_string();
    }

    u16::try_from(id)
        .ok()
        .and_then(|id16| {
            let post = font.post().ok()?;
            post.glyph_name(GlyphId16::new(id16))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("gid{id}"))
}
