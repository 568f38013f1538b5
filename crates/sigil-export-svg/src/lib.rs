//! SVG export for sigil
//!
//! Serializes a [`CanvasLayout`] into one self-contained SVG document.
//!
//! ## Features
//!
//! - Outlines written in font units under a single Y-flip group
//! - Practice grid squares and guides with inline styles
//! - Pinyin annotations as centered `<text>` elements
//! - Compact, deterministic numbers (at most three decimals)
//! - Accessibility label and a `<metadata>` record of font and glyphs

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use sigil_core::{
    error::{ExportError, Result},
    types::{FontMetrics, GlyphRecord, PathCommand},
    units::{codepoint_label, fmt},
    RenderConfig, Transform,
};
use sigil_layout::{Annotation, CanvasLayout, GridCell};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// SVG exporter for one resolved configuration
#[derive(Debug, Clone, Copy)]
pub struct SvgExporter<'a> {
    config: &'a RenderConfig,
}

impl<'a> SvgExporter<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Export a layout to a complete SVG document
    ///
    /// # Arguments
    ///
    /// * `layout` - Canvas geometry from the layout stage
    /// * `metrics` - Font name and em size, recorded in the metadata
    ///
    /// # Returns
    ///
    /// The document text, ending in a newline
    pub fn export(&self, layout: &CanvasLayout, metrics: &FontMetrics) -> Result<String> {
        let svg = self.render(layout, metrics)?;
        log::debug!("Serialized SVG document ({} bytes)", svg.len());
        Ok(svg)
    }

    fn render(
        &self,
        layout: &CanvasLayout,
        metrics: &FontMetrics,
    ) -> std::result::Result<String, ExportError> {
        let mut svg = String::new();

        write!(
            &mut svg,
            r#"<svg xmlns="{SVG_NS}" viewBox="0 0 {} {}""#,
            fmt(layout.view_box_width),
            fmt(layout.view_box_height)
        )?;
        if let Some(size) = layout.pixel_size {
            write!(
                &mut svg,
                r#" width="{}" height="{}""#,
                fmt(size.width),
                fmt(size.height)
            )?;
        }
        let label = aria_label(layout.glyphs.iter().map(|placed| &placed.record));
        if !label.is_empty() {
            write!(&mut svg, r#" aria-label="{}""#, escape_xml(&label))?;
        }
        writeln!(&mut svg, ">")?;

        writeln!(
            &mut svg,
            "  <metadata>{}</metadata>",
            escape_xml(&self.metadata(layout, metrics))
        )?;

        let (ox, oy) = layout.origin;
        writeln!(
            &mut svg,
            r#"  <g transform="translate({} {}) scale(1 -1)">"#,
            fmt(ox),
            fmt(oy)
        )?;

        for cell in &layout.cells {
            self.write_cell(&mut svg, cell)?;
        }

        let glyph_style = escape_xml(&self.glyph_style());
        for placed in &layout.glyphs {
            if !placed.record.has_outline() {
                continue;
            }
            write!(
                &mut svg,
                r#"    <path d="{}" style="{glyph_style}""#,
                path_data(&placed.record.outline)
            )?;
            if let Some(transform) = transform_attr(&placed.transform) {
                write!(&mut svg, r#" transform="{transform}""#)?;
            }
            writeln!(&mut svg, "/>")?;
        }

        writeln!(&mut svg, "  </g>")?;

        for annotation in &layout.annotations {
            self.write_annotation(&mut svg, annotation)?;
        }

        writeln!(&mut svg, "</svg>")?;
        Ok(svg)
    }

    /// Informational record: font, glyph(s), em size
    pub fn metadata(&self, layout: &CanvasLayout, metrics: &FontMetrics) -> String {
        let font = &metrics.display_name;
        let upm = metrics.units_per_em;

        if let [placed] = layout.glyphs.as_slice() {
            let glyph = &placed.record;
            return format!(
                "font={font}; glyph={}; cp={}; unitsPerEm={upm}; advance={}",
                glyph.glyph_name,
                codepoint_label(glyph.codepoint),
                fmt(glyph.advance_width)
            );
        }

        let advances = layout
            .glyphs
            .iter()
            .map(|placed| fmt(placed.record.advance_width))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "font={font}; unitsPerEm={upm}; cells={}; grid={}; advances={advances}",
            layout.glyphs.len(),
            self.config.grid
        )
    }

    fn glyph_style(&self) -> String {
        let mut style = format!("fill:{}", self.config.fill);
        if let Some(stroke) = &self.config.stroke {
            write_lossless(&mut style, format_args!(";stroke:{stroke}"));
            if let Some(width) = self.config.stroke_width_px.filter(|w| *w != 0.0) {
                write_lossless(&mut style, format_args!(";stroke-width:{}", fmt(width)));
            }
        }
        style
    }

    fn border_style(&self) -> String {
        format!(
            "stroke:{};stroke-width:{};fill:none;vector-effect:non-scaling-stroke",
            self.config.grid_color,
            fmt(self.config.grid_border_width)
        )
    }

    fn guide_style(&self) -> String {
        let mut style = format!(
            "stroke:{};stroke-width:{};fill:none;vector-effect:non-scaling-stroke",
            self.config.grid_color,
            fmt(self.config.grid_guide_width)
        );
        if let Some(dash) = &self.config.grid_dash {
            write_lossless(&mut style, format_args!(";stroke-dasharray:{dash}"));
        }
        style
    }

    fn write_cell(&self, svg: &mut String, cell: &GridCell) -> std::fmt::Result {
        writeln!(
            svg,
            r#"    <rect x="{}" y="0" width="{size}" height="{size}" style="{}"/>"#,
            fmt(cell.x),
            escape_xml(&self.border_style()),
            size = fmt(cell.size)
        )?;

        let guide_style = escape_xml(&self.guide_style());
        for line in cell.guides(self.config.grid) {
            writeln!(
                svg,
                r#"    <line x1="{}" y1="{}" x2="{}" y2="{}" style="{guide_style}"/>"#,
                fmt(line.x1),
                fmt(line.y1),
                fmt(line.x2),
                fmt(line.y2)
            )?;
        }
        Ok(())
    }

    fn write_annotation(&self, svg: &mut String, annotation: &Annotation) -> std::fmt::Result {
        write!(
            svg,
            r#"  <text x="{}" y="{}""#,
            fmt(annotation.x),
            fmt(annotation.y)
        )?;
        if let Some(family) = &self.config.pinyin_font {
            write!(svg, r#" font-family="{}""#, escape_xml(family))?;
        }
        writeln!(
            svg,
            r#" font-size="{}" text-anchor="middle" fill="{}" dominant-baseline="alphabetic">{}</text>"#,
            fmt(self.config.pinyin_size),
            escape_xml(&self.config.fill),
            escape_xml(&annotation.text)
        )
    }
}

// Writing into a String never fails
fn write_lossless(out: &mut String, args: std::fmt::Arguments<'_>) {
    let _ = out.write_fmt(args);
}

/// SVG path data for outline commands, coordinates unchanged
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::with_capacity(commands.len() * 12);
    for command in commands {
        match *command {
            PathCommand::MoveTo(x, y) => {
                write_lossless(&mut d, format_args!("M{} {}", fmt(x), fmt(y)));
            }
            PathCommand::LineTo(x, y) => {
                write_lossless(&mut d, format_args!("L{} {}", fmt(x), fmt(y)));
            }
            PathCommand::QuadTo {
                ctrl_x,
                ctrl_y,
                x,
                y,
            } => {
                write_lossless(
                    &mut d,
                    format_args!("Q{} {} {} {}", fmt(ctrl_x), fmt(ctrl_y), fmt(x), fmt(y)),
                );
            }
            PathCommand::CurveTo {
                ctrl1_x,
                ctrl1_y,
                ctrl2_x,
                ctrl2_y,
                x,
                y,
            } => {
                write_lossless(
                    &mut d,
                    format_args!(
                        "C{} {} {} {} {} {}",
                        fmt(ctrl1_x),
                        fmt(ctrl1_y),
                        fmt(ctrl2_x),
                        fmt(ctrl2_y),
                        fmt(x),
                        fmt(y)
                    ),
                );
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

/// `transform` attribute value for a glyph placement, `None` for identity
pub fn transform_attr(transform: &Transform) -> Option<String> {
    if transform.is_identity() {
        return None;
    }
    if transform.is_translation() {
        return Some(format!(
            "translate({} {})",
            fmt(transform.tx),
            fmt(transform.ty)
        ));
    }
    let [a, b, c, d, e, f] = transform.to_matrix();
    Some(format!(
        "matrix({} {} {} {} {} {})",
        fmt(a),
        fmt(b),
        fmt(c),
        fmt(d),
        fmt(e),
        fmt(f)
    ))
}

/// Accessible name: the characters themselves, or `U+XXXX` labels when
/// any of them is a control or whitespace character.
pub fn aria_label<'g>(glyphs: impl IntoIterator<Item = &'g GlyphRecord>) -> String {
    let glyphs: Vec<&GlyphRecord> = glyphs.into_iter().collect();
    let printable: Option<String> = glyphs
        .iter()
        .map(|glyph| {
            glyph
                .character()
                .filter(|ch| !ch.is_control() && !ch.is_whitespace())
        })
        .collect();

    printable.unwrap_or_else(|| {
        glyphs
            .iter()
            .map(|glyph| codepoint_label(glyph.codepoint))
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Escape text for XML content and double-quoted attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Write a finished document to `path`
pub fn write_document(path: impl AsRef<Path>, document: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, document).map_err(|source| ExportError::write_failed(path, source))?;
    log::debug!("Wrote {} bytes to {}", document.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_data_compact() {
        let commands = vec![
            PathCommand::MoveTo(50.0, 0.0),
            PathCommand::LineTo(450.0, 0.0),
            PathCommand::QuadTo {
                ctrl_x: 300.5,
                ctrl_y: 350.25,
                x: 250.0,
                y: 700.0,
            },
            PathCommand::Close,
        ];
        assert_eq!(path_data(&commands), "M50 0L450 0Q300.5 350.25 250 700Z");
    }

    #[test]
    fn test_path_data_cubic() {
        let commands = vec![
            PathCommand::MoveTo(0.0, 0.0),
            PathCommand::CurveTo {
                ctrl1_x: 1.0,
                ctrl1_y: 2.0,
                ctrl2_x: 3.0,
                ctrl2_y: 4.0,
                x: 5.1234,
                y: -6.0,
            },
        ];
        assert_eq!(path_data(&commands), "M0 0C1 2 3 4 5.123 -6");
    }

    #[test]
    fn test_transform_attr_forms() {
        assert_eq!(transform_attr(&Transform::IDENTITY), None);
        assert_eq!(
            transform_attr(&Transform::translate(-50.0, 0.0)).as_deref(),
            Some("translate(-50 0)")
        );
        assert_eq!(
            transform_attr(&Transform::new(0.5, 0.25, 1100.0, 300.0)).as_deref(),
            Some("matrix(0.5 0 0 0.25 1100 300)")
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("中文"), "中文");
    }

    #[test]
    fn test_aria_label_characters() {
        let glyphs = [
            GlyphRecord::empty(0x4E2D, "uni4E2D", 1000.0),
            GlyphRecord::empty(0x6587, "uni6587", 1000.0),
        ];
        assert_eq!(aria_label(&glyphs), "中文");
    }

    #[test]
    fn test_aria_label_unprintable_uses_codepoints() {
        let glyphs = [
            GlyphRecord::empty(0x41, "A", 600.0),
            GlyphRecord::empty(0x20, "space", 250.0),
        ];
        assert_eq!(aria_label(&glyphs), "U+0041 U+0020");
    }
}
