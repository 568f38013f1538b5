//! Info command implementation
//!
//! Displays naming and metrics for one face of a font file.

use std::io;

use serde::Serialize;
use sigil_core::error::Result;
use sigil_fontdb::Font;

use super::load_font;
use crate::cli::InfoArgs;

#[derive(Debug, Serialize)]
struct FontReport<'a> {
    path: String,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    family: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subfamily: Option<&'a str>,
    units_per_em: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    glyph_count: Option<u32>,
    mapped_codepoints: usize,
    face_index: u32,
    face_count: u32,
}

impl<'a> FontReport<'a> {
    fn new(path: String, font: &'a Font) -> Self {
        Self {
            path,
            display_name: font.display_name(),
            family: font.family_name(),
            subfamily: font.subfamily_name(),
            units_per_em: font.units_per_em(),
            glyph_count: font.glyph_count(),
            mapped_codepoints: font.mapped_codepoints(),
            face_index: font.face_index(),
            face_count: font.face_count(),
        }
    }

    fn print(&self) {
        println!("sigil v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Font:       {}", self.path);
        println!("Name:       {}", self.display_name);
        println!("Family:     {}", self.family.unwrap_or("-"));
        println!("Subfamily:  {}", self.subfamily.unwrap_or("-"));
        println!("Units/em:   {}", self.units_per_em);
        match self.glyph_count {
            Some(count) => println!("Glyphs:     {count}"),
            None => println!("Glyphs:     -"),
        }
        println!("Mapped:     {} code point(s)", self.mapped_codepoints);
        println!("Face:       {} of {}", self.face_index, self.face_count);
    }
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = load_font(&args.font)?;
    let report = FontReport::new(args.font.font.display().to_string(), &font);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(io::Error::from)?;
        println!("{json}");
    } else {
        report.print();
    }
    Ok(())
}
