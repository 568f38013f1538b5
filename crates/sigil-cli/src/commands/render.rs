//! Render command implementation
//!
//! One document per invocation: a single glyph, or a row of cells for `--text`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sigil::{export_svg::write_document, layout::FitMode, Conversion, Converter};
use sigil_core::{
    error::Result,
    units::{codepoint_label, fmt},
    GridKind,
};
use sigil_fontdb::Font;

use super::load_font;
use crate::cli::RenderArgs;

/// Where the finished document goes
#[derive(Debug, PartialEq, Eq)]
enum Target {
    Stdout,
    File(PathBuf),
}

impl Target {
    fn resolve(output: Option<&Path>, default_name: &str) -> Self {
        match output {
            Some(path) if path.as_os_str() == "-" => Target::Stdout,
            Some(path) => Target::File(path.to_path_buf()),
            None => Target::File(PathBuf::from(default_name)),
        }
    }
}

pub fn run(args: &RenderArgs, quiet: bool) -> Result<()> {
    let codepoints = args.input.codepoints()?;
    let font = load_font(&args.font)?;
    let config = args.style.to_options().resolve(font.units_per_em())?;

    let converter = Converter::new(font);
    let conversion = converter.convert(&codepoints, args.pinyin.as_deref(), &config)?;

    let target = Target::resolve(args.output.as_deref(), &conversion.file_name);
    match &target {
        Target::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(conversion.document.as_bytes())?;
            stdout.flush()?;
        },
        Target::File(path) => write_document(path, &conversion.document)?,
    }

    if !quiet {
        for line in summary(&target, converter.source(), &conversion) {
            eprintln!("{line}");
        }
    }
    Ok(())
}

fn summary(target: &Target, font: &Font, conversion: &Conversion) -> Vec<String> {
    let mut lines = Vec::new();
    if let Target::File(path) = target {
        lines.push(format!("✓ Wrote {}", path.display()));
    }

    if let [placed] = conversion.layout.glyphs.as_slice() {
        lines.push(format!(
            "font: {} | glyph: {} | codepoint: {}",
            font.display_name(),
            placed.record.glyph_name,
            codepoint_label(placed.record.codepoint)
        ));
    }

    let config = &conversion.config;
    if config.grid == GridKind::Tian {
        lines.push(format!(
            "田字格 fit: {} of cell (mode: {}); centered at cross point",
            fmt(config.tian_frac),
            FitMode::from_preserve_aspect(config.tian_preserve_aspect)
        ));
    }
    if let Some(px) = config.pixel_height {
        lines.push(format!("pixel height: {}px (width auto)", fmt(px)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_means_stdout() {
        assert_eq!(Target::resolve(Some(Path::new("-")), "U+0041.svg"), Target::Stdout);
    }

    #[test]
    fn test_default_name_used_without_output() {
        assert_eq!(
            Target::resolve(None, "U+4F60-U+597D.svg"),
            Target::File(PathBuf::from("U+4F60-U+597D.svg"))
        );
        assert_eq!(
            Target::resolve(Some(Path::new("out/zh.svg")), "U+4E2D.svg"),
            Target::File(PathBuf::from("out/zh.svg"))
        );
    }
}
