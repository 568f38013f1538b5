//! Batch command implementation
//!
//! Renders every character of a text to its own `U+XXXX.svg` file. Jobs run
//! in parallel against one shared font; each job owns its layout and document.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sigil::{export_svg::write_document, pinyin, Converter};
use sigil_core::{
    error::{ParseError, Result},
    units::codepoint_label,
    RenderConfig, SigilError,
};
use sigil_fontdb::Font;

use super::load_font;
use crate::cli::BatchArgs;

/// One character and the Pinyin token it was paired with
#[derive(Debug, Clone, PartialEq)]
struct BatchJob {
    codepoint: u32,
    pinyin: String,
}

pub fn run(args: &BatchArgs, quiet: bool) -> Result<()> {
    let jobs = plan(&args.text, args.pinyin.as_deref())?;
    let font = load_font(&args.font)?;
    let config = args.style.to_options().resolve(font.units_per_em())?;

    fs::create_dir_all(&args.output)?;
    if !quiet {
        eprintln!(
            "Rendering {} glyph(s) from {} into {}",
            jobs.len(),
            font.display_name(),
            args.output.display()
        );
    }

    let converter = Converter::new(font);
    let results: Vec<(u32, Result<PathBuf>)> = jobs
        .par_iter()
        .map(|job| (job.codepoint, render_one(&converter, job, &config, &args.output)))
        .collect();

    let mut first_error = None;
    let mut written = 0usize;
    for (codepoint, result) in results {
        match result {
            Ok(path) => {
                written += 1;
                if !quiet {
                    eprintln!("✓ Wrote {}", path.display());
                }
            },
            Err(err) => {
                eprintln!("✗ {}: {err}", codepoint_label(codepoint));
                if first_error.is_none() {
                    first_error = Some(err);
                }
            },
        }
    }

    log::debug!("Batch finished: {written} of {} written", jobs.len());
    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Pair each character with its reconciled Pinyin token
fn plan(text: &str, pinyin: Option<&str>) -> Result<Vec<BatchJob>> {
    let codepoints: Vec<u32> = text.chars().map(u32::from).collect();
    if codepoints.is_empty() {
        return Err(SigilError::Parse(ParseError::EmptyCharacter));
    }

    let tokens = pinyin::normalize(pinyin, codepoints.len());
    Ok(codepoints
        .into_iter()
        .zip(tokens)
        .map(|(codepoint, pinyin)| BatchJob { codepoint, pinyin })
        .collect())
}

fn render_one(
    converter: &Converter<Font>,
    job: &BatchJob,
    config: &RenderConfig,
    out_dir: &Path,
) -> Result<PathBuf> {
    let pinyin = Some(job.pinyin.as_str()).filter(|token| !token.is_empty());
    let conversion = converter.convert(&[job.codepoint], pinyin, config)?;
    let path = out_dir.join(&conversion.file_name);
    write_document(&path, &conversion.document)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_pairs_tokens_in_order() {
        let jobs = plan("你好", Some("ni3 hao3")).unwrap();
        assert_eq!(
            jobs,
            vec![
                BatchJob {
                    codepoint: 0x4F60,
                    pinyin: "nǐ".to_string()
                },
                BatchJob {
                    codepoint: 0x597D,
                    pinyin: "hǎo".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_plan_pads_missing_tokens() {
        let jobs = plan("你好中", Some("ni3,hao3")).unwrap();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[2].pinyin, "");
    }

    #[test]
    fn test_plan_without_pinyin() {
        let jobs = plan("AB", None).unwrap();
        assert!(jobs.iter().all(|job| job.pinyin.is_empty()));
    }

    #[test]
    fn test_plan_rejects_empty_text() {
        assert!(matches!(
            plan("", None),
            Err(SigilError::Parse(ParseError::EmptyCharacter))
        ));
    }
}
