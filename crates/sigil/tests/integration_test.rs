//! Integration tests for the sigil conversion pipeline

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use sigil::error::ParseError;
use sigil::prelude::*;
use sigil::types::PathCommand;
use sigil::geometry::Bounds;

/// Stub font: a handful of hand-drawn glyphs, 1000 units per em
struct StubSource {
    metrics: FontMetrics,
    glyphs: HashMap<u32, GlyphRecord>,
}

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<PathCommand> {
    vec![
        PathCommand::MoveTo(x0, y0),
        PathCommand::LineTo(x1, y0),
        PathCommand::LineTo(x1, y1),
        PathCommand::LineTo(x0, y1),
        PathCommand::Close,
    ]
}

impl StubSource {
    fn new() -> Self {
        let mut glyphs = HashMap::new();
        glyphs.insert(
            0x41,
            GlyphRecord {
                codepoint: 0x41,
                glyph_name: "A".to_string(),
                outline: vec![
                    PathCommand::MoveTo(50.0, 0.0),
                    PathCommand::LineTo(450.0, 0.0),
                    PathCommand::LineTo(250.0, 700.0),
                    PathCommand::Close,
                ],
                bounds: Some(Bounds::new(50.0, 0.0, 450.0, 700.0)),
                advance_width: 500.0,
            },
        );
        for (codepoint, name) in [(0x4F60, "uni4F60"), (0x597D, "uni597D"), (0x4E2D, "uni4E2D")] {
            glyphs.insert(
                codepoint,
                GlyphRecord {
                    codepoint,
                    glyph_name: name.to_string(),
                    outline: rectangle(100.0, -80.0, 900.0, 800.0),
                    bounds: Some(Bounds::new(100.0, -80.0, 900.0, 800.0)),
                    advance_width: 1000.0,
                },
            );
        }
        glyphs.insert(0x20, GlyphRecord::empty(0x20, "space", 250.0));

        Self {
            metrics: FontMetrics {
                units_per_em: 1000,
                display_name: "Stub Sans".to_string(),
            },
            glyphs,
        }
    }
}

impl GlyphSource for StubSource {
    fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    fn resolve(&self, codepoint: u32) -> GlyphLookup {
        match self.glyphs.get(&codepoint) {
            Some(record) => GlyphLookup::found(record.clone()),
            None => GlyphLookup::missing(GlyphRecord {
                codepoint,
                glyph_name: ".notdef".to_string(),
                outline: rectangle(50.0, 0.0, 450.0, 700.0),
                bounds: Some(Bounds::new(50.0, 0.0, 450.0, 700.0)),
                advance_width: 500.0,
            }),
        }
    }
}

fn config() -> RenderConfig {
    RenderOptions::default().resolve(1000).expect("defaults resolve")
}

#[test]
fn test_tight_single_glyph_end_to_end() {
    let converter = Converter::new(StubSource::new());
    let result = converter.convert_text("A", None, &config()).unwrap();

    assert_eq!(result.file_name, "U+0041.svg");
    assert_eq!(result.config.bbox_mode, BboxMode::Tight);
    assert_eq!(result.layout.view_box_width, 440.0);
    assert_eq!(result.layout.view_box_height, 740.0);
    assert!(result.missing.is_empty());
    assert!(result.document.contains(r#"viewBox="0 0 440 740""#));
    assert!(result.document.contains(r#"transform="translate(-50 0)""#));
    assert!(result
        .document
        .contains(r#"<g transform="translate(20 720) scale(1 -1)">"#));
}

#[test]
fn test_em_mode_single_glyph() {
    let mut options = RenderOptions::default();
    options.bbox_mode = BboxMode::Em;
    let config = options.resolve(1000).unwrap();

    let result = Converter::new(StubSource::new())
        .convert(&[0x41], None, &config)
        .unwrap();
    assert!(result.document.contains(r#"viewBox="0 0 1040 1040""#));
    assert!(!result.document.contains("transform=\"translate(-50 0)\""));
}

#[test]
fn test_grid_forces_em_and_keeps_caller_config() {
    let mut config = config();
    config.grid = GridKind::Square;

    let result = Converter::new(StubSource::new())
        .convert_text("A", None, &config)
        .unwrap();
    assert_eq!(result.config.bbox_mode, BboxMode::Em);
    assert_eq!(config.bbox_mode, BboxMode::Tight);
    assert!(result.document.contains(r#"viewBox="0 0 1040 1040""#));
    assert!(result.document.contains("<rect "));
}

#[test]
fn test_row_with_pinyin_and_tian_grid() {
    let mut config = config();
    config.grid = GridKind::Tian;

    let result = Converter::new(StubSource::new())
        .convert_text("你好", Some("ni3 hao3"), &config)
        .unwrap();

    assert_eq!(result.file_name, "U+4F60-U+597D.svg");
    assert_eq!(result.layout.glyph_count(), 2);
    assert_eq!(result.layout.cells.len(), 2);
    assert_eq!(result.layout.annotations.len(), 2);
    assert!(result.document.contains(">nǐ</text>"));
    assert!(result.document.contains(">hǎo</text>"));
    assert!(result.document.contains("cells=2; grid=tian"));
    assert_eq!(result.document.matches("matrix(").count(), 2);
}

#[test]
fn test_single_pinyin_token_is_broadcast() {
    let result = Converter::new(StubSource::new())
        .convert_text("你好中", Some("hao3"), &config())
        .unwrap();
    assert_eq!(result.document.matches(">hǎo</text>").count(), 3);
}

#[test]
fn test_pinyin_mismatch_pads() {
    let result = Converter::new(StubSource::new())
        .convert_text("你好中", Some("ni3,hao3"), &config())
        .unwrap();
    assert_eq!(result.layout.annotations.len(), 2);
}

#[test]
fn test_missing_glyph_is_reported_not_fatal() {
    let result = Converter::new(StubSource::new())
        .convert_text("Z", None, &config())
        .unwrap();
    assert_eq!(result.missing, vec![0x5A]);
    assert!(result.document.contains("glyph=.notdef; cp=U+005A"));
    assert!(result.document.contains("<path "));
}

#[test]
fn test_space_emits_no_path() {
    let result = Converter::new(StubSource::new())
        .convert_text(" ", None, &config())
        .unwrap();
    assert!(!result.document.contains("<path"));
    assert!(result.document.contains(r#"viewBox="0 0 290 1040""#));
}

#[test]
fn test_empty_input_is_an_error() {
    let converter = Converter::new(StubSource::new());
    let err = converter.convert(&[], None, &config()).unwrap_err();
    assert!(matches!(err, SigilError::Parse(ParseError::EmptyCharacter)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_converter_is_shared_across_threads() {
    let converter = Arc::new(Converter::new(StubSource::new()));
    let config = Arc::new(config());

    let handles: Vec<_> = ["你", "好", "中", "A"]
        .into_iter()
        .map(|text| {
            let converter = Arc::clone(&converter);
            let config = Arc::clone(&config);
            thread::spawn(move || converter.convert_text(text, None, &config).unwrap())
        })
        .collect();

    let names: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().file_name)
        .collect();
    assert_eq!(names, vec!["U+4F60.svg", "U+597D.svg", "U+4E2D.svg", "U+0041.svg"]);
}

fn view_box(document: &str) -> Vec<f64> {
    let start = document.find(r#"viewBox=""#).unwrap() + r#"viewBox=""#.len();
    let end = document[start..].find('"').unwrap() + start;
    document[start..end]
        .split(' ')
        .map(|v| v.parse().unwrap())
        .collect()
}

proptest! {
    #[test]
    fn prop_view_box_matches_layout(
        margin in 0.0..200.0f64,
        cell in 100.0..3000.0f64,
        text in "[A 你好中]{1,4}",
        grid in prop_oneof![
            Just(GridKind::None),
            Just(GridKind::Square),
            Just(GridKind::Tian),
            Just(GridKind::Mi),
        ],
    ) {
        let mut config = config();
        config.margin = margin;
        config.cell_size = cell;
        config.grid = grid;

        let result = Converter::new(StubSource::new())
            .convert_text(&text, None, &config)
            .unwrap();
        prop_assert_eq!(
            view_box(&result.document),
            vec![0.0, 0.0, result.layout.view_box_width, result.layout.view_box_height]
        );
    }
}
