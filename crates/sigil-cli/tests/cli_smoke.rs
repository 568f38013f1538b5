//! CLI Smoke Tests
//!
//! Drive the built `sigil` binary for each subcommand. Font-backed cases
//! use DejaVu Sans from `test-fonts/`.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Get the path to the sigil binary
fn sigil_binary() -> PathBuf {
    // During cargo test, the binary is in target/debug
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // root
    path.push("target");
    path.push("debug");
    path.push("sigil");
    path
}

/// Path to the checked-in test font
fn test_font() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // root
    path.push("test-fonts");
    path.push("DejaVuSans.ttf");
    assert!(path.exists(), "test font missing: {}", path.display());
    path
}

fn temp_dir(tag: &str) -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("sigil_test_{tag}_{id}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sigil(args: &[&str]) -> Output {
    Command::new(sigil_binary())
        .args(args)
        .output()
        .expect("Failed to execute sigil")
}

// ============================================================================
// Help and usage
// ============================================================================

#[test]
fn test_render_help_lists_grid_options() {
    let output = sigil(&["render", "--help"]);
    assert!(output.status.success(), "render --help should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--grid", "--pinyin", "--tian-frac", "--px-size", "--bbox"] {
        assert!(stdout.contains(flag), "help should mention {flag}");
    }
}

#[test]
fn test_info_help() {
    let output = sigil(&["info", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Display information"));
}

#[test]
fn test_missing_input_is_usage_error() {
    let output = sigil(&["render", "--font", "whatever.ttf"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_char_and_text_are_exclusive() {
    let output = sigil(&["render", "-f", "whatever.ttf", "-c", "A", "-t", "AB"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_grid_is_usage_error() {
    let output = sigil(&["render", "-f", "whatever.ttf", "-c", "A", "--grid", "hex"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_font_exits_2_without_output() {
    let dir = temp_dir("nofont");
    let out = dir.join("out.svg");
    let output = sigil(&[
        "render",
        "-f",
        "/nonexistent/font.ttf",
        "-c",
        "A",
        "-o",
        out.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("font.ttf"));
    assert!(!out.exists());
    let _ = fs::remove_dir_all(&dir);
}

// ============================================================================
// Font-backed runs
// ============================================================================

#[test]
fn test_render_single_char_to_file() {
    let font = test_font();
    let dir = temp_dir("render");
    let out = dir.join("a.svg");

    let output = sigil(&[
        "render",
        "-f",
        font.to_str().unwrap(),
        "-c",
        "U+0041",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("cp=U+0041"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✓ Wrote"));
    assert!(stderr.contains("codepoint: U+0041"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_render_to_stdout_quietly() {
    let font = test_font();
    let output = sigil(&[
        "render",
        "-f",
        font.to_str().unwrap(),
        "-t",
        "AB",
        "--grid",
        "tian",
        "-o",
        "-",
        "-q",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cells=2; grid=tian"));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("✓ Wrote"));
}

#[test]
fn test_unwritable_output_exits_1() {
    let font = test_font();
    let output = sigil(&[
        "render",
        "-f",
        font.to_str().unwrap(),
        "-c",
        "A",
        "-o",
        "/nonexistent-dir/sigil/out.svg",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("out.svg"));
}

#[test]
fn test_batch_writes_one_file_per_char() {
    let font = test_font();
    let dir = temp_dir("batch");
    let output = sigil(&[
        "batch",
        "-f",
        font.to_str().unwrap(),
        "-t",
        "AB",
        "-o",
        dir.to_str().unwrap(),
        "--grid",
        "square",
    ]);
    assert!(output.status.success());
    assert!(dir.join("U+0041.svg").exists());
    assert!(dir.join("U+0042.svg").exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_info_json() {
    let font = test_font();
    let output = sigil(&["info", "-f", font.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"units_per_em\": 2048"));
    assert!(stdout.contains("\"face_count\": 1"));
    assert!(stdout.contains("\"display_name\": \"DejaVu Sans\""));
}

#[test]
fn test_unmapped_char_exports_notdef_with_warning() {
    let font = test_font();
    let output = Command::new(sigil_binary())
        .env_remove("RUST_LOG")
        .args(["render", "-f", font.to_str().unwrap(), "-c", "中", "-o", "-", "-q"])
        .output()
        .expect("Failed to execute sigil");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("glyph=.notdef; cp=U+4E2D"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("U+4E2D not in font; exporting '.notdef'."));
}

#[test]
fn test_directory_as_font_exits_2() {
    let dir = temp_dir("dirfont");
    let output = sigil(&["info", "-f", dir.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read font"));
    let _ = fs::remove_dir_all(&dir);
}
