// this_file: crates/sigil-core/src/units.rs

//! Numbers in and out: percent-or-units values, code points, and the
//! fixed-precision formatting every emitted coordinate goes through.

use crate::error::ParseError;

/// Decimal places used for every number written into a document
pub const DEFAULT_PRECISION: usize = 3;

/// Format a number with `decimals` places, trimming trailing zeros and a
/// dangling decimal point. Never returns an empty string or `-0`.
pub fn fmt_num(value: f64, decimals: usize) -> String {
    let mut s = format!("{value:.decimals$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    match s.as_str() {
        "" | "-0" => "0".to_string(),
        _ => s,
    }
}

/// [`fmt_num`] at the document precision
pub fn fmt(value: f64) -> String {
    fmt_num(value, DEFAULT_PRECISION)
}

/// Round a value onto the grid of numbers [`fmt`] can represent exactly.
pub fn quantize(value: f64) -> f64 {
    let scale = 10f64.powi(DEFAULT_PRECISION as i32);
    let q = (value * scale).round() / scale;
    if q == 0.0 {
        0.0
    } else {
        q
    }
}

/// `percent × 0.01 × reference`
pub fn percent_of(percent: f64, reference: f64) -> f64 {
    percent * 0.01 * reference
}

/// Parse a value that is either a literal number or a percentage of `reference`.
///
/// `None` yields `default`. `"10%"` against 1000 is `100`; `"100"` is `100`.
pub fn parse_units_or_percent(
    value: Option<&str>,
    reference: f64,
    default: f64,
) -> Result<f64, ParseError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let s = value.trim();
    match s.strip_suffix('%') {
        Some(percent) => Ok(percent_of(parse_number(percent)?, reference)),
        None => parse_number(s),
    }
}

fn parse_number(s: &str) -> Result<f64, ParseError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            value: s.to_string(),
        })
}

/// Parse a character argument into a Unicode scalar value.
///
/// Accepted forms, first match wins:
/// - a single literal non-digit character (`A`, `中`)
/// - `U+4E2D` / `u+4e2d`
/// - `0x4E2D` / `0X4e2d`
/// - bare hex containing at least one of `a-f` (`4e2d`)
/// - bare decimal (`20013`)
/// - anything else: the first character's code
pub fn parse_codepoint(input: &str) -> Result<u32, ParseError> {
    let s = input.trim();
    let mut chars = s.chars();
    let first = chars.next().ok_or(ParseError::EmptyCharacter)?;

    if chars.next().is_none() && !first.is_ascii_digit() {
        return Ok(first as u32);
    }

    let lower = s.to_ascii_lowercase();
    let value = if let Some(hex) = lower.strip_prefix("u+").or_else(|| lower.strip_prefix("0x")) {
        parse_hex(hex, s)?
    } else if s.bytes().all(|b| b.is_ascii_hexdigit()) && !s.bytes().all(|b| b.is_ascii_digit()) {
        parse_hex(s, s)?
    } else if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse::<u32>()
            .map_err(|_| ParseError::InvalidCodepoint(s.to_string()))?
    } else {
        first as u32
    };

    match char::from_u32(value) {
        Some(_) => Ok(value),
        None => Err(ParseError::InvalidCodepoint(s.to_string())),
    }
}

fn parse_hex(digits: &str, original: &str) -> Result<u32, ParseError> {
    u32::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidCodepoint(original.to_string()))
}

/// `U+XXXX` label for a code point (at least four hex digits)
pub fn codepoint_label(codepoint: u32) -> String {
    format!("U+{codepoint:04X}")
}

/// Default output file name: `U+XXXX.svg`, or hyphen-joined labels for a run.
pub fn output_file_name(codepoints: &[u32]) -> String {
    let labels: Vec<String> = codepoints.iter().copied().map(codepoint_label).collect();
    format!("{}.svg", labels.join("-"))
}
