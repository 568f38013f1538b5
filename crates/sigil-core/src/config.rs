// this_file: crates/sigil-core/src/config.rs

//! Render configuration
//!
//! [`RenderOptions`] holds values the way a user writes them (`"2%"`,
//! `"40"`). Resolving them against a font's units-per-em produces a
//! [`RenderConfig`], an immutable snapshot that every later stage reads.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::units::{parse_units_or_percent, percent_of};

/// How the canvas is sized around a single glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BboxMode {
    /// Ink bounds plus margin
    #[default]
    Tight,
    /// One full cell (the em square unless a cell size is set) plus margin
    Em,
}

/// Practice grid drawn behind each glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridKind {
    #[default]
    None,
    /// Outer border only (方格)
    Square,
    /// Border and both center guides (田字格)
    Tian,
    /// Tian plus both diagonals (米字格)
    Mi,
}

impl GridKind {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn has_center_guides(&self) -> bool {
        matches!(self, Self::Tian | Self::Mi)
    }

    pub fn has_diagonals(&self) -> bool {
        matches!(self, Self::Mi)
    }
}

/// Where the Pinyin block sits relative to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinyinPosition {
    #[default]
    Top,
    Bottom,
}

impl FromStr for BboxMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tight" => Ok(Self::Tight),
            "em" => Ok(Self::Em),
            _ => Err(ParseError::UnknownValue {
                name: "bbox",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for GridKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "square" | "fang" => Ok(Self::Square),
            "tian" => Ok(Self::Tian),
            "mi" => Ok(Self::Mi),
            _ => Err(ParseError::UnknownValue {
                name: "grid",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for PinyinPosition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(ParseError::UnknownValue {
                name: "pinyin-pos",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BboxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tight => "tight",
            Self::Em => "em",
        })
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Square => "square",
            Self::Tian => "tian",
            Self::Mi => "mi",
        })
    }
}

impl fmt::Display for PinyinPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

/// Default fraction of a tian cell a fitted glyph occupies per axis
pub const DEFAULT_TIAN_FRAC: f64 = 2.0 / 3.0;

/// Resolved, immutable configuration for one conversion request.
///
/// All lengths are in font units.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub bbox_mode: BboxMode,
    pub margin: f64,
    /// Explicit output height in pixels; width follows the aspect ratio
    pub pixel_height: Option<f64>,

    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width_px: Option<f64>,

    pub grid: GridKind,
    pub grid_color: String,
    pub grid_border_width: f64,
    pub grid_guide_width: f64,
    /// Dash pattern for guide lines; `None` draws them solid
    pub grid_dash: Option<String>,
    pub cell_size: f64,

    pub pinyin_position: PinyinPosition,
    pub pinyin_font: Option<String>,
    pub pinyin_size: f64,
    pub pinyin_gap: f64,

    pub tian_frac: f64,
    pub tian_preserve_aspect: bool,
}

impl RenderConfig {
    /// The default configuration resolved against `units_per_em`.
    pub fn with_defaults(units_per_em: u16) -> Self {
        let upm = f64::from(units_per_em);
        Self {
            bbox_mode: BboxMode::Tight,
            margin: percent_of(2.0, upm),
            pixel_height: None,
            fill: "currentColor".to_string(),
            stroke: None,
            stroke_width_px: None,
            grid: GridKind::None,
            grid_color: "#888".to_string(),
            grid_border_width: percent_of(1.2, upm),
            grid_guide_width: percent_of(0.6, upm),
            grid_dash: Some("4,6".to_string()),
            cell_size: upm,
            pinyin_position: PinyinPosition::Top,
            pinyin_font: None,
            pinyin_size: percent_of(18.0, upm),
            pinyin_gap: percent_of(6.0, upm),
            tian_frac: DEFAULT_TIAN_FRAC,
            tian_preserve_aspect: false,
        }
    }

    /// A copy of this configuration with a different bounding-box mode.
    #[must_use]
    pub fn with_bbox_mode(&self, bbox_mode: BboxMode) -> Self {
        Self {
            bbox_mode,
            ..self.clone()
        }
    }

    /// Height of the reserved Pinyin block: one line at 1.2× size plus the gap
    pub fn pinyin_block(&self) -> f64 {
        self.pinyin_size * 1.2 + self.pinyin_gap
    }
}

/// Unresolved options as accepted from the command line.
///
/// Length-like values are strings so they can be given either in font
/// units or as a percentage (`"2%"`); see [`parse_units_or_percent`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub bbox_mode: BboxMode,
    /// Units or % of UPM
    pub margin: String,
    pub pixel_height: Option<f64>,
    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub grid: GridKind,
    pub grid_color: String,
    /// Units or % of the cell
    pub grid_border_width: String,
    /// Units or % of the cell
    pub grid_guide_width: String,
    /// Empty means solid guides
    pub grid_dash: String,
    /// Units or % of UPM; `None` is one full em
    pub cell_size: Option<String>,
    pub pinyin_position: PinyinPosition,
    pub pinyin_font: Option<String>,
    /// Units or % of the cell
    pub pinyin_size: String,
    /// Units or % of the cell
    pub pinyin_gap: String,
    pub tian_frac: f64,
    pub tian_preserve_aspect: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bbox_mode: BboxMode::Tight,
            margin: "2%".to_string(),
            pixel_height: None,
            fill: "currentColor".to_string(),
            stroke: None,
            stroke_width: None,
            grid: GridKind::None,
            grid_color: "#888".to_string(),
            grid_border_width: "1.2%".to_string(),
            grid_guide_width: "0.6%".to_string(),
            grid_dash: "4,6".to_string(),
            cell_size: None,
            pinyin_position: PinyinPosition::Top,
            pinyin_font: None,
            pinyin_size: "18%".to_string(),
            pinyin_gap: "6%".to_string(),
            tian_frac: DEFAULT_TIAN_FRAC,
            tian_preserve_aspect: false,
        }
    }
}

impl RenderOptions {
    /// Resolve every percent-or-units value and validate the result.
    ///
    /// Margin and cell size resolve against `units_per_em`; grid widths and
    /// Pinyin metrics resolve against the resolved cell size.
    pub fn resolve(&self, units_per_em: u16) -> Result<RenderConfig, ParseError> {
        let upm = f64::from(units_per_em);

        let margin = parse_units_or_percent(Some(&self.margin), upm, 0.0)?;
        let cell_size = parse_units_or_percent(self.cell_size.as_deref(), upm, upm)?;
        if cell_size <= 0.0 {
            return Err(invalid("cell-size", self.cell_size.as_deref().unwrap_or("")));
        }

        if !(self.tian_frac > 0.0 && self.tian_frac <= 1.0) {
            return Err(invalid("tian-frac", &self.tian_frac.to_string()));
        }
        if let Some(px) = self.pixel_height {
            if !(px > 0.0 && px.is_finite()) {
                return Err(invalid("px-size", &px.to_string()));
            }
        }

        let grid_dash = Some(self.grid_dash.trim())
            .filter(|dash| !dash.is_empty())
            .map(str::to_string);

        let config = RenderConfig {
            bbox_mode: self.bbox_mode,
            margin,
            pixel_height: self.pixel_height,
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            stroke_width_px: self.stroke_width,
            grid: self.grid,
            grid_color: self.grid_color.clone(),
            grid_border_width: parse_units_or_percent(
                Some(&self.grid_border_width),
                cell_size,
                0.0,
            )?,
            grid_guide_width: parse_units_or_percent(Some(&self.grid_guide_width), cell_size, 0.0)?,
            grid_dash,
            cell_size,
            pinyin_position: self.pinyin_position,
            pinyin_font: self.pinyin_font.clone(),
            pinyin_size: parse_units_or_percent(Some(&self.pinyin_size), cell_size, 0.0)?,
            pinyin_gap: parse_units_or_percent(Some(&self.pinyin_gap), cell_size, 0.0)?,
            tian_frac: self.tian_frac,
            tian_preserve_aspect: self.tian_preserve_aspect,
        };

        log::debug!(
            "resolved config: margin={} cell={} grid={} upm={}",
            config.margin,
            config.cell_size,
            config.grid,
            units_per_em
        );
        Ok(config)
    }
}

fn invalid(name: &'static str, value: &str) -> ParseError {
    ParseError::UnknownValue {
        name,
        value: value.to_string(),
    }
}
