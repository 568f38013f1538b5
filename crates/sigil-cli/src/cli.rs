//! CLI argument definitions using Clap v4

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sigil_core::{
    config::DEFAULT_TIAN_FRAC, error::ParseError, units::parse_codepoint, BboxMode, GridKind,
    PinyinPosition, RenderOptions,
};

/// sigil - export font glyphs as SVG, with practice grids and Pinyin
#[derive(Parser, Debug)]
#[command(name = "sigil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Silent mode (no run summary)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one character or a short text to a single SVG document
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Render each character of a text to its own SVG file
    Batch(Box<BatchArgs>),

    /// Display information about a font file
    #[command(alias = "i")]
    Info(InfoArgs),
}

/// Font face selection
#[derive(Args, Debug)]
pub struct FontArgs {
    /// Font file path (.ttf, .otf, .ttc, .otc)
    #[arg(short = 'f', long = "font")]
    pub font: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(long = "index", default_value_t = 0)]
    pub index: u32,
}

/// What to draw: exactly one of `--char` or `--text`
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Single character: literal, U+4E2D, 0x4E2D, 4e2d or decimal 20013
    #[arg(short = 'c', long = "char")]
    pub character: Option<String>,

    /// Literal text, one cell per character
    #[arg(short = 't', long = "text")]
    pub text: Option<String>,
}

impl InputArgs {
    pub fn codepoints(&self) -> Result<Vec<u32>, ParseError> {
        match (&self.character, &self.text) {
            (Some(character), _) => Ok(vec![parse_codepoint(character)?]),
            (None, Some(text)) if !text.is_empty() => Ok(text.chars().map(u32::from).collect()),
            _ => Err(ParseError::EmptyCharacter),
        }
    }
}

/// Canvas, paint, grid and annotation options shared by `render` and `batch`
#[derive(Args, Debug)]
pub struct StyleArgs {
    /// Canvas sizing: tight (ink box) or em (full em box)
    #[arg(long = "bbox", default_value = "tight")]
    pub bbox: BboxMode,

    /// Outer margin in font units or percent of units-per-em
    #[arg(long = "margin", default_value = "2%")]
    pub margin: String,

    /// Output pixel height; width follows the aspect ratio
    #[arg(long = "px-size")]
    pub px_size: Option<f64>,

    /// Glyph fill paint
    #[arg(long = "fill", default_value = "currentColor")]
    pub fill: String,

    /// Glyph stroke paint
    #[arg(long = "stroke")]
    pub stroke: Option<String>,

    /// Glyph stroke width in pixels
    #[arg(long = "stroke-width")]
    pub stroke_width: Option<f64>,

    /// Practice grid: none, square (alias fang, 方格), tian (田字格) or mi (米字格)
    #[arg(long = "grid", default_value = "none")]
    pub grid: GridKind,

    /// Grid line color
    #[arg(long = "grid-color", default_value = "#888")]
    pub grid_color: String,

    /// Cell border width in units or percent of the cell
    #[arg(long = "grid-border-width", default_value = "1.2%")]
    pub grid_border_width: String,

    /// Guide line width in units or percent of the cell
    #[arg(long = "grid-guide-width", default_value = "0.6%")]
    pub grid_guide_width: String,

    /// Guide dash pattern; empty for solid guides
    #[arg(long = "grid-dash", default_value = "4,6")]
    pub grid_dash: String,

    /// Cell size in units or percent of units-per-em (default 100%)
    #[arg(long = "cell-size")]
    pub cell_size: Option<String>,

    /// Pinyin placement relative to the glyph row: top or bottom
    #[arg(long = "pinyin-pos", default_value = "top")]
    pub pinyin_pos: PinyinPosition,

    /// Font family for Pinyin text
    #[arg(long = "pinyin-font")]
    pub pinyin_font: Option<String>,

    /// Pinyin font size in units or percent of the cell
    #[arg(long = "pinyin-size", default_value = "18%")]
    pub pinyin_size: String,

    /// Gap between Pinyin and the cells, in units or percent of the cell
    #[arg(long = "pinyin-gap", default_value = "6%")]
    pub pinyin_gap: String,

    /// Fraction of the cell a glyph fills in the tian grid
    #[arg(long = "tian-frac", default_value_t = DEFAULT_TIAN_FRAC)]
    pub tian_frac: f64,

    /// Scale glyphs uniformly in the tian grid
    #[arg(long = "tian-preserve-aspect")]
    pub tian_preserve_aspect: bool,
}

impl StyleArgs {
    pub fn to_options(&self) -> RenderOptions {
        RenderOptions {
            bbox_mode: self.bbox,
            margin: self.margin.clone(),
            pixel_height: self.px_size,
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
            grid: self.grid,
            grid_color: self.grid_color.clone(),
            grid_border_width: self.grid_border_width.clone(),
            grid_guide_width: self.grid_guide_width.clone(),
            grid_dash: self.grid_dash.clone(),
            cell_size: self.cell_size.clone(),
            pinyin_position: self.pinyin_pos,
            pinyin_font: self.pinyin_font.clone(),
            pinyin_size: self.pinyin_size.clone(),
            pinyin_gap: self.pinyin_gap.clone(),
            tian_frac: self.tian_frac,
            tian_preserve_aspect: self.tian_preserve_aspect,
        }
    }
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub font: FontArgs,

    #[command(flatten)]
    pub input: InputArgs,

    /// Output file path ('-' for stdout; default U+XXXX.svg)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Pinyin with tone digits, e.g. "ni3 hao3" or "ni3,hao3"
    #[arg(long = "pinyin")]
    pub pinyin: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    #[command(flatten)]
    pub font: FontArgs,

    /// Characters to render, one file each
    #[arg(short = 't', long = "text")]
    pub text: String,

    /// Output directory for rendered files
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// Pinyin with tone digits, paired with the characters in order
    #[arg(long = "pinyin")]
    pub pinyin: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub font: FontArgs,

    /// Print the report as JSON
    #[arg(long = "json")]
    pub json: bool,
}
