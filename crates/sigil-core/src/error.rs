// this_file: crates/sigil-core/src/error.rs

//! Error types for sigil
//!
//! Failures are split by the stage that detects them. Only font loading,
//! argument parsing and output writing are fatal; everything recoverable
//! (missing glyphs, Pinyin count mismatches) is logged instead of raised.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SigilError>;

/// Main error type for sigil
#[derive(Debug, Error)]
pub enum SigilError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Invalid argument: {0}")]
    Parse(#[from] ParseError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SigilError {
    /// Process exit code for this failure.
    ///
    /// Output-stage failures exit with 1, load and usage failures with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Export(_) | Self::Io(_) => 1,
            Self::FontLoad(_) | Self::Parse(_) => 2,
        }
    }
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read font '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font data")]
    InvalidData,

    #[error("Face index {index} out of range (file has {count} face(s))")]
    InvalidFaceIndex { index: u32, count: u32 },

    #[error("Font declares zero units per em")]
    InvalidUnitsPerEm,
}

/// Errors raised while parsing user-supplied values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty character argument")]
    EmptyCharacter,

    #[error("Invalid code point: {0}")]
    InvalidCodepoint(String),

    #[error("Invalid number: {value:?}")]
    InvalidNumber { value: String },

    #[error("Invalid value for {name}: {value:?}")]
    UnknownValue { name: &'static str, value: String },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document formatting failed")]
    Format(#[from] std::fmt::Error),
}

impl ExportError {
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }
}
