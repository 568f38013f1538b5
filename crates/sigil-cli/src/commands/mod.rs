//! Subcommand implementations

pub mod batch;
pub mod info;
pub mod render;

use sigil_core::error::Result;
use sigil_fontdb::Font;

use crate::cli::FontArgs;

pub(crate) fn load_font(args: &FontArgs) -> Result<Font> {
    log::debug!("Loading face {} of {}", args.index, args.font.display());
    Font::from_file_index(&args.font, args.index)
}
