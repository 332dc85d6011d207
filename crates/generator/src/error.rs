use std::{io, path::PathBuf, result};

use skrifa::raw::ReadError;
use skrifa::outline::DrawError;

/// Error types for Gray4 font generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    #[error("failed to read font: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("failed to draw outline for {character:?}: {source}")]
    Draw { character: char, source: DrawError },

    #[error("{field} of glyph {character:?} does not fit the Gray4 format (value {value})")]
    FieldOverflow { character: char, field: &'static str, value: i64 },
}

pub type Result<T> = result::Result<T, Error>;
