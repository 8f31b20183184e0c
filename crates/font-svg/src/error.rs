//! Error types for SVG font building.

use std::{io, result};

use crate::stream::StreamState;

/// Errors that can occur while streaming icons into an SVG font.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read an icon's content.
    #[error("failed to read glyph '{name}': {source}")]
    ReadGlyph { name: String, source: io::Error },

    /// An icon is not a valid SVG document.
    #[error("failed to parse glyph '{name}': {source}")]
    ParseGlyph { name: String, source: usvg::Error },

    /// Glyph metadata carries no code point.
    #[error("glyph '{0}' has no unicode value")]
    MissingUnicode(String),

    /// The stream has already been finished or has failed.
    #[error("cannot {operation} a font stream in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: StreamState,
    },

    /// Writing the font document failed.
    #[error("failed to write SVG font: {0}")]
    Write(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;
