//! Error types for SVG font compilation.

use std::result;

/// Errors that can occur while compiling an SVG font into TrueType.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SVG font is not well-formed XML.
    #[error("failed to parse SVG font: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document contains no `<font>` element.
    #[error("SVG font has no <font> element")]
    MissingFont,

    /// A numeric attribute could not be parsed.
    #[error("invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute { attribute: &'static str, value: String },

    /// A glyph's `d` attribute is not valid path data.
    #[error("invalid path data in glyph '{name}': {source}")]
    PathData {
        name: String,
        source: kurbo::SvgParseError,
    },

    /// A glyph outline cannot be expressed as TrueType contours.
    #[error("cannot build outline for glyph '{name}': {message}")]
    Outline { name: String, message: String },

    /// More glyphs than a TrueType font can address.
    #[error("too many glyphs: {0}")]
    TooManyGlyphs(usize),

    /// Two glyphs claim the same code point.
    #[error("conflicting cmap entries: {0}")]
    Cmap(String),

    /// Glyph serialization failed.
    #[error("failed to build glyf table: {0}")]
    Glyf(#[from] write_fonts::error::Error),

    /// Font assembly failed.
    #[error("font builder error: {0}")]
    Build(#[from] write_fonts::BuilderError),
}

pub type Result<T> = result::Result<T, Error>;
