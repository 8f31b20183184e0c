//! Error types for the icon font build.

use std::{io, path::PathBuf, result};

/// Broad classification of a build failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source directory is unreadable or holds no icons.
    SourceEmpty,
    /// An icon could not be read or merged into the SVG font.
    Stream,
    /// A binary font could not be produced or written.
    Conversion,
    /// A template is missing or failed to render.
    Template,
    /// Invalid options or configuration file.
    Config,
    /// Filesystem failure outside the font stages.
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no SVG icons found in {}", .0.display())]
    SourceEmpty(PathBuf),

    #[error("failed to read source directory {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },

    #[error("failed to open icon {}: {source}", path.display())]
    OpenIcon { path: PathBuf, source: io::Error },

    #[error("failed to build SVG font: {0}")]
    Stream(#[from] font_svg::Error),

    #[error("failed to write SVG font {}: {source}", path.display())]
    WriteSvgFont { path: PathBuf, source: io::Error },

    #[error("failed to compile TrueType font: {0}")]
    Ttf(#[from] font_ttf::Error),

    #[error("failed to convert font to {format}: {source}")]
    Convert {
        format: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to read font {}: {source}", path.display())]
    ReadFont { path: PathBuf, source: io::Error },

    #[error("failed to write font {}: {source}", path.display())]
    WriteFont { path: PathBuf, source: io::Error },

    #[error("template not found {}: {source}", path.display())]
    TemplateNotFound { path: PathBuf, source: io::Error },

    #[error("failed to render template: {0}")]
    Template(#[from] tera::Error),

    #[error("U+{0:X} is not a valid code point")]
    InvalidCodepoint(u32),

    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceEmpty(_) | Error::ReadSource { .. } => ErrorKind::SourceEmpty,
            Error::OpenIcon { .. } | Error::Stream(_) | Error::WriteSvgFont { .. } => {
                ErrorKind::Stream
            }
            Error::Ttf(_)
            | Error::Convert { .. }
            | Error::ReadFont { .. }
            | Error::WriteFont { .. } => ErrorKind::Conversion,
            Error::TemplateNotFound { .. } | Error::Template(_) => ErrorKind::Template,
            Error::InvalidCodepoint(_) | Error::ReadConfig { .. } | Error::ParseConfig { .. } => {
                ErrorKind::Config
            }
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
