//! Merge individual SVG icons into a single SVG font document.
//!
//! Icons are pushed one at a time into an [`SvgFontStream`] together with
//! their glyph metadata (name and code points). Outlines are parsed with
//! `usvg`, flattened into `kurbo` paths and, when the stream is finished,
//! scaled into font space and written out as `<glyph>` elements.
//!
//! # Example
//!
//! ```no_run
//! use font_svg::{Glyph, GlyphMetadata, SvgFontOptions, SvgFontStream};
//!
//! let mut stream = SvgFontStream::new(Vec::new(), SvgFontOptions::new("iconfont"));
//! let icon = std::fs::File::open("svgs/home.svg").unwrap();
//! stream.write(Glyph::new(GlyphMetadata::new("home", '\u{ea61}'), icon)).unwrap();
//! stream.finish().unwrap();
//! let svg_font = stream.into_inner();
//! ```

mod error;
mod icon;
mod stream;

pub use error::{Error, Result};
pub use icon::{Icon, parse_icon};
pub use stream::{Glyph, GlyphMetadata, StreamState, SvgFontStream};

/// Options controlling how icons are placed in the font.
#[derive(Debug, Clone)]
pub struct SvgFontOptions {
    /// Font family name written to `<font-face font-family>`.
    pub font_name: String,
    /// Value of the `<font id>` attribute, defaults to the font name.
    pub font_id: Option<String>,
    /// Target em height. Defaults to the height of the tallest icon.
    pub font_height: Option<f64>,
    /// Scale every icon to the font height instead of keeping relative sizes.
    pub normalize: bool,
    /// Distance of the baseline above the bottom of the em box.
    pub descent: f64,
    /// Defaults to `font_height - descent`.
    pub ascent: Option<f64>,
    /// Give every glyph the advance width of the widest one.
    pub fixed_width: bool,
    /// Center each outline within its advance width.
    pub center_horizontally: bool,
}

impl SvgFontOptions {
    pub fn new(font_name: impl Into<String>) -> Self {
        Self {
            font_name: font_name.into(),
            font_id: None,
            font_height: None,
            normalize: false,
            descent: 0.0,
            ascent: None,
            fixed_width: false,
            center_horizontally: false,
        }
    }

    pub fn font_id(&self) -> &str {
        self.font_id.as_deref().unwrap_or(&self.font_name)
    }
}
