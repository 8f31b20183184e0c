//! Compile an SVG font document into a TrueType font.
//!
//! Glyph outlines are parsed from each `<glyph d="...">`, cubic segments are
//! approximated with quadratics, and the font is assembled with `write-fonts`.
//! The resulting font contains `.notdef` followed by the SVG glyphs in
//! document order.
//!
//! # Example
//!
//! ```no_run
//! use font_ttf::{TtfOptions, svg_font_to_ttf};
//!
//! let svg = std::fs::read_to_string("dist/iconfont.svg").unwrap();
//! let ttf = svg_font_to_ttf(&svg, &TtfOptions::default()).unwrap();
//! std::fs::write("dist/iconfont.ttf", ttf).unwrap();
//! ```

mod error;
mod outline;
mod svg_font;
mod tables;

use std::{collections::HashMap, iter::once};

use log::{debug, info};
use write_fonts::{
    FontBuilder,
    tables::{cmap::Cmap, glyf::GlyfLocaBuilder, hmtx::Hmtx},
    types::GlyphId,
};

pub use error::{Error, Result};
pub use svg_font::{SvgFont, SvgGlyph, parse_svg_font};

use crate::{
    outline::compile_glyph,
    tables::{
        FontStats, build_head, build_hhea, build_maxp, build_name, build_os2, build_post,
        long_metric,
    },
};

/// Metadata written into the compiled font.
#[derive(Debug, Clone, Default)]
pub struct TtfOptions {
    pub copyright: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Font version, e.g. `"1.2"`. Defaults to `"1.0"`.
    pub version: Option<String>,
    /// Creation time as Unix seconds. Defaults to now.
    pub ts: Option<i64>,
}

impl TtfOptions {
    fn timestamp(&self) -> i64 {
        self.ts.unwrap_or_else(|| chrono::Utc::now().timestamp())
    }

    fn revision(&self) -> f64 {
        self.version
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(1.0)
    }
}

/// Parse `svg` as an SVG font and compile it into TrueType bytes.
pub fn svg_font_to_ttf(svg: &str, options: &TtfOptions) -> Result<Vec<u8>> {
    let font = parse_svg_font(svg)?;
    compile(&font, options)
}

/// Compile an already parsed SVG font.
pub fn compile(font: &SvgFont, options: &TtfOptions) -> Result<Vec<u8>> {
    let notdef = font.missing_glyph.clone().unwrap_or_else(|| SvgGlyph {
        name: ".notdef".to_string(),
        unicode: Vec::new(),
        advance: 0,
        path: Default::default(),
    });

    let num_glyphs = font.glyphs.len() + 1;
    let num_glyphs = u16::try_from(num_glyphs).map_err(|_| Error::TooManyGlyphs(num_glyphs))?;

    let mut glyf_builder = GlyfLocaBuilder::new();
    let mut h_metrics = Vec::with_capacity(num_glyphs as usize);
    let mut mappings: Vec<(char, GlyphId)> = Vec::new();
    let mut stats = FontStats::default();
    let mut mapped: HashMap<char, &str> = HashMap::new();

    for (gid, glyph) in once(&notdef).chain(&font.glyphs).enumerate() {
        let compiled = compile_glyph(&glyph.name, &glyph.path)?;
        debug!("Compiled glyph {gid} '{}' ({} points)", glyph.name, compiled.points);

        glyf_builder.add_glyph(&compiled.glyph)?;
        h_metrics.push(long_metric(glyph.advance, compiled.bbox));
        stats.add(glyph.advance, compiled.bbox, compiled.points, compiled.contours);

        if gid > 0
            && let Some(c) = glyph.codepoint()
        {
            if let Some(previous) = mapped.insert(c, &glyph.name) {
                return Err(Error::Cmap(format!(
                    "U+{:04X} is mapped by both '{previous}' and '{}'",
                    c as u32, glyph.name
                )));
            }
            mappings.push((c, GlyphId::new(gid as u32)));
        }
    }
    mappings.sort_by_key(|&(c, _)| c);

    let first_char = mappings.first().map_or(0, |&(c, _)| (c as u32).min(0xFFFF) as u16);
    let last_char = mappings.last().map_or(0, |&(c, _)| (c as u32).min(0xFFFF) as u16);

    let cmap = Cmap::from_mappings(mappings).map_err(|e| Error::Cmap(format!("{e:?}")))?;
    let (glyf, loca, loca_format) = glyf_builder.build();

    let head = build_head(font, &stats, options, loca_format as i16);
    let hhea = build_hhea(font, &stats, num_glyphs);
    let maxp = build_maxp(num_glyphs, &stats);
    let os2 = build_os2(font, &stats, first_char, last_char);
    let hmtx = Hmtx::new(h_metrics, Vec::new());
    let name = build_name(font, options);
    let post = build_post();

    let mut builder = FontBuilder::new();
    builder.add_table(&head)?;
    builder.add_table(&hhea)?;
    builder.add_table(&maxp)?;
    builder.add_table(&os2)?;
    builder.add_table(&hmtx)?;
    builder.add_table(&cmap)?;
    builder.add_table(&glyf)?;
    builder.add_table(&loca)?;
    builder.add_table(&name)?;
    builder.add_table(&post)?;

    let data = builder.build();
    info!(
        "Compiled TrueType font '{}' ({num_glyphs} glyphs, {} bytes)",
        font.family,
        data.len()
    );
    Ok(data)
}
