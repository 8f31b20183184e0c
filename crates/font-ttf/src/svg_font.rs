//! SVG font document parsing.

use kurbo::BezPath;
use log::warn;
use roxmltree::{Document, Node};

use crate::error::{Error, Result};

const DEFAULT_UNITS_PER_EM: f64 = 1000.0;

/// A parsed `<font>` element.
#[derive(Debug, Clone)]
pub struct SvgFont {
    pub id: Option<String>,
    pub family: String,
    pub units_per_em: u16,
    pub ascent: i16,
    /// Always zero or negative.
    pub descent: i16,
    pub default_advance: u16,
    pub missing_glyph: Option<SvgGlyph>,
    pub glyphs: Vec<SvgGlyph>,
}

#[derive(Debug, Clone)]
pub struct SvgGlyph {
    pub name: String,
    pub unicode: Vec<char>,
    pub advance: u16,
    pub path: BezPath,
}

impl SvgGlyph {
    /// The single code point this glyph maps to, if it maps to exactly one.
    pub fn codepoint(&self) -> Option<char> {
        match self.unicode.as_slice() {
            [c] => Some(*c),
            _ => None,
        }
    }
}

/// Parse the first `<font>` element of an SVG document.
pub fn parse_svg_font(text: &str) -> Result<SvgFont> {
    let doc = Document::parse(text)?;
    let font = doc
        .descendants()
        .find(|n| n.has_tag_name("font"))
        .ok_or(Error::MissingFont)?;
    let face = font.children().find(|n| n.has_tag_name("font-face"));

    let units_per_em = match face {
        Some(face) => number(face, "units-per-em")?.unwrap_or(DEFAULT_UNITS_PER_EM),
        None => DEFAULT_UNITS_PER_EM,
    };
    let descent = match face {
        Some(face) => number(face, "descent")?.unwrap_or(0.0),
        None => 0.0,
    };
    // Some generators write the descent as a positive depth.
    let descent = -descent.abs();
    let ascent = match face {
        Some(face) => number(face, "ascent")?.unwrap_or(units_per_em + descent),
        None => units_per_em + descent,
    };
    let default_advance = number(font, "horiz-adv-x")?.unwrap_or(0.0);

    let id = font.attribute("id").map(str::to_string);
    let family = face
        .and_then(|f| f.attribute("font-family"))
        .map(str::to_string)
        .or_else(|| id.clone())
        .unwrap_or_else(|| "Untitled".to_string());

    let missing_glyph = font
        .children()
        .find(|n| n.has_tag_name("missing-glyph"))
        .map(|n| parse_glyph(n, ".notdef".to_string(), default_advance))
        .transpose()?;

    let glyphs = font
        .children()
        .filter(|n| n.has_tag_name("glyph"))
        .enumerate()
        .map(|(i, n)| {
            let name = n
                .attribute("glyph-name")
                .map(str::to_string)
                .unwrap_or_else(|| format!("glyph{}", i + 1));
            parse_glyph(n, name, default_advance)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SvgFont {
        id,
        family,
        units_per_em: units_per_em.round().clamp(16.0, 16384.0) as u16,
        ascent: clamp_i16(ascent),
        descent: clamp_i16(descent),
        default_advance: clamp_u16(default_advance),
        missing_glyph,
        glyphs,
    })
}

fn parse_glyph(node: Node, name: String, default_advance: f64) -> Result<SvgGlyph> {
    let advance = number(node, "horiz-adv-x")?.unwrap_or(default_advance);
    let unicode: Vec<char> = node.attribute("unicode").unwrap_or_default().chars().collect();
    if unicode.len() > 1 {
        warn!("Glyph '{name}' maps a ligature sequence; it will not be added to cmap");
    }

    let path = match node.attribute("d") {
        Some(d) if !d.trim().is_empty() => {
            BezPath::from_svg(d).map_err(|source| Error::PathData { name: name.clone(), source })?
        }
        _ => BezPath::new(),
    };

    Ok(SvgGlyph {
        name,
        unicode,
        advance: clamp_u16(advance),
        path,
    })
}

fn number(node: Node, attribute: &'static str) -> Result<Option<f64>> {
    node.attribute(attribute)
        .map(|value| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidAttribute { attribute, value: value.to_string() })
        })
        .transpose()
}

fn clamp_i16(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

fn clamp_u16(value: f64) -> u16 {
    value.round().clamp(0.0, u16::MAX as f64) as u16
}
