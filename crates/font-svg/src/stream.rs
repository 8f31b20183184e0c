//! Streaming SVG font writer.

use std::{
    fmt::Write as _,
    io::{Read, Write},
};

use kurbo::{Affine, BezPath, PathEl, Point, Shape};
use log::{debug, info};

use crate::{
    SvgFontOptions,
    error::{Error, Result},
    icon::{Icon, parse_icon},
};

/// Lifecycle of an [`SvgFontStream`].
///
/// `Closed` and `Errored` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Created,
    Streaming,
    Finalizing,
    Closed,
    Errored,
}

/// Metadata attached to a glyph before it is appended to the font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMetadata {
    pub name: String,
    pub unicode: Vec<char>,
}

impl GlyphMetadata {
    pub fn new(name: impl Into<String>, unicode: char) -> Self {
        Self { name: name.into(), unicode: vec![unicode] }
    }
}

/// An icon document waiting to be read, plus its metadata.
pub struct Glyph<R> {
    pub metadata: GlyphMetadata,
    pub contents: R,
}

impl<R: Read> Glyph<R> {
    pub fn new(metadata: GlyphMetadata, contents: R) -> Self {
        Self { metadata, contents }
    }
}

struct PendingGlyph {
    metadata: GlyphMetadata,
    icon: Icon,
}

/// Collects glyphs and writes them as one SVG font document on [`finish`].
///
/// Glyphs are parsed as they are written; the document itself is emitted at
/// the end because font-wide metrics depend on every icon.
///
/// [`finish`]: SvgFontStream::finish
pub struct SvgFontStream<W: Write> {
    writer: W,
    options: SvgFontOptions,
    glyphs: Vec<PendingGlyph>,
    state: StreamState,
}

impl<W: Write> SvgFontStream<W> {
    pub fn new(writer: W, options: SvgFontOptions) -> Self {
        Self {
            writer,
            options,
            glyphs: Vec::new(),
            state: StreamState::Created,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Read, parse and append one glyph.
    ///
    /// Any failure moves the stream to [`StreamState::Errored`].
    pub fn write<R: Read>(&mut self, glyph: Glyph<R>) -> Result<()> {
        self.ensure_open("write")?;
        self.state = StreamState::Streaming;

        match read_glyph(glyph) {
            Ok(pending) => {
                debug!("Appended glyph '{}'", pending.metadata.name);
                self.glyphs.push(pending);
                Ok(())
            }
            Err(e) => {
                self.state = StreamState::Errored;
                Err(e)
            }
        }
    }

    /// Write the font document and flush the underlying writer.
    pub fn finish(&mut self) -> Result<()> {
        self.ensure_open("finish")?;
        self.state = StreamState::Finalizing;

        let result = render_document(&self.options, &self.glyphs)
            .and_then(|doc| {
                self.writer.write_all(doc.as_bytes())?;
                self.writer.flush()?;
                Ok(())
            });

        match result {
            Ok(()) => {
                info!(
                    "Wrote SVG font '{}' with {} glyphs",
                    self.options.font_name,
                    self.glyphs.len()
                );
                self.state = StreamState::Closed;
                Ok(())
            }
            Err(e) => {
                self.state = StreamState::Errored;
                Err(e)
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        match self.state {
            StreamState::Created | StreamState::Streaming => Ok(()),
            state => Err(Error::InvalidState { operation, state }),
        }
    }
}

fn read_glyph<R: Read>(mut glyph: Glyph<R>) -> Result<PendingGlyph> {
    let name = glyph.metadata.name.clone();
    if glyph.metadata.unicode.is_empty() {
        return Err(Error::MissingUnicode(name));
    }

    let mut data = Vec::new();
    glyph
        .contents
        .read_to_end(&mut data)
        .map_err(|source| Error::ReadGlyph { name: name.clone(), source })?;

    let icon = parse_icon(&name, &data)?;
    Ok(PendingGlyph { metadata: glyph.metadata, icon })
}

/// Font-wide metrics derived from the options and the collected icons.
struct Metrics {
    font_height: f64,
    ascent: f64,
    descent: f64,
    max_icon_height: f64,
}

impl Metrics {
    fn new(options: &SvgFontOptions, glyphs: &[PendingGlyph]) -> Self {
        let max_icon_height = glyphs.iter().map(|g| g.icon.height).fold(0.0, f64::max);
        let font_height = options.font_height.unwrap_or(max_icon_height);
        let descent = options.descent;
        let ascent = options.ascent.unwrap_or(font_height - descent);
        Self { font_height, ascent, descent, max_icon_height }
    }

    fn scale_for(&self, icon: &Icon, normalize: bool) -> f64 {
        let reference = if normalize { icon.height } else { self.max_icon_height };
        if reference > 0.0 { self.font_height / reference } else { 1.0 }
    }
}

fn render_document(options: &SvgFontOptions, glyphs: &[PendingGlyph]) -> Result<String> {
    let metrics = Metrics::new(options, glyphs);

    let scales: Vec<f64> = glyphs
        .iter()
        .map(|g| metrics.scale_for(&g.icon, options.normalize))
        .collect();
    let max_width = glyphs
        .iter()
        .zip(&scales)
        .map(|(g, scale)| g.icon.width * scale)
        .fold(0.0, f64::max);

    let mut body = String::new();
    let mut max_advance = 0.0f64;

    for (glyph, &scale) in glyphs.iter().zip(&scales) {
        let advance = if options.fixed_width {
            max_width
        } else {
            glyph.icon.width * scale
        }
        .round();
        max_advance = max_advance.max(advance);

        let outline = to_font_space(&glyph.icon, scale, advance, &metrics, options);
        let unicode: String = glyph
            .metadata
            .unicode
            .iter()
            .map(|c| format!("&#x{:X};", *c as u32))
            .collect();

        // Writing to a String cannot fail.
        let _ = writeln!(
            body,
            "    <glyph glyph-name=\"{}\" unicode=\"{unicode}\" horiz-adv-x=\"{}\" d=\"{}\" />",
            escape_attr(&glyph.metadata.name),
            format_number(advance),
            path_data(&outline),
        );
    }

    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" standalone=\"no\"?>\n");
    doc.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\">\n");
    doc.push_str("<defs>\n");
    let _ = writeln!(
        doc,
        "  <font id=\"{}\" horiz-adv-x=\"{}\">",
        escape_attr(options.font_id()),
        format_number(max_advance)
    );
    let _ = writeln!(
        doc,
        "    <font-face font-family=\"{}\" units-per-em=\"{}\" ascent=\"{}\" descent=\"{}\" />",
        escape_attr(&options.font_name),
        format_number(metrics.font_height),
        format_number(metrics.ascent),
        format_number(-metrics.descent),
    );
    doc.push_str("    <missing-glyph horiz-adv-x=\"0\" />\n");
    doc.push_str(&body);
    doc.push_str("  </font>\n");
    doc.push_str("</defs>\n");
    doc.push_str("</svg>\n");

    Ok(doc)
}

/// Flip the icon into y-up font coordinates, scale it and sit it on the baseline.
fn to_font_space(
    icon: &Icon,
    scale: f64,
    advance: f64,
    metrics: &Metrics,
    options: &SvgFontOptions,
) -> BezPath {
    let mut outline = icon.outline.clone();
    outline.apply_affine(Affine::new([
        scale,
        0.0,
        0.0,
        -scale,
        0.0,
        icon.height * scale - metrics.descent,
    ]));

    if options.center_horizontally && !outline.elements().is_empty() {
        let bbox = outline.bounding_box();
        let dx = (advance - bbox.width()) / 2.0 - bbox.x0;
        outline.apply_affine(Affine::translate((dx, 0.0)));
    }
    outline
}

fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    let mut push = |cmd: char, points: &[Point]| {
        d.push(cmd);
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            d.push_str(&format_number(p.x));
            d.push(' ');
            d.push_str(&format_number(p.y));
        }
    };

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => push('M', &[p]),
            PathEl::LineTo(p) => push('L', &[p]),
            PathEl::QuadTo(p1, p2) => push('Q', &[p1, p2]),
            PathEl::CurveTo(p1, p2, p3) => push('C', &[p1, p2, p3]),
            PathEl::ClosePath => push('Z', &[]),
        }
    }
    d
}

fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><path d="M2 2h20v20H2z"/></svg>"#;
    const WIDE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="24"><rect x="0" y="0" width="48" height="12"/></svg>"#;

    fn options() -> SvgFontOptions {
        SvgFontOptions {
            font_height: Some(1000.0),
            normalize: true,
            ..SvgFontOptions::new("iconfont")
        }
    }

    fn glyph(name: &str, cp: char, svg: &'static str) -> Glyph<Cursor<&'static [u8]>> {
        Glyph::new(GlyphMetadata::new(name, cp), Cursor::new(svg.as_bytes()))
    }

    fn finish_to_string(mut stream: SvgFontStream<Vec<u8>>) -> String {
        stream.finish().unwrap();
        assert_eq!(stream.state(), StreamState::Closed);
        String::from_utf8(stream.into_inner()).unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let mut stream = SvgFontStream::new(Vec::new(), options());
        assert_eq!(stream.state(), StreamState::Created);

        stream.write(glyph("home", '\u{ea61}', SQUARE)).unwrap();
        assert_eq!(stream.state(), StreamState::Streaming);
        stream.write(glyph("search", '\u{ea62}', SQUARE)).unwrap();
        assert_eq!(stream.glyph_count(), 2);

        stream.finish().unwrap();
        assert_eq!(stream.state(), StreamState::Closed);

        let err = stream.write(glyph("late", '\u{ea63}', SQUARE)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidState { operation: "write", state: StreamState::Closed }
        ));
        assert!(stream.finish().is_err());
    }

    #[test]
    fn test_glyphs_written_with_metadata() {
        let mut stream = SvgFontStream::new(Vec::new(), options());
        stream.write(glyph("home", '\u{ea61}', SQUARE)).unwrap();
        stream.write(glyph("search", '\u{ea62}', SQUARE)).unwrap();
        let svg = finish_to_string(stream);

        let doc = roxmltree::Document::parse(&svg).unwrap();
        let glyphs: Vec<_> = doc.descendants().filter(|n| n.has_tag_name("glyph")).collect();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].attribute("glyph-name"), Some("home"));
        assert_eq!(glyphs[0].attribute("unicode"), Some("\u{ea61}"));
        assert_eq!(glyphs[1].attribute("glyph-name"), Some("search"));
        assert_eq!(glyphs[0].attribute("horiz-adv-x"), Some("1000"));

        let face = doc.descendants().find(|n| n.has_tag_name("font-face")).unwrap();
        assert_eq!(face.attribute("font-family"), Some("iconfont"));
        assert_eq!(face.attribute("units-per-em"), Some("1000"));
        assert_eq!(face.attribute("ascent"), Some("1000"));
    }

    #[test]
    fn test_outline_is_flipped_into_font_space() {
        let mut stream = SvgFontStream::new(Vec::new(), options());
        stream.write(glyph("home", '\u{ea61}', SQUARE)).unwrap();
        let svg = finish_to_string(stream);

        let doc = roxmltree::Document::parse(&svg).unwrap();
        let d = doc
            .descendants()
            .find(|n| n.has_tag_name("glyph"))
            .and_then(|n| n.attribute("d"))
            .unwrap();
        let path = BezPath::from_svg(d).unwrap();
        let bbox = path.bounding_box();

        // 2..22 in a 24 unit icon maps to ~83..917 in a 1000 unit em.
        assert!((bbox.y0 - 83.333).abs() < 0.01);
        assert!((bbox.y1 - 916.667).abs() < 0.01);
    }

    #[test]
    fn test_fixed_width_uses_widest_glyph() {
        let opts = SvgFontOptions {
            fixed_width: true,
            ..options()
        };
        let mut stream = SvgFontStream::new(Vec::new(), opts);
        stream.write(glyph("square", '\u{ea61}', SQUARE)).unwrap();
        stream.write(glyph("wide", '\u{ea62}', WIDE)).unwrap();
        let svg = finish_to_string(stream);

        let doc = roxmltree::Document::parse(&svg).unwrap();
        for node in doc.descendants().filter(|n| n.has_tag_name("glyph")) {
            assert_eq!(node.attribute("horiz-adv-x"), Some("2000"));
        }
    }

    #[test]
    fn test_relative_sizes_kept_without_normalize() {
        let small = r#"<svg xmlns="http://www.w3.org/2000/svg" width="12" height="12"><rect width="12" height="12"/></svg>"#;
        let opts = SvgFontOptions {
            normalize: false,
            ..options()
        };
        let mut stream = SvgFontStream::new(Vec::new(), opts);
        stream.write(glyph("big", '\u{ea61}', SQUARE)).unwrap();
        stream.write(glyph("small", '\u{ea62}', small)).unwrap();
        let svg = finish_to_string(stream);

        let doc = roxmltree::Document::parse(&svg).unwrap();
        let advances: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("glyph"))
            .filter_map(|n| n.attribute("horiz-adv-x"))
            .collect();
        assert_eq!(advances, ["1000", "500"]);
    }

    #[test]
    fn test_invalid_glyph_moves_to_errored() {
        let mut stream = SvgFontStream::new(Vec::new(), options());
        stream.write(glyph("home", '\u{ea61}', SQUARE)).unwrap();

        let err = stream.write(glyph("broken", '\u{ea62}', "<svg")).unwrap_err();
        assert!(matches!(err, Error::ParseGlyph { .. }));
        assert_eq!(stream.state(), StreamState::Errored);
        assert!(matches!(stream.finish(), Err(Error::InvalidState { .. })));
    }

    #[test]
    fn test_read_failure_is_reported() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk gone"))
            }
        }

        let mut stream = SvgFontStream::new(Vec::new(), options());
        let err = stream
            .write(Glyph::new(GlyphMetadata::new("home", '\u{ea61}'), FailingReader))
            .unwrap_err();
        assert!(matches!(err, Error::ReadGlyph { ref name, .. } if name == "home"));
        assert_eq!(stream.state(), StreamState::Errored);
    }

    #[test]
    fn test_glyph_names_are_escaped() {
        let mut stream = SvgFontStream::new(Vec::new(), options());
        stream.write(glyph("a&b", '\u{ea61}', SQUARE)).unwrap();
        let svg = finish_to_string(stream);
        assert!(svg.contains("glyph-name=\"a&amp;b\""));
    }

    const FULL: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><path d="M0 0h24v24H0z"/></svg>"#;
    const NARROW: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><rect x="0" y="0" width="6" height="24"/></svg>"#;

    fn font_face(svg: &str) -> (String, String) {
        let doc = roxmltree::Document::parse(svg).unwrap();
        let face = doc.descendants().find(|n| n.has_tag_name("font-face")).unwrap();
        (
            face.attribute("ascent").unwrap().to_string(),
            face.attribute("descent").unwrap().to_string(),
        )
    }

    fn glyph_bbox(svg: &str) -> (kurbo::Rect, f64) {
        let doc = roxmltree::Document::parse(svg).unwrap();
        let node = doc.descendants().find(|n| n.has_tag_name("glyph")).unwrap();
        let path = BezPath::from_svg(node.attribute("d").unwrap()).unwrap();
        let advance = node.attribute("horiz-adv-x").unwrap().parse().unwrap();
        (path.bounding_box(), advance)
    }

    #[test]
    fn test_descent_shifts_outline_below_baseline() {
        let opts = SvgFontOptions {
            descent: 150.0,
            ..options()
        };
        let mut stream = SvgFontStream::new(Vec::new(), opts);
        stream.write(glyph("full", '\u{ea61}', FULL)).unwrap();
        let svg = finish_to_string(stream);

        let (bbox, _) = glyph_bbox(&svg);
        assert!((bbox.y0 + 150.0).abs() < 0.01);
        assert!((bbox.y1 - 850.0).abs() < 0.01);
        assert_eq!(font_face(&svg), ("850".to_string(), "-150".to_string()));
    }

    #[test]
    fn test_explicit_ascent_is_kept() {
        let opts = SvgFontOptions {
            descent: 100.0,
            ascent: Some(800.0),
            ..options()
        };
        let mut stream = SvgFontStream::new(Vec::new(), opts);
        stream.write(glyph("full", '\u{ea61}', FULL)).unwrap();
        let svg = finish_to_string(stream);

        assert_eq!(font_face(&svg), ("800".to_string(), "-100".to_string()));
    }

    #[test]
    fn test_center_horizontally() {
        let opts = SvgFontOptions {
            center_horizontally: true,
            ..options()
        };
        let mut stream = SvgFontStream::new(Vec::new(), opts);
        stream.write(glyph("bar", '\u{ea61}', NARROW)).unwrap();
        let svg = finish_to_string(stream);

        let (bbox, advance) = glyph_bbox(&svg);
        assert_eq!(advance, 1000.0);
        assert!((bbox.x0 - 375.0).abs() < 0.01);
        assert!((bbox.x1 - 625.0).abs() < 0.01);
    }

    #[test]
    fn test_outline_stays_left_without_centering() {
        let mut stream = SvgFontStream::new(Vec::new(), options());
        stream.write(glyph("bar", '\u{ea61}', NARROW)).unwrap();
        let svg = finish_to_string(stream);

        let (bbox, _) = glyph_bbox(&svg);
        assert!(bbox.x0.abs() < 0.01);
        assert!((bbox.x1 - 250.0).abs() < 0.01);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000.0), "1000");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_number(83.33333), "83.333");
        assert_eq!(format_number(-12.5), "-12.5");
    }
}
