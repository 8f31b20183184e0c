//! Icon document parsing.

use kurbo::{Affine, BezPath, Point};
use log::{debug, warn};
use usvg::{FillRule, Group, Node, Options, Tree, tiny_skia_path::PathSegment};

use crate::error::{Error, Result};

/// A parsed icon: canvas size and all filled outlines in canvas coordinates.
#[derive(Debug, Clone)]
pub struct Icon {
    pub width: f64,
    pub height: f64,
    pub outline: BezPath,
}

/// Parse an SVG document into a single outline.
///
/// Every filled path is flattened with its absolute transform applied, so
/// groups, `transform` attributes and the `viewBox` are all resolved.
/// Stroke-only paths cannot be expressed as glyph contours and are skipped.
pub fn parse_icon(name: &str, data: &[u8]) -> Result<Icon> {
    let tree = Tree::from_data(data, &Options::default())
        .map_err(|source| Error::ParseGlyph { name: name.to_string(), source })?;

    let size = tree.size();
    let mut outline = BezPath::new();
    collect_paths(name, tree.root(), &mut outline);

    debug!(
        "Parsed icon '{name}' ({}x{}, {} path elements)",
        size.width(),
        size.height(),
        outline.elements().len()
    );

    Ok(Icon {
        width: size.width() as f64,
        height: size.height() as f64,
        outline,
    })
}

fn collect_paths(name: &str, group: &Group, outline: &mut BezPath) {
    for node in group.children() {
        match node {
            Node::Group(group) => collect_paths(name, group, outline),
            Node::Path(path) => {
                let Some(fill) = path.fill() else {
                    warn!("Skipping stroke-only path '{}' in icon '{name}'", path.id());
                    continue;
                };
                if fill.rule() == FillRule::EvenOdd {
                    warn!("Icon '{name}' uses the even-odd fill rule; glyphs are filled non-zero");
                }

                let ts = path.abs_transform();
                let affine = Affine::new([
                    ts.sx as f64,
                    ts.ky as f64,
                    ts.kx as f64,
                    ts.sy as f64,
                    ts.tx as f64,
                    ts.ty as f64,
                ]);
                append_segments(path.data(), affine, outline);
            }
            _ => {}
        }
    }
}

fn append_segments(data: &usvg::tiny_skia_path::Path, affine: Affine, outline: &mut BezPath) {
    let pt = |p: usvg::tiny_skia_path::Point| affine * Point::new(p.x as f64, p.y as f64);

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => outline.move_to(pt(p)),
            PathSegment::LineTo(p) => outline.line_to(pt(p)),
            PathSegment::QuadTo(p1, p2) => outline.quad_to(pt(p1), pt(p2)),
            PathSegment::CubicTo(p1, p2, p3) => outline.curve_to(pt(p1), pt(p2), pt(p3)),
            PathSegment::Close => outline.close_path(),
        }
    }
}
