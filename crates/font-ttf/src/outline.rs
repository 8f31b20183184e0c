//! Conversion of SVG path outlines into TrueType glyphs.

use kurbo::{BezPath, CubicBez, PathEl, Point};
use write_fonts::tables::glyf::{Bbox, Glyph, SimpleGlyph};

use crate::error::{Error, Result};

/// Maximum distance between a cubic and its quadratic approximation, in font units.
pub const QUADRATIC_TOLERANCE: f64 = 0.5;

/// A compiled glyph with the numbers needed for hmtx and maxp.
#[derive(Debug)]
pub struct CompiledGlyph {
    pub glyph: Glyph,
    pub bbox: Option<Bbox>,
    pub points: u16,
    pub contours: u16,
}

/// Replace every cubic segment with quadratic approximations.
pub fn to_quadratic(path: &BezPath, accuracy: f64) -> BezPath {
    let mut out = BezPath::new();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                out.move_to(p);
                current = p;
                start = p;
            }
            PathEl::LineTo(p) => {
                out.line_to(p);
                current = p;
            }
            PathEl::QuadTo(p1, p2) => {
                out.quad_to(p1, p2);
                current = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                for (_, _, quad) in CubicBez::new(current, p1, p2, p3).to_quads(accuracy) {
                    out.quad_to(quad.p1, quad.p2);
                }
                current = p3;
            }
            PathEl::ClosePath => {
                out.close_path();
                current = start;
            }
        }
    }
    out
}

/// Build a simple glyph from an arbitrary SVG outline.
pub fn compile_glyph(name: &str, path: &BezPath) -> Result<CompiledGlyph> {
    if path.elements().is_empty() {
        return Ok(CompiledGlyph { glyph: Glyph::Empty, bbox: None, points: 0, contours: 0 });
    }

    let quadratic = to_quadratic(path, QUADRATIC_TOLERANCE);
    let (points, contours) = count_points(&quadratic);

    let simple = SimpleGlyph::from_bezpath(&quadratic).map_err(|e| Error::Outline {
        name: name.to_string(),
        message: format!("{e:?}"),
    })?;
    let bbox = simple.bbox;

    Ok(CompiledGlyph {
        glyph: Glyph::Simple(simple),
        bbox: Some(bbox),
        points,
        contours,
    })
}

/// Upper bound of the point and contour counts of a quadratic path.
fn count_points(path: &BezPath) -> (u16, u16) {
    let (points, contours) = path.elements().iter().fold((0usize, 0usize), |(p, c), el| match el {
        PathEl::MoveTo(_) => (p + 1, c + 1),
        PathEl::LineTo(_) => (p + 1, c),
        PathEl::QuadTo(..) => (p + 2, c),
        PathEl::CurveTo(..) => (p + 3, c),
        PathEl::ClosePath => (p, c),
    });
    (
        points.min(u16::MAX as usize) as u16,
        contours.min(u16::MAX as usize) as u16,
    )
}
