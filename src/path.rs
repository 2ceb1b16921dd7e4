//! Append-only bezier path buffer.
//!
//! Shape and connector code builds geometry by appending segments; renderers
//! consume the finished value. Paths are plain values: identity has no meaning
//! beyond segment content, and concatenation (`+=`) splices one buffer onto
//! another.

use std::ops::AddAssign;

use glam::{DVec2, dvec2};

use crate::transform::AffineTransform;

/// Magic constant for approximating a quarter circle with one cubic bezier.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// A single path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSeg {
    /// Start a new sub-path at the given point.
    MoveTo(DVec2),
    /// Straight line to the given point.
    LineTo(DVec2),
    /// Cubic bezier to `to` with control points `ctrl1` and `ctrl2`.
    CurveTo { ctrl1: DVec2, ctrl2: DVec2, to: DVec2 },
    /// Close the current sub-path.
    Close,
}

/// Axis-aligned bounding box over path points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    fn expand(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// An append-only sequence of sub-paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BezierPath {
    segments: Vec<PathSeg>,
}

impl BezierPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: DVec2) {
        self.segments.push(PathSeg::MoveTo(to));
    }

    pub fn line_to(&mut self, to: DVec2) {
        self.segments.push(PathSeg::LineTo(to));
    }

    pub fn curve_to(&mut self, ctrl1: DVec2, ctrl2: DVec2, to: DVec2) {
        self.segments.push(PathSeg::CurveTo { ctrl1, ctrl2, to });
    }

    pub fn close(&mut self) {
        self.segments.push(PathSeg::Close);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSeg] {
        &self.segments
    }

    /// Build a full circle from four cubic arcs.
    ///
    /// Starts at the rightmost point and winds in +y-first order.
    pub fn circle(center: DVec2, radius: f64) -> Self {
        let (cx, cy, r) = (center.x, center.y, radius);
        let k = KAPPA * r;
        let mut path = Self::new();
        path.move_to(dvec2(cx + r, cy));
        path.curve_to(dvec2(cx + r, cy + k), dvec2(cx + k, cy + r), dvec2(cx, cy + r));
        path.curve_to(dvec2(cx - k, cy + r), dvec2(cx - r, cy + k), dvec2(cx - r, cy));
        path.curve_to(dvec2(cx - r, cy - k), dvec2(cx - k, cy - r), dvec2(cx, cy - r));
        path.curve_to(dvec2(cx + k, cy - r), dvec2(cx + r, cy - k), dvec2(cx + r, cy));
        path.close();
        path
    }

    /// Build an open or closed polyline through the given points.
    pub fn polyline(points: &[DVec2], closed: bool) -> Self {
        let mut path = Self::new();
        let Some((first, rest)) = points.split_first() else {
            return path;
        };
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        if closed {
            path.close();
        }
        path
    }

    /// Bounding box over every on-curve and control point.
    ///
    /// Conservative for curves (uses the control hull, not the exact extrema).
    /// Returns `None` for an empty path.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut visit = |p: DVec2| match &mut bounds {
            Some(b) => b.expand(p),
            None => bounds = Some(Bounds { min: p, max: p }),
        };
        for seg in &self.segments {
            match *seg {
                PathSeg::MoveTo(p) | PathSeg::LineTo(p) => visit(p),
                PathSeg::CurveTo { ctrl1, ctrl2, to } => {
                    visit(ctrl1);
                    visit(ctrl2);
                    visit(to);
                }
                PathSeg::Close => {}
            }
        }
        bounds
    }

    /// Return a copy with every point mapped through `transform`.
    pub fn transformed(&self, transform: &AffineTransform) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|seg| match *seg {
                PathSeg::MoveTo(p) => PathSeg::MoveTo(transform.apply(p)),
                PathSeg::LineTo(p) => PathSeg::LineTo(transform.apply(p)),
                PathSeg::CurveTo { ctrl1, ctrl2, to } => PathSeg::CurveTo {
                    ctrl1: transform.apply(ctrl1),
                    ctrl2: transform.apply(ctrl2),
                    to: transform.apply(to),
                },
                PathSeg::Close => PathSeg::Close,
            })
            .collect();
        Self { segments }
    }

    /// Serialize as SVG path data (`d` attribute syntax).
    pub fn to_path_data(&self) -> String {
        use std::fmt::Write;

        let mut d = String::new();
        for seg in &self.segments {
            match *seg {
                PathSeg::MoveTo(p) => write!(d, "M{:.2},{:.2}", p.x, p.y).unwrap(),
                PathSeg::LineTo(p) => write!(d, "L{:.2},{:.2}", p.x, p.y).unwrap(),
                PathSeg::CurveTo { ctrl1, ctrl2, to } => write!(
                    d,
                    "C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                )
                .unwrap(),
                PathSeg::Close => d.push('Z'),
            }
        }
        d
    }
}

impl AddAssign for BezierPath {
    fn add_assign(&mut self, rhs: BezierPath) {
        self.segments.extend(rhs.segments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_has_no_bounds() {
        assert!(BezierPath::new().bounds().is_none());
        assert!(BezierPath::new().is_empty());
    }

    #[test]
    fn polyline_bounds() {
        let path = BezierPath::polyline(&[dvec2(1.0, 2.0), dvec2(5.0, -3.0)], false);
        let b = path.bounds().unwrap();
        assert_eq!(b.min, dvec2(1.0, -3.0));
        assert_eq!(b.max, dvec2(5.0, 2.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 5.0);
    }

    #[test]
    fn circle_bounds_cover_the_radius() {
        let path = BezierPath::circle(dvec2(10.0, 10.0), 5.0);
        let b = path.bounds().unwrap();
        assert!((b.min.x - 5.0).abs() < 1e-9);
        assert!((b.max.x - 15.0).abs() < 1e-9);
        assert!((b.min.y - 5.0).abs() < 1e-9);
        assert!((b.max.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn concat_splices_segments() {
        let mut a = BezierPath::polyline(&[dvec2(0.0, 0.0), dvec2(1.0, 0.0)], false);
        let b = BezierPath::polyline(&[dvec2(2.0, 0.0), dvec2(3.0, 0.0)], false);
        a += b;
        assert_eq!(a.segments().len(), 4);
        assert_eq!(a.to_path_data(), "M0.00,0.00L1.00,0.00M2.00,0.00L3.00,0.00");
    }

    #[test]
    fn path_data_for_closed_polyline() {
        let path = BezierPath::polyline(&[dvec2(0.0, 0.0), dvec2(10.0, 0.0), dvec2(10.0, 5.0)], true);
        assert_eq!(path.to_path_data(), "M0.00,0.00L10.00,0.00L10.00,5.00Z");
    }
}
