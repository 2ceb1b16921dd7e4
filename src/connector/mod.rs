//! Connector lines and their path synthesis.
//!
//! A connector is a plain value: endpoints, optional waypoints, and a
//! style. It holds no derived geometry; every [`Connector::paths`] call
//! recomputes from current state, so there is no cache to invalidate.

use glam::DVec2;

use crate::path::BezierPath;

pub mod arrowhead;
pub mod offset;

pub use arrowhead::{Arrowhead, FatHead, ThinHead, synthesize};
pub use offset::{JoinType, MITER_LIMIT, offset_polyline};

/// Routing for a thin connector's centerline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineType {
    #[default]
    Straight,
    Curved,
    Orthogonal,
}

/// Style for a thin connector: a stroked centerline plus separate stroke
/// arrowheads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThinStyle {
    pub head: ThinHead,
    pub tail: ThinHead,
    pub head_size: f64,
    pub tail_size: f64,
    pub line: LineType,
}

/// Style for a fat connector: one filled closed polygon forming both the
/// body and integrated arrowhead wedges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatStyle {
    pub head: FatHead,
    pub tail: FatHead,
    pub head_size: f64,
    pub tail_size: f64,
    /// Centerline-to-edge distance; the full ribbon is twice this wide.
    pub width: f64,
    pub join: JoinType,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectorStyle {
    Thin(ThinStyle),
    Fat(FatStyle),
}

/// Fat caps are pulled back a little further than their size so the body
/// never peeks out from under the wedge.
const FAT_CAP_SCALE: f64 = 1.5;

/// A connector line between two points, with optional waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub origin: DVec2,
    pub target: DVec2,
    pub midpoints: Vec<DVec2>,
    pub style: ConnectorStyle,
}

impl Connector {
    /// Create a connector with both endpoints at the origin.
    pub fn new(style: ConnectorStyle) -> Self {
        Self {
            origin: DVec2::ZERO,
            target: DVec2::ZERO,
            midpoints: Vec::new(),
            style,
        }
    }

    pub fn set_endpoints(&mut self, origin: DVec2, target: DVec2) {
        self.origin = origin;
        self.target = target;
    }

    /// Produce everything that must be drawn for this connector, in order.
    ///
    /// Thin: head path, tail path, centerline (empty arrowheads omitted).
    /// Fat: a single closed body path.
    pub fn paths(&self) -> Vec<BezierPath> {
        match &self.style {
            ConnectorStyle::Thin(style) => self.thin_paths(style),
            ConnectorStyle::Fat(style) => self.fat_paths(style),
        }
    }

    /// Unit approach directions at the two ends: into the target and into
    /// the origin. Derived from the nearest midpoint when present, else the
    /// straight origin-target span. A zero-length span with no midpoints
    /// has no direction of its own; travel defaults to +x.
    fn end_directions(&self) -> (DVec2, DVec2) {
        let head_ref = self.midpoints.last().copied().unwrap_or(self.origin);
        let tail_ref = self.midpoints.first().copied().unwrap_or(self.target);
        let mut head = (self.target - head_ref).normalize_or_zero();
        let mut tail = (self.origin - tail_ref).normalize_or_zero();
        if head == DVec2::ZERO {
            head = DVec2::X;
        }
        if tail == DVec2::ZERO {
            tail = -DVec2::X;
        }
        (head, tail)
    }

    fn waypoints(&self, origin: DVec2, target: DVec2) -> Vec<DVec2> {
        let mut pts = Vec::with_capacity(self.midpoints.len() + 2);
        pts.push(origin);
        pts.extend_from_slice(&self.midpoints);
        pts.push(target);
        pts
    }

    fn thin_paths(&self, style: &ThinStyle) -> Vec<BezierPath> {
        let (head_dir, tail_dir) = self.end_directions();
        let head = synthesize(self.target, head_dir, style.head_size, style.head);
        let tail = synthesize(self.origin, tail_dir, style.tail_size, style.tail);

        // Shorten the centerline so it ends under the arrowheads.
        let effective_target = self.target - head_dir * head.offset;
        let effective_origin = self.origin - tail_dir * tail.offset;
        let pts = self.waypoints(effective_origin, effective_target);

        let centerline = match style.line {
            LineType::Straight => BezierPath::polyline(&pts, false),
            LineType::Curved => curved_path(&pts),
            LineType::Orthogonal => orthogonal_path(&pts),
        };

        let mut out = Vec::with_capacity(3);
        if !head.path.is_empty() {
            out.push(head.path);
        }
        if !tail.path.is_empty() {
            out.push(tail.path);
        }
        out.push(centerline);
        out
    }

    fn fat_paths(&self, style: &FatStyle) -> Vec<BezierPath> {
        let (head_dir, tail_dir) = self.end_directions();
        let body_target =
            self.target - head_dir * style.head.touch_point_offset(style.head_size * FAT_CAP_SCALE);
        let body_origin =
            self.origin - tail_dir * style.tail.touch_point_offset(style.tail_size * FAT_CAP_SCALE);

        let center = self.waypoints(body_origin, body_target);
        let forward = offset_polyline(&center, style.width, style.join);
        let reversed: Vec<DVec2> = center.iter().rev().copied().collect();
        let reverse = offset_polyline(&reversed, style.width, style.join);

        let mut path = BezierPath::new();
        path.move_to(forward[0]);
        for p in &forward[1..] {
            path.line_to(*p);
        }

        // Head closure: either the arrowhead wedge through the true target,
        // or a flat end when there is no cap.
        let forward_end = *forward.last().expect("offset polyline is never empty");
        let reverse_start = reverse[0];
        match style.head {
            FatHead::Regular => {
                let flare_f = (forward_end - body_target).normalize_or_zero();
                let flare_r = (reverse_start - body_target).normalize_or_zero();
                path.line_to(forward_end + flare_f * style.head_size);
                path.line_to(self.target);
                path.line_to(reverse_start + flare_r * style.head_size);
                path.line_to(reverse_start);
            }
            FatHead::None => {
                path.line_to(reverse_start);
            }
        }

        for p in &reverse[1..] {
            path.line_to(*p);
        }

        // Matching tail-side closure back to the forward start.
        let reverse_end = *reverse.last().expect("offset polyline is never empty");
        let forward_start = forward[0];
        match style.tail {
            FatHead::Regular => {
                let flare_r = (reverse_end - body_origin).normalize_or_zero();
                let flare_f = (forward_start - body_origin).normalize_or_zero();
                path.line_to(reverse_end + flare_r * style.tail_size);
                path.line_to(self.origin);
                path.line_to(forward_start + flare_f * style.tail_size);
            }
            FatHead::None => {}
        }
        path.close();

        vec![path]
    }
}

/// Smooth curve through a point sequence: uniform Catmull-Rom tangents
/// turned into cubic segments. Falls out to a single near-straight cubic
/// for two points.
fn curved_path(pts: &[DVec2]) -> BezierPath {
    let mut path = BezierPath::new();
    let Some((&first, _)) = pts.split_first() else {
        return path;
    };
    path.move_to(first);
    let n = pts.len();
    for i in 0..n - 1 {
        let p0 = pts[i.saturating_sub(1)];
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p3 = pts[(i + 2).min(n - 1)];
        let ctrl1 = p1 + (p2 - p0) / 6.0;
        let ctrl2 = p2 - (p3 - p1) / 6.0;
        path.curve_to(ctrl1, ctrl2, p2);
    }
    path
}

/// Axis-aligned stepped path: between each pair of waypoints, a horizontal
/// segment first, then a vertical one. Zero-length steps are skipped.
fn orthogonal_path(pts: &[DVec2]) -> BezierPath {
    let mut path = BezierPath::new();
    let Some((&first, rest)) = pts.split_first() else {
        return path;
    };
    path.move_to(first);
    let mut at = first;
    for &next in rest {
        if (next.x - at.x).abs() > f64::EPSILON {
            path.line_to(glam::dvec2(next.x, at.y));
        }
        if (next.y - at.y).abs() > f64::EPSILON {
            path.line_to(next);
        }
        at = next;
    }
    path
}
