//! Polyline offsetting with corner joins.
//!
//! Turns a centerline into one edge of a filled ribbon: every point is
//! displaced by `width` along the segment normal (`direction.perp()`, the
//! crate-wide perpendicular convention), and interior vertices are joined
//! per [`JoinType`]. Endpoints stay plain offset segment ends; caps are
//! arrowhead territory, not ours.

use glam::{DVec2, dvec2};

use crate::log::debug;

/// Corner-joining style used when offsetting a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Miter joins whose intersection lies farther than this many widths from
/// the vertex fall back to bevel (the SVG `stroke-miterlimit` default).
pub const MITER_LIMIT: f64 = 4.0;

/// Two directions with a cross product below this are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Maximum angular step when sampling round joins (15 degrees).
const MAX_ARC_STEP: f64 = std::f64::consts::PI / 12.0;

/// Offset `points` by `width` to one consistent side.
///
/// The side is determined by traversal direction and the perpendicular
/// convention; a negative `width` offsets to the other side. Consecutive
/// coincident points are dropped before offsetting.
///
/// # Panics
///
/// Panics when given fewer than 2 points; that is a broken caller, not bad
/// input data.
pub fn offset_polyline(points: &[DVec2], width: f64, join: JoinType) -> Vec<DVec2> {
    assert!(
        points.len() >= 2,
        "offset_polyline requires at least 2 points, got {}",
        points.len()
    );

    let pts = dedup_coincident(points);
    if pts.len() < 2 {
        // Every input point coincides: no direction to offset along.
        // Default to +x travel, same as the degenerate-connector policy.
        let n = DVec2::X.perp() * width;
        return vec![pts[0] + n, pts[0] + n];
    }

    let dirs: Vec<DVec2> = pts.windows(2).map(|w| (w[1] - w[0]).normalize()).collect();
    let normals: Vec<DVec2> = dirs.iter().map(|d| d.perp() * width).collect();

    let mut out = Vec::with_capacity(pts.len());
    out.push(pts[0] + normals[0]);

    for i in 1..pts.len() - 1 {
        let vertex = pts[i];
        let incoming_end = vertex + normals[i - 1];
        let outgoing_start = vertex + normals[i];
        match join {
            JoinType::Bevel => {
                out.push(incoming_end);
                out.push(outgoing_start);
            }
            JoinType::Miter => {
                match miter_point(vertex, incoming_end, dirs[i - 1], outgoing_start, dirs[i], width)
                {
                    Some(m) => out.push(m),
                    None => {
                        out.push(incoming_end);
                        out.push(outgoing_start);
                    }
                }
            }
            JoinType::Round => {
                out.push(incoming_end);
                push_arc(&mut out, vertex, normals[i - 1], normals[i], width);
                out.push(outgoing_start);
            }
        }
    }

    out.push(pts[pts.len() - 1] + normals[normals.len() - 1]);
    out
}

fn dedup_coincident(points: &[DVec2]) -> Vec<DVec2> {
    let mut pts: Vec<DVec2> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last().is_none_or(|&q| (p - q).length_squared() > f64::EPSILON) {
            pts.push(p);
        }
    }
    pts
}

/// Extend both offset segments to their straight-line intersection.
///
/// Returns `None` when the segments are near-parallel or the intersection
/// lies beyond the miter limit; the caller falls back to bevel.
fn miter_point(
    vertex: DVec2,
    incoming_end: DVec2,
    incoming_dir: DVec2,
    outgoing_start: DVec2,
    outgoing_dir: DVec2,
    width: f64,
) -> Option<DVec2> {
    let cross = incoming_dir.perp_dot(outgoing_dir);
    if cross.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (outgoing_start - incoming_end).perp_dot(outgoing_dir) / cross;
    let m = incoming_end + incoming_dir * t;
    if (m - vertex).length() > MITER_LIMIT * width.abs() {
        debug!("miter limit exceeded at {:?}, falling back to bevel", vertex);
        return None;
    }
    Some(m)
}

/// Sample a circular arc of radius `|width|` around `vertex`, sweeping the
/// short way from the incoming normal to the outgoing normal. Only the
/// intermediate points are pushed; the arc ends are the join's own segment
/// ends.
fn push_arc(out: &mut Vec<DVec2>, vertex: DVec2, from_normal: DVec2, to_normal: DVec2, width: f64) {
    let start = from_normal.y.atan2(from_normal.x);
    let end = to_normal.y.atan2(to_normal.x);
    let mut sweep = end - start;
    if sweep > std::f64::consts::PI {
        sweep -= 2.0 * std::f64::consts::PI;
    } else if sweep < -std::f64::consts::PI {
        sweep += 2.0 * std::f64::consts::PI;
    }
    let steps = (sweep.abs() / MAX_ARC_STEP).ceil() as usize;
    let radius = width.abs();
    for k in 1..steps {
        let angle = start + sweep * (k as f64 / steps as f64);
        out.push(vertex + dvec2(angle.cos(), angle.sin()) * radius);
    }
}
