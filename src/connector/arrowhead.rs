//! Arrowhead synthesis.
//!
//! Every head is built in a local frame where `direction` is forward (the
//! way the arrow faces, pointing from the line into the head point) and the
//! lateral axis is `direction.perp()`, glam's `(-y, x)`. That perpendicular
//! convention is pinned crate-wide; the offsetter and fat wedges use the
//! same one.

use glam::DVec2;

use crate::path::BezierPath;

/// Head styles for thin (stroked) connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThinHead {
    #[default]
    None,
    Stick,
    Diamond,
    Box,
    Bar,
    NonNavigable,
    Negative,
    Ball,
    BallCenter,
}

/// Head styles for fat (filled ribbon) connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FatHead {
    #[default]
    None,
    Regular,
}

/// A synthesized head: its drawable path and the distance the connecting
/// line must be shortened so it ends under the head instead of poking
/// through the tip.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrowhead {
    pub path: BezierPath,
    pub offset: f64,
}

impl ThinHead {
    /// Touch-point offset as a pure function of (type, size).
    ///
    /// Must match the geometric construction in [`synthesize`] exactly;
    /// the path builder relies on it to keep the centerline from
    /// overshooting into the head fill.
    pub fn touch_point_offset(self, size: f64) -> f64 {
        match self {
            ThinHead::None | ThinHead::Stick | ThinHead::Bar | ThinHead::Negative => 0.0,
            ThinHead::Diamond | ThinHead::Box | ThinHead::NonNavigable | ThinHead::Ball => size,
            ThinHead::BallCenter => size / 2.0,
        }
    }
}

impl FatHead {
    /// Touch-point offset for fat caps; the body is pulled back by this
    /// much so it does not overlap the wedge.
    pub fn touch_point_offset(self, size: f64) -> f64 {
        match self {
            FatHead::None => 0.0,
            FatHead::Regular => size,
        }
    }
}

/// Build the head geometry for a thin connector end.
///
/// `point` is the logical endpoint, `direction` the unit approach direction
/// (from the line into the point), `size` the head size (≥ 0). Callers are
/// responsible for handing in a usable direction; degenerate spans are
/// resolved in the path builder before this is called.
pub fn synthesize(point: DVec2, direction: DVec2, size: f64, head: ThinHead) -> Arrowhead {
    let forward = direction;
    let lateral = direction.perp();
    let offset = head.touch_point_offset(size);

    let mut path = BezierPath::new();
    match head {
        ThinHead::None => {}
        ThinHead::Stick => {
            // Open two-segment chevron ending at the head point.
            let back = point - forward * (1.5 * size);
            path.move_to(back + lateral * (size / 2.0));
            path.line_to(point);
            path.line_to(back - lateral * (size / 2.0));
        }
        ThinHead::Diamond => {
            let side = point - forward * (0.5 * size);
            path.move_to(point);
            path.line_to(side + lateral * (0.5 * size));
            path.line_to(point - forward * size);
            path.line_to(side - lateral * (0.5 * size));
            path.close();
        }
        ThinHead::Box => {
            let back = point - forward * size;
            path.move_to(point + lateral * (size / 2.0));
            path.line_to(back + lateral * (size / 2.0));
            path.line_to(back - lateral * (size / 2.0));
            path.line_to(point - lateral * (size / 2.0));
            path.close();
        }
        ThinHead::Bar => {
            let at = point - forward * (0.5 * size);
            path.move_to(at + lateral * (size / 2.0));
            path.line_to(at - lateral * (size / 2.0));
        }
        ThinHead::Negative => {
            // Like bar, but with no pull-back at all.
            path.move_to(point + lateral * (size / 2.0));
            path.line_to(point - lateral * (size / 2.0));
        }
        ThinHead::NonNavigable => {
            // Two parallel bars at the front and back edges of the box
            // footprint, no connecting sides.
            let back = point - forward * size;
            path.move_to(point + lateral * (size / 2.0));
            path.line_to(point - lateral * (size / 2.0));
            path.move_to(back + lateral * (size / 2.0));
            path.line_to(back - lateral * (size / 2.0));
        }
        ThinHead::Ball => {
            // Far edge of the circle touches the head point.
            path = BezierPath::circle(point - forward * (size / 2.0), size / 2.0);
        }
        ThinHead::BallCenter => {
            path = BezierPath::circle(point, size / 2.0);
        }
    }

    Arrowhead { path, offset }
}
