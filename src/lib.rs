//! Geometry core for diagram rendering: affine transforms with an
//! SVG-style transform-list parser, cumulative transform resolution over
//! element trees, and connector path synthesis (arrowheads, polyline
//! offsetting, straight/curved/orthogonal routing).
//!
//! Everything works on [`glam::DVec2`] points and produces
//! [`BezierPath`] values that serialize straight to SVG path data.

mod log;

pub mod connector;
pub mod errors;
pub mod path;
pub mod transform;

pub use connector::{
    Arrowhead, Connector, ConnectorStyle, FatHead, FatStyle, JoinType, LineType, ThinHead,
    ThinStyle, offset_polyline, synthesize,
};
pub use errors::GeometryError;
pub use path::{BezierPath, Bounds, PathSeg};
pub use transform::resolve::{ElementId, ElementKind, ElementSource, ElementTree, cumulative_transform};
pub use transform::{AffineTransform, TransformList, TransformOp, parse_transform_list};
