//! Affine transform algebra: the 2D map, named transform operations, and
//! ordered operation lists.
//!
//! Conventions (pinned here, relied on everywhere else):
//! - a point maps as `(x, y) -> (a*x + c*y + tx, b*x + d*y + ty)`;
//! - `A.concatenating(B)` is the map A∘B, i.e. B is applied first;
//! - in a [`TransformList`] the first-listed operation is applied first, so
//!   each op left-multiplies the running transform.

use std::fmt;

use glam::{DVec2, dvec2};

mod parse;
pub mod resolve;

pub use parse::parse_transform_list;

/// Immutable 2D affine map: linear part plus translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self { tx, ty, ..Self::IDENTITY }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Rotation about the origin, counter-clockwise in math coordinates.
    /// `angle` is in radians.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Rotation about an arbitrary center: translate(c) ∘ rotate ∘ translate(-c).
    pub fn rotation_about(angle: f64, center: DVec2) -> Self {
        Self::translation(center.x, center.y)
            .concatenating(&Self::rotation(angle))
            .concatenating(&Self::translation(-center.x, -center.y))
    }

    /// Horizontal shear with `c = tan(angle)`, `angle` in radians.
    ///
    /// The tangent is unbounded near ±90°: the shear coefficient blows up
    /// to astronomically large values there. The transform is built as-is;
    /// callers that need bounded geometry must reject such angles.
    pub fn skew_x(angle: f64) -> Self {
        Self { c: angle.tan(), ..Self::IDENTITY }
    }

    /// Vertical shear with `b = tan(angle)`, `angle` in radians.
    pub fn skew_y(angle: f64) -> Self {
        Self { b: angle.tan(), ..Self::IDENTITY }
    }

    /// Compose: the resulting map applies `other` first, then `self` (A∘B).
    ///
    /// Composition is associative but not commutative; callers must keep the
    /// document order straight.
    #[must_use]
    pub fn concatenating(&self, other: &AffineTransform) -> AffineTransform {
        AffineTransform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            tx: self.a * other.tx + self.c * other.ty + self.tx,
            ty: self.b * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Map a point through the transform.
    pub fn apply(&self, p: DVec2) -> DVec2 {
        dvec2(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single named transform operation, as written in the textual syntax.
///
/// Angles are kept in degrees (the textual form); conversion to radians
/// happens in [`TransformOp::to_affine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate { tx: f64, ty: f64 },
    Rotate { angle: f64, center: Option<DVec2> },
    Scale { sx: f64, sy: f64 },
    SkewX { angle: f64 },
    SkewY { angle: f64 },
    Matrix { a: f64, b: f64, c: f64, d: f64, e: f64, f: f64 },
}

impl TransformOp {
    /// Convert this operation, on its own, to an affine transform.
    pub fn to_affine(&self) -> AffineTransform {
        match *self {
            TransformOp::Translate { tx, ty } => AffineTransform::translation(tx, ty),
            TransformOp::Rotate { angle, center: None } => {
                AffineTransform::rotation(angle.to_radians())
            }
            TransformOp::Rotate { angle, center: Some(center) } => {
                AffineTransform::rotation_about(angle.to_radians(), center)
            }
            TransformOp::Scale { sx, sy } => AffineTransform::scaling(sx, sy),
            TransformOp::SkewX { angle } => AffineTransform::skew_x(angle.to_radians()),
            TransformOp::SkewY { angle } => AffineTransform::skew_y(angle.to_radians()),
            TransformOp::Matrix { a, b, c, d, e, f } => AffineTransform::new(a, b, c, d, e, f),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TransformOp::Translate { tx, ty } => write!(f, "translate({}, {})", tx, ty),
            TransformOp::Rotate { angle, center: None } => write!(f, "rotate({})", angle),
            TransformOp::Rotate { angle, center: Some(c) } => {
                write!(f, "rotate({}, {}, {})", angle, c.x, c.y)
            }
            TransformOp::Scale { sx, sy } => write!(f, "scale({}, {})", sx, sy),
            TransformOp::SkewX { angle } => write!(f, "skewX({})", angle),
            TransformOp::SkewY { angle } => write!(f, "skewY({})", angle),
            TransformOp::Matrix { a, b, c, d, e, f: tf } => {
                write!(f, "matrix({}, {}, {}, {}, {}, {})", a, b, c, d, e, tf)
            }
        }
    }
}

/// Ordered sequence of transform operations. Insertion order is the textual
/// left-to-right order and is significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformList {
    ops: Vec<TransformOp>,
}

impl TransformList {
    pub fn new(ops: Vec<TransformOp>) -> Self {
        Self { ops }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Compose the whole list into one transform.
    ///
    /// The first-listed op is applied first when mapping a point: each op's
    /// affine form left-multiplies the running result.
    pub fn to_affine(&self) -> AffineTransform {
        let mut acc = AffineTransform::IDENTITY;
        for op in &self.ops {
            acc = op.to_affine().concatenating(&acc);
        }
        acc
    }
}

impl fmt::Display for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

impl FromIterator<TransformOp> for TransformList {
    fn from_iter<T: IntoIterator<Item = TransformOp>>(iter: T) -> Self {
        Self { ops: iter.into_iter().collect() }
    }
}
