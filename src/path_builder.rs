//! Representation of compiled paths.
//!
//! The path parser and the shape reducers push operations into a
//! [`PathBuilder`], a mutable, temporary storage for path data backed by a
//! [`TinyVec`] with space for 32 operations on the stack; most icon paths
//! fit there, and larger ones spill to the heap.  A finished builder turns
//! into an immutable [`Path`].
//!
//! Elliptical arcs never reach the operation list: they are reduced to
//! cubic Bézier segments as they are added, so a [`Path`] only ever
//! contains move / line / quadratic / cubic / close operations.

use std::f64::consts::*;
use std::fmt::Write;

use tinyvec::TinyVec;

use crate::fixed::FixedPoint;
use crate::transform::Transform;

/// Whether an arc's sweep should be >= 180 degrees, or smaller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LargeArc(pub bool);

/// Angular direction in which an arc is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Sweep {
    Negative,
    Positive,
}

/// One low-level path operation, in 26.6 fixed-point coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathOp {
    /// Begin a new subpath; implicitly closes any open subpath at replay.
    MoveTo(FixedPoint),
    /// Straight segment.
    LineTo(FixedPoint),
    /// Quadratic Bézier: control point, end point.
    QuadTo(FixedPoint, FixedPoint),
    /// Cubic Bézier: two control points, end point.
    CubicTo(FixedPoint, FixedPoint, FixedPoint),
    /// Close the current subpath back to its last MoveTo.
    ClosePath,
}

// TinyVec requires T: Default; there is no natural default for path
// operations, this is just our implementation detail.
impl Default for PathOp {
    fn default() -> Self {
        PathOp::ClosePath
    }
}

impl PathOp {
    /// The point this operation leaves the pen at, if any.
    pub fn end_point(&self) -> Option<FixedPoint> {
        match *self {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => Some(p),
            PathOp::QuadTo(_, p) => Some(p),
            PathOp::CubicTo(_, _, p) => Some(p),
            PathOp::ClosePath => None,
        }
    }
}

/// An immutable, compiled path.
///
/// Construct one through a [`PathBuilder`]; iterate its operations with
/// [`Path::iter`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    ops: Box<[PathOp]>,
}

impl Path {
    pub fn iter(&self) -> impl Iterator<Item = PathOp> + '_ {
        self.ops.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Re-emits the path as SVG path data (`M…L…Q…C…Z`), in user units.
    pub fn to_svg_path(&self) -> String {
        let mut out = String::new();

        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match *op {
                PathOp::MoveTo(p) => {
                    let (x, y) = p.to_user();
                    let _ = write!(out, "M{:.3},{:.3}", x, y);
                }
                PathOp::LineTo(p) => {
                    let (x, y) = p.to_user();
                    let _ = write!(out, "L{:.3},{:.3}", x, y);
                }
                PathOp::QuadTo(c, p) => {
                    let (cx, cy) = c.to_user();
                    let (x, y) = p.to_user();
                    let _ = write!(out, "Q{:.3},{:.3},{:.3},{:.3}", cx, cy, x, y);
                }
                PathOp::CubicTo(c1, c2, p) => {
                    let (c1x, c1y) = c1.to_user();
                    let (c2x, c2y) = c2.to_user();
                    let (x, y) = p.to_user();
                    let _ = write!(
                        out,
                        "C{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
                        c1x, c1y, c2x, c2y, x, y
                    );
                }
                PathOp::ClosePath => out.push('Z'),
            }
        }

        out
    }
}

/// Constructs a path out of operations, in user units.
///
/// Create this with `PathBuilder::default`; add operations to it or call
/// [`PathBuilder::parse`] with SVG path data, then turn it into a [`Path`]
/// with [`PathBuilder::into_path`].
#[derive(Default)]
pub struct PathBuilder {
    ops: TinyVec<[PathOp; 32]>,
}

impl PathBuilder {
    /// Parses SVG path data (a `d` attribute value) into the builder.
    pub fn parse(&mut self, path_str: &str) -> Result<(), crate::path_parser::ParseError> {
        let mut adder = MatrixAdder::new(Transform::identity(), self);
        let mut parser = crate::path_parser::PathParser::new(&mut adder, path_str);
        parser.parse()
    }

    /// Consumes the builder and returns an immutable [`Path`].
    pub fn into_path(self) -> Path {
        Path {
            ops: self.ops.to_vec().into_boxed_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(PathOp::MoveTo(FixedPoint::new(x, y)));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(PathOp::LineTo(FixedPoint::new(x, y)));
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ops
            .push(PathOp::QuadTo(FixedPoint::new(cx, cy), FixedPoint::new(x, y)));
    }

    pub fn curve_to(&mut self, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) {
        self.ops.push(PathOp::CubicTo(
            FixedPoint::new(x2, y2),
            FixedPoint::new(x3, y3),
            FixedPoint::new(x4, y4),
        ));
    }

    pub fn close_path(&mut self) {
        self.ops.push(PathOp::ClosePath);
    }
}

/// The maximum sweep, in radians, a single cubic segment is allowed to span
/// when approximating an elliptical arc.
pub const MAX_SEGMENT_SWEEP: f64 = PI / 8.0;

/// Conversion from endpoint parameterization to center parameterization.
///
/// SVG path data specifies elliptical arcs in terms of their endpoints, but
/// they are easier to process if they are converted to a center
/// parameterization.  Out of range parameters may see an arc omitted or
/// treated as a line.
pub enum ArcParameterization {
    /// Center parameterization of the arc.
    CenterParameters {
        /// Center of the ellipse.
        center: (f64, f64),
        /// Radii of the ellipse (corrected).
        radii: (f64, f64),
        /// Angle of the start point.
        theta1: f64,
        /// Delta angle to the end point.
        delta_theta: f64,
    },
    /// Treat the arc as a line to the end point.
    LineTo,
    /// Omit the arc.
    Omit,
}

/// An elliptical arc in terms of its endpoints, in user units.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalArc {
    /// The (x-axis, y-axis) radii for the ellipse.
    pub r: (f64, f64),
    /// The rotation angle in degrees for the ellipse's x-axis
    /// relative to the x-axis of the user coordinate system.
    pub x_axis_rotation: f64,
    /// Flag indicating whether the arc sweep should be
    /// greater than or equal to 180 degrees, or smaller than 180 degrees.
    pub large_arc: LargeArc,
    /// Flag indicating the angular direction in which the arc is drawn.
    pub sweep: Sweep,
    /// The (x, y) coordinates for the start point of this path segment.
    pub from: (f64, f64),
    /// The (x, y) coordinates for the end point of this path segment.
    pub to: (f64, f64),
}

impl EllipticalArc {
    /// Calculates a center parameterization from the endpoint
    /// parameterization.
    ///
    /// Radii may be adjusted if there is no solution.
    ///
    /// See section [B.2.4. Conversion from endpoint to center
    /// parameterization](https://www.w3.org/TR/SVG2/implnote.html#ArcConversionEndpointToCenter)
    pub(crate) fn center_parameterization(&self) -> ArcParameterization {
        let Self {
            r: (mut rx, mut ry),
            x_axis_rotation,
            large_arc,
            sweep,
            from: (x1, y1),
            to: (x2, y2),
        } = *self;

        // Ensure radii are non-zero.
        // Otherwise this arc is treated as a line segment joining the end points.
        //
        // A bit further down we divide by the square of the radii.
        // Check that we won't divide by zero.
        if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
            return ArcParameterization::LineTo;
        }

        let is_large_arc = large_arc.0;
        let is_positive_sweep = sweep == Sweep::Positive;

        let phi = x_axis_rotation * PI / 180.0;
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Ensure radii are positive.
        rx = rx.abs();
        ry = ry.abs();

        // The equations simplify after a translation which places
        // the origin at the midpoint of the line joining (x1, y1) to (x2, y2),
        // followed by a rotation to line up the coordinate axes
        // with the axes of the ellipse.
        // All transformed coordinates will be written with primes.
        //
        // Compute (x1', y1').
        let mid_x = (x1 - x2) / 2.0;
        let mid_y = (y1 - y2) / 2.0;
        let x1_ = cos_phi * mid_x + sin_phi * mid_y;
        let y1_ = -sin_phi * mid_x + cos_phi * mid_y;

        // Ensure radii are large enough.
        let lambda = (x1_ / rx).powi(2) + (y1_ / ry).powi(2);
        if lambda > 1.0 {
            // If not, scale up the ellipse uniformly
            // until there is exactly one solution.
            rx *= lambda.sqrt();
            ry *= lambda.sqrt();
        }

        // Compute the transformed center (cx', cy').
        let d = (rx * y1_).powi(2) + (ry * x1_).powi(2);
        if d == 0.0 {
            return ArcParameterization::Omit;
        }
        let k = {
            let mut k = ((rx * ry).powi(2) / d - 1.0).abs().sqrt();
            if is_positive_sweep == is_large_arc {
                k = -k;
            }
            k
        };
        let cx_ = k * rx * y1_ / ry;
        let cy_ = -k * ry * x1_ / rx;

        // Compute the center (cx, cy).
        let cx = cos_phi * cx_ - sin_phi * cy_ + (x1 + x2) / 2.0;
        let cy = sin_phi * cx_ + cos_phi * cy_ + (y1 + y2) / 2.0;

        // Compute the start angle θ1.
        let ux = (x1_ - cx_) / rx;
        let uy = (y1_ - cy_) / ry;
        let u_len = (ux * ux + uy * uy).abs().sqrt();
        if u_len == 0.0 {
            return ArcParameterization::Omit;
        }
        let cos_theta1 = (ux / u_len).clamp(-1.0, 1.0);
        let theta1 = {
            let mut theta1 = cos_theta1.acos();
            if uy < 0.0 {
                theta1 = -theta1;
            }
            theta1
        };

        // Compute the total delta angle Δθ.
        let vx = (-x1_ - cx_) / rx;
        let vy = (-y1_ - cy_) / ry;
        let v_len = (vx * vx + vy * vy).abs().sqrt();
        if v_len == 0.0 {
            return ArcParameterization::Omit;
        }
        let dp_uv = ux * vx + uy * vy;
        let cos_delta_theta = (dp_uv / (u_len * v_len)).clamp(-1.0, 1.0);
        let delta_theta = {
            let mut delta_theta = cos_delta_theta.acos();
            if ux * vy - uy * vx < 0.0 {
                delta_theta = -delta_theta;
            }
            if is_positive_sweep && delta_theta < 0.0 {
                delta_theta += PI * 2.0;
            } else if !is_positive_sweep && delta_theta > 0.0 {
                delta_theta -= PI * 2.0;
            }
            delta_theta
        };

        ArcParameterization::CenterParameters {
            center: (cx, cy),
            radii: (rx, ry),
            theta1,
            delta_theta,
        }
    }
}

/// One cubic segment of an arc approximation, in user units.
pub(crate) struct ArcSegment {
    pub pt1: (f64, f64),
    pub pt2: (f64, f64),
    pub to: (f64, f64),
}

/// Turns a slice of an arc into a cubic Bézier curve.
///
/// Takes the center, the radii and the x-axis rotation of the ellipse, and
/// the angles of the start and end points, and returns cubic Bézier curve
/// parameters computed by Maisonobe's method ("Drawing an elliptical arc
/// using polylines, quadratic or cubic Bézier curves", 2003).
pub(crate) fn arc_segment(
    c: (f64, f64),
    r: (f64, f64),
    x_axis_rotation: f64,
    th0: f64,
    th1: f64,
) -> ArcSegment {
    let (cx, cy) = c;
    let (rx, ry) = r;
    let phi = x_axis_rotation * PI / 180.0;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_th0, cos_th0) = th0.sin_cos();
    let (sin_th1, cos_th1) = th1.sin_cos();

    let th_half = 0.5 * (th1 - th0);
    let t = (8.0 / 3.0) * (th_half * 0.5).sin().powi(2) / th_half.sin();
    let x1 = rx * (cos_th0 - t * sin_th0);
    let y1 = ry * (sin_th0 + t * cos_th0);
    let x3 = rx * cos_th1;
    let y3 = ry * sin_th1;
    let x2 = x3 + rx * (t * sin_th1);
    let y2 = y3 + ry * (-t * cos_th1);

    ArcSegment {
        pt1: (
            cx + cos_phi * x1 - sin_phi * y1,
            cy + sin_phi * x1 + cos_phi * y1,
        ),
        pt2: (
            cx + cos_phi * x2 - sin_phi * y2,
            cy + sin_phi * x2 + cos_phi * y2,
        ),
        to: (
            cx + cos_phi * x3 - sin_phi * y3,
            cy + sin_phi * x3 + cos_phi * y3,
        ),
    }
}

/// A path sink that applies a [`Transform`] to every point before it
/// reaches the underlying [`PathBuilder`].
///
/// All shape reducers and the path parser emit through one of these; the
/// `<use>` cursor offset and the rounded-rectangle stretch matrix are both
/// expressed as adder transforms.
pub struct MatrixAdder<'a> {
    transform: Transform,
    builder: &'a mut PathBuilder,
}

impl<'a> MatrixAdder<'a> {
    pub fn new(transform: Transform, builder: &'a mut PathBuilder) -> MatrixAdder<'a> {
        MatrixAdder { transform, builder }
    }

    /// Reborrows the adder with an extra transform applied before the
    /// current one.
    pub fn compose(&mut self, t: &Transform) -> MatrixAdder<'_> {
        MatrixAdder {
            transform: self.transform.pre_transform(t),
            builder: self.builder,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.transform.transform_point(x, y);
        self.builder.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let (x, y) = self.transform.transform_point(x, y);
        self.builder.line_to(x, y);
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let (cx, cy) = self.transform.transform_point(cx, cy);
        let (x, y) = self.transform.transform_point(x, y);
        self.builder.quad_to(cx, cy, x, y);
    }

    pub fn curve_to(&mut self, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) {
        let (x2, y2) = self.transform.transform_point(x2, y2);
        let (x3, y3) = self.transform.transform_point(x3, y3);
        let (x4, y4) = self.transform.transform_point(x4, y4);
        self.builder.curve_to(x2, y2, x3, y3, x4, y4);
    }

    pub fn close_path(&mut self) {
        self.builder.close_path();
    }

    /// Adds an elliptical arc from `(x1, y1)` to `(x2, y2)`, reduced to
    /// cubic segments of at most [`MAX_SEGMENT_SWEEP`] radians each.
    ///
    /// The final segment's end point is forced to the literal target to
    /// eliminate rounding drift.
    pub fn arc(
        &mut self,
        x1: f64,
        y1: f64,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: LargeArc,
        sweep: Sweep,
        x2: f64,
        y2: f64,
    ) {
        let arc = EllipticalArc {
            r: (rx, ry),
            x_axis_rotation,
            large_arc,
            sweep,
            from: (x1, y1),
            to: (x2, y2),
        };

        match arc.center_parameterization() {
            ArcParameterization::CenterParameters {
                center,
                radii,
                theta1,
                delta_theta,
            } => {
                let n_segs = (delta_theta / MAX_SEGMENT_SWEEP).abs() as i32 + 1;
                let d_theta = delta_theta / f64::from(n_segs);

                let mut theta = theta1;
                for i in 0..n_segs {
                    let seg = arc_segment(center, radii, x_axis_rotation, theta, theta + d_theta);
                    let (to_x, to_y) = if i + 1 == n_segs { (x2, y2) } else { seg.to };
                    self.curve_to(seg.pt1.0, seg.pt1.1, seg.pt2.0, seg.pt2.1, to_x, to_y);
                    theta += d_theta;
                }
            }

            ArcParameterization::LineTo => {
                self.line_to(x2, y2);
            }

            ArcParameterization::Omit => {}
        }
    }
}
