//! Reduction of basic shapes to path operations.
//!
//! Every shape element is lowered to the same low-level operations as
//! `<path>` data, through a [`MatrixAdder`] so that cursor offsets from
//! `<use>` replay apply uniformly.

use std::f64::consts::PI;

use crate::path_builder::{arc_segment, MatrixAdder, MAX_SEGMENT_SWEEP};
use crate::transform::Transform;

/// Adds an axis-aligned rectangle, optionally with rounded corners.
///
/// Zero-sized rectangles are not emitted; callers check for that before
/// resolving units.  Corner radii are clamped to half the side lengths.
/// When `rx != ry` a surrounding non-uniform scale is installed on the
/// adder so that only circular arcs need to be emitted.
pub fn add_rect(adder: &mut MatrixAdder<'_>, x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64) {
    let (min_x, min_y) = (x, y);
    let (max_x, max_y) = (x + w, y + h);

    if rx <= 0.0 || ry <= 0.0 {
        adder.move_to(min_x, min_y);
        adder.line_to(max_x, min_y);
        adder.line_to(max_x, max_y);
        adder.line_to(min_x, max_y);
        adder.close_path();
        return;
    }

    let mut rx = rx;
    let mut ry = ry;
    if w < rx * 2.0 {
        rx = w / 2.0;
    }
    if h < ry * 2.0 {
        ry = h / 2.0;
    }

    // Scale the y axis so the corner arcs are circular with radius rx; the
    // surrounding matrix maps the stretched coordinates back.
    let stretch = rx / ry;
    let mid_y = min_y + h / 2.0;
    let m = Transform::new_translate(min_x + w / 2.0, mid_y)
        .pre_scale(1.0, 1.0 / stretch)
        .pre_translate(-min_x - w / 2.0, -min_y - h / 2.0);
    let max_y = mid_y + h / 2.0 * stretch;
    let min_y = mid_y - h / 2.0 * stretch;

    let mut q = adder.compose(&m);

    q.move_to(min_x + rx, min_y);
    q.line_to(max_x - rx, min_y);
    round_gap(&mut q, (max_x - rx, min_y + rx), (0.0, -rx), (rx, 0.0));
    q.line_to(max_x, max_y - rx);
    round_gap(&mut q, (max_x - rx, max_y - rx), (rx, 0.0), (0.0, rx));
    q.line_to(min_x + rx, max_y);
    round_gap(&mut q, (min_x + rx, max_y - rx), (0.0, rx), (-rx, 0.0));
    q.line_to(min_x, min_y + rx);
    round_gap(&mut q, (min_x + rx, min_y + rx), (-rx, 0.0), (0.0, -rx));
    q.close_path();
}

// Bridges a corner with a circular arc around `center`, from
// `center + start` to `center + end`, turning clockwise in the y-down
// coordinate system.  The pen must already be at `center + start`.
fn round_gap(adder: &mut MatrixAdder<'_>, center: (f64, f64), start: (f64, f64), end: (f64, f64)) {
    let (cx, cy) = center;
    let theta1 = start.1.atan2(start.0);
    let mut theta2 = end.1.atan2(end.0);
    while theta2 < theta1 {
        theta2 += PI * 2.0;
    }

    let r = (start.0 * start.0 + start.1 * start.1).sqrt();
    let end_point = (cx + end.0, cy + end.1);
    emit_arc_segments(adder, (cx, cy), (r, r), theta1, theta2 - theta1, end_point);
}

/// Adds a full ellipse centered at `(cx, cy)`.
///
/// Zero radii are not emitted; callers check for that.  The contour starts
/// at `(cx + rx, cy)` and is sampled with cubic segments of at most
/// [`MAX_SEGMENT_SWEEP`] radians, like the arc reduction in path data.
pub fn add_ellipse(adder: &mut MatrixAdder<'_>, cx: f64, cy: f64, rx: f64, ry: f64) {
    adder.move_to(cx + rx, cy);
    emit_arc_segments(adder, (cx, cy), (rx, ry), 0.0, -2.0 * PI, (cx + rx, cy));
    adder.close_path();
}

// Samples an arc around `center` into cubic segments, forcing the final
// end point to `target` so there is no rounding drift.
fn emit_arc_segments(
    adder: &mut MatrixAdder<'_>,
    center: (f64, f64),
    radii: (f64, f64),
    theta1: f64,
    delta_theta: f64,
    target: (f64, f64),
) {
    let n_segs = (delta_theta / MAX_SEGMENT_SWEEP).abs() as i32 + 1;
    let d_theta = delta_theta / f64::from(n_segs);

    let mut theta = theta1;
    for i in 0..n_segs {
        let seg = arc_segment(center, radii, 0.0, theta, theta + d_theta);
        let (to_x, to_y) = if i + 1 == n_segs { target } else { seg.to };
        adder.curve_to(seg.pt1.0, seg.pt1.1, seg.pt2.0, seg.pt2.1, to_x, to_y);
        theta += d_theta;
    }
}

/// Adds a line segment.
pub fn add_line(adder: &mut MatrixAdder<'_>, x1: f64, y1: f64, x2: f64, y2: f64) {
    adder.move_to(x1, y1);
    adder.line_to(x2, y2);
}

/// Adds a polyline from a flat, even-length coordinate list; `close`
/// additionally closes the contour (for `<polygon>`).
///
/// Fewer than three points are not drawn.
pub fn add_poly(adder: &mut MatrixAdder<'_>, points: &[f64], close: bool) {
    if points.len() <= 4 {
        return;
    }

    adder.move_to(points[0], points[1]);
    for pair in points[2..].chunks_exact(2) {
        adder.line_to(pair[0], pair[1]);
    }
    if close {
        adder.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::FixedPoint;
    use crate::path_builder::{PathBuilder, PathOp};

    fn identity_ops(f: impl FnOnce(&mut MatrixAdder<'_>)) -> Vec<PathOp> {
        let mut builder = PathBuilder::default();
        {
            let mut adder = MatrixAdder::new(Transform::identity(), &mut builder);
            f(&mut adder);
        }
        builder.into_path().iter().collect()
    }

    fn fixed(x: f64, y: f64) -> FixedPoint {
        FixedPoint::new(x, y)
    }

    #[test]
    fn plain_rect_is_a_closed_polygon() {
        let ops = identity_ops(|a| add_rect(a, 0.0, 0.0, 10.0, 10.0, 0.0, 0.0));

        assert_eq!(
            ops,
            vec![
                PathOp::MoveTo(fixed(0.0, 0.0)),
                PathOp::LineTo(fixed(10.0, 0.0)),
                PathOp::LineTo(fixed(10.0, 10.0)),
                PathOp::LineTo(fixed(0.0, 10.0)),
                PathOp::ClosePath,
            ]
        );
    }

    #[test]
    fn rounded_rect_emits_lines_and_arcs() {
        let ops = identity_ops(|a| add_rect(a, 0.0, 0.0, 10.0, 10.0, 2.0, 2.0));

        assert!(matches!(ops[0], PathOp::MoveTo(_)));
        assert_eq!(*ops.last().unwrap(), PathOp::ClosePath);
        assert!(ops.iter().any(|op| matches!(op, PathOp::CubicTo(..))));
        assert!(ops.iter().any(|op| matches!(op, PathOp::LineTo(_))));

        // contour starts on the top edge, past the corner radius
        assert_eq!(ops[0], PathOp::MoveTo(fixed(2.0, 0.0)));
    }

    #[test]
    fn rounded_rect_clamps_radii() {
        // rx greater than half the width behaves as rx = w/2
        let a = identity_ops(|ad| add_rect(ad, 0.0, 0.0, 10.0, 10.0, 50.0, 50.0));
        let b = identity_ops(|ad| add_rect(ad, 0.0, 0.0, 10.0, 10.0, 5.0, 5.0));
        assert_eq!(a, b);
    }

    #[test]
    fn ellipse_starts_and_ends_on_the_major_axis() {
        let ops = identity_ops(|a| add_ellipse(a, 5.0, 5.0, 3.0, 2.0));

        assert_eq!(ops[0], PathOp::MoveTo(fixed(8.0, 5.0)));
        assert_eq!(*ops.last().unwrap(), PathOp::ClosePath);

        let cubics = &ops[1..ops.len() - 1];
        assert!(!cubics.is_empty());
        assert!(cubics.iter().all(|op| matches!(op, PathOp::CubicTo(..))));
        // the contour returns exactly to its start
        assert_eq!(cubics.last().unwrap().end_point(), Some(fixed(8.0, 5.0)));
    }

    #[test]
    fn line_is_move_plus_line() {
        let ops = identity_ops(|a| add_line(a, 1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            ops,
            vec![
                PathOp::MoveTo(fixed(1.0, 2.0)),
                PathOp::LineTo(fixed(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn polyline_needs_three_points() {
        let ops = identity_ops(|a| add_poly(a, &[0.0, 0.0, 5.0, 5.0], false));
        assert!(ops.is_empty());

        let ops = identity_ops(|a| add_poly(a, &[0.0, 0.0, 5.0, 5.0, 10.0, 0.0], false));
        assert_eq!(
            ops,
            vec![
                PathOp::MoveTo(fixed(0.0, 0.0)),
                PathOp::LineTo(fixed(5.0, 5.0)),
                PathOp::LineTo(fixed(10.0, 0.0)),
            ]
        );
    }

    #[test]
    fn polygon_closes_the_contour() {
        let ops = identity_ops(|a| add_poly(a, &[0.0, 0.0, 5.0, 5.0, 10.0, 0.0], true));
        assert_eq!(*ops.last().unwrap(), PathOp::ClosePath);
    }
}
