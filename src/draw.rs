//! Replays a compiled icon through a driver.
//!
//! For each compiled path, the replay engine asks the [`Driver`] for the
//! sub-handles matching the passes that will run, applies the effective
//! transform to every control point, and issues the fill pass followed by
//! the stroke pass.  Both passes receive the identical sequence of path
//! operations.
//!
//! Replay never mutates the icon: the effective matrix is computed locally
//! and threaded through.

use crate::coord_units::CoordUnits;
use crate::document::{SvgIcon, SvgPath};
use crate::driver::{Driver, Filler, JoinOptions, LineCap, LineGap, Pather, StrokeOptions, Stroker};
use crate::fixed::{Fixed, FixedPoint};
use crate::paint::Paint;
use crate::path_builder::{Path, PathOp};
use crate::style::PathStyle;
use crate::transform::Transform;

impl SvgIcon {
    /// Sets the world transform to draw within the given rectangle.
    ///
    /// The viewBox is mapped onto the rectangle `(x, y, w, h)`:
    /// `transform = translate(x - vb.x, y - vb.y) · scale(w/vb.w, h/vb.h)`.
    pub fn set_target(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let scale_w = w / self.view_box.width();
        let scale_h = h / self.view_box.height();
        self.transform = Transform::new_translate(x - self.view_box.x0, y - self.view_box.y0)
            .pre_scale(scale_w, scale_h);
    }

    /// Draws the compiled icon into the driver.
    ///
    /// `opacity` multiplies into every paint's effective opacity.  Replay
    /// is infallible from the core's point of view; driver errors are the
    /// driver's concern.
    pub fn draw<D: Driver>(&self, driver: &mut D, opacity: f64) {
        for svg_path in &self.paths {
            svg_path.draw_transformed(driver, opacity, &self.transform);
        }
    }
}

impl SvgPath {
    /// Draws this path with no extra world transform.
    pub fn draw<D: Driver>(&self, driver: &mut D, opacity: f64) {
        self.draw_transformed(driver, opacity, &Transform::identity());
    }

    /// Draws this path while applying the world transform `world`.
    pub fn draw_transformed<D: Driver>(&self, driver: &mut D, opacity: f64, world: &Transform) {
        let effective = self.style.transform.post_transform(world);

        let (filler, stroker) = driver.setup_drawers(
            !self.style.fill_paint.is_none(),
            !self.style.stroke_paint.is_none(),
        );

        if let Some(mut filler) = filler {
            filler.clear();
            filler.set_winding(self.style.use_nonzero_winding);

            replay_ops(&self.path, &mut filler, &effective);
            filler.stop(false);

            set_paint(
                &mut filler,
                &self.style.fill_paint,
                self.style.fill_opacity * opacity,
            );
            filler.draw();

            // default is the non-zero rule
            filler.set_winding(true);
        }

        if let Some(mut stroker) = stroker {
            stroker.clear();
            stroker.set_stroke_options(stroke_options(&self.style));

            replay_ops(&self.path, &mut stroker, &effective);
            stroker.stop(false);

            set_paint(
                &mut stroker,
                &self.style.stroke_paint,
                self.style.stroke_opacity * opacity,
            );
            stroker.draw();
        }
    }
}

/// Builds the driver-facing stroke parameters from a style, substituting
/// defaults for `Nil` caps and gaps.
///
/// The leading cap defaults to the trailing cap, which in turn defaults to
/// the default style's cap; the gap defaults to the default style's gap.
fn stroke_options(style: &PathStyle) -> StrokeOptions {
    let defaults = PathStyle::default();

    let line_gap = if style.join.line_gap == LineGap::Nil {
        defaults.join.line_gap
    } else {
        style.join.line_gap
    };
    let trail_cap = if style.join.trail_cap == LineCap::Nil {
        defaults.join.trail_cap
    } else {
        style.join.trail_cap
    };
    let lead_cap = if style.join.lead_cap == LineCap::Nil {
        trail_cap
    } else {
        style.join.lead_cap
    };

    StrokeOptions {
        line_width: Fixed::from_f64(style.stroke_width),
        join: JoinOptions {
            miter_limit: style.join.miter_limit,
            line_join: style.join.line_join,
            trail_cap,
            lead_cap,
            line_gap,
        },
        dash: style.dash.clone(),
    }
}

/// Forwards every operation of `path` to `pather`, applying `m` to all
/// control points.
///
/// A `MoveTo` replays as `stop(false)` followed by `start`, implicitly
/// closing any open subpath; `ClosePath` replays as `stop(true)`.
fn replay_ops<P: Pather>(path: &Path, pather: &mut P, m: &Transform) {
    for op in path.iter() {
        match op {
            PathOp::MoveTo(p) => {
                pather.stop(false);
                pather.start(transform_point(m, p));
            }
            PathOp::LineTo(p) => pather.line(transform_point(m, p)),
            PathOp::QuadTo(c, p) => {
                pather.quad_bezier(transform_point(m, c), transform_point(m, p))
            }
            PathOp::CubicTo(c1, c2, p) => pather.cube_bezier(
                transform_point(m, c1),
                transform_point(m, c2),
                transform_point(m, p),
            ),
            PathOp::ClosePath => pather.stop(true),
        }
    }
}

fn transform_point(m: &Transform, p: FixedPoint) -> FixedPoint {
    let (x, y) = p.to_user();
    let (x, y) = m.transform_point(x, y);
    FixedPoint::new(x, y)
}

/// Attaches a paint to the sub-handle, rebinding `objectBoundingBox`
/// gradient bounds to the just-emitted path's extent.
fn set_paint<P: Pather>(pather: &mut P, paint: &Paint, opacity: f64) {
    if let Paint::Gradient(gradient) = paint {
        if gradient.units == CoordUnits::ObjectBoundingBox {
            let mut rebound = gradient.clone();
            rebound.bounds = pather.path_extent().to_rect();
            pather.set_color(&Paint::Gradient(rebound), opacity);
            return;
        }
    }

    pather.set_color(paint, opacity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::LineJoin;

    #[test]
    fn target_transform_maps_viewbox_to_rectangle() {
        let mut icon = crate::document::read_icon_str(
            r#"<svg viewBox="1 2 10 20"/>"#,
            crate::document::ErrorMode::Strict,
        )
        .unwrap();

        icon.set_target(0.0, 0.0, 100.0, 100.0);

        // viewBox corners land on the target corners
        assert_eq!(icon.transform.transform_point(1.0, 2.0), (0.0, 0.0));
        assert_eq!(icon.transform.transform_point(11.0, 22.0), (100.0, 100.0));
    }

    #[test]
    fn stroke_options_default_caps_and_gaps() {
        let style = PathStyle::default();
        let opts = stroke_options(&style);

        // the trail cap is concrete, and the lead cap follows it
        assert_eq!(opts.join.trail_cap, LineCap::Butt);
        assert_eq!(opts.join.lead_cap, LineCap::Butt);
        assert_eq!(opts.join.line_gap, LineGap::Nil);
        assert_eq!(opts.join.line_join, LineJoin::Bevel);
        assert_eq!(opts.line_width, Fixed::from_f64(2.0));
    }

    #[test]
    fn explicit_lead_cap_wins() {
        let mut style = PathStyle::default();
        style.join.trail_cap = LineCap::Round;
        style.join.lead_cap = LineCap::Square;

        let opts = stroke_options(&style);
        assert_eq!(opts.join.trail_cap, LineCap::Round);
        assert_eq!(opts.join.lead_cap, LineCap::Square);
    }
}
