//! The backend-independent drawing contract.
//!
//! Given a compiled icon, the replay engine issues fill and stroke passes
//! through these traits.  A [`Driver`] is a factory: at the beginning of
//! every path it is told which passes will run and returns the matching
//! sub-handles.  When both handles are returned, the replay engine promises
//! to issue the identical sequence of path operations to the filler first
//! and then to the stroker, so a backend may avoid duplicating geometry
//! internally.
//!
//! Drivers need no SVG knowledge: transformation matrices are already
//! applied to every point they see, and coordinates arrive in 26.6
//! fixed-point form.

use crate::fixed::{Fixed, FixedPoint, FixedRect};
use crate::paint::Paint;

/// How stroke segments bridge the gap at a join.
///
/// `Arc` and `MiterClip` are new in SVG2; `ArcClip` is like `MiterClip`
/// applied to arcs, and is not part of the SVG2 standard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineJoin {
    Arc,
    Round,
    Bevel,
    Miter,
    MiterClip,
    ArcClip,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Bevel
    }
}

/// How to draw caps on the ends of lines.
///
/// `Nil` means "inherit the default"; the replay engine substitutes the
/// default style's cap before the value reaches a driver.  `Cubic` and
/// `Quadratic` are not part of the SVG2 standard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineCap {
    Nil,
    Butt,
    Square,
    Round,
    Cubic,
    Quadratic,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Nil
    }
}

/// How to bridge the gap on the convex side of two joining lines when the
/// miter limit is exceeded.  Not part of the SVG2 standard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineGap {
    Nil,
    Flat,
    Round,
    Cubic,
    Quadratic,
}

impl Default for LineGap {
    fn default() -> Self {
        LineGap::Nil
    }
}

/// Join and cap parameters for stroking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    /// The miter cutoff value for `Miter`, `Arc`, `MiterClip` and
    /// `ArcClip` join modes, in 26.6 fixed point.
    pub miter_limit: Fixed,

    pub line_join: LineJoin,

    /// Cap for the trailing line end.  If the lead cap is `Nil`, this one
    /// is used at both ends.
    pub trail_cap: LineCap,

    /// Cap for the leading line end; not part of the standard vocabulary.
    pub lead_cap: LineCap,

    /// Gap shape; not part of the standard vocabulary.
    pub line_gap: LineGap,
}

impl Default for JoinOptions {
    fn default() -> Self {
        JoinOptions {
            miter_limit: Fixed::from_f64(4.0),
            line_join: LineJoin::default(),
            trail_cap: LineCap::Butt,
            lead_cap: LineCap::Nil,
            line_gap: LineGap::Nil,
        }
    }
}

/// Dash parameters for stroking: design-unit lengths plus a starting
/// offset.  An empty array means a solid stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DashOptions {
    pub dash: Vec<f64>,
    pub offset: f64,
}

/// The full stroking parameters handed to a [`Stroker`].
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOptions {
    /// Width of the line, in 26.6 fixed point.
    pub line_width: Fixed,
    pub join: JoinOptions,
    pub dash: DashOptions,
}

/// The common path vocabulary both sub-handles implement.
///
/// For a given path, a sub-handle observes exactly this sequence:
/// `clear`, optional mode setting, `start`/`line`/`quad_bezier`/
/// `cube_bezier`/`stop` operations, `set_color`, `draw`.
pub trait Pather {
    /// Resets internal path state; called before a new path is emitted.
    fn clear(&mut self);

    /// Starts a new subpath at the given point.
    fn start(&mut self, p: FixedPoint);

    /// Adds a line from the current point to `b`.
    fn line(&mut self, b: FixedPoint);

    /// Adds a quadratic Bézier curve to the path.
    fn quad_bezier(&mut self, b: FixedPoint, c: FixedPoint);

    /// Adds a cubic Bézier curve to the path.
    fn cube_bezier(&mut self, b: FixedPoint, c: FixedPoint, d: FixedPoint);

    /// Ends the subpath, closing it back to its start point if
    /// `close_loop` is true.
    fn stop(&mut self, close_loop: bool);

    /// Attaches the paint for the next [`draw`](Pather::draw).
    fn set_color(&mut self, paint: &Paint, opacity: f64);

    /// The extent of the path emitted since the last `clear`.
    ///
    /// Used to rebind `objectBoundingBox` gradient bounds; drivers that
    /// never see gradient paints may return a degenerate extent.
    fn path_extent(&self) -> FixedRect;

    /// Emits the pass (fills or strokes the accumulated path).
    fn draw(&mut self);
}

/// The fill-pass sub-handle.
pub trait Filler: Pather {
    /// Selects the fill rule for the current path; `true` means the
    /// non-zero winding rule, `false` means even-odd.
    fn set_winding(&mut self, non_zero: bool);
}

/// The stroke-pass sub-handle.
pub trait Stroker: Pather {
    /// Parametrizes the stroking style for the current path.
    fn set_stroke_options(&mut self, options: StrokeOptions);
}

/// A backend that can fill and stroke paths.
pub trait Driver {
    type Filler: Filler;
    type Stroker: Stroker;

    /// Returns the backend painters; called at the beginning of every
    /// path.  When a `will_*` flag is false, the corresponding handle must
    /// be `None` so useless work is avoided.
    ///
    /// When both flags are true, the exact same path operations will be
    /// performed on the filler first and then on the stroker; an
    /// implementation may rely on this to avoid duplicating filled and
    /// stroked geometry.
    fn setup_drawers(
        &mut self,
        will_fill: bool,
        will_stroke: bool,
    ) -> (Option<Self::Filler>, Option<Self::Stroker>);
}
