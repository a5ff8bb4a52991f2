//! The cascading path style.

use cssparser::Parser;

use crate::dasharray::Dasharray;
use crate::driver::{DashOptions, JoinOptions, LineCap, LineGap, LineJoin};
use crate::error::*;
use crate::paint::Paint;
use crate::parse_identifiers;
use crate::parsers::Parse;
use crate::transform::Transform;

/// The resolved drawing state for one path.
///
/// During parsing a stack of these is maintained: entering an element
/// copies the top frame and applies the element's recognized attributes to
/// the copy, so children inherit transparently; leaving the element pops.
/// The frame in effect when a shape is reduced is stored next to its path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub fill_opacity: f64,
    pub stroke_opacity: f64,

    /// Stroke width in design units.
    pub stroke_width: f64,

    /// `true` selects the non-zero winding fill rule, `false` even-odd.
    pub use_nonzero_winding: bool,

    pub join: JoinOptions,
    pub dash: DashOptions,

    /// Paint for the fill pass; [`Paint::None`] disables filling.
    pub fill_paint: Paint,

    /// Paint for the stroke pass; [`Paint::None`] disables stroking.
    pub stroke_paint: Paint,

    /// Effective transform: the concatenation of all ancestor `transform`
    /// attributes.
    pub transform: Transform,
}

impl Default for PathStyle {
    /// Black fill, non-zero winding, full opacity, no stroke, Butt cap,
    /// Bevel join, miter limit 4.
    fn default() -> PathStyle {
        PathStyle {
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
            stroke_width: 2.0,
            use_nonzero_winding: true,
            join: JoinOptions::default(),
            dash: DashOptions::default(),
            fill_paint: Paint::Color(crate::color::black()),
            stroke_paint: Paint::None,
            transform: Transform::identity(),
        }
    }
}

impl Parse for LineJoin {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Self, ParseError<'i>> {
        Ok(parse_identifiers!(
            parser,
            "miter" => LineJoin::Miter,
            "miter-clip" => LineJoin::MiterClip,
            "arc" => LineJoin::Arc,
            "arc-clip" => LineJoin::ArcClip,
            "round" => LineJoin::Round,
            "bevel" => LineJoin::Bevel,
        )?)
    }
}

impl Parse for LineCap {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Self, ParseError<'i>> {
        Ok(parse_identifiers!(
            parser,
            "butt" => LineCap::Butt,
            "round" => LineCap::Round,
            "square" => LineCap::Square,
            "cubic" => LineCap::Cubic,
            "quadratic" => LineCap::Quadratic,
        )?)
    }
}

impl Parse for LineGap {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Self, ParseError<'i>> {
        Ok(parse_identifiers!(
            parser,
            "flat" => LineGap::Flat,
            "round" => LineGap::Round,
            "cubic" => LineGap::Cubic,
            "quadratic" => LineGap::Quadratic,
        )?)
    }
}

/// Applies a `stroke-dasharray` value to the dash options.
pub fn apply_dasharray(dash: &mut DashOptions, value: &Dasharray) {
    match *value {
        Dasharray::None => dash.dash.clear(),
        Dasharray::Array(ref a) => dash.dash = a.to_vec(),
    }
}
