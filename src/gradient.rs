//! Gradient paint servers.

use cssparser::{Parser, RGBA};

use crate::coord_units::CoordUnits;
use crate::error::*;
use crate::paint::Paint;
use crate::parse_identifiers;
use crate::parsers::Parse;
use crate::rect::Rect;
use crate::transform::Transform;

/// How a gradient continues past its edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpreadMethod {
    Pad,
    Reflect,
    Repeat,
}

impl Default for SpreadMethod {
    fn default() -> Self {
        SpreadMethod::Pad
    }
}

impl Parse for SpreadMethod {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Self, ParseError<'i>> {
        Ok(parse_identifiers!(
            parser,
            "pad" => SpreadMethod::Pad,
            "reflect" => SpreadMethod::Reflect,
            "repeat" => SpreadMethod::Repeat,
        )?)
    }
}

/// Direction of a gradient.
///
/// Coordinates are fractional by default (`objectBoundingBox` units); with
/// `userSpaceOnUse` they are user-space values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GradientVariant {
    Linear {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Radial {
        cx: f64,
        cy: f64,
        fx: f64,
        fy: f64,
        r: f64,
        fr: f64,
    },
}

/// A stop in a gradient ramp.
///
/// `offset` is deliberately not clamped to `[0, 1]`; drivers may clamp.  A
/// stop with no color inherits the effective color of the paint context at
/// URL-resolution time (see [`Gradient::resolve_current_color`]).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradStop {
    pub offset: f64,
    pub opacity: f64,
    pub color: Option<RGBA>,
}

/// A compiled `<linearGradient>` or `<radialGradient>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub variant: GradientVariant,
    pub stops: Vec<GradStop>,

    /// User-space bounds the fractional coordinates refer to.  Starts out
    /// as the document viewBox; with `ObjectBoundingBox` units the replay
    /// engine rebinds this to the painted path's extent.
    pub bounds: Rect,

    /// Local gradient transform (`gradientTransform`).
    pub transform: Transform,

    pub spread: SpreadMethod,
    pub units: CoordUnits,
}

impl Gradient {
    /// Returns a copy of the gradient with color-less stops replaced by the
    /// current paint's effective color.
    ///
    /// This freezes "currentColor" semantics at the moment of use: the
    /// stored gradient is never mutated, so two uses of the same gradient
    /// in different color contexts do not corrupt each other.
    pub fn resolve_current_color(&self, current: &Paint) -> Gradient {
        let mut grad = self.clone();

        if grad.stops.iter().any(|s| s.color.is_none()) {
            let clr = current.effective_color();
            for stop in &mut grad.stops {
                if stop.color.is_none() {
                    stop.color = Some(clr);
                }
            }
        }

        grad
    }

    /// The first stop with a concrete color, if any.
    pub fn first_stop_color(&self) -> Option<RGBA> {
        self.stops.iter().find_map(|s| s.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::black;

    fn linear() -> Gradient {
        Gradient {
            variant: GradientVariant::Linear {
                x1: 0.0,
                y1: 0.0,
                x2: 1.0,
                y2: 0.0,
            },
            stops: vec![
                GradStop {
                    offset: 0.0,
                    opacity: 1.0,
                    color: None,
                },
                GradStop {
                    offset: 1.0,
                    opacity: 1.0,
                    color: Some(RGBA::new(0, 0, 255, 255)),
                },
            ],
            bounds: Rect::from_size(10.0, 10.0),
            transform: Transform::identity(),
            spread: SpreadMethod::default(),
            units: CoordUnits::default(),
        }
    }

    #[test]
    fn parses_spread_method() {
        assert_eq!(SpreadMethod::parse_str("pad").unwrap(), SpreadMethod::Pad);
        assert_eq!(
            SpreadMethod::parse_str("reflect").unwrap(),
            SpreadMethod::Reflect
        );
        assert_eq!(
            SpreadMethod::parse_str("repeat").unwrap(),
            SpreadMethod::Repeat
        );
        assert!(SpreadMethod::parse_str("foo").is_err());
    }

    #[test]
    fn stamps_current_color_into_missing_stops() {
        let grad = linear();
        let red = RGBA::new(255, 0, 0, 255);

        let resolved = grad.resolve_current_color(&Paint::Color(red));
        assert_eq!(resolved.stops[0].color, Some(red));
        assert_eq!(resolved.stops[1].color, Some(RGBA::new(0, 0, 255, 255)));

        // the original gradient is untouched
        assert_eq!(grad.stops[0].color, None);
    }

    #[test]
    fn missing_stop_color_defaults_to_black() {
        let resolved = linear().resolve_current_color(&Paint::None);
        assert_eq!(resolved.stops[0].color, Some(black()));
    }

    #[test]
    fn gradient_paint_context_uses_first_stop_color() {
        let blue = RGBA::new(0, 0, 255, 255);
        let resolved = linear().resolve_current_color(&Paint::Gradient(linear()));
        // the context gradient's first concrete stop color is blue
        assert_eq!(resolved.stops[0].color, Some(blue));
    }
}
