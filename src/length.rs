//! Length values with units.
//!
//! [`Length`] values need to know whether they will be normalized with
//! respect to the width, height, or diagonal of the current viewport, so
//! they carry a type parameter implementing [`Normalize`]: [`Horizontal`],
//! [`Vertical`], or [`Both`].  For example, `<circle cx="50%" cy="30%"
//! r="10%">` resolves `cx` against the viewport width, `cy` against its
//! height, and `r` against its normalized diagonal.
//!
//! Physical units are converted at the CSS ratio of 96 pixels per inch.

use std::f64::consts::SQRT_2;
use std::marker::PhantomData;

use cssparser::{_cssparser_internal_to_lowercase, match_ignore_ascii_case, Parser, Token};

use crate::error::*;
use crate::parsers::{finite_f32, Parse};
use crate::viewbox::ViewBox;

/// Units for length values.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LengthUnit {
    /// `1.0` means 100%
    Percent,

    /// Pixels, or the default unit
    Px,

    /// Inches (25.4 mm)
    In,

    /// Centimeters
    Cm,

    /// Millimeters
    Mm,

    /// Points (1/72 inch)
    Pt,

    /// Picas (12 points)
    Pc,

    /// Quarter-millimeters
    Q,
}

/// Used for the `N` type parameter of `Length<N: Normalize>`.
pub trait Normalize {
    /// Computes an orientation-based scaling factor for percentages.
    fn normalize(x: f64, y: f64) -> f64;
}

/// Allows declaring `Length<Horizontal>`.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Horizontal;

/// Allows declaring `Length<Vertical>`.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Vertical;

/// Allows declaring `Length<Both>`, resolved against the normalized
/// diagonal.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Both;

impl Normalize for Horizontal {
    #[inline]
    fn normalize(x: f64, _y: f64) -> f64 {
        x
    }
}

impl Normalize for Vertical {
    #[inline]
    fn normalize(_x: f64, y: f64) -> f64 {
        y
    }
}

impl Normalize for Both {
    #[inline]
    fn normalize(x: f64, y: f64) -> f64 {
        viewport_percentage(x, y)
    }
}

/// The [normalized diagonal] of a viewport: `sqrt(w² + h²) / sqrt(2)`.
///
/// [normalized diagonal]: https://www.w3.org/TR/SVG/coords.html#Units
pub fn viewport_percentage(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt() / SQRT_2
}

const PIXELS_PER_INCH: f64 = 96.0;
const CM_PER_INCH: f64 = 2.54;
const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;
const PICA_PER_INCH: f64 = 6.0;
const QUARTER_MM_PER_INCH: f64 = 40.0 * CM_PER_INCH;

/// A length value with a unit.
///
/// `Length` implements [`Parse`], so it can be parsed out of an attribute
/// value; during compilation it is converted to user-space pixels with
/// [`Length::to_user`].
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Length<N: Normalize> {
    /// Numeric part of the length
    pub length: f64,

    /// Unit part of the length
    pub unit: LengthUnit,

    /// Dummy; used internally for the type parameter `N`
    orientation: PhantomData<N>,
}

impl<N: Normalize> Length<N> {
    pub fn new(l: f64, unit: LengthUnit) -> Length<N> {
        Length {
            length: l,
            unit,
            orientation: PhantomData,
        }
    }

    /// Converts a length with a unit into its value in pixels.
    ///
    /// Percentages resolve against the current viewport, along the axis
    /// selected by the `N` type parameter.
    pub fn to_user(&self, params: &NormalizeParams) -> f64 {
        match self.unit {
            LengthUnit::Px => self.length,

            LengthUnit::Percent => {
                self.length * <N as Normalize>::normalize(params.vbox.width(), params.vbox.height())
            }

            LengthUnit::In => self.length * PIXELS_PER_INCH,

            LengthUnit::Cm => self.length * PIXELS_PER_INCH / CM_PER_INCH,

            LengthUnit::Mm => self.length * PIXELS_PER_INCH / MM_PER_INCH,

            LengthUnit::Pt => self.length * PIXELS_PER_INCH / POINTS_PER_INCH,

            LengthUnit::Pc => self.length * PIXELS_PER_INCH / PICA_PER_INCH,

            LengthUnit::Q => self.length * PIXELS_PER_INCH / QUARTER_MM_PER_INCH,
        }
    }
}

impl<N: Normalize> Default for Length<N> {
    fn default() -> Self {
        Length::new(0.0, LengthUnit::Px)
    }
}

impl<N: Normalize> Parse for Length<N> {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Length<N>, ParseError<'i>> {
        let l_value;
        let l_unit;

        let token = parser.next()?.clone();

        match token {
            Token::Number { value, .. } => {
                l_value = value;
                l_unit = LengthUnit::Px;
            }

            Token::Percentage { unit_value, .. } => {
                l_value = unit_value;
                l_unit = LengthUnit::Percent;
            }

            Token::Dimension {
                value, ref unit, ..
            } => {
                l_value = value;

                l_unit = match_ignore_ascii_case! {unit.as_ref(),
                    "px" => LengthUnit::Px,
                    "in" => LengthUnit::In,
                    "cm" => LengthUnit::Cm,
                    "mm" => LengthUnit::Mm,
                    "pt" => LengthUnit::Pt,
                    "pc" => LengthUnit::Pc,
                    "q" => LengthUnit::Q,

                    _ => return Err(parser.new_unexpected_token_error(token)),
                };
            }

            _ => return Err(parser.new_unexpected_token_error(token)),
        }

        let l_value = f64::from(finite_f32(l_value).map_err(|e| parser.new_custom_error(e))?);

        Ok(Length::new(l_value, l_unit))
    }
}

/// Parameters to normalize [`Length`] values to user-space pixels.
#[derive(Debug, Copy, Clone)]
pub struct NormalizeParams {
    pub vbox: ViewBox,
}

impl NormalizeParams {
    pub fn new(vbox: ViewBox) -> NormalizeParams {
        NormalizeParams { vbox }
    }
}
