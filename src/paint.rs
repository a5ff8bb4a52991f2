//! Paint values for filling and stroking.

use cssparser::{Color, Parser, RGBA};

use crate::color::black;
use crate::error::*;
use crate::gradient::Gradient;
use crate::parsers::Parse;

/// A resolved paint: a plain color, a gradient, or nothing.
///
/// `None` is distinct from a fully transparent color: it disables the
/// corresponding paint phase entirely, so the driver is never asked for a
/// filler (or stroker) for that path.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    None,
    Color(RGBA),
    Gradient(Gradient),
}

impl Paint {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(*self, Paint::None)
    }

    /// The effective plain color of this paint, used when a gradient stop
    /// inherits the current color: a gradient contributes its first
    /// concrete stop color, and an absent paint contributes black.
    pub fn effective_color(&self) -> RGBA {
        match *self {
            Paint::Color(rgba) => rgba,
            Paint::Gradient(ref g) => g.first_stop_color().unwrap_or_else(black),
            Paint::None => black(),
        }
    }
}

/// The unresolved form of a `fill` or `stroke` attribute value.
///
/// `url(#id)` references are looked up in the document's gradient table by
/// the parse cursor, which turns a `PaintServer` into a [`Paint`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintServer {
    None,
    Iri(String),
    SolidColor(Color),
}

impl Parse for PaintServer {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<PaintServer, ParseError<'i>> {
        if parser
            .try_parse(|i| i.expect_ident_matching("none"))
            .is_ok()
        {
            Ok(PaintServer::None)
        } else if let Ok(url) = parser.try_parse(|i| i.expect_url()) {
            Ok(PaintServer::Iri(url.as_ref().to_string()))
        } else {
            Ok(Color::parse(parser).map(PaintServer::SolidColor)?)
        }
    }
}
