//! CSS color values.
//!
//! All color syntaxes come from `cssparser`: named SVG/CSS colors,
//! `#rgb`/`#rrggbb` hex, and the `rgb()` functional notation.

use cssparser::{Color, Parser, RGBA};

use crate::error::*;
use crate::parsers::Parse;

impl Parse for Color {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i>> {
        Ok(Color::parse(parser)?)
    }
}

/// Extracts a concrete color value, rejecting `currentColor`.
pub fn rgba_from_color(color: Color) -> Result<RGBA, ValueErrorKind> {
    match color {
        Color::RGBA(rgba) => Ok(rgba),
        Color::CurrentColor => Err(ValueErrorKind::value_error(
            "currentColor is not supported here",
        )),
    }
}

/// Opaque black, the fallback for unresolvable paints.
pub fn black() -> RGBA {
    RGBA::new(0, 0, 0, 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            Color::parse_str("#ff0000").unwrap(),
            Color::RGBA(RGBA::new(255, 0, 0, 255))
        );

        // 3-digit hex duplicates each digit
        assert_eq!(
            Color::parse_str("#f00").unwrap(),
            Color::RGBA(RGBA::new(255, 0, 0, 255))
        );
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(
            Color::parse_str("red").unwrap(),
            Color::RGBA(RGBA::new(255, 0, 0, 255))
        );
        assert_eq!(
            Color::parse_str("cornflowerblue").unwrap(),
            Color::RGBA(RGBA::new(100, 149, 237, 255))
        );
    }

    #[test]
    fn parses_rgb_function() {
        assert_eq!(
            Color::parse_str("rgb(1, 2, 3)").unwrap(),
            Color::RGBA(RGBA::new(1, 2, 3, 255))
        );
        assert_eq!(
            Color::parse_str("rgb(100%, 50%, 0%)").unwrap(),
            Color::RGBA(RGBA::new(255, 128, 0, 255))
        );
    }

    #[test]
    fn rejects_current_color_as_concrete_value() {
        assert!(rgba_from_color(Color::CurrentColor).is_err());
    }

    #[test]
    fn invalid_colors_yield_error() {
        assert!(Color::parse_str("").is_err());
        assert!(Color::parse_str("#xyz").is_err());
        assert!(Color::parse_str("notacolorname").is_err());
    }
}
