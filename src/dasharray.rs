//! Parser for the `stroke-dasharray` attribute.

use cssparser::Parser;

use crate::error::*;
use crate::parsers::{optional_comma, NonNegative, Parse};

/// A dash pattern: design-unit lengths, or `none` for a solid stroke.
#[derive(Debug, PartialEq, Clone)]
pub enum Dasharray {
    None,
    Array(Box<[f64]>),
}

impl Default for Dasharray {
    fn default() -> Self {
        Dasharray::None
    }
}

impl Parse for Dasharray {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Dasharray, ParseError<'i>> {
        if parser
            .try_parse(|p| p.expect_ident_matching("none"))
            .is_ok()
        {
            return Ok(Dasharray::None);
        }

        let mut dasharray = Vec::new();

        loop {
            let NonNegative(d) = NonNegative::parse(parser)?;
            dasharray.push(d);

            if parser.is_exhausted() {
                break;
            }

            optional_comma(parser);
        }

        Ok(Dasharray::Array(dasharray.into_boxed_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dasharray(l: &[f64]) -> Dasharray {
        Dasharray::Array(l.to_vec().into_boxed_slice())
    }

    #[test]
    fn parses_dash_array() {
        assert_eq!(Dasharray::parse_str("none").unwrap(), Dasharray::None);
        assert_eq!(Dasharray::parse_str("10,6").unwrap(), dasharray(&[10.0, 6.0]));
        assert_eq!(
            Dasharray::parse_str("5,5,20").unwrap(),
            dasharray(&[5.0, 5.0, 20.0])
        );
        assert_eq!(
            Dasharray::parse_str("25  5 , 5 5").unwrap(),
            dasharray(&[25.0, 5.0, 5.0, 5.0])
        );
        assert_eq!(
            Dasharray::parse_str("3.1415926,8").unwrap(),
            dasharray(&[3.1415926, 8.0])
        );
        assert_eq!(Dasharray::parse_str("2").unwrap(), dasharray(&[2.0]));
    }

    #[test]
    fn errors_on_invalid_dash_array() {
        // negative numbers
        assert!(Dasharray::parse_str("20,40,-20").is_err());

        // empty
        assert!(Dasharray::parse_str("").is_err());
        assert!(Dasharray::parse_str("\t  \n     ").is_err());
        assert!(Dasharray::parse_str(",,,").is_err());

        // no trailing commas allowed
        assert!(Dasharray::parse_str("10,").is_err());

        // a comma should be followed by a number
        assert!(Dasharray::parse_str("20,,10").is_err());
    }
}
