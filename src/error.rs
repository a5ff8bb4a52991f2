//! Error types.

use std::error;
use std::fmt;

use cssparser::{BasicParseError, BasicParseErrorKind, ParseErrorKind};

use crate::document::SvgIcon;

/// A short-lived error from parsing an attribute value.
///
/// The lifetime of the error is the same as the `cssparser::ParserInput`
/// that was used to create a `cssparser::Parser`; that is, the lifetime of
/// the string data being parsed.  [`ElementError`] is the long-lived form.
pub type ParseError<'i> = cssparser::ParseError<'i, ValueErrorKind>;

/// A simple error which refers to an attribute's value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueErrorKind {
    /// The value could not be parsed.
    Parse(String),

    /// The value could be parsed, but is invalid.
    Value(String),
}

impl ValueErrorKind {
    pub fn parse_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Parse(s.to_string())
    }

    pub fn value_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Value(s.to_string())
    }
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueErrorKind::Parse(ref s) => write!(f, "parse error: {}", s),
            ValueErrorKind::Value(ref s) => write!(f, "invalid value: {}", s),
        }
    }
}

impl<'a> From<BasicParseError<'a>> for ValueErrorKind {
    fn from(e: BasicParseError<'_>) -> ValueErrorKind {
        let BasicParseError { kind, .. } = e;

        let msg = match kind {
            BasicParseErrorKind::UnexpectedToken(_) => "unexpected token",
            BasicParseErrorKind::EndOfInput => "unexpected end of input",
            BasicParseErrorKind::AtRuleInvalid(_) => "invalid @-rule",
            BasicParseErrorKind::AtRuleBodyInvalid => "invalid @-rule body",
            BasicParseErrorKind::QualifiedRuleInvalid => "invalid qualified rule",
        };

        ValueErrorKind::parse_error(msg)
    }
}

impl<'i> From<ParseError<'i>> for ValueErrorKind {
    fn from(e: ParseError<'i>) -> ValueErrorKind {
        match e.kind {
            ParseErrorKind::Basic(kind) => ValueErrorKind::from(BasicParseError {
                kind,
                location: e.location,
            }),
            ParseErrorKind::Custom(kind) => kind,
        }
    }
}

/// A complete error for an attribute and its erroneous value.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementError {
    pub attr: String,
    pub err: ValueErrorKind,
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attr, self.err)
    }
}

impl error::Error for ElementError {}

/// Helper for converting `Result<O, E>` into `Result<O, ElementError>`.
///
/// Parsing functions for attribute value types return errors convertible to
/// [`ValueErrorKind`]; calling `.attribute(name)` on such a result annotates
/// the error with the attribute the value came from.
pub trait AttributeResultExt<O> {
    fn attribute(self, attr: &str) -> Result<O, ElementError>;
}

impl<O, E: Into<ValueErrorKind>> AttributeResultExt<O> for Result<O, E> {
    fn attribute(self, attr: &str) -> Result<O, ElementError> {
        self.map_err(|e| ElementError {
            attr: attr.to_string(),
            err: e.into(),
        })
    }
}

/// Errors that can happen while loading an icon document.
#[derive(Debug)]
pub enum LoadingError {
    /// A command or transform had the wrong arity, a polygon had an odd
    /// point count, a viewBox was not 4 numbers, or a numeric field failed
    /// to parse.
    ParamMismatch(String),

    /// An element name is not in the dispatch table.  Governed by
    /// [`ErrorMode`](crate::document::ErrorMode).
    UnknownElement(String),

    /// A `<use>` without `href`, with a non-`#id` target, or with an `href`
    /// id not present in the defs table.
    UnsupportedUse(String),

    /// The input produced no start element.
    InvalidSvg,

    /// A gradient had an empty id.
    InvalidGradient,

    /// A processing limit was exceeded; see [`crate::limits`].
    LimitExceeded(&'static str),

    /// A transport-level error from the XML reader.
    Xml(quick_xml::Error),

    /// An I/O error while opening the input.
    Io(std::io::Error),
}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LoadingError::ParamMismatch(ref s) => write!(f, "parameter mismatch: {}", s),
            LoadingError::UnknownElement(ref name) => {
                write!(f, "cannot process svg element {}", name)
            }
            LoadingError::UnsupportedUse(ref s) => write!(f, "unsupported use element: {}", s),
            LoadingError::InvalidSvg => write!(f, "invalid svg"),
            LoadingError::InvalidGradient => write!(f, "gradient with empty id"),
            LoadingError::LimitExceeded(s) => write!(f, "limit exceeded: {}", s),
            LoadingError::Xml(ref e) => write!(f, "xml error: {}", e),
            LoadingError::Io(ref e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl error::Error for LoadingError {}

impl From<quick_xml::Error> for LoadingError {
    fn from(e: quick_xml::Error) -> LoadingError {
        LoadingError::Xml(e)
    }
}

impl From<std::io::Error> for LoadingError {
    fn from(e: std::io::Error) -> LoadingError {
        LoadingError::Io(e)
    }
}

impl From<ElementError> for LoadingError {
    fn from(e: ElementError) -> LoadingError {
        LoadingError::ParamMismatch(e.to_string())
    }
}

/// A loading error, together with whatever had been parsed before it.
///
/// Parse errors leave the partially-built [`SvgIcon`] available to the
/// caller alongside the error value.
#[derive(Debug)]
pub struct IconLoadError {
    pub error: LoadingError,
    pub partial_icon: Box<SvgIcon>,
}

impl fmt::Display for IconLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl error::Error for IconLoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotates_attribute_errors() {
        let res: Result<(), ValueErrorKind> = Err(ValueErrorKind::value_error("out of range"));
        let err = res.attribute("width").unwrap_err();
        assert_eq!(err.attr, "width");
        assert_eq!(err.to_string(), "width: invalid value: out of range");
    }

    #[test]
    fn element_error_becomes_param_mismatch() {
        let err = LoadingError::from(ElementError {
            attr: "points".to_string(),
            err: ValueErrorKind::parse_error("unexpected token"),
        });
        assert!(matches!(err, LoadingError::ParamMismatch(_)));
    }
}
