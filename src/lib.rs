//! Compile SVG icons into a path model, then replay them through any backend.
//!
//! This crate parses a subset of SVG 1.1/2.0 suited to icon rendering.  A
//! document is consumed in one streaming pass and reduced to an [`SvgIcon`]:
//! an ordered list of ([`Path`], [`PathStyle`]) pairs in which every shape
//! (`<rect>`, `<circle>`, `<path>`, ...) has already been lowered to move /
//! line / quadratic / cubic / close operations, and every style attribute has
//! already been cascaded down from its ancestors.
//!
//! The compiled icon is then replayed through the [`Driver`] trait, which a
//! rasterizer, a PDF writer, or a GPU tessellator can implement without any
//! SVG knowledge: transformation matrices are applied to every control point
//! before it reaches the driver.
//!
//! ```no_run
//! use icondraw::{read_icon_str, ErrorMode};
//!
//! let mut icon = read_icon_str(
//!     r#"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="10"/></svg>"#,
//!     ErrorMode::Ignore,
//! )?;
//! icon.set_target(0.0, 0.0, 128.0, 128.0);
//! // icon.draw(&mut my_driver, 1.0);
//! # Ok::<(), icondraw::IconLoadError>(())
//! ```
//!
//! Out of scope: text layout, filters, masks and clip paths, CSS selectors
//! other than `#id`, scripting, and animation.

#![allow(clippy::too_many_arguments)]

pub mod angle;
pub mod color;
pub mod coord_units;
pub mod dasharray;
pub mod document;
pub mod draw;
pub mod driver;
pub mod error;
pub mod fixed;
pub mod gradient;
pub mod length;
pub mod limits;
#[macro_use]
pub mod log;
pub mod number_list;
pub mod paint;
#[macro_use]
pub mod parsers;
pub mod path_builder;
pub mod path_parser;
pub mod rect;
pub mod session;
pub mod shapes;
pub mod style;
pub mod transform;
pub mod viewbox;

pub use crate::coord_units::CoordUnits;
pub use crate::document::{
    read_icon_path, read_icon_stream, read_icon_str, Definition, ErrorMode, SvgIcon, SvgPath,
};
pub use crate::driver::{
    DashOptions, Driver, Filler, JoinOptions, LineCap, LineGap, LineJoin, Pather, StrokeOptions,
    Stroker,
};
pub use crate::error::{IconLoadError, LoadingError};
pub use crate::fixed::{Fixed, FixedPoint, FixedRect};
pub use crate::gradient::{GradStop, Gradient, GradientVariant, SpreadMethod};
pub use crate::paint::Paint;
pub use crate::path_builder::{Path, PathBuilder, PathOp};
pub use crate::rect::Rect;
pub use crate::session::Session;
pub use crate::style::PathStyle;
pub use crate::transform::Transform;
pub use crate::viewbox::ViewBox;
