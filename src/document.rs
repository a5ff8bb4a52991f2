//! The streaming SVG compiler.
//!
//! One top-to-bottom pass over the XML event stream reduces a document to
//! an [`SvgIcon`].  A cursor carries the style stack, the path builder and
//! the `<defs>`/gradient state; each recognized element has an entry in a
//! dispatch table keyed by its name.  Elements inside `<defs>` are not
//! reduced immediately: their start tags are recorded as [`Definition`]
//! fragments and replayed through the same dispatch table when a `<use>`
//! references them.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::color::{black, rgba_from_color};
use crate::dasharray::Dasharray;
use crate::error::*;
use crate::fixed::Fixed;
use crate::gradient::{GradStop, Gradient, GradientVariant};
use crate::icon_log;
use crate::length::{Both, Horizontal, Length, LengthUnit, Normalize, NormalizeParams, Vertical};
use crate::limits::MAX_USE_DEPTH;
use crate::number_list::{NumberList, NumberListLength};
use crate::paint::{Paint, PaintServer};
use crate::parsers::{parse_attribute, NumberOrPercentage};
use crate::path_builder::{MatrixAdder, Path, PathBuilder};
use crate::path_parser::PathParser;
use crate::session::Session;
use crate::shapes;
use crate::style::{apply_dasharray, PathStyle};
use crate::transform::{Transform, TransformAttribute};
use crate::viewbox::ViewBox;

/// What to do when the parser encounters an element it does not handle.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ErrorMode {
    /// Silently skip unrecognized elements.
    #[default]
    Ignore,
    /// Report unrecognized elements on the diagnostic channel, then skip.
    Warn,
    /// Abort parsing on the first unrecognized element.
    Strict,
}

/// A recorded start element from inside `<defs>`.
///
/// Definitions are stored as flat lists rather than trees; a `</g>` inside
/// defs is recorded as a sentinel entry with `tag == "endg"` so replay can
/// pop the matching style frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub id: String,
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

type AttributeList = Vec<(String, String)>;

/// A compiled path bound to the style that was in effect when it was
/// reduced.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub path: Path,
    pub style: PathStyle,
}

/// A parsed SVG document, reduced to paths and ready to draw.
///
/// Built by one pass over the XML stream, and immutable afterwards except
/// for the world transform set by [`SvgIcon::set_target`].
#[derive(Debug, Default)]
pub struct SvgIcon {
    pub view_box: ViewBox,

    /// `<title>` element contents, in document order.
    pub titles: Vec<String>,

    /// `<desc>` element contents, in document order.
    pub descriptions: Vec<String>,

    /// The compiled paths, in document order.
    pub paths: Vec<SvgPath>,

    /// World transform applied at replay time; see [`SvgIcon::set_target`].
    pub transform: Transform,

    grads: HashMap<String, Gradient>,
    defs: HashMap<String, Vec<Definition>>,
}

impl SvgIcon {
    /// Looks up a compiled gradient by id.
    pub fn gradient(&self, id: &str) -> Option<&Gradient> {
        self.grads.get(id)
    }

    /// Looks up a recorded `<defs>` fragment by id.
    pub fn definitions(&self, id: &str) -> Option<&[Definition]> {
        self.defs.get(id).map(|d| d.as_slice())
    }
}

/// Reads an icon from a stream of XML bytes.
///
/// Only a subset of SVG is supported, but it is enough to draw many icons.
/// `error_mode` determines whether the parser ignores, warns about, or
/// errors out on elements it does not handle.  On error, the value carries
/// whatever had been parsed up to that point.
pub fn read_icon_stream<R: BufRead>(
    stream: R,
    error_mode: ErrorMode,
) -> Result<SvgIcon, IconLoadError> {
    let mut cursor = IconCursor::new(error_mode, Session::new());

    let mut reader = Reader::from_reader(stream);
    reader.expand_empty_elements(true);

    let mut buf = Vec::new();
    let mut seen_element = false;

    loop {
        let step: Result<bool, LoadingError> = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                seen_element = true;
                cursor.start_element(e).map(|_| true)
            }

            Ok(Event::End(ref e)) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                cursor.end_element(&tag);
                Ok(true)
            }

            Ok(Event::Text(ref e)) => match e.unescape() {
                Ok(text) => {
                    cursor.char_data(&text);
                    Ok(true)
                }
                Err(err) => Err(err.into()),
            },

            Ok(Event::CData(e)) => {
                let bytes = e.into_inner();
                cursor.char_data(&String::from_utf8_lossy(&bytes));
                Ok(true)
            }

            Ok(Event::Eof) => Ok(false),

            Ok(_) => Ok(true),

            Err(err) => Err(err.into()),
        };

        match step {
            Ok(true) => buf.clear(),
            Ok(false) => break,
            Err(error) => return Err(cursor.into_error(error)),
        }
    }

    if !seen_element {
        return Err(cursor.into_error(LoadingError::InvalidSvg));
    }

    Ok(cursor.icon)
}

/// Reads an icon from a string; see [`read_icon_stream`].
pub fn read_icon_str(s: &str, error_mode: ErrorMode) -> Result<SvgIcon, IconLoadError> {
    read_icon_stream(s.as_bytes(), error_mode)
}

/// Reads an icon from the named file; see [`read_icon_stream`].
pub fn read_icon_path<P: AsRef<std::path::Path>>(
    path: P,
    error_mode: ErrorMode,
) -> Result<SvgIcon, IconLoadError> {
    match File::open(path) {
        Ok(file) => read_icon_stream(BufReader::new(file), error_mode),
        Err(err) => Err(IconLoadError {
            error: err.into(),
            partial_icon: Box::default(),
        }),
    }
}

/// Parse state threaded through the XML event loop.
struct IconCursor {
    icon: SvgIcon,
    session: Session,
    error_mode: ErrorMode,

    style_stack: Vec<PathStyle>,
    builder: PathBuilder,

    // Cursor offset installed for the duration of a <use> replay.
    cur_x: f64,
    cur_y: f64,
    use_depth: u32,

    in_title: bool,
    in_desc: bool,
    in_grad: bool,
    in_defs: bool,

    grad: Option<Gradient>,
    grad_id: Option<String>,
    current_def: Vec<Definition>,
}

type ElementFn = fn(&mut IconCursor, &AttributeList) -> Result<(), LoadingError>;

/// The dispatch table keyed by element name.
fn element_fn(tag: &str) -> Option<ElementFn> {
    Some(match tag {
        "svg" => IconCursor::svg_element,
        "g" => IconCursor::group_element,
        "line" => IconCursor::line_element,
        "stop" => IconCursor::stop_element,
        "rect" => IconCursor::rect_element,
        // the ellipse handler covers circles too
        "circle" | "ellipse" => IconCursor::ellipse_element,
        "polyline" => IconCursor::polyline_element,
        "polygon" => IconCursor::polygon_element,
        "path" => IconCursor::path_element,
        "desc" => IconCursor::desc_element,
        "defs" => IconCursor::defs_element,
        "title" => IconCursor::title_element,
        "linearGradient" => IconCursor::linear_gradient_element,
        "radialGradient" => IconCursor::radial_gradient_element,
        "use" => IconCursor::use_element,
        _ => return None,
    })
}

impl IconCursor {
    fn new(error_mode: ErrorMode, session: Session) -> IconCursor {
        IconCursor {
            icon: SvgIcon::default(),
            session,
            error_mode,
            style_stack: vec![PathStyle::default()],
            builder: PathBuilder::default(),
            cur_x: 0.0,
            cur_y: 0.0,
            use_depth: 0,
            in_title: false,
            in_desc: false,
            in_grad: false,
            in_defs: false,
            grad: None,
            grad_id: None,
            current_def: Vec::new(),
        }
    }

    fn into_error(self, error: LoadingError) -> IconLoadError {
        IconLoadError {
            error,
            partial_icon: Box::new(self.icon),
        }
    }

    // ---------------------------------------------------------------
    // event handling

    fn start_element(&mut self, e: &BytesStart<'_>) -> Result<(), LoadingError> {
        let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

        let mut attrs: AttributeList = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            attrs.push((key, value));
        }

        // Reads all recognized style attributes from the start element and
        // places the resulting frame on top of the style stack.
        self.push_style(&attrs)?;
        self.read_start_element(&tag, &attrs)
    }

    fn read_start_element(
        &mut self,
        tag: &str,
        attrs: &AttributeList,
    ) -> Result<(), LoadingError> {
        // Gradients keep their meaning inside <defs>; everything else is
        // recorded for later replay instead of being reduced now.
        let skip_def = tag == "radialGradient" || tag == "linearGradient" || self.in_grad;
        if self.in_defs && !skip_def {
            let id = find_attr(attrs, "id").unwrap_or("").to_string();
            if !id.is_empty() && !self.current_def.is_empty() {
                self.flush_current_def();
            }
            self.current_def.push(Definition {
                id,
                tag: tag.to_string(),
                attrs: attrs.clone(),
            });
            return Ok(());
        }

        match element_fn(tag) {
            Some(f) => f(self, attrs)?,
            None => return self.handle_unknown(tag),
        }

        if !self.builder.is_empty() {
            // The element reduced to a path; bind it to the current style.
            let builder = std::mem::take(&mut self.builder);
            let style = self.style_stack.last().unwrap().clone();
            self.icon.paths.push(SvgPath {
                path: builder.into_path(),
                style,
            });
        }

        Ok(())
    }

    fn end_element(&mut self, tag: &str) {
        self.style_stack.pop();

        match tag {
            "g" => {
                if self.in_defs {
                    self.current_def.push(Definition {
                        id: String::new(),
                        tag: "endg".to_string(),
                        attrs: Vec::new(),
                    });
                }
            }
            "title" => self.in_title = false,
            "desc" => self.in_desc = false,
            "defs" => {
                if !self.current_def.is_empty() {
                    self.flush_current_def();
                }
                self.in_defs = false;
            }
            "linearGradient" | "radialGradient" => {
                self.in_grad = false;
                if let Some(grad) = self.grad.take() {
                    if let Some(id) = self.grad_id.take() {
                        self.icon.grads.insert(id, grad);
                    }
                }
            }
            _ => (),
        }
    }

    fn char_data(&mut self, text: &str) {
        if self.in_title {
            if let Some(last) = self.icon.titles.last_mut() {
                last.push_str(text);
            }
        }
        if self.in_desc {
            if let Some(last) = self.icon.descriptions.last_mut() {
                last.push_str(text);
            }
        }
    }

    fn handle_unknown(&mut self, tag: &str) -> Result<(), LoadingError> {
        match self.error_mode {
            ErrorMode::Strict => Err(LoadingError::UnknownElement(tag.to_string())),
            ErrorMode::Warn => {
                self.session
                    .warn(&format!("cannot process svg element {}", tag));
                Ok(())
            }
            ErrorMode::Ignore => Ok(()),
        }
    }

    fn flush_current_def(&mut self) {
        let key = self.current_def[0].id.clone();
        let block = std::mem::take(&mut self.current_def);
        self.icon.defs.insert(key, block);
    }

    // ---------------------------------------------------------------
    // style cascade

    /// Copies the top style frame, applies the element's recognized style
    /// attributes to the copy, and pushes it.
    ///
    /// Attributes may appear directly or packed in a `style="k:v;..."`
    /// attribute; keys are matched case-insensitively and unknown keys are
    /// silently ignored.
    fn push_style(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        for (k, v) in attrs {
            if k.eq_ignore_ascii_case("style") {
                for decl in v.split(';') {
                    if let Some((dk, dv)) = decl.split_once(':') {
                        pairs.push((dk.trim().to_ascii_lowercase(), dv.trim().to_string()));
                    }
                }
            } else {
                pairs.push((k.to_ascii_lowercase(), v.trim().to_string()));
            }
        }

        let mut cur_style = self.style_stack.last().unwrap().clone();
        for (k, v) in &pairs {
            self.read_style_attr(&mut cur_style, k, v)?;
        }
        self.style_stack.push(cur_style);

        Ok(())
    }

    fn read_style_attr(
        &self,
        style: &mut PathStyle,
        k: &str,
        v: &str,
    ) -> Result<(), LoadingError> {
        match k {
            "fill" => {
                let paint = self.resolve_paint(k, v, &style.fill_paint)?;
                style.fill_paint = paint;
            }
            "stroke" => {
                let paint = self.resolve_paint(k, v, &style.stroke_paint)?;
                style.stroke_paint = paint;
            }
            "stroke-linejoin" => {
                // unrecognized values are ignored, not errors
                if let Ok(join) = parse_attribute(k, v) {
                    style.join.line_join = join;
                }
            }
            "stroke-linecap" => {
                if let Ok(cap) = parse_attribute(k, v) {
                    style.join.trail_cap = cap;
                }
            }
            "stroke-leadlinecap" => {
                if let Ok(cap) = parse_attribute(k, v) {
                    style.join.lead_cap = cap;
                }
            }
            "stroke-linegap" => {
                if let Ok(gap) = parse_attribute(k, v) {
                    style.join.line_gap = gap;
                }
            }
            "stroke-miterlimit" => {
                style.join.miter_limit = Fixed::from_f64(parse_attribute::<f64>(k, v)?);
            }
            "stroke-width" => {
                style.stroke_width = parse_attribute::<f64>(k, v)?;
            }
            "stroke-dashoffset" => {
                style.dash.offset = parse_attribute::<f64>(k, v)?;
            }
            "stroke-dasharray" => {
                let dasharray: Dasharray = parse_attribute(k, v)?;
                apply_dasharray(&mut style.dash, &dasharray);
            }
            "opacity" | "fill-opacity" | "stroke-opacity" => {
                let op = parse_attribute::<f64>(k, v)?;
                if k != "stroke-opacity" {
                    style.fill_opacity *= op;
                }
                if k != "fill-opacity" {
                    style.stroke_opacity *= op;
                }
            }
            "transform" => {
                style.transform = self.parse_transform(v)?;
            }
            _ => (),
        }
        Ok(())
    }

    /// Parses a transform list and composes it onto the inherited
    /// transform of the current style frame.
    fn parse_transform(&self, value: &str) -> Result<Transform, LoadingError> {
        let list = parse_attribute::<TransformAttribute>("transform", value)?.to_transform();
        let parent = self.style_stack.last().unwrap().transform;
        Ok(parent.pre_transform(&list))
    }

    /// Resolves a `fill` or `stroke` value into a [`Paint`].
    ///
    /// `url(#id)` references take a value copy of the gradient, stamping
    /// the current paint's effective color into color-less stops; an
    /// unresolvable reference falls back to opaque black.
    fn resolve_paint(
        &self,
        attr: &str,
        value: &str,
        current: &Paint,
    ) -> Result<Paint, LoadingError> {
        let server: PaintServer = parse_attribute(attr, value)?;

        Ok(match server {
            PaintServer::None => Paint::None,

            PaintServer::SolidColor(color) => {
                Paint::Color(rgba_from_color(color).attribute(attr)?)
            }

            PaintServer::Iri(iri) => {
                match iri.strip_prefix('#').and_then(|id| self.icon.grads.get(id)) {
                    Some(grad) => Paint::Gradient(grad.resolve_current_color(current)),
                    None => {
                        icon_log!(
                            self.session,
                            "could not resolve paint server {:?}; using black",
                            iri
                        );
                        Paint::Color(black())
                    }
                }
            }
        })
    }

    // ---------------------------------------------------------------
    // unit helpers

    fn normalize_params(&self) -> NormalizeParams {
        NormalizeParams::new(self.icon.view_box)
    }

    fn parse_unit<N: Normalize>(&self, attr: &str, value: &str) -> Result<f64, LoadingError> {
        let length: Length<N> = parse_attribute(attr, value)?;
        Ok(length.to_user(&self.normalize_params()))
    }

    // The top-level width/height attributes resolve units, but a
    // percentage has no outer reference here and keeps its raw number.
    fn parse_svg_size<N: Normalize>(&self, attr: &str, value: &str) -> Result<f64, LoadingError> {
        let length: Length<N> = parse_attribute(attr, value)?;
        Ok(match length.unit {
            LengthUnit::Percent => length.length * 100.0,
            _ => length.to_user(&self.normalize_params()),
        })
    }

    fn fraction(&self, attr: &str, value: &str) -> Result<f64, LoadingError> {
        let n: NumberOrPercentage = parse_attribute(attr, value)?;
        Ok(n.value)
    }

    /// The path sink every reducer emits through; carries the `<use>`
    /// cursor offset.
    fn adder(builder: &mut PathBuilder, cur_x: f64, cur_y: f64) -> MatrixAdder<'_> {
        MatrixAdder::new(Transform::new_translate(cur_x, cur_y), builder)
    }

    // ---------------------------------------------------------------
    // element handlers

    fn svg_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        self.icon.view_box = ViewBox::default();
        let mut width = 0.0;
        let mut height = 0.0;

        for (k, v) in attrs {
            match k.as_str() {
                "viewBox" => self.icon.view_box = parse_attribute(k, v)?,
                "width" => width = self.parse_svg_size::<Horizontal>(k, v)?,
                "height" => height = self.parse_svg_size::<Vertical>(k, v)?,
                _ => (),
            }
        }

        // width/height are the fallback viewport for documents without a
        // usable viewBox
        if self.icon.view_box.width() == 0.0 {
            self.icon.view_box.0.x1 = self.icon.view_box.0.x0 + width;
        }
        if self.icon.view_box.height() == 0.0 {
            self.icon.view_box.0.y1 = self.icon.view_box.0.y0 + height;
        }

        Ok(())
    }

    // g does nothing but push the style
    fn group_element(&mut self, _attrs: &AttributeList) -> Result<(), LoadingError> {
        Ok(())
    }

    fn rect_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        let mut x = 0.0;
        let mut y = 0.0;
        let mut w = 0.0;
        let mut h = 0.0;
        let mut rx = 0.0;
        let mut ry = 0.0;

        for (k, v) in attrs {
            match k.as_str() {
                "x" => x = self.parse_unit::<Horizontal>(k, v)?,
                "y" => y = self.parse_unit::<Vertical>(k, v)?,
                "width" => w = self.parse_unit::<Horizontal>(k, v)?,
                "height" => h = self.parse_unit::<Vertical>(k, v)?,
                "rx" => rx = self.parse_unit::<Horizontal>(k, v)?,
                "ry" => ry = self.parse_unit::<Vertical>(k, v)?,
                _ => (),
            }
        }

        // not drawn, but not an error
        if w == 0.0 || h == 0.0 {
            return Ok(());
        }

        let mut adder = Self::adder(&mut self.builder, self.cur_x, self.cur_y);
        shapes::add_rect(&mut adder, x, y, w, h, rx, ry);
        Ok(())
    }

    fn ellipse_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut rx = 0.0;
        let mut ry = 0.0;

        for (k, v) in attrs {
            match k.as_str() {
                "cx" => cx = self.parse_unit::<Horizontal>(k, v)?,
                "cy" => cy = self.parse_unit::<Vertical>(k, v)?,
                "r" => {
                    rx = self.parse_unit::<Both>(k, v)?;
                    ry = rx;
                }
                "rx" => rx = self.parse_unit::<Horizontal>(k, v)?,
                "ry" => ry = self.parse_unit::<Vertical>(k, v)?,
                _ => (),
            }
        }

        // not drawn, but not an error
        if rx == 0.0 || ry == 0.0 {
            return Ok(());
        }

        let mut adder = Self::adder(&mut self.builder, self.cur_x, self.cur_y);
        shapes::add_ellipse(&mut adder, cx, cy, rx, ry);
        Ok(())
    }

    fn line_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        let mut x1 = 0.0;
        let mut y1 = 0.0;
        let mut x2 = 0.0;
        let mut y2 = 0.0;

        for (k, v) in attrs {
            match k.as_str() {
                "x1" => x1 = self.parse_unit::<Horizontal>(k, v)?,
                "y1" => y1 = self.parse_unit::<Vertical>(k, v)?,
                "x2" => x2 = self.parse_unit::<Horizontal>(k, v)?,
                "y2" => y2 = self.parse_unit::<Vertical>(k, v)?,
                _ => (),
            }
        }

        let mut adder = Self::adder(&mut self.builder, self.cur_x, self.cur_y);
        shapes::add_line(&mut adder, x1, y1, x2, y2);
        Ok(())
    }

    fn polyline_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        self.poly_element(attrs, false)
    }

    fn polygon_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        self.poly_element(attrs, true)
    }

    fn poly_element(&mut self, attrs: &AttributeList, close: bool) -> Result<(), LoadingError> {
        let mut points = Vec::new();

        for (k, v) in attrs {
            if k == "points" {
                let NumberList(list) = NumberList::parse_str(v, NumberListLength::Unbounded)
                    .map_err(|e| ElementError {
                        attr: "points".to_string(),
                        err: ValueErrorKind::from(e),
                    })?;
                if list.len() % 2 != 0 {
                    return Err(LoadingError::ParamMismatch(
                        "polygon has odd number of points".to_string(),
                    ));
                }
                points = list;
            }
        }

        let mut adder = Self::adder(&mut self.builder, self.cur_x, self.cur_y);
        shapes::add_poly(&mut adder, &points, close);
        Ok(())
    }

    fn path_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        for (k, v) in attrs {
            if k == "d" {
                let mut adder = Self::adder(&mut self.builder, self.cur_x, self.cur_y);
                let mut parser = PathParser::new(&mut adder, v);
                parser
                    .parse()
                    .map_err(|e| LoadingError::ParamMismatch(format!("path data: {}", e)))?;
            }
        }
        Ok(())
    }

    fn desc_element(&mut self, _attrs: &AttributeList) -> Result<(), LoadingError> {
        self.in_desc = true;
        self.icon.descriptions.push(String::new());
        Ok(())
    }

    fn title_element(&mut self, _attrs: &AttributeList) -> Result<(), LoadingError> {
        self.in_title = true;
        self.icon.titles.push(String::new());
        Ok(())
    }

    fn defs_element(&mut self, _attrs: &AttributeList) -> Result<(), LoadingError> {
        self.in_defs = true;
        Ok(())
    }

    // ---------------------------------------------------------------
    // gradients

    fn linear_gradient_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        self.in_grad = true;

        let mut direction = [0.0, 0.0, 1.0, 0.0];
        let mut grad = self.new_gradient(GradientVariant::Linear {
            x1: direction[0],
            y1: direction[1],
            x2: direction[2],
            y2: direction[3],
        });

        for (k, v) in attrs {
            match k.as_str() {
                "id" => self.set_gradient_id(v)?,
                "x1" => direction[0] = self.fraction(k, v)?,
                "y1" => direction[1] = self.fraction(k, v)?,
                "x2" => direction[2] = self.fraction(k, v)?,
                "y2" => direction[3] = self.fraction(k, v)?,
                _ => self.read_grad_attr(&mut grad, k, v)?,
            }
        }

        grad.variant = GradientVariant::Linear {
            x1: direction[0],
            y1: direction[1],
            x2: direction[2],
            y2: direction[3],
        };
        self.grad = Some(grad);
        Ok(())
    }

    fn radial_gradient_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        self.in_grad = true;

        let mut direction = [0.5, 0.5, 0.5, 0.5, 0.5, 0.5];
        let mut grad = self.new_gradient(GradientVariant::Radial {
            cx: direction[0],
            cy: direction[1],
            fx: direction[2],
            fy: direction[3],
            r: direction[4],
            fr: direction[5],
        });

        let mut set_fx = false;
        let mut set_fy = false;

        for (k, v) in attrs {
            match k.as_str() {
                "id" => self.set_gradient_id(v)?,
                "cx" => direction[0] = self.fraction(k, v)?,
                "cy" => direction[1] = self.fraction(k, v)?,
                "fx" => {
                    set_fx = true;
                    direction[2] = self.fraction(k, v)?;
                }
                "fy" => {
                    set_fy = true;
                    direction[3] = self.fraction(k, v)?;
                }
                "r" => direction[4] = self.fraction(k, v)?,
                "fr" => direction[5] = self.fraction(k, v)?,
                _ => self.read_grad_attr(&mut grad, k, v)?,
            }
        }

        // the focal point follows the center unless given explicitly
        if !set_fx {
            direction[2] = direction[0];
        }
        if !set_fy {
            direction[3] = direction[1];
        }

        grad.variant = GradientVariant::Radial {
            cx: direction[0],
            cy: direction[1],
            fx: direction[2],
            fy: direction[3],
            r: direction[4],
            fr: direction[5],
        };
        self.grad = Some(grad);
        Ok(())
    }

    fn new_gradient(&self, variant: GradientVariant) -> Gradient {
        Gradient {
            variant,
            stops: Vec::new(),
            bounds: self.icon.view_box.0,
            transform: Transform::identity(),
            spread: Default::default(),
            units: Default::default(),
        }
    }

    fn set_gradient_id(&mut self, id: &str) -> Result<(), LoadingError> {
        if id.is_empty() {
            return Err(LoadingError::InvalidGradient);
        }
        self.grad_id = Some(id.to_string());
        Ok(())
    }

    fn read_grad_attr(
        &self,
        grad: &mut Gradient,
        k: &str,
        v: &str,
    ) -> Result<(), LoadingError> {
        match k {
            "gradientTransform" => grad.transform = self.parse_transform(v)?,
            "gradientUnits" => {
                if let Ok(units) = parse_attribute(k, v.trim()) {
                    grad.units = units;
                }
            }
            "spreadMethod" => {
                if let Ok(spread) = parse_attribute(k, v.trim()) {
                    grad.spread = spread;
                }
            }
            _ => (),
        }
        Ok(())
    }

    fn stop_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        if !self.in_grad {
            return Ok(());
        }

        let mut stop = GradStop {
            offset: 0.0,
            opacity: 1.0,
            color: None,
        };

        for (k, v) in attrs {
            match k.as_str() {
                "offset" => stop.offset = self.fraction(k, v)?,
                "stop-color" => {
                    // absent and "none" stop colors inherit the current
                    // color at URL-resolution time
                    if v.trim() != "none" {
                        let color = parse_attribute(k, v)?;
                        stop.color = Some(rgba_from_color(color).attribute(k)?);
                    }
                }
                "stop-opacity" => stop.opacity = parse_attribute(k, v)?,
                _ => (),
            }
        }

        if let Some(grad) = self.grad.as_mut() {
            grad.stops.push(stop);
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // <use> replay

    fn use_element(&mut self, attrs: &AttributeList) -> Result<(), LoadingError> {
        let mut href = "";
        let mut x = 0.0;
        let mut y = 0.0;

        for (k, v) in attrs {
            match k.as_str() {
                "href" => href = v.as_str(),
                "x" => x = self.parse_unit::<Horizontal>(k, v)?,
                "y" => y = self.parse_unit::<Vertical>(k, v)?,
                _ => (),
            }
        }

        if href.is_empty() {
            return Err(LoadingError::UnsupportedUse(
                "only use tags with href are supported".to_string(),
            ));
        }
        let id = href.strip_prefix('#').ok_or_else(|| {
            LoadingError::UnsupportedUse("only the ID CSS selector is supported".to_string())
        })?;
        let defs = self
            .icon
            .defs
            .get(id)
            .cloned()
            .ok_or_else(|| {
                LoadingError::UnsupportedUse(
                    "href ID in use statement was not found in saved defs".to_string(),
                )
            })?;

        if self.use_depth >= MAX_USE_DEPTH {
            return Err(LoadingError::LimitExceeded("maximum use depth"));
        }
        self.use_depth += 1;

        self.cur_x = x;
        self.cur_y = y;
        let result = self.replay_definitions(&defs);
        self.cur_x = 0.0;
        self.cur_y = 0.0;

        self.use_depth -= 1;
        result
    }

    /// Replays recorded definitions through the dispatch table as if they
    /// had appeared inline.
    ///
    /// The style stack is popped after every non-`g` definition; `g`
    /// relies on its recorded `endg` sentinel instead.
    fn replay_definitions(&mut self, defs: &[Definition]) -> Result<(), LoadingError> {
        for def in defs {
            if def.tag == "endg" {
                self.style_stack.pop();
                continue;
            }

            self.push_style(&def.attrs)?;

            match element_fn(&def.tag) {
                Some(f) => f(self, &def.attrs)?,
                None => {
                    self.style_stack.pop();
                    return self.handle_unknown(&def.tag);
                }
            }

            if def.tag != "g" {
                self.style_stack.pop();
            }
        }
        Ok(())
    }
}

fn find_attr<'a>(attrs: &'a AttributeList, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_table_covers_the_element_subset() {
        for tag in [
            "svg", "g", "line", "stop", "rect", "circle", "ellipse", "polyline", "polygon",
            "path", "desc", "defs", "title", "linearGradient", "radialGradient", "use",
        ] {
            assert!(element_fn(tag).is_some(), "missing handler for {}", tag);
        }

        assert!(element_fn("text").is_none());
        assert!(element_fn("filter").is_none());
    }

    #[test]
    fn no_start_element_is_invalid_svg() {
        let err = read_icon_str("dummy", ErrorMode::Strict).unwrap_err();
        assert!(matches!(err.error, LoadingError::InvalidSvg));
    }

    #[test]
    fn empty_input_is_invalid_svg() {
        let err = read_icon_str("", ErrorMode::Ignore).unwrap_err();
        assert!(matches!(err.error, LoadingError::InvalidSvg));
    }

    #[test]
    fn partial_icon_survives_errors() {
        // the rect parses before the bad path aborts the load
        let err = read_icon_str(
            r#"<svg viewBox="0 0 10 10">
                 <rect width="10" height="10"/>
                 <path d="M0 0 L"/>
               </svg>"#,
            ErrorMode::Ignore,
        )
        .unwrap_err();

        assert!(matches!(err.error, LoadingError::ParamMismatch(_)));
        assert_eq!(err.partial_icon.paths.len(), 1);
    }

    #[test]
    fn style_stack_is_balanced_after_parse() {
        // indirectly observable: a parse of nested groups succeeds and a
        // second document parses identically
        let doc = r##"<svg viewBox="0 0 10 10">
                       <g><g fill="#112233"><rect width="5" height="5"/></g></g>
                     </svg>"##;
        let a = read_icon_str(doc, ErrorMode::Strict).unwrap();
        let b = read_icon_str(doc, ErrorMode::Strict).unwrap();
        assert_eq!(a.paths, b.paths);
    }
}
