//! A driver that records every call it receives, for asserting on the
//! exact replay sequence.

use std::cell::RefCell;
use std::rc::Rc;

use icondraw::{
    Driver, Filler, FixedPoint, FixedRect, Paint, Pather, StrokeOptions, Stroker,
};

/// Which sub-handle a call was issued on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Handle {
    Fill,
    Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Setup {
        will_fill: bool,
        will_stroke: bool,
    },
    Clear(Handle),
    Winding(bool),
    Start(Handle, FixedPoint),
    Line(Handle, FixedPoint),
    Quad(Handle, FixedPoint, FixedPoint),
    Cubic(Handle, FixedPoint, FixedPoint, FixedPoint),
    Stop(Handle, bool),
    SetColor(Handle, Paint, f64),
    SetStrokeOptions(StrokeOptions),
    Draw(Handle),
}

impl Call {
    /// The control points this call carries, if any.
    pub fn points(&self) -> Vec<FixedPoint> {
        match *self {
            Call::Start(_, p) | Call::Line(_, p) => vec![p],
            Call::Quad(_, b, c) => vec![b, c],
            Call::Cubic(_, b, c, d) => vec![b, c, d],
            _ => vec![],
        }
    }
}

#[derive(Default)]
pub struct RecordingDriver {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl RecordingDriver {
    pub fn new() -> RecordingDriver {
        RecordingDriver::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

pub struct RecordingPather {
    handle: Handle,
    calls: Rc<RefCell<Vec<Call>>>,
    extent: Option<FixedRect>,
}

impl RecordingPather {
    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn include(&mut self, p: FixedPoint) {
        match self.extent.as_mut() {
            Some(extent) => extent.include(p),
            None => {
                self.extent = Some(FixedRect { min: p, max: p });
            }
        }
    }
}

impl Pather for RecordingPather {
    fn clear(&mut self) {
        self.extent = None;
        self.push(Call::Clear(self.handle));
    }

    fn start(&mut self, p: FixedPoint) {
        self.include(p);
        self.push(Call::Start(self.handle, p));
    }

    fn line(&mut self, b: FixedPoint) {
        self.include(b);
        self.push(Call::Line(self.handle, b));
    }

    fn quad_bezier(&mut self, b: FixedPoint, c: FixedPoint) {
        self.include(b);
        self.include(c);
        self.push(Call::Quad(self.handle, b, c));
    }

    fn cube_bezier(&mut self, b: FixedPoint, c: FixedPoint, d: FixedPoint) {
        self.include(b);
        self.include(c);
        self.include(d);
        self.push(Call::Cubic(self.handle, b, c, d));
    }

    fn stop(&mut self, close_loop: bool) {
        self.push(Call::Stop(self.handle, close_loop));
    }

    fn set_color(&mut self, paint: &Paint, opacity: f64) {
        self.push(Call::SetColor(self.handle, paint.clone(), opacity));
    }

    fn path_extent(&self) -> FixedRect {
        self.extent.unwrap_or_default()
    }

    fn draw(&mut self) {
        self.push(Call::Draw(self.handle));
    }
}

impl Filler for RecordingPather {
    fn set_winding(&mut self, non_zero: bool) {
        self.push(Call::Winding(non_zero));
    }
}

impl Stroker for RecordingPather {
    fn set_stroke_options(&mut self, options: StrokeOptions) {
        self.push(Call::SetStrokeOptions(options));
    }
}

impl Driver for RecordingDriver {
    type Filler = RecordingPather;
    type Stroker = RecordingPather;

    fn setup_drawers(
        &mut self,
        will_fill: bool,
        will_stroke: bool,
    ) -> (Option<RecordingPather>, Option<RecordingPather>) {
        self.calls.borrow_mut().push(Call::Setup {
            will_fill,
            will_stroke,
        });

        let filler = will_fill.then(|| RecordingPather {
            handle: Handle::Fill,
            calls: Rc::clone(&self.calls),
            extent: None,
        });
        let stroker = will_stroke.then(|| RecordingPather {
            handle: Handle::Stroke,
            calls: Rc::clone(&self.calls),
            extent: None,
        });

        (filler, stroker)
    }
}
