//! 26.6 fixed-point numbers.
//!
//! All coordinates that cross the [`Pather`] boundary use a 32-bit signed
//! fixed-point representation with 6 fractional bits: the value is the
//! integer divided by 64.  Conversion from floating point multiplies by 64
//! and truncates toward zero.
//!
//! [`Pather`]: crate::driver::Pather

use crate::rect::Rect;

/// A 26.6 fixed-point number.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    #[inline]
    pub fn from_f64(v: f64) -> Fixed {
        Fixed((v * 64.0) as i32)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 64.0
    }
}

/// A point in 26.6 fixed-point coordinates.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    /// Converts a point from user units.
    #[inline]
    pub fn new(x: f64, y: f64) -> FixedPoint {
        FixedPoint {
            x: Fixed::from_f64(x),
            y: Fixed::from_f64(y),
        }
    }

    /// Converts the point back to user units.
    #[inline]
    pub fn to_user(self) -> (f64, f64) {
        (self.x.to_f64(), self.y.to_f64())
    }
}

/// An axis-aligned extent in 26.6 fixed-point coordinates.
///
/// Drivers report the extent of the path they last received through
/// [`Pather::path_extent`]; the replay engine uses it to rebind
/// `objectBoundingBox` gradients.
///
/// [`Pather::path_extent`]: crate::driver::Pather::path_extent
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FixedRect {
    pub min: FixedPoint,
    pub max: FixedPoint,
}

impl FixedRect {
    /// Grows the extent to include `p`.
    pub fn include(&mut self, p: FixedPoint) {
        if p.x < self.min.x {
            self.min.x = p.x;
        }
        if p.y < self.min.y {
            self.min.y = p.y;
        }
        if p.x > self.max.x {
            self.max.x = p.x;
        }
        if p.y > self.max.y {
            self.max.y = p.y;
        }
    }

    /// Converts the extent to a user-unit rectangle.
    pub fn to_rect(self) -> Rect {
        let (x0, y0) = self.min.to_user();
        let (x1, y1) = self.max.to_user();
        Rect::new(x0, y0, x1, y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_and_from_f64() {
        assert_eq!(Fixed::from_f64(10.0), Fixed(640));
        assert_eq!(Fixed::from_f64(-10.0), Fixed(-640));
        assert_eq!(Fixed::from_f64(0.5), Fixed(32));
        assert_eq!(Fixed(640).to_f64(), 10.0);
        assert_eq!(Fixed(-96).to_f64(), -1.5);
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(Fixed::from_f64(0.01), Fixed(0));
        assert_eq!(Fixed::from_f64(-0.01), Fixed(0));
    }

    #[test]
    fn extent_includes_points() {
        let mut r = FixedRect {
            min: FixedPoint::new(1.0, 1.0),
            max: FixedPoint::new(1.0, 1.0),
        };
        r.include(FixedPoint::new(3.0, -2.0));
        assert_eq!(r.min, FixedPoint::new(1.0, -2.0));
        assert_eq!(r.max, FixedPoint::new(3.0, 1.0));
        assert_eq!(r.to_rect(), Rect::new(1.0, -2.0, 3.0, 1.0));
    }
}
