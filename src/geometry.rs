use crate::{Error, parse::Parser};
use std::{
    fmt,
    ops::{Add, Div, Mul, Sub},
    str::FromStr,
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;

/// Format floats in a compact way suitable for a step trace
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Round scalar to the nearest cell coordinate (halves are rounded away from zero)
#[inline]
pub fn cell_coord(value: Scalar) -> i32 {
    value.round() as i32
}

// -----------------------------------------------------------------------------
// Point
// -----------------------------------------------------------------------------

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        write!(f, "(")?;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        write!(f, ")")
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` compenent of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Get length of the vector (distance from the origin)
    pub fn length(self) -> Scalar {
        let Self([x, y]) = self;
        x.hypot(y)
    }

    /// Distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Dot product between two vectors
    pub fn dot(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * x1 + y0 * y1
    }

    /// Cross product between two vectors
    pub fn cross(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * y1 - y0 * x1
    }

    /// Vector rotated by 90 degrees counter-clockwise (not a unit sized)
    ///
    /// For an edge of a counter-clockwise polygon this is the inward normal.
    pub fn normal(self) -> Point {
        let Self([x, y]) = self;
        Self([-y, x])
    }

    /// Both components are finite numbers
    pub fn is_finite(self) -> bool {
        let Self([x, y]) = self;
        x.is_finite() && y.is_finite()
    }

    /// Determine if self is close to the other within the marging of error (EPSILON)
    pub fn is_close_to(self, other: Point) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < EPSILON && (y0 - y1).abs() < EPSILON
    }

    /// Cell containing this point after rounding
    pub fn to_cell(self) -> Cell {
        Cell::new(cell_coord(self.x()), cell_coord(self.y()))
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(xy: (i32, i32)) -> Self {
        Self([xy.0 as Scalar, xy.1 as Scalar])
    }
}

impl FromStr for Point {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(text);
        let point = parser.parse_point()?;
        parser.parse_end()?;
        Ok(point)
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Div<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: Scalar) -> Self::Output {
        let Point([x, y]) = self;
        Point([x / rhs, y / rhs])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

// -----------------------------------------------------------------------------
// Segment
// -----------------------------------------------------------------------------

/// Directed line segment, parametrized as `p1 + t * (p2 - p1)` with `t` in `0.0..=1.0`
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment(pub [Point; 2]);

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Segment([p0, p1]) = self;
        write!(f, "Segment {:?} {:?}", p0, p1)
    }
}

impl Segment {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }

    /// Start and end points of the segment
    pub fn points(&self) -> [Point; 2] {
        self.0
    }

    /// Point at `t == 0.0`
    pub fn start(&self) -> Point {
        self.0[0]
    }

    /// Point at `t == 1.0`
    pub fn end(&self) -> Point {
        self.0[1]
    }

    /// Length of the segment
    pub fn length(&self) -> Scalar {
        let Self([p0, p1]) = self;
        p0.dist(*p1)
    }

    /// Direction vector associated with the segment
    pub fn direction(&self) -> Point {
        self.end() - self.start()
    }

    /// Evaluate segment at parameter value `t`
    pub fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1]) = self;
        (1.0 - t) * *p0 + t * *p1
    }

    /// Point halfway between start and end
    pub fn midpoint(&self) -> Point {
        let Self([p0, p1]) = *self;
        (p0 + p1) / 2.0
    }

    /// Split the segment at its midpoint
    pub fn split(&self) -> (Self, Self) {
        let Self([p0, p1]) = *self;
        let mid = self.midpoint();
        (Self([p0, mid]), Self([mid, p1]))
    }

    /// Create sub-segment starting at parameter value `a` and ending at value `b`
    pub fn cut(&self, a: Scalar, b: Scalar) -> Self {
        Self([self.at(a), self.at(b)])
    }

    /// Identical segment but directed from end to start
    pub fn reverse(&self) -> Self {
        let Self([p0, p1]) = *self;
        Self([p1, p0])
    }

    /// Start and end coincide
    pub fn is_degenerate(&self) -> bool {
        let Self([p0, p1]) = *self;
        p0.is_close_to(p1)
    }
}

impl FromStr for Segment {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(text);
        let segment = parser.parse_segment()?;
        parser.parse_end()?;
        Ok(segment)
    }
}

// -----------------------------------------------------------------------------
// Circle
// -----------------------------------------------------------------------------

/// Circle with an integer radius
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center: Point,
    pub radius: u32,
}

impl Circle {
    pub fn new(center: impl Into<Point>, radius: u32) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }
}

// -----------------------------------------------------------------------------
// Cell
// -----------------------------------------------------------------------------

/// Discrete grid cell produced by the rasterizers
///
/// `intensity` is only set by the anti-aliased rasterizer, `None` means full coverage.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub intensity: Option<Scalar>,
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)?;
        if let Some(intensity) = self.intensity {
            write!(f, "@{:.3}", intensity)?;
        }
        Ok(())
    }
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            intensity: None,
        }
    }

    /// Cell with partial coverage
    #[inline]
    pub const fn with_intensity(x: i32, y: i32, intensity: Scalar) -> Self {
        Self {
            x,
            y,
            intensity: Some(intensity),
        }
    }

    /// Coverage of the cell, `1.0` when not set
    pub fn coverage(&self) -> Scalar {
        self.intensity.unwrap_or(1.0)
    }

    /// Coordinates of the cell
    pub fn xy(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Center of the cell as a point
    pub fn center(&self) -> Point {
        Point::new(self.x as Scalar, self.y as Scalar)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_point_ops() {
        let p0 = Point::new(1.0, 2.0);
        let p1 = Point::new(3.0, -1.0);
        assert_eq!(p0 + p1, Point::new(4.0, 1.0));
        assert_eq!(p1 - p0, Point::new(2.0, -3.0));
        assert_approx_eq!(p0.dot(p1), 1.0);
        assert_approx_eq!(p0.cross(p1), -7.0);
        assert_eq!(Point::new(1.0, 0.0).normal(), Point::new(0.0, 1.0));
        assert_eq!(Point::new(2.4, -2.6).to_cell(), Cell::new(2, -3));
    }

    #[test]
    fn test_segment() {
        let segment = Segment::new((0.0, 0.0), (4.0, 2.0));
        assert_eq!(segment.midpoint(), Point::new(2.0, 1.0));
        let (s0, s1) = segment.split();
        assert_eq!(s0.end(), s1.start());
        assert_eq!(segment.cut(0.25, 0.75), Segment::new((1.0, 0.5), (3.0, 1.5)));
        assert_eq!(segment.reverse().start(), segment.end());
        assert_approx_eq!(Segment::new((0.0, 0.0), (3.0, 4.0)).length(), 5.0);
        assert!(Segment::new((1.0, 1.0), (1.0, 1.0)).is_degenerate());
    }

    #[test]
    fn test_parse() -> Result<(), Error> {
        assert_eq!("1.5 -2".parse::<Point>()?, Point::new(1.5, -2.0));
        assert_eq!(
            " -10 -10  20,20 ".parse::<Segment>()?,
            Segment::new((-10.0, -10.0), (20.0, 20.0))
        );
        assert!("1 2 3".parse::<Point>().is_err());
        Ok(())
    }

    #[test]
    fn test_debug_format() {
        let segment = Segment::new((0.5, 1.0), (2.0, 3.25));
        assert_eq!(format!("{:?}", segment), "Segment (0.5,1) (2,3.25)");
        assert_eq!(format!("{:?}", Cell::with_intensity(1, 2, 0.25)), "(1,2)@0.250");
    }
}
