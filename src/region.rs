//! Clip regions and point classification
use crate::{
    Error, Point, Scalar, Segment,
    parse::{Parser, parse_points},
};
use std::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign},
    str::FromStr,
};

// -----------------------------------------------------------------------------
// Outcode
// -----------------------------------------------------------------------------

/// Region code of a point relative to a rectangle
///
/// ```text
///        |        |
///  1001  |  1000  | 1010
///        |        |
/// -------+--------+-------- ymax
///        |        |
///  0001  |  0000  | 0010
///        |        |
/// -------+--------+-------- ymin
///        |        |
///  0101  |  0100  | 0110
///        |        |
///       xmin     xmax
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcode(u8);

impl Outcode {
    pub const INSIDE: Outcode = Outcode(0);
    pub const LEFT: Outcode = Outcode(1);
    pub const RIGHT: Outcode = Outcode(2);
    pub const BOTTOM: Outcode = Outcode(4);
    pub const TOP: Outcode = Outcode(8);

    /// Boundaries in the order they are resolved by the outcode clipper
    pub const PRIORITY: [Outcode; 4] = [Self::TOP, Self::BOTTOM, Self::RIGHT, Self::LEFT];

    /// Raw bit mask
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    /// All bits of `other` are set in self
    pub fn contains(self, other: Outcode) -> bool {
        self.0 & other.0 == other.0 && !other.is_inside()
    }

    /// Both codes share at least one outside half-plane
    pub fn shares_side(self, other: Outcode) -> bool {
        self.0 & other.0 != 0
    }

    fn name(self) -> &'static str {
        match self {
            Self::LEFT => "LEFT",
            Self::RIGHT => "RIGHT",
            Self::BOTTOM => "BOTTOM",
            Self::TOP => "TOP",
            _ => "INSIDE",
        }
    }
}

impl BitOr for Outcode {
    type Output = Outcode;

    fn bitor(self, other: Outcode) -> Self::Output {
        Outcode(self.0 | other.0)
    }
}

impl BitOrAssign for Outcode {
    fn bitor_assign(&mut self, other: Outcode) {
        self.0 |= other.0;
    }
}

impl BitAnd for Outcode {
    type Output = Outcode;

    fn bitand(self, other: Outcode) -> Self::Output {
        Outcode(self.0 & other.0)
    }
}

impl fmt::Debug for Outcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

impl fmt::Display for Outcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inside() {
            return write!(f, "{}", Self::INSIDE.name());
        }
        let mut first = true;
        for side in [Self::LEFT, Self::RIGHT, Self::BOTTOM, Self::TOP] {
            if self.contains(side) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", side.name())?;
                first = false;
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Rectangle
// -----------------------------------------------------------------------------

/// Axis aligned rectangle with `xmin <= xmax` and `ymin <= ymax`
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RectBounds", into = "RectBounds"))]
pub struct Rect {
    /// Point with minimal x and y values
    min: Point,
    /// Point with maximum x and y values
    max: Point,
}

impl Rect {
    /// Construct rectangle from its bounds, inverted bounds are rejected
    pub fn new(xmin: Scalar, ymin: Scalar, xmax: Scalar, ymax: Scalar) -> Result<Self, Error> {
        if ![xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite()) {
            return Err(Error::NonFinite);
        }
        if xmin > xmax || ymin > ymax {
            return Err(Error::InvalidRect {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            min: Point::new(xmin, ymin),
            max: Point::new(xmax, ymax),
        })
    }

    /// Smallest rectangle containing both points
    pub fn from_corners(p0: impl Into<Point>, p1: impl Into<Point>) -> Result<Self, Error> {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        Self::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// Point with minmum values of x and y coordianetes
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// Point with maximum values of x and y coordianetes
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    #[inline]
    pub fn xmin(&self) -> Scalar {
        self.min.x()
    }

    #[inline]
    pub fn ymin(&self) -> Scalar {
        self.min.y()
    }

    #[inline]
    pub fn xmax(&self) -> Scalar {
        self.max.x()
    }

    #[inline]
    pub fn ymax(&self) -> Scalar {
        self.max.y()
    }

    /// Determine if the point is inside of the rectangle (boundary included)
    pub fn contains(&self, point: Point) -> bool {
        self.outcode(point).is_inside()
    }

    /// Classify point against the rectangle, points on the boundary are inside
    pub fn outcode(&self, point: Point) -> Outcode {
        let Point([x, y]) = point;
        let mut code = Outcode::INSIDE;
        if x < self.min.x() {
            code |= Outcode::LEFT;
        }
        if x > self.max.x() {
            code |= Outcode::RIGHT;
        }
        if y < self.min.y() {
            code |= Outcode::BOTTOM;
        }
        if y > self.max.y() {
            code |= Outcode::TOP;
        }
        code
    }

    /// Corners in counter-clockwise order starting from `min`
    pub fn corners(&self) -> [Point; 4] {
        let Point([x0, y0]) = self.min;
        let Point([x1, y1]) = self.max;
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    /// Same rectangle as a convex polygon, `None` if it has zero area
    pub fn to_polygon(&self) -> Option<ConvexPolygon> {
        ConvexPolygon::new(self.corners()).ok()
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect {:?} {:?}", self.min, self.max)
    }
}

/// Parse `xmin ymin xmax ymax`
impl FromStr for Rect {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(text);
        let min = parser.parse_point()?;
        let max = parser.parse_point()?;
        parser.parse_end()?;
        Rect::new(min.x(), min.y(), max.x(), max.y())
    }
}

/// Serialized form of [`Rect`]
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RectBounds {
    xmin: Scalar,
    ymin: Scalar,
    xmax: Scalar,
    ymax: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<RectBounds> for Rect {
    type Error = Error;

    fn try_from(bounds: RectBounds) -> Result<Self, Self::Error> {
        Rect::new(bounds.xmin, bounds.ymin, bounds.xmax, bounds.ymax)
    }
}

#[cfg(feature = "serde")]
impl From<Rect> for RectBounds {
    fn from(rect: Rect) -> Self {
        Self {
            xmin: rect.xmin(),
            ymin: rect.ymin(),
            xmax: rect.xmax(),
            ymax: rect.ymax(),
        }
    }
}

// -----------------------------------------------------------------------------
// Convex polygon
// -----------------------------------------------------------------------------

/// Convex polygon with vertices stored in counter-clockwise order
///
/// Counter-clockwise here means positive signed area in a coordinate system
/// with `y` axis pointing up. Vertices provided in clockwise order are reversed
/// on construction, so that rotating any edge by 90 degrees counter-clockwise
/// gives its inward normal.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Point>", into = "Vec<Point>"))]
pub struct ConvexPolygon {
    vertices: Vec<Point>,
}

impl ConvexPolygon {
    /// Validate vertices and normalize their winding
    pub fn new(vertices: impl IntoIterator<Item = impl Into<Point>>) -> Result<Self, Error> {
        let mut vertices: Vec<Point> = vertices.into_iter().map(Into::into).collect();
        if vertices.len() < 3 {
            return Err(Error::TooFewVertices(vertices.len()));
        }
        if !vertices.iter().all(|p| p.is_finite()) {
            return Err(Error::NonFinite);
        }
        let count = vertices.len();
        let mut sign = 0.0;
        for index in 0..count {
            let a = vertices[index];
            let b = vertices[(index + 1) % count];
            let c = vertices[(index + 2) % count];
            let cross = (b - a).cross(c - b);
            // collinear vertices do not change direction
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return Err(Error::NonConvexPolygon((index + 1) % count));
            }
        }
        // turning consistently is not enough, star shaped polygons wind more than once
        let area = signed_area(&vertices);
        if sign == 0.0 || area == 0.0 {
            return Err(Error::DegeneratePolygon);
        }
        if area.signum() != sign {
            return Err(Error::NonConvexPolygon(0));
        }
        let turning: Scalar = (0..count)
            .map(|index| {
                let a = vertices[index];
                let b = vertices[(index + 1) % count];
                let c = vertices[(index + 2) % count];
                let (e0, e1) = (b - a, c - b);
                e0.cross(e1).atan2(e0.dot(e1))
            })
            .sum();
        if turning.abs() > 2.0 * std::f64::consts::PI + 1e-6 {
            return Err(Error::NonConvexPolygon(0));
        }
        if area < 0.0 {
            vertices.reverse();
        }
        Ok(Self { vertices })
    }

    /// Vertices in counter-clockwise order
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Iterator over edges, last edge connects last vertex with the first one
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let count = self.vertices.len();
        (0..count).map(move |index| {
            Segment::new(self.vertices[index], self.vertices[(index + 1) % count])
        })
    }

    /// Area of the polygon (always positive)
    pub fn area(&self) -> Scalar {
        signed_area(&self.vertices)
    }

    /// Determine if the point is inside of the polygon (boundary included)
    pub fn contains(&self, point: Point) -> bool {
        self.edges()
            .all(|edge| edge.direction().cross(point - edge.start()) >= 0.0)
    }
}

impl fmt::Debug for ConvexPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConvexPolygon")?;
        for vertex in self.vertices.iter() {
            write!(f, " {:?}", vertex)?;
        }
        Ok(())
    }
}

/// Parse flat list of `x y` vertex coordinates
impl FromStr for ConvexPolygon {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        ConvexPolygon::new(parse_points(text)?)
    }
}

impl TryFrom<Vec<Point>> for ConvexPolygon {
    type Error = Error;

    fn try_from(vertices: Vec<Point>) -> Result<Self, Self::Error> {
        ConvexPolygon::new(vertices)
    }
}

impl From<ConvexPolygon> for Vec<Point> {
    fn from(polygon: ConvexPolygon) -> Self {
        polygon.vertices
    }
}

/// Shoelace formula
fn signed_area(vertices: &[Point]) -> Scalar {
    let count = vertices.len();
    let sum: Scalar = (0..count)
        .map(|index| vertices[index].cross(vertices[(index + 1) % count]))
        .sum();
    sum / 2.0
}

// -----------------------------------------------------------------------------
// Clip region
// -----------------------------------------------------------------------------

/// Region segments can be clipped against
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClipRegion {
    Rectangle(Rect),
    ConvexPolygon(ConvexPolygon),
}

impl ClipRegion {
    /// Determine if the point is inside of the region (boundary included)
    pub fn contains(&self, point: Point) -> bool {
        match self {
            ClipRegion::Rectangle(rect) => rect.contains(point),
            ClipRegion::ConvexPolygon(polygon) => polygon.contains(point),
        }
    }
}

impl From<Rect> for ClipRegion {
    fn from(rect: Rect) -> Self {
        Self::Rectangle(rect)
    }
}

impl From<ConvexPolygon> for ClipRegion {
    fn from(polygon: ConvexPolygon) -> Self {
        Self::ConvexPolygon(polygon)
    }
}
