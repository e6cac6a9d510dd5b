//! Line segment clipping against rectangles and convex polygons
use crate::{
    Cell, ClipRegion, ConvexPolygon, EPSILON, LineAlgorithm, NoTrace, Outcode, Point, Rect,
    Scalar, Segment, Tracer, rasterize_line_traced, trace_step,
};
use std::fmt;

/// Ceiling on the number of boundary intersections computed by [`OutcodeClipper`]
pub const OUTCODE_MAX_ITERATIONS: usize = 16;

/// Default recursion depth bound of [`MidpointClipper`]
///
/// Segments spanning less than `2^MIDPOINT_MAX_DEPTH` units are always resolved.
pub const MIDPOINT_MAX_DEPTH: usize = 16;

/// Default threshold below which [`ParametricClipper`] treats segment as parallel to an edge
pub const PARALLEL_EPSILON: Scalar = 1e-10;

/// Available segment clipping algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClipAlgorithm {
    /// Outcode based clipping (Cohen-Sutherland, Castle-Pitway)
    #[default]
    Outcode,
    /// Recursive midpoint subdivision
    Midpoint,
    /// Parametric half-plane clipping (Cyrus-Beck)
    Parametric,
}

impl ClipAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            ClipAlgorithm::Outcode => "outcode",
            ClipAlgorithm::Midpoint => "midpoint",
            ClipAlgorithm::Parametric => "parametric",
        }
    }

    fn clipper(&self) -> Box<dyn RectClipper> {
        match self {
            ClipAlgorithm::Outcode => Box::new(OutcodeClipper),
            ClipAlgorithm::Midpoint => Box::new(MidpointClipper::default()),
            ClipAlgorithm::Parametric => Box::new(ParametricClipper::default()),
        }
    }
}

impl fmt::Display for ClipAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Algorithm that clips segments against an axis aligned rectangle
pub trait RectClipper {
    /// Name of the clipper
    fn name(&self) -> &str;

    /// Part of the segment inside of the rectangle, direction of the segment is preserved
    fn clip_rect(&self, segment: Segment, rect: &Rect, tracer: &mut dyn Tracer)
    -> Option<Segment>;
}

/// Clip segment against rectangle with the selected algorithm
pub fn clip_rectangle(segment: Segment, rect: &Rect, algorithm: ClipAlgorithm) -> Option<Segment> {
    clip_rectangle_traced(segment, rect, algorithm, &mut NoTrace)
}

/// Same as [`clip_rectangle`] but reports every step to `tracer`
pub fn clip_rectangle_traced(
    segment: Segment,
    rect: &Rect,
    algorithm: ClipAlgorithm,
    tracer: &mut dyn Tracer,
) -> Option<Segment> {
    tracing::debug_span!("[clip]", algorithm = algorithm.name())
        .in_scope(|| algorithm.clipper().clip_rect(segment, rect, tracer))
}

/// Clip segment against convex polygon
pub fn clip_convex(segment: Segment, polygon: &ConvexPolygon) -> Option<Segment> {
    clip_convex_traced(segment, polygon, &mut NoTrace)
}

/// Same as [`clip_convex`] but reports every step to `tracer`
pub fn clip_convex_traced(
    segment: Segment,
    polygon: &ConvexPolygon,
    tracer: &mut dyn Tracer,
) -> Option<Segment> {
    tracing::debug_span!("[clip]", algorithm = ClipAlgorithm::Parametric.name())
        .in_scope(|| ParametricClipper::default().clip(segment, polygon, tracer))
}

impl ClipRegion {
    /// Clip segment against this region
    ///
    /// `algorithm` selects the rectangle clipper, polygons are always clipped
    /// with the parametric algorithm.
    pub fn clip(&self, segment: Segment, algorithm: ClipAlgorithm) -> Option<Segment> {
        self.clip_traced(segment, algorithm, &mut NoTrace)
    }

    /// Same as [`ClipRegion::clip`] but reports every step to `tracer`
    pub fn clip_traced(
        &self,
        segment: Segment,
        algorithm: ClipAlgorithm,
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        match self {
            ClipRegion::Rectangle(rect) => clip_rectangle_traced(segment, rect, algorithm, tracer),
            ClipRegion::ConvexPolygon(polygon) => clip_convex_traced(segment, polygon, tracer),
        }
    }

    /// Clip each segment independently, results are in the same order as the input
    pub fn clip_all(
        &self,
        segments: impl IntoIterator<Item = Segment>,
        algorithm: ClipAlgorithm,
    ) -> Vec<Option<Segment>> {
        segments
            .into_iter()
            .map(|segment| self.clip(segment, algorithm))
            .collect()
    }

    /// Clip segment and rasterize its visible part, returns both
    pub fn clip_and_rasterize(
        &self,
        segment: Segment,
        clip: ClipAlgorithm,
        line: LineAlgorithm,
        tracer: &mut dyn Tracer,
    ) -> (Option<Segment>, Vec<Cell>) {
        let visible = self.clip_traced(segment, clip, tracer);
        let cells = match visible {
            Some(visible) => rasterize_line_traced(visible.start(), visible.end(), line, tracer),
            None => Vec::new(),
        };
        (visible, cells)
    }
}

/// Clip segment against the region and rasterize the visible part
///
/// Empty if the segment is not visible.
pub fn clip_and_rasterize(
    segment: Segment,
    region: &ClipRegion,
    clip: ClipAlgorithm,
    line: LineAlgorithm,
    tracer: &mut dyn Tracer,
) -> Vec<Cell> {
    let (_, cells) = region.clip_and_rasterize(segment, clip, line, tracer);
    cells
}

// -----------------------------------------------------------------------------
// Outcode clipper
// -----------------------------------------------------------------------------

/// Outcode clipper
///
/// Trivially accepts segments with both ends inside, trivially rejects segments with
/// both ends on the same outer side, otherwise moves an outside end point to the
/// boundary it violates (in `TOP`, `BOTTOM`, `RIGHT`, `LEFT` order) and repeats.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutcodeClipper;

impl RectClipper for OutcodeClipper {
    fn name(&self) -> &str {
        "outcode"
    }

    fn clip_rect(
        &self,
        segment: Segment,
        rect: &Rect,
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        let Segment([mut p0, mut p1]) = segment;
        let mut c0 = rect.outcode(p0);
        let mut c1 = rect.outcode(p1);
        trace_step!(tracer, "window {:?}", rect);
        trace_step!(tracer, "P1 {:?} code {}", p0, c0);
        trace_step!(tracer, "P2 {:?} code {}", p1, c1);

        for _ in 0..OUTCODE_MAX_ITERATIONS {
            if c0.is_inside() && c1.is_inside() {
                trace_step!(tracer, "both ends inside: accept {:?} {:?}", p0, p1);
                return Some(Segment([p0, p1]));
            }
            if c0.shares_side(c1) {
                trace_step!(tracer, "both ends share {} side: reject", c0 & c1);
                return None;
            }
            let first = !c0.is_inside();
            let (code, from, to) = if first { (c0, p0, p1) } else { (c1, p1, p0) };
            let (side, point) = match boundary_intersection(rect, code, from, to) {
                Some(found) => found,
                None => {
                    trace_step!(tracer, "no boundary of {} can be intersected: reject", code);
                    return None;
                }
            };
            if first {
                trace_step!(tracer, "intersect {}: P1 {:?} -> {:?}", side, p0, point);
                p0 = point;
                c0 = rect.outcode(p0);
            } else {
                trace_step!(tracer, "intersect {}: P2 {:?} -> {:?}", side, p1, point);
                p1 = point;
                c1 = rect.outcode(p1);
            }
        }
        tracing::debug!(
            "[clip] outcode clipper exceeded {} iterations",
            OUTCODE_MAX_ITERATIONS
        );
        trace_step!(tracer, "iteration limit reached: reject");
        None
    }
}

/// Intersection of the line through `from` and `to` with the highest priority boundary
/// violated by `code`
///
/// Boundaries parallel to the line are skipped.
fn boundary_intersection(
    rect: &Rect,
    code: Outcode,
    from: Point,
    to: Point,
) -> Option<(Outcode, Point)> {
    let Point([x0, y0]) = from;
    let Point([x1, y1]) = to;
    let (dx, dy) = (x1 - x0, y1 - y0);
    Outcode::PRIORITY
        .into_iter()
        .filter(|side| code.contains(*side))
        .find_map(|side| {
            if side == Outcode::TOP || side == Outcode::BOTTOM {
                if dy.abs() < EPSILON {
                    return None;
                }
                let y = if side == Outcode::TOP {
                    rect.ymax()
                } else {
                    rect.ymin()
                };
                Some((side, Point::new(x0 + dx * (y - y0) / dy, y)))
            } else {
                if dx.abs() < EPSILON {
                    return None;
                }
                let x = if side == Outcode::RIGHT {
                    rect.xmax()
                } else {
                    rect.xmin()
                };
                Some((side, Point::new(x, y0 + dy * (x - x0) / dx)))
            }
        })
}

// -----------------------------------------------------------------------------
// Midpoint clipper
// -----------------------------------------------------------------------------

/// Midpoint subdivision clipper
///
/// Segments that can not be trivially accepted or rejected are split in half and
/// both halves are clipped recursively. Once a piece spans less than one unit along
/// both axes it is resolved by classifying its midpoint. Branches deeper than
/// `max_depth` are treated as not visible.
#[derive(Debug, Clone, Copy)]
pub struct MidpointClipper {
    max_depth: usize,
}

impl Default for MidpointClipper {
    fn default() -> Self {
        Self {
            max_depth: MIDPOINT_MAX_DEPTH,
        }
    }
}

impl MidpointClipper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change recursion depth bound
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn subdivide(
        &self,
        segment: Segment,
        rect: &Rect,
        depth: usize,
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        if depth > self.max_depth {
            tracing::debug!("[clip] midpoint clipper reached depth {}", depth);
            trace_step!(tracer, "depth {}: recursion limit reached", depth);
            return None;
        }
        let Segment([p0, p1]) = segment;
        let c0 = rect.outcode(p0);
        let c1 = rect.outcode(p1);
        trace_step!(
            tracer,
            "depth {}: P1 {:?} code {}, P2 {:?} code {}",
            depth,
            p0,
            c0,
            p1,
            c1
        );
        if c0.is_inside() && c1.is_inside() {
            trace_step!(tracer, "depth {}: both ends inside: accept", depth);
            return Some(segment);
        }
        if c0.shares_side(c1) {
            trace_step!(tracer, "depth {}: both ends share {} side: reject", depth, c0 & c1);
            return None;
        }

        let mid = segment.midpoint();
        let Point([dx, dy]) = segment.direction();
        if dx.abs() < 1.0 && dy.abs() < 1.0 {
            let inside = rect.contains(mid);
            trace_step!(
                tracer,
                "depth {}: collapsed to {:?}, {}",
                depth,
                mid,
                if inside { "inside" } else { "outside" }
            );
            return inside.then_some(Segment([mid, mid]));
        }

        trace_step!(tracer, "depth {}: split at {:?}", depth, mid);
        let (left, right) = segment.split();
        let left = self.subdivide(left, rect, depth + 1, tracer);
        let right = self.subdivide(right, rect, depth + 1, tracer);
        match (left, right) {
            (Some(left), Some(right)) => Some(Segment([left.start(), right.end()])),
            (left, right) => left.or(right),
        }
    }
}

impl RectClipper for MidpointClipper {
    fn name(&self) -> &str {
        "midpoint"
    }

    fn clip_rect(
        &self,
        segment: Segment,
        rect: &Rect,
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        trace_step!(tracer, "window {:?}", rect);
        let result = self.subdivide(segment, rect, 0, tracer);
        match result {
            Some(Segment([p0, p1])) => trace_step!(tracer, "visible {:?} {:?}", p0, p1),
            None => trace_step!(tracer, "not visible"),
        }
        result
    }
}

// -----------------------------------------------------------------------------
// Parametric clipper
// -----------------------------------------------------------------------------

/// Parametric (Cyrus-Beck) clipper
///
/// Segment `p1 + t * D` is intersected with the inner half-plane of every edge
/// of a counter-clockwise convex polygon, narrowing the visible `[t_enter, t_leave]`
/// interval which starts as `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ParametricClipper {
    epsilon: Scalar,
}

impl Default for ParametricClipper {
    fn default() -> Self {
        Self {
            epsilon: PARALLEL_EPSILON,
        }
    }
}

impl ParametricClipper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change threshold used to detect segments parallel to an edge
    pub fn with_epsilon(self, epsilon: Scalar) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    /// Clip segment against convex polygon
    pub fn clip(
        &self,
        segment: Segment,
        polygon: &ConvexPolygon,
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        self.clip_vertices(segment, polygon.vertices(), tracer)
    }

    /// `vertices` must describe a counter-clockwise convex polygon
    fn clip_vertices(
        &self,
        segment: Segment,
        vertices: &[Point],
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        let origin = segment.start();
        let dir = segment.direction();
        trace_step!(tracer, "segment {:?} {:?}, D {:?}", origin, segment.end(), dir);

        let mut t_enter: Scalar = 0.0;
        let mut t_leave: Scalar = 1.0;
        let count = vertices.len();
        for index in 0..count {
            let a = vertices[index];
            let b = vertices[(index + 1) % count];
            let normal = (b - a).normal();
            let dn = dir.dot(normal);
            let wn = (origin - a).dot(normal);
            trace_step!(
                tracer,
                "edge {} {:?} {:?}: N {:?}, D.N = {:.3}, W.N = {:.3}",
                index,
                a,
                b,
                normal,
                dn,
                wn
            );
            if dn.abs() > self.epsilon {
                let t = -wn / dn;
                if dn > 0.0 {
                    if t > t_enter {
                        t_enter = t;
                        trace_step!(tracer, "entering at t = {:.3}", t);
                    }
                } else if t < t_leave {
                    t_leave = t;
                    trace_step!(tracer, "leaving at t = {:.3}", t);
                }
            } else if wn < 0.0 {
                trace_step!(tracer, "parallel to edge {} and outside: reject", index);
                return None;
            }
        }

        Self::visible(segment, t_enter, t_leave, tracer)
    }

    /// Cut segment to `[t_enter, t_leave]`, empty interval rejects it
    fn visible(
        segment: Segment,
        t_enter: Scalar,
        t_leave: Scalar,
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        if t_enter <= t_leave {
            let visible = segment.cut(t_enter, t_leave);
            trace_step!(
                tracer,
                "visible t = [{:.3}, {:.3}]: {:?} {:?}",
                t_enter,
                t_leave,
                visible.start(),
                visible.end()
            );
            Some(visible)
        } else {
            trace_step!(tracer, "t_enter {:.3} > t_leave {:.3}: reject", t_enter, t_leave);
            None
        }
    }
}

impl RectClipper for ParametricClipper {
    fn name(&self) -> &str {
        "parametric"
    }

    fn clip_rect(
        &self,
        segment: Segment,
        rect: &Rect,
        tracer: &mut dyn Tracer,
    ) -> Option<Segment> {
        // axis aligned form, point inside iff `t * p <= q` for every boundary
        let origin = segment.start();
        let dir = segment.direction();
        trace_step!(tracer, "segment {:?} {:?}, D {:?}", origin, segment.end(), dir);
        let boundaries = [
            (Outcode::LEFT, -dir.x(), origin.x() - rect.xmin()),
            (Outcode::RIGHT, dir.x(), rect.xmax() - origin.x()),
            (Outcode::BOTTOM, -dir.y(), origin.y() - rect.ymin()),
            (Outcode::TOP, dir.y(), rect.ymax() - origin.y()),
        ];

        let mut t_enter: Scalar = 0.0;
        let mut t_leave: Scalar = 1.0;
        for (side, p, q) in boundaries {
            trace_step!(tracer, "{}: p = {:.3}, q = {:.3}", side, p, q);
            if p.abs() > self.epsilon {
                let t = q / p;
                if p < 0.0 {
                    if t > t_enter {
                        t_enter = t;
                        trace_step!(tracer, "entering at t = {:.3}", t);
                    }
                } else if t < t_leave {
                    t_leave = t;
                    trace_step!(tracer, "leaving at t = {:.3}", t);
                }
            } else if q < 0.0 {
                trace_step!(tracer, "parallel to {} and outside: reject", side);
                return None;
            }
        }
        Self::visible(segment, t_enter, t_leave, tracer)
    }
}
