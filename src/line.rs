//! Line segment rasterization
//!
//! All rasterizers produce cells ordered along the dominant axis. Step and Wu
//! walk from the lower to the upper bound, DDA and Bresenham walk from the first
//! point to the second one.
use crate::{Cell, EPSILON, NoTrace, Point, Scalar, Tracer, cell_coord, trace_step, utils::clamp};
use std::fmt;

/// Available line rasterization algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineAlgorithm {
    /// Slope walk along the dominant axis
    Step,
    /// Digital differential analyzer
    Dda,
    /// Integer error term
    #[default]
    Bresenham,
    /// Anti-aliased, two cells per step
    Wu,
}

impl LineAlgorithm {
    pub fn name(&self) -> &'static str {
        self.rasterizer().name()
    }

    /// Rasterizer implementing this algorithm
    pub fn rasterizer(&self) -> &'static dyn LineRasterizer {
        match self {
            LineAlgorithm::Step => &StepRasterizer,
            LineAlgorithm::Dda => &DdaRasterizer,
            LineAlgorithm::Bresenham => &BresenhamRasterizer,
            LineAlgorithm::Wu => &WuRasterizer,
        }
    }
}

impl fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Algorithm that converts line segment into a sequence of cells
pub trait LineRasterizer {
    /// Name of the rasterizer
    fn name(&self) -> &'static str;

    /// Rasterize segment whose end points do not coincide
    fn rasterize_segment(&self, p0: Point, p1: Point, tracer: &mut dyn Tracer) -> Vec<Cell>;

    /// Cell produced for a zero length segment
    fn point_cell(&self, point: Point) -> Cell {
        point.to_cell()
    }

    /// Rasterize segment, zero length segments produce a single cell
    fn rasterize(&self, p0: Point, p1: Point, tracer: &mut dyn Tracer) -> Vec<Cell> {
        let Point([dx, dy]) = p1 - p0;
        if dx.abs() < EPSILON && dy.abs() < EPSILON {
            let cell = self.point_cell(p0);
            trace_step!(tracer, "zero length segment at {:?}: {:?}", p0, cell);
            return vec![cell];
        }
        self.rasterize_segment(p0, p1, tracer)
    }
}

/// Rasterize line segment with the selected algorithm
pub fn rasterize_line(
    p0: impl Into<Point>,
    p1: impl Into<Point>,
    algorithm: LineAlgorithm,
) -> Vec<Cell> {
    rasterize_line_traced(p0, p1, algorithm, &mut NoTrace)
}

/// Same as [`rasterize_line`] but reports every step to `tracer`
pub fn rasterize_line_traced(
    p0: impl Into<Point>,
    p1: impl Into<Point>,
    algorithm: LineAlgorithm,
    tracer: &mut dyn Tracer,
) -> Vec<Cell> {
    let (p0, p1) = (p0.into(), p1.into());
    tracing::debug_span!("[rasterize]", rasterizer = algorithm.name()).in_scope(|| {
        let cells = algorithm.rasterizer().rasterize(p0, p1, tracer);
        tracing::debug!(cells = cells.len(), "[rasterize] {:?} {:?}", p0, p1);
        cells
    })
}

// -----------------------------------------------------------------------------
// Step
// -----------------------------------------------------------------------------

/// Evaluates line equation at every integer coordinate of the dominant axis
#[derive(Debug, Clone, Copy, Default)]
pub struct StepRasterizer;

impl LineRasterizer for StepRasterizer {
    fn name(&self) -> &'static str {
        "step"
    }

    fn rasterize_segment(&self, p0: Point, p1: Point, tracer: &mut dyn Tracer) -> Vec<Cell> {
        let Point([x0, y0]) = p0;
        let Point([x1, y1]) = p1;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let steep = dy.abs() > dx.abs();
        // walk along `u` axis, `v` is computed from the line equation
        let (u0, v0, u1, slope) = if steep {
            (y0, x0, y1, dx / dy)
        } else {
            (x0, y0, x1, dy / dx)
        };
        let axis = if steep { "y" } else { "x" };
        trace_step!(tracer, "dominant axis {}, slope {:.3}", axis, slope);
        let start = cell_coord(u0.min(u1));
        let end = cell_coord(u0.max(u1));
        let mut cells = Vec::new();
        for u in start..=end {
            let v = v0 + slope * (u as Scalar - u0);
            let cell = if steep {
                Cell::new(cell_coord(v), u)
            } else {
                Cell::new(u, cell_coord(v))
            };
            trace_step!(tracer, "{} = {}: {:.3} -> {:?}", axis, u, v, cell);
            cells.push(cell);
        }
        cells
    }
}

// -----------------------------------------------------------------------------
// DDA
// -----------------------------------------------------------------------------

/// Accumulates constant per step increments in floating point
#[derive(Debug, Clone, Copy, Default)]
pub struct DdaRasterizer;

impl LineRasterizer for DdaRasterizer {
    fn name(&self) -> &'static str {
        "dda"
    }

    fn rasterize_segment(&self, p0: Point, p1: Point, tracer: &mut dyn Tracer) -> Vec<Cell> {
        let Point([dx, dy]) = p1 - p0;
        let steps = dx.abs().max(dy.abs()).round();
        if steps < 1.0 {
            let cell = p0.to_cell();
            trace_step!(tracer, "shorter than a cell: {:?}", cell);
            return vec![cell];
        }
        let inc = Point::new(dx / steps, dy / steps);
        trace_step!(tracer, "steps {}, increment {:?}", steps, inc);
        let steps = steps as usize;
        let mut cells = Vec::with_capacity(steps + 1);
        let mut point = p0;
        for step in 0..=steps {
            let cell = point.to_cell();
            trace_step!(tracer, "step {}: {:?} -> {:?}", step, point, cell);
            cells.push(cell);
            point = point + inc;
        }
        cells
    }
}

// -----------------------------------------------------------------------------
// Bresenham
// -----------------------------------------------------------------------------

/// Integer only incremental algorithm, end points are rounded to cells first
#[derive(Debug, Clone, Copy, Default)]
pub struct BresenhamRasterizer;

impl LineRasterizer for BresenhamRasterizer {
    fn name(&self) -> &'static str {
        "bresenham"
    }

    fn rasterize_segment(&self, p0: Point, p1: Point, tracer: &mut dyn Tracer) -> Vec<Cell> {
        let (x, y) = p0.to_cell().xy();
        let (x1, y1) = p1.to_cell().xy();
        let (mut x, mut y, x1, y1) = (x as i64, y as i64, x1 as i64, y1 as i64);
        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        trace_step!(tracer, "dx = {}, dy = {}, err = {}", dx, dy, err);

        let mut cells = Vec::with_capacity(dx.max(dy) as usize + 1);
        loop {
            let cell = Cell::new(x as i32, y as i32);
            cells.push(cell);
            if x == x1 && y == y1 {
                trace_step!(tracer, "{:?} end point reached", cell);
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
            trace_step!(tracer, "{:?} e2 = {}, err = {}", cell, e2, err);
        }
        cells
    }
}

// -----------------------------------------------------------------------------
// Wu
// -----------------------------------------------------------------------------

#[inline]
fn fpart(value: Scalar) -> Scalar {
    value - value.floor()
}

#[inline]
fn rfpart(value: Scalar) -> Scalar {
    1.0 - fpart(value)
}

/// Round halves up, as Wu's end point handling requires
#[inline]
fn round_half_up(value: Scalar) -> Scalar {
    (value + 0.5).floor()
}

/// Xiaolin Wu's anti-aliased line
///
/// Every step along the dominant axis produces two cells adjacent across the line,
/// with intensities `1 - frac` and `frac` of the ideal minor coordinate. End caps are
/// additionally weighted by the part of the end cell covered by the segment. Cells are
/// emitted from the lower to the upper bound of the dominant axis: first cap, interior,
/// last cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct WuRasterizer;

impl WuRasterizer {
    /// Plot pair of cells across the line at dominant coordinate `u`
    fn plot_pair(
        cells: &mut Vec<Cell>,
        steep: bool,
        u: Scalar,
        v: Scalar,
        weight: Scalar,
        tracer: &mut dyn Tracer,
    ) {
        let u = u as i32;
        let base = v.floor() as i32;
        let near = clamp(rfpart(v) * weight, 0.0, 1.0);
        let far = clamp(fpart(v) * weight, 0.0, 1.0);
        let (c0, c1) = if steep {
            (
                Cell::with_intensity(base, u, near),
                Cell::with_intensity(base + 1, u, far),
            )
        } else {
            (
                Cell::with_intensity(u, base, near),
                Cell::with_intensity(u, base + 1, far),
            )
        };
        let axis = if steep { "y" } else { "x" };
        trace_step!(tracer, "{} = {}: {:?} {:?}", axis, u, c0, c1);
        cells.push(c0);
        cells.push(c1);
    }
}

impl LineRasterizer for WuRasterizer {
    fn name(&self) -> &'static str {
        "wu"
    }

    fn point_cell(&self, point: Point) -> Cell {
        let (x, y) = point.to_cell().xy();
        Cell::with_intensity(x, y, 1.0)
    }

    fn rasterize_segment(&self, p0: Point, p1: Point, tracer: &mut dyn Tracer) -> Vec<Cell> {
        let Point([x0, y0]) = p0;
        let Point([x1, y1]) = p1;
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        // work in (u, v) space where `u` is the dominant axis
        let (mut u0, mut v0, mut u1, mut v1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if u0 > u1 {
            std::mem::swap(&mut u0, &mut u1);
            std::mem::swap(&mut v0, &mut v1);
        }
        let gradient = (v1 - v0) / (u1 - u0);
        trace_step!(
            tracer,
            "dominant axis {}, gradient {:.3}",
            if steep { "y" } else { "x" },
            gradient
        );

        let mut cells = Vec::new();

        let uend0 = round_half_up(u0);
        let vend0 = v0 + gradient * (uend0 - u0);
        let uend1 = round_half_up(u1);
        let vend1 = v1 + gradient * (uend1 - u1);
        if uend0 == uend1 {
            // both ends fall into the same step
            trace_step!(tracer, "single step covers {:.3}", u1 - u0);
            Self::plot_pair(&mut cells, steep, uend0, vend0, u1 - u0, tracer);
            return cells;
        }

        // first end cap
        let gap0 = rfpart(u0 + 0.5);
        trace_step!(tracer, "first cap covers {:.3}", gap0);
        Self::plot_pair(&mut cells, steep, uend0, vend0, gap0, tracer);

        // last end cap, emitted after the interior
        let gap1 = fpart(u1 + 0.5);

        let mut v = vend0 + gradient;
        let mut u = uend0 + 1.0;
        while u < uend1 {
            Self::plot_pair(&mut cells, steep, u, v, 1.0, tracer);
            v += gradient;
            u += 1.0;
        }

        trace_step!(tracer, "last cap covers {:.3}", gap1);
        Self::plot_pair(&mut cells, steep, uend1, vend1, gap1, tracer);
        cells
    }
}
