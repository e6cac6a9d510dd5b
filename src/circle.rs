//! Bresenham midpoint circle
use crate::{Cell, Circle, NoTrace, Point, Tracer, trace_step, utils::ArrayIter};

/// Midpoint circle rasterizer
///
/// Walks the octant from `(0, r)` towards the diagonal with the decision variable
/// `d = 3 - 2r` and emits all eight reflections of every visited point, skipping
/// reflections that coincide on the axes or on the diagonal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleRasterizer;

impl CircleRasterizer {
    pub fn name(&self) -> &'static str {
        "midpoint_circle"
    }

    /// Rasterize circle into a list of unique cells
    pub fn rasterize(&self, circle: Circle, tracer: &mut dyn Tracer) -> Vec<Cell> {
        CircleCells::new(circle, tracer).collect()
    }
}

/// Rasterize circle, radius zero produces the center cell
pub fn rasterize_circle(center: impl Into<Point>, radius: u32) -> Vec<Cell> {
    rasterize_circle_traced(center, radius, &mut NoTrace)
}

/// Same as [`rasterize_circle`] but reports every step to `tracer`
pub fn rasterize_circle_traced(
    center: impl Into<Point>,
    radius: u32,
    tracer: &mut dyn Tracer,
) -> Vec<Cell> {
    let circle = Circle::new(center, radius);
    let rasterizer = CircleRasterizer;
    tracing::debug_span!("[rasterize]", rasterizer = rasterizer.name())
        .in_scope(|| rasterizer.rasterize(circle, tracer))
}

impl Circle {
    /// Cells of the circle outline
    pub fn rasterize(&self) -> Vec<Cell> {
        rasterize_circle(self.center, self.radius)
    }

    /// Lazy iterator over the cells of the circle outline
    pub fn cells<'a>(&self, tracer: &'a mut dyn Tracer) -> CircleCells<'a> {
        CircleCells::new(*self, tracer)
    }
}

/// Iterator over cells of a circle, in octant emission order
pub struct CircleCells<'a> {
    cx: i64,
    cy: i64,
    x: i64,
    y: i64,
    d: i64,
    reflections: ArrayIter<[Option<Cell>; 8]>,
    tracer: &'a mut dyn Tracer,
}

impl<'a> CircleCells<'a> {
    pub fn new(circle: Circle, tracer: &'a mut dyn Tracer) -> Self {
        let (cx, cy) = circle.center.to_cell().xy();
        let r = circle.radius as i64;
        trace_step!(
            tracer,
            "center ({},{}), radius {}, d = {}",
            cx,
            cy,
            r,
            3 - 2 * r
        );
        Self {
            cx: cx as i64,
            cy: cy as i64,
            x: 0,
            y: r,
            d: 3 - 2 * r,
            reflections: ArrayIter::new(),
            tracer,
        }
    }

    /// Queue reflections of the current point and advance the decision variable
    fn step(&mut self) {
        let Self { cx, cy, x, y, .. } = *self;
        self.reflections = ArrayIter::new();
        for (dx, dy) in [
            (x, y),
            (-x, y),
            (x, -y),
            (-x, -y),
            (y, x),
            (-y, x),
            (y, -x),
            (-y, -x),
        ] {
            let cell = Cell::new((cx + dx) as i32, (cy + dy) as i32);
            self.reflections.push_unique(cell);
        }
        trace_step!(
            self.tracer,
            "x = {}, y = {}, d = {}: {:?}",
            x,
            y,
            self.d,
            self.reflections
        );
        if self.d > 0 {
            self.d += 4 * (x - y) + 10;
            self.y -= 1;
        } else {
            self.d += 4 * x + 6;
        }
        self.x += 1;
    }
}

impl Iterator for CircleCells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cell) = self.reflections.next() {
                return Some(cell);
            }
            if self.y < self.x {
                return None;
            }
            self.step();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.reflections.len(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_radius_five() {
        let cells = rasterize_circle((0.0, 0.0), 5);
        let xy: HashSet<_> = cells.iter().map(Cell::xy).collect();
        assert_eq!(xy.len(), cells.len());
        assert_eq!(cells.len(), 28);
        for axis in [(5, 0), (0, 5), (-5, 0), (0, -5)] {
            assert!(xy.contains(&axis), "{:?}", axis);
        }
        assert!(xy.contains(&(3, 4)) && xy.contains(&(-4, -3)));
        // octant emission order
        assert_eq!(cells[0].xy(), (0, 5));
        assert_eq!(cells[4].xy(), (1, 5));
    }

    #[test]
    fn test_radius_two() {
        let cells = rasterize_circle((0.0, 0.0), 2);
        let xy: Vec<_> = cells.iter().map(Cell::xy).collect();
        assert_eq!(
            xy,
            vec![
                (0, 2),
                (0, -2),
                (2, 0),
                (-2, 0),
                (1, 2),
                (-1, 2),
                (1, -2),
                (-1, -2),
                (2, 1),
                (-2, 1),
                (2, -1),
                (-2, -1),
            ]
        );
        assert_eq!(rasterize_circle((0.0, 0.0), 3).len(), 16);
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(rasterize_circle((3.0, -2.0), 0), vec![Cell::new(3, -2)]);
        let cells = rasterize_circle((0.0, 0.0), 1);
        let xy: Vec<_> = cells.iter().map(Cell::xy).collect();
        assert_eq!(xy, vec![(0, 1), (0, -1), (1, 0), (-1, 0)]);
    }

    #[test]
    fn test_distance() {
        for radius in [2, 3, 7, 11, 16, 50, 123] {
            let circle = Circle::new((10.0, -4.0), radius);
            let cells = circle.rasterize();
            let unique: HashSet<_> = cells.iter().map(Cell::xy).collect();
            assert_eq!(unique.len(), cells.len(), "radius {}", radius);
            for cell in cells {
                let dist = cell.center().dist(circle.center);
                assert!(
                    (dist - radius as f64).abs() <= 1.0,
                    "radius {} cell {:?}",
                    radius,
                    cell
                );
            }
        }
    }

    #[test]
    fn test_center_rounding() {
        let shifted = rasterize_circle((2.4, 2.6), 4);
        let exact = rasterize_circle((2.0, 3.0), 4);
        assert_eq!(shifted, exact);
    }

    #[test]
    fn test_trace() {
        let mut trace = Vec::new();
        let lazy: Vec<_> = Circle::new((0.0, 0.0), 5).cells(&mut trace).collect();
        assert_eq!(lazy, rasterize_circle((0.0, 0.0), 5));
        // initial state and one entry per octant step
        assert_eq!(trace.len(), 5);
        assert!(trace[1].starts_with("x = 0, y = 5, d = -7"));
    }
}
