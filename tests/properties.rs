use proptest::prelude::*;
use rasterclip::*;
use std::collections::HashSet;

const ALL_RECT_CLIPPERS: [ClipAlgorithm; 3] = [
    ClipAlgorithm::Outcode,
    ClipAlgorithm::Midpoint,
    ClipAlgorithm::Parametric,
];

fn window() -> Rect {
    Rect::new(0.0, 0.0, 10.0, 10.0).expect("valid window")
}

fn max_coord_diff(s0: Segment, s1: Segment) -> Scalar {
    s0.points()
        .iter()
        .zip(s1.points().iter())
        .map(|(p0, p1)| (p0.x() - p1.x()).abs().max((p0.y() - p1.y()).abs()))
        .fold(0.0, Scalar::max)
}

fn coord() -> impl Strategy<Value = Scalar> {
    -50.0..60.0f64
}

fn segment() -> impl Strategy<Value = Segment> {
    (coord(), coord(), coord(), coord())
        .prop_map(|(x0, y0, x1, y1)| Segment::new((x0, y0), (x1, y1)))
}

fn inside_segment() -> impl Strategy<Value = Segment> {
    (0.0..=10.0f64, 0.0..=10.0f64, 0.0..=10.0f64, 0.0..=10.0f64)
        .prop_map(|(x0, y0, x1, y1)| Segment::new((x0, y0), (x1, y1)))
}

fn cell_point() -> impl Strategy<Value = (i32, i32)> {
    (-100..100i32, -100..100i32)
}

/// Regular polygon with random number of vertices, size and rotation
fn regular_polygon() -> impl Strategy<Value = ConvexPolygon> {
    (3..9usize, 1.0..20.0f64, 0.0..std::f64::consts::TAU).prop_map(|(count, radius, phase)| {
        let vertices: Vec<_> = (0..count)
            .map(|index| {
                let angle = phase + index as Scalar * std::f64::consts::TAU / count as Scalar;
                (5.0 + radius * angle.cos(), 5.0 + radius * angle.sin())
            })
            .collect();
        ConvexPolygon::new(vertices).expect("regular polygon is convex")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_inside_segments_unchanged(segment in inside_segment()) {
        let window = window();
        prop_assert_eq!(clip_rectangle(segment, &window, ClipAlgorithm::Outcode), Some(segment));
        prop_assert_eq!(clip_rectangle(segment, &window, ClipAlgorithm::Midpoint), Some(segment));
        let parametric = clip_rectangle(segment, &window, ClipAlgorithm::Parametric);
        prop_assert!(parametric.is_some());
        prop_assert!(max_coord_diff(parametric.unwrap(), segment) < 1e-9);
    }

    #[test]
    fn prop_same_side_rejected(
        x0 in -50.0..-0.001f64,
        x1 in -50.0..-0.001f64,
        y0 in coord(),
        y1 in coord(),
        side in 0..4usize,
    ) {
        // build segment left of the window and rotate it around the window center
        let rotate = |x: Scalar, y: Scalar| {
            let (dx, dy) = (x - 5.0, y - 5.0);
            match side {
                0 => (x, y),
                1 => (5.0 - dy, 5.0 + dx),
                2 => (5.0 - dx, 5.0 - dy),
                _ => (5.0 + dy, 5.0 - dx),
            }
        };
        let segment = Segment::new(rotate(x0, y0), rotate(x1, y1));
        for algorithm in ALL_RECT_CLIPPERS {
            prop_assert_eq!(clip_rectangle(segment, &window(), algorithm), None);
        }
    }

    #[test]
    fn prop_outcode_and_midpoint_agree(segment in segment()) {
        let window = window();
        let outcode = clip_rectangle(segment, &window, ClipAlgorithm::Outcode);
        let midpoint = clip_rectangle(segment, &window, ClipAlgorithm::Midpoint);
        match (outcode, midpoint) {
            (Some(outcode), Some(midpoint)) => {
                prop_assert!(
                    max_coord_diff(outcode, midpoint) <= 1.0 + 1e-9,
                    "{:?} {:?}", outcode, midpoint
                );
            }
            (Some(visible), None) | (None, Some(visible)) => {
                // only tiny visible parts may be lost or found by a single algorithm
                prop_assert!(visible.length() < 2.0, "{:?}", visible);
            }
            (None, None) => {}
        }
    }

    #[test]
    fn prop_parametric_matches_outcode(segment in segment()) {
        let window = window();
        let polygon = window.to_polygon().expect("window has area");
        let outcode = clip_rectangle(segment, &window, ClipAlgorithm::Outcode);
        let parametric = clip_convex(segment, &polygon);
        match (outcode, parametric) {
            (Some(outcode), Some(parametric)) => {
                prop_assert!(
                    max_coord_diff(outcode, parametric) < 1e-6,
                    "{:?} {:?}", outcode, parametric
                );
            }
            (Some(visible), None) | (None, Some(visible)) => {
                prop_assert!(visible.length() < 1e-6, "{:?}", visible);
            }
            (None, None) => {}
        }
    }

    #[test]
    fn prop_convex_clip_inside(segment in segment(), polygon in regular_polygon()) {
        if let Some(visible) = clip_convex(segment, &polygon) {
            for point in visible.points() {
                for edge in polygon.edges() {
                    let dist = edge.direction().cross(point - edge.start()) / edge.length();
                    prop_assert!(dist > -1e-6, "{:?} outside of {:?}", point, edge);
                }
            }
            // direction is preserved
            prop_assert!(visible.direction().dot(segment.direction()) >= 0.0);
        }
    }

    #[test]
    fn prop_bresenham_count(p0 in cell_point(), p1 in cell_point()) {
        let cells = rasterize_line(p0, p1, LineAlgorithm::Bresenham);
        let (dx, dy) = ((p1.0 - p0.0).abs(), (p1.1 - p0.1).abs());
        prop_assert_eq!(cells.len(), dx.max(dy) as usize + 1);
        prop_assert_eq!(cells.first().map(Cell::xy), Some(p0));
        prop_assert_eq!(cells.last().map(Cell::xy), Some(p1));
        for pair in cells.windows(2) {
            prop_assert!((pair[0].x - pair[1].x).abs() <= 1);
            prop_assert!((pair[0].y - pair[1].y).abs() <= 1);
        }
    }

    #[test]
    fn prop_step_and_dda_count(p0 in cell_point(), p1 in cell_point()) {
        let (dx, dy) = ((p1.0 - p0.0).abs(), (p1.1 - p0.1).abs());
        for algorithm in [LineAlgorithm::Step, LineAlgorithm::Dda] {
            let cells = rasterize_line(p0, p1, algorithm);
            prop_assert_eq!(cells.len(), dx.max(dy) as usize + 1, "{}", algorithm);
        }
    }

    #[test]
    fn prop_wu_coverage(p0 in cell_point(), p1 in cell_point()) {
        prop_assume!(p0 != p1);
        let cells = rasterize_line(p0, p1, LineAlgorithm::Wu);
        prop_assert_eq!(cells.len() % 2, 0);
        prop_assert!(cells.len() >= 4);
        for pair in cells[2..cells.len() - 2].chunks(2) {
            let sum = pair[0].coverage() + pair[1].coverage();
            prop_assert!((sum - 1.0).abs() < 1e-9, "{:?}", pair);
        }
        for cell in cells {
            let coverage = cell.intensity.expect("wu sets intensity");
            prop_assert!((0.0..=1.0).contains(&coverage));
        }
    }

    #[test]
    fn prop_circle(center in cell_point(), radius in 0..300u32) {
        let cells = rasterize_circle(center, radius);
        let unique: HashSet<_> = cells.iter().map(Cell::xy).collect();
        prop_assert_eq!(unique.len(), cells.len());
        let center = Point::from(center);
        for cell in cells {
            let dist = cell.center().dist(center);
            prop_assert!((dist - radius as Scalar).abs() <= 1.0, "{:?}", cell);
        }
    }
}

#[test]
fn scenario_bresenham() {
    let cells = rasterize_line((0.0, 0.0), (5.0, 2.0), LineAlgorithm::Bresenham);
    let xy: Vec<_> = cells.iter().map(Cell::xy).collect();
    assert_eq!(xy, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]);
}

#[test]
fn scenario_outcode() {
    let segment = Segment::new((-10.0, -10.0), (20.0, 20.0));
    assert_eq!(
        clip_rectangle(segment, &window(), ClipAlgorithm::Outcode),
        Some(Segment::new((0.0, 0.0), (10.0, 10.0)))
    );
}

#[test]
fn scenario_circle() {
    let cells = rasterize_circle((0.0, 0.0), 5);
    let xy: HashSet<_> = cells.iter().map(Cell::xy).collect();
    for axis in [(5, 0), (0, 5), (-5, 0), (0, -5)] {
        assert!(xy.contains(&axis));
    }
    assert_eq!(xy.len(), 28);
}
