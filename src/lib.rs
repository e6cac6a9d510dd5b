//! Small 2D library that clips line segments and converts segments and circles into grid cells.
//!
//! Main features:
//!  - Outcode, midpoint subdivision and parametric (Cyrus-Beck) segment clipping
//!  - Step, DDA, Bresenham and anti-aliased Wu line rasterization
//!  - Bresenham midpoint circle rasterization
//!  - Optional step trace of every algorithm
//!
//! ```
//! use rasterclip::*;
//!
//! let window = Rect::new(0.0, 0.0, 10.0, 10.0)?;
//! let segment = Segment::new((-10.0, -10.0), (20.0, 20.0));
//! let visible = clip_rectangle(segment, &window, ClipAlgorithm::Outcode);
//! assert_eq!(visible, Some(Segment::new((0.0, 0.0), (10.0, 10.0))));
//!
//! let cells = rasterize_line((0.0, 0.0), (5.0, 2.0), LineAlgorithm::Bresenham);
//! assert_eq!(cells.len(), 6);
//! # Ok::<(), Error>(())
//! ```
#![deny(warnings)]

mod circle;
mod clip;
mod error;
mod geometry;
#[cfg(feature = "serde")]
mod job;
mod line;
mod parse;
mod region;
mod trace;
mod utils;

pub use circle::{CircleCells, CircleRasterizer, rasterize_circle, rasterize_circle_traced};
pub use clip::{
    ClipAlgorithm, MIDPOINT_MAX_DEPTH, MidpointClipper, OUTCODE_MAX_ITERATIONS, OutcodeClipper,
    PARALLEL_EPSILON, ParametricClipper, RectClipper, clip_and_rasterize, clip_convex,
    clip_convex_traced, clip_rectangle, clip_rectangle_traced,
};
pub use error::Error;
pub use geometry::{Cell, Circle, EPSILON, Point, Scalar, Segment, cell_coord, scalar_fmt};
#[cfg(feature = "serde")]
pub use job::{Job, JobOutput};
pub use line::{
    BresenhamRasterizer, DdaRasterizer, LineAlgorithm, LineRasterizer, StepRasterizer,
    WuRasterizer, rasterize_line, rasterize_line_traced,
};
pub use parse::{parse_points, parse_segments};
pub use region::{ClipRegion, ConvexPolygon, Outcode, Rect};
pub use trace::{LogTracer, NoTrace, Tracer};
