//! JSON serialized jobs
//!
//! ```json
//! {
//!     "job": "clip_and_rasterize",
//!     "segment": [[-10, 0], [20, 5]],
//!     "region": {"rectangle": {"xmin": -5, "ymin": -5, "xmax": 15, "ymax": 15}},
//!     "line": "bresenham"
//! }
//! ```
use crate::{
    Cell, ClipAlgorithm, ClipRegion, Error, LineAlgorithm, LogTracer, NoTrace, Point, Segment,
    Tracer, rasterize_circle_traced, rasterize_line_traced,
};
use serde::{Deserialize, Serialize};
use std::{fmt, io::Read};

/// Single unit of work for the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "snake_case")]
pub enum Job {
    /// Rasterize a line segment
    Line {
        segment: Segment,
        #[serde(default)]
        algorithm: LineAlgorithm,
    },
    /// Rasterize a circle
    Circle { center: Point, radius: u32 },
    /// Clip every segment against the region
    Clip {
        segments: Vec<Segment>,
        region: ClipRegion,
        #[serde(default)]
        algorithm: ClipAlgorithm,
    },
    /// Clip segment and rasterize its visible part
    ClipAndRasterize {
        segment: Segment,
        region: ClipRegion,
        #[serde(default)]
        clip: ClipAlgorithm,
        #[serde(default)]
        line: LineAlgorithm,
    },
}

/// Result of a [`Job`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOutput {
    /// Produced cells
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<Cell>,
    /// Clipped segments, `None` for segments that are not visible
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clipped: Vec<Option<Segment>>,
    /// Step trace, only collected when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<String>,
}

/// Collects entries and forwards them to `tracing`
struct JobTracer {
    entries: Vec<String>,
    log: LogTracer,
}

impl Tracer for JobTracer {
    fn step(&mut self, entry: fmt::Arguments<'_>) {
        self.log.step(entry);
        self.entries.step(entry);
    }
}

impl Job {
    /// Parse job from JSON string
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read job from JSON stream
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Name of the job kind
    pub fn name(&self) -> &'static str {
        match self {
            Job::Line { .. } => "line",
            Job::Circle { .. } => "circle",
            Job::Clip { .. } => "clip",
            Job::ClipAndRasterize { .. } => "clip_and_rasterize",
        }
    }

    /// Run the job, step trace is included in the output if `trace` is set
    pub fn run(&self, trace: bool) -> JobOutput {
        let _guard = tracing::debug_span!("[job]", job = self.name()).entered();
        if !trace {
            return self.run_traced(&mut NoTrace);
        }
        let mut tracer = JobTracer {
            entries: Vec::new(),
            log: LogTracer,
        };
        let mut output = self.run_traced(&mut tracer);
        output.trace = tracer.entries;
        output
    }

    fn run_traced(&self, tracer: &mut dyn Tracer) -> JobOutput {
        match self {
            Job::Line { segment, algorithm } => JobOutput {
                cells: rasterize_line_traced(segment.start(), segment.end(), *algorithm, tracer),
                ..JobOutput::default()
            },
            Job::Circle { center, radius } => JobOutput {
                cells: rasterize_circle_traced(*center, *radius, tracer),
                ..JobOutput::default()
            },
            Job::Clip {
                segments,
                region,
                algorithm,
            } => JobOutput {
                clipped: segments
                    .iter()
                    .map(|segment| region.clip_traced(*segment, *algorithm, tracer))
                    .collect(),
                ..JobOutput::default()
            },
            Job::ClipAndRasterize {
                segment,
                region,
                clip,
                line,
            } => {
                let (clipped, cells) = region.clip_and_rasterize(*segment, *clip, *line, tracer);
                JobOutput {
                    cells,
                    clipped: vec![clipped],
                    ..JobOutput::default()
                }
            }
        }
    }
}

impl JobOutput {
    /// Serialize output as pretty printed JSON
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
