use crate::Scalar;
use std::fmt;

/// Errors produced while constructing clip regions or parsing input
#[derive(Debug)]
pub enum Error {
    /// Rectangle bounds are inverted (`xmin > xmax` or `ymin > ymax`)
    InvalidRect {
        xmin: Scalar,
        ymin: Scalar,
        xmax: Scalar,
        ymax: Scalar,
    },
    /// Polygon has fewer than three vertices
    TooFewVertices(usize),
    /// Polygon turns both ways, vertex index where direction flipped
    NonConvexPolygon(usize),
    /// All polygon vertices are collinear or coincide
    DegeneratePolygon,
    /// Coordinate is NaN or infinite
    NonFinite,
    /// Failed to parse scalar value at byte offset
    InvalidScalar(usize),
    /// Input ended while more values were expected
    UnexpectedEnd,
    /// Unconsumed input at byte offset
    TrailingInput(usize),
    /// JSON error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// IO error propagated while reading input stream
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRect {
                xmin,
                ymin,
                xmax,
                ymax,
            } => write!(
                f,
                "invalid rectangle: x=[{}, {}] y=[{}, {}]",
                xmin, xmax, ymin, ymax
            ),
            Error::TooFewVertices(count) => {
                write!(f, "polygon requires at least 3 vertices, got {}", count)
            }
            Error::NonConvexPolygon(index) => {
                write!(f, "polygon is not convex at vertex {}", index)
            }
            Error::DegeneratePolygon => write!(f, "polygon has zero area"),
            Error::NonFinite => write!(f, "coordinate is not a finite number"),
            Error::InvalidScalar(offset) => write!(f, "invalid number at offset {}", offset),
            Error::UnexpectedEnd => write!(f, "unexpected end of input"),
            Error::TrailingInput(offset) => write!(f, "unexpected input at offset {}", offset),
            #[cfg(feature = "serde")]
            Error::Json(error) => write!(f, "json: {}", error),
            Error::IoError(error) => write!(f, "io: {}", error),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::IoError(error) => error,
            _ => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "serde")]
            Error::Json(error) => Some(error),
            Error::IoError(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = Error::InvalidRect {
            xmin: 10.0,
            ymin: 0.0,
            xmax: 0.0,
            ymax: 5.0,
        };
        assert_eq!(error.to_string(), "invalid rectangle: x=[10, 0] y=[0, 5]");
        assert_eq!(
            Error::TooFewVertices(2).to_string(),
            "polygon requires at least 3 vertices, got 2"
        );
    }

    #[test]
    fn test_io_conversion() {
        let error: std::io::Error = Error::NonFinite.into();
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
        let error: std::io::Error =
            Error::from(std::io::Error::from(std::io::ErrorKind::NotFound)).into();
        assert_eq!(error.kind(), std::io::ErrorKind::NotFound);
    }
}
