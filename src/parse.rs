//! Plain text input formats
//!
//! Values are separated by whitespace or commas. A segment list starts with the
//! number of segments followed by `x1 y1 x2 y2` quadruples:
//! ```text
//! 2
//! 50 50 200 150
//! 100 200 300 100
//! ```
use crate::{Error, Point, Scalar, Segment};

pub(crate) struct Parser<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            offset: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.offset).copied()
    }

    // consume separators from the input
    pub fn parse_separators(&mut self) {
        while let Some(byte) = self.peek() {
            if !matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b',') {
                break;
            }
            self.offset += 1;
        }
    }

    /// Whether only separators are left
    pub fn is_end(&mut self) -> bool {
        self.parse_separators();
        self.offset >= self.input.len()
    }

    // parse single scalar value from the input
    pub fn parse_scalar(&mut self) -> Result<Scalar, Error> {
        self.parse_separators();
        let start = self.offset;
        while let Some(byte) = self.peek() {
            if !matches!(byte, b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E') {
                break;
            }
            // sign is only allowed at the start or right after an exponent
            if matches!(byte, b'-' | b'+')
                && self.offset != start
                && !matches!(self.input[self.offset - 1], b'e' | b'E')
            {
                break;
            }
            self.offset += 1;
        }
        if start == self.offset {
            return if self.offset >= self.input.len() {
                Err(Error::UnexpectedEnd)
            } else {
                Err(Error::InvalidScalar(start))
            };
        }
        let value: Scalar = std::str::from_utf8(&self.input[start..self.offset])
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or(Error::InvalidScalar(start))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NonFinite)
        }
    }

    /// Parse non-negative integer count
    pub fn parse_count(&mut self) -> Result<usize, Error> {
        self.parse_separators();
        let start = self.offset;
        let value = self.parse_scalar()?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(Error::InvalidScalar(start));
        }
        Ok(value as usize)
    }

    pub fn parse_point(&mut self) -> Result<Point, Error> {
        let x = self.parse_scalar()?;
        let y = self.parse_scalar()?;
        Ok(Point::new(x, y))
    }

    pub fn parse_segment(&mut self) -> Result<Segment, Error> {
        let p0 = self.parse_point()?;
        let p1 = self.parse_point()?;
        Ok(Segment::new(p0, p1))
    }

    /// Make sure that whole input has been consumed
    pub fn parse_end(&mut self) -> Result<(), Error> {
        if self.is_end() {
            Ok(())
        } else {
            Err(Error::TrailingInput(self.offset))
        }
    }
}

/// Parse segment list prefixed with the number of segments
pub fn parse_segments(text: &str) -> Result<Vec<Segment>, Error> {
    let mut parser = Parser::new(text);
    let count = parser.parse_count()?;
    let segments = (0..count)
        .map(|_| parser.parse_segment())
        .collect::<Result<Vec<_>, _>>()?;
    parser.parse_end()?;
    Ok(segments)
}

/// Parse flat list of `x y` pairs
pub fn parse_points(text: &str) -> Result<Vec<Point>, Error> {
    let mut parser = Parser::new(text);
    let mut points = Vec::new();
    while !parser.is_end() {
        points.push(parser.parse_point()?);
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_parse_scalar() -> Result<(), Error> {
        let mut parser = Parser::new("1 .22,-3.5e-1 +4 1e4");
        assert_approx_eq!(parser.parse_scalar()?, 1.0);
        assert_approx_eq!(parser.parse_scalar()?, 0.22);
        assert_approx_eq!(parser.parse_scalar()?, -0.35);
        assert_approx_eq!(parser.parse_scalar()?, 4.0);
        assert_approx_eq!(parser.parse_scalar()?, 1e4);
        assert!(matches!(parser.parse_scalar(), Err(Error::UnexpectedEnd)));

        let mut parser = Parser::new("1-2");
        assert_approx_eq!(parser.parse_scalar()?, 1.0);
        assert_approx_eq!(parser.parse_scalar()?, -2.0);

        assert!(matches!(
            Parser::new("x").parse_scalar(),
            Err(Error::InvalidScalar(0))
        ));
        assert!(matches!(
            Parser::new("1e999").parse_scalar(),
            Err(Error::NonFinite)
        ));
        Ok(())
    }

    #[test]
    fn test_parse_segments() -> Result<(), Error> {
        let segments = parse_segments(
            "3
            50 50 200 150
            100 200 300 100
            150 50 250 250
            ",
        )?;
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], Segment::new((100.0, 200.0), (300.0, 100.0)));

        assert!(matches!(
            parse_segments("2\n1 2 3 4\n"),
            Err(Error::UnexpectedEnd)
        ));
        assert!(matches!(
            parse_segments("1\n1 2 3 4\n5"),
            Err(Error::TrailingInput(_))
        ));
        assert!(matches!(parse_segments("1.5"), Err(Error::InvalidScalar(0))));
        Ok(())
    }

    #[test]
    fn test_parse_points() -> Result<(), Error> {
        let points = parse_points("0 0, 10 0, 10 10")?;
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point::new(10.0, 10.0));
        assert!(matches!(parse_points("1 2 3"), Err(Error::UnexpectedEnd)));
        Ok(())
    }
}
