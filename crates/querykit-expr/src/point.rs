//! Two-dimensional points.
//!
//! Without a spatial extension a point is stored as its WKT text,
//! `POINT (<x> <y>)`. The prefix `POINT (` is exactly seven characters long,
//! so the coordinates start at position 8 of the text.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use querykit_core::{QueryKitError, QueryKitResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

static WKT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:POINT)\s*\(\s*(\S+)\s+(\S+)\s*\)$").expect("valid regex")
});

/// The 1-based position of the first coordinate character in the WKT text.
pub const WKT_COORDINATES_START: i64 = 8;

/// A point in the plane.
///
/// # Examples
///
/// ```
/// use querykit_expr::point::Point;
///
/// let p = Point::new(1.5, -2.0);
/// assert_eq!(p.to_wkt(), "POINT (1.5 -2)");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The canonical WKT text.
    pub fn to_wkt(&self) -> String {
        format!("POINT ({} {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wkt())
    }
}

impl FromStr for Point {
    type Err = QueryKitError;

    /// Parses WKT. The space after `POINT` is optional so that PostGIS
    /// output (`POINT(1 2)`) parses too.
    fn from_str(s: &str) -> QueryKitResult<Self> {
        let caps = WKT
            .captures(s.trim())
            .ok_or_else(|| QueryKitError::InvalidLiteral(format!("not a WKT point: '{s}'")))?;
        let coordinate = |text: &str| {
            text.parse::<f64>()
                .map_err(|e| QueryKitError::InvalidLiteral(format!("point coordinate '{text}': {e}")))
        };
        Ok(Self::new(coordinate(&caps[1])?, coordinate(&caps[2])?))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wkt_text() {
        assert_eq!(Point::new(1.0, 2.0).to_wkt(), "POINT (1 2)");
        assert_eq!(Point::new(0.25, -3.5).to_string(), "POINT (0.25 -3.5)");
    }

    #[test]
    fn test_coordinates_start_after_prefix() {
        let text = Point::new(7.0, 8.0).to_wkt();
        let start = usize::try_from(WKT_COORDINATES_START).unwrap() - 1;
        assert_eq!(&text[start..], "7 8)");
    }

    #[test]
    fn test_parse() {
        assert_eq!("POINT (1 2)".parse::<Point>().unwrap(), Point::new(1.0, 2.0));
        assert_eq!("point(1.5 -2)".parse::<Point>().unwrap(), Point::new(1.5, -2.0));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            "LINESTRING (0 0, 1 1)".parse::<Point>(),
            Err(QueryKitError::InvalidLiteral(_))
        ));
        assert!("POINT (a b)".parse::<Point>().is_err());
    }

    #[test]
    fn test_from_tuple() {
        assert_eq!(Point::from((3.0, 4.0)), Point::new(3.0, 4.0));
    }
}
