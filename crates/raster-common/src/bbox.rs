//! World-space extents and points.

use serde::{Deserialize, Serialize};

/// A point in world (georeferenced) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in world coordinates.
///
/// `min_*` is the lower-left corner and `max_*` the upper-right corner;
/// world Y grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extents {
    /// Create new extents from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest extents containing every point, `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p.x, p.y, p.x, p.y),
                Some(e) => Self::new(
                    e.min_x.min(p.x),
                    e.min_y.min(p.y),
                    e.max_x.max(p.x),
                    e.max_y.max(p.y),
                ),
            })
        })
    }

    /// Parse a "minx,miny,maxx,maxy" string.
    pub fn parse(s: &str) -> Result<Self, ExtentsParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(ExtentsParseError::InvalidFormat(s.to_string()));
        }

        let number = |part: &str| -> Result<f64, ExtentsParseError> {
            part.trim()
                .parse()
                .map_err(|_| ExtentsParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self {
            min_x: number(parts[0])?,
            min_y: number(parts[1])?,
            max_x: number(parts[2])?,
            max_y: number(parts[3])?,
        })
    }

    /// Width in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True if the extents enclose no area.
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Upper-left corner (min x, max y).
    pub fn upper_left(&self) -> Point2 {
        Point2::new(self.min_x, self.max_y)
    }

    /// Lower-right corner (max x, min y).
    pub fn lower_right(&self) -> Point2 {
        Point2::new(self.max_x, self.min_y)
    }

    /// Check if these extents overlap another with non-zero area.
    pub fn intersects(&self, other: &Extents) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Compute the overlapping area of two extents.
    pub fn intersection(&self, other: &Extents) -> Option<Extents> {
        if !self.intersects(other) {
            return None;
        }

        Some(Extents {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        })
    }
}

impl std::fmt::Display for Extents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{}:{},{}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtentsParseError {
    #[error("Invalid extents format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in extents: {0}")]
    InvalidNumber(String),
}
