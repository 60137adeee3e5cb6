//! Resolved geometry types

use serde::{Deserialize, Serialize};

/// WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Closed sequence of coordinates (first == last)
pub type Ring = Vec<Coord>;

/// Resolved geometry, as stored in the geometry cache and carried by features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates", rename_all = "snake_case")]
pub enum Geometry {
    Point(Coord),
    Line(Vec<Coord>),
    /// Outer ring first, holes after
    Area(Vec<Ring>),
    MultiLine(Vec<Vec<Coord>>),
}

impl Geometry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::Line(_) => "line",
            Geometry::Area(_) => "area",
            Geometry::MultiLine(_) => "multi_line",
        }
    }

    /// Total number of coordinates
    pub fn point_count(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::Line(coords) => coords.len(),
            Geometry::Area(rings) | Geometry::MultiLine(rings) => rings.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// Ring check: at least 4 coordinates and closed
pub fn is_ring(coords: &[Coord]) -> bool {
    coords.len() >= 4 && coords.first() == coords.last()
}
