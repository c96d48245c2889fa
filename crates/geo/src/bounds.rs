//! Inclusive latitude/longitude rectangles.

use crate::Position;
use serde::{Deserialize, Serialize};

/// An axis-aligned lat/lng rectangle. Every edge is inclusive.
///
/// Rectangles never wrap across the antimeridian: `west <= east` always holds
/// for bounds built by this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Southern edge (minimum latitude)
    pub south: f64,
    /// Western edge (minimum longitude)
    pub west: f64,
    /// Northern edge (maximum latitude)
    pub north: f64,
    /// Eastern edge (maximum longitude)
    pub east: f64,
}

impl Bounds {
    /// Creates bounds from two opposite corners in any order.
    pub fn new(corner_a: Position, corner_b: Position) -> Self {
        Self {
            south: corner_a.latitude.min(corner_b.latitude),
            west: corner_a.longitude.min(corner_b.longitude),
            north: corner_a.latitude.max(corner_b.latitude),
            east: corner_a.longitude.max(corner_b.longitude),
        }
    }

    /// Creates a degenerate rectangle around a single position.
    pub fn from_position(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Smallest bounds containing every position, or `None` for an empty input.
    pub fn from_positions<'a, I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Position>,
    {
        let mut iter = positions.into_iter();
        let first = Self::from_position(*iter.next()?);
        Some(iter.fold(first, |mut acc, p| {
            acc.extend(p);
            acc
        }))
    }

    /// Grows the rectangle to include `position`.
    pub fn extend(&mut self, position: &Position) {
        self.south = self.south.min(position.latitude);
        self.west = self.west.min(position.longitude);
        self.north = self.north.max(position.latitude);
        self.east = self.east.max(position.longitude);
    }

    /// Smallest bounds containing both rectangles.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    /// Returns true if `position` lies inside or on the edge of the rectangle.
    #[inline]
    pub fn contains(&self, position: &Position) -> bool {
        position.latitude >= self.south
            && position.latitude <= self.north
            && position.longitude >= self.west
            && position.longitude <= self.east
    }

    /// Returns true if every edge is finite and the corners are ordered.
    pub fn is_valid(&self) -> bool {
        [self.south, self.west, self.north, self.east]
            .iter()
            .all(|v| v.is_finite())
            && self.south <= self.north
            && self.west <= self.east
    }
}
