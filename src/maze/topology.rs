use std::fmt;

use super::Coord;
use crate::error::{MazeError, Result};

/// The shape of a maze: which coordinates hold cells.
///
/// Only built through [`Topology::rectangular`] and [`Topology::disk`], so every
/// value has at least one cell and coordinates that fit in `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology(Shape);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `length` columns by `width` rows.
    Rectangular { length: i32, width: i32 },
    /// A digitized disk centred on `(radius - 1, radius - 1)`.
    Disk { radius: i32 },
}

impl Topology {
    pub fn rectangular(length: i32, width: i32) -> Result<Self> {
        if length <= 0 || width <= 0 {
            return Err(MazeError::invalid(format!(
                "rectangular maze needs a positive length and width, got {length}x{width}"
            )));
        }
        Ok(Topology(Shape::Rectangular { length, width }))
    }

    /// The centre cell always lies inside, so any accepted radius yields cells.
    pub fn disk(radius: i32) -> Result<Self> {
        if radius <= 0 {
            return Err(MazeError::invalid(format!(
                "disk maze needs a positive radius, got {radius}"
            )));
        }
        if radius > Topology::MAX_RADIUS {
            return Err(MazeError::invalid(format!(
                "disk radius {radius} exceeds the largest supported radius {}",
                Topology::MAX_RADIUS
            )));
        }
        Ok(Topology(Shape::Disk { radius }))
    }

    /// Largest radius whose enumeration bound `2 * radius + 1` fits in `i32`.
    pub const MAX_RADIUS: i32 = (i32::MAX - 1) / 2;

    /// `Some(radius)` for a disk.
    pub fn radius(&self) -> Option<i32> {
        match self.0 {
            Shape::Disk { radius } => Some(radius),
            Shape::Rectangular { .. } => None,
        }
    }

    /// Enumerates every cell coordinate, column by column.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let topology = *self;
        let (columns, rows) = self.bounds();
        (0..columns)
            .flat_map(move |x| (0..rows).map(move |y| (x, y)))
            .filter(move |&coord| topology.contains(coord))
    }

    pub fn contains(&self, (x, y): Coord) -> bool {
        match self.0 {
            Shape::Rectangular { length, width } => {
                (0..length).contains(&x) && (0..width).contains(&y)
            }
            Shape::Disk { radius } => {
                let (r, x, y) = (i64::from(radius), i64::from(x), i64::from(y));
                (0..=2 * r).contains(&x)
                    && (0..=2 * r).contains(&y)
                    && (x - r + 1).pow(2) + (y - r + 1).pow(2) < r * r
            }
        }
    }

    pub fn default_entrance(&self) -> Coord {
        match self.0 {
            Shape::Rectangular { .. } => (0, 0),
            Shape::Disk { radius } => (radius - 1, radius - 1),
        }
    }

    /// Exclusive upper bounds of the x and y coordinates a topology may enumerate.
    fn bounds(&self) -> (i32, i32) {
        match self.0 {
            Shape::Rectangular { length, width } => (length, width),
            Shape::Disk { radius } => (2 * radius + 1, 2 * radius + 1),
        }
    }

    /// Number of cell columns and rows a renderer has to lay out.
    /// For a rectangle this is `(length, width)`.
    pub fn extent(&self) -> (i32, i32) {
        match self.0 {
            Shape::Rectangular { length, width } => (length, width),
            Shape::Disk { radius } => (2 * radius - 1, 2 * radius - 1),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Shape::Rectangular { length, width } => write!(f, "rectangular {length}x{width}"),
            Shape::Disk { radius } => write!(f, "disk of radius {radius}"),
        }
    }
}
