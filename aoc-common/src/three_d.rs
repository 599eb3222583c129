//! 3D integer coordinates with axis-aligned stepping

use std::fmt;

/// An axis-aligned direction in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NegativeX,
    NegativeY,
    NegativeZ,
    PositiveX,
    PositiveY,
    PositiveZ,
}

/// A coordinate in a 3D space
///
/// Immutable (x, y, z) triple ordered lexicographically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Coordinate {
    /// The origin point (0, 0, 0)
    pub const ORIGIN: Coordinate = Coordinate { x: 0, y: 0, z: 0 };

    /// Create a coordinate from x, y and z
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The destination coordinate along an axis
    ///
    /// Offsets exactly one axis by the signed distance for the direction.
    pub fn destination(self, direction: Direction, distance: i64) -> Coordinate {
        match direction {
            Direction::NegativeX => Coordinate::new(self.x - distance, self.y, self.z),
            Direction::NegativeY => Coordinate::new(self.x, self.y - distance, self.z),
            Direction::NegativeZ => Coordinate::new(self.x, self.y, self.z - distance),
            Direction::PositiveX => Coordinate::new(self.x + distance, self.y, self.z),
            Direction::PositiveY => Coordinate::new(self.x, self.y + distance, self.z),
            Direction::PositiveZ => Coordinate::new(self.x, self.y, self.z + distance),
        }
    }

    /// The inclusive line of coordinates from this point along one axis
    ///
    /// The distance is absolute-valued first; the line always starts at
    /// this coordinate and ends `|distance|` steps away.
    pub fn line(self, direction: Direction, distance: i64) -> impl Iterator<Item = Coordinate> {
        let distance = distance.abs();
        (0..=distance).map(move |step| self.destination(direction, step))
    }

    /// This coordinate with a new x value
    pub fn with_x(self, x: i64) -> Coordinate {
        Coordinate::new(x, self.y, self.z)
    }

    /// This coordinate with a new y value
    pub fn with_y(self, y: i64) -> Coordinate {
        Coordinate::new(self.x, y, self.z)
    }

    /// This coordinate with a new z value
    pub fn with_z(self, z: i64) -> Coordinate {
        Coordinate::new(self.x, self.y, z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_offsets_one_axis() {
        let origin = Coordinate::ORIGIN;
        assert_eq!(
            origin.destination(Direction::PositiveX, 3),
            Coordinate::new(3, 0, 0)
        );
        assert_eq!(
            origin.destination(Direction::NegativeX, 3),
            Coordinate::new(-3, 0, 0)
        );
        assert_eq!(
            origin.destination(Direction::PositiveY, 2),
            Coordinate::new(0, 2, 0)
        );
        assert_eq!(
            origin.destination(Direction::NegativeY, 2),
            Coordinate::new(0, -2, 0)
        );
        assert_eq!(
            origin.destination(Direction::PositiveZ, 1),
            Coordinate::new(0, 0, 1)
        );
        assert_eq!(
            origin.destination(Direction::NegativeZ, 1),
            Coordinate::new(0, 0, -1)
        );
    }

    #[test]
    fn line_is_inclusive_on_both_ends() {
        let start = Coordinate::new(1, 2, 3);
        let line: Vec<Coordinate> = start.line(Direction::PositiveZ, 2).collect();
        assert_eq!(
            line,
            vec![
                Coordinate::new(1, 2, 3),
                Coordinate::new(1, 2, 4),
                Coordinate::new(1, 2, 5),
            ]
        );
    }

    #[test]
    fn line_takes_absolute_distance() {
        let start = Coordinate::new(0, 0, 0);
        let forward: Vec<Coordinate> = start.line(Direction::NegativeY, 2).collect();
        let backward: Vec<Coordinate> = start.line(Direction::NegativeY, -2).collect();
        assert_eq!(forward, backward);
        assert_eq!(forward.last(), Some(&Coordinate::new(0, -2, 0)));
    }

    #[test]
    fn line_of_zero_distance_is_the_point() {
        let point = Coordinate::new(4, 5, 6);
        let line: Vec<Coordinate> = point.line(Direction::PositiveX, 0).collect();
        assert_eq!(line, vec![point]);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut coords = vec![
            Coordinate::new(1, 0, 0),
            Coordinate::new(0, 2, 5),
            Coordinate::new(0, 2, 1),
            Coordinate::new(0, 1, 9),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(0, 1, 9),
                Coordinate::new(0, 2, 1),
                Coordinate::new(0, 2, 5),
                Coordinate::new(1, 0, 0),
            ]
        );
    }

    #[test]
    fn with_axis_replaces_single_axis() {
        let c = Coordinate::new(1, 2, 3);
        assert_eq!(c.with_x(9), Coordinate::new(9, 2, 3));
        assert_eq!(c.with_y(9), Coordinate::new(1, 9, 3));
        assert_eq!(c.with_z(9), Coordinate::new(1, 2, 9));
    }
}
