//! Grid coordinates and facing directions

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// Integer grid coordinate, origin at the top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };
    pub const ONE: Point = Point { x: 1, y: 1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Parses `X,Y` (as used on the command line)
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
        let x = x
            .trim()
            .parse()
            .map_err(|e| format!("invalid x coordinate '{}': {}", x.trim(), e))?;
        let y = y
            .trim()
            .parse()
            .map_err(|e| format!("invalid y coordinate '{}': {}", y.trim(), e))?;
        Ok(Point::new(x, y))
    }
}

/// The direction the cursor moves on its next advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell offset for this direction (y grows downward)
    pub fn offset(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '▲',
            Direction::Down => '▼',
            Direction::Left => '◀',
            Direction::Right => '▶',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3, -2);
        let b = Point::new(1, 5);
        assert_eq!(a + b, Point::new(4, 3));
        assert_eq!(a - b, Point::new(2, -7));
        assert_eq!(Point::ZERO + Point::ONE, Point::ONE);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Point::ZERO + Direction::Up.offset(), Point::new(0, -1));
        assert_eq!(Point::ZERO + Direction::Down.offset(), Point::new(0, 1));
        assert_eq!(Point::ZERO + Direction::Left.offset(), Point::new(-1, 0));
        assert_eq!(Point::ZERO + Direction::Right.offset(), Point::new(1, 0));
    }

    #[test]
    fn test_parse_point() {
        assert_eq!("2,3".parse(), Ok(Point::new(2, 3)));
        assert_eq!(" -1 , 4".parse(), Ok(Point::new(-1, 4)));
        assert!("7".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
    }
}
