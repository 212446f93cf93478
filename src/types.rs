// Core board types shared by the game layer and the pathfinding engine

use serde::{Deserialize, Serialize};

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents the four possible movement directions on the board.
/// The grid is row-major with y growing downward, so `North` decrements y.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Returns all directions in the fixed order the search expands neighbors
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// Converts direction to string representation for logs and traces
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }

    /// Calculates the next coordinate when moving in this direction.
    /// The result is unbounded; callers wrap or bounds-check it.
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::North => Coord { x: coord.x, y: coord.y - 1 },
            Direction::East => Coord { x: coord.x + 1, y: coord.y },
            Direction::South => Coord { x: coord.x, y: coord.y + 1 },
            Direction::West => Coord { x: coord.x - 1, y: coord.y },
        }
    }

    /// Direction of travel from one coordinate to an axis-aligned other.
    /// Returns `None` for identical or diagonal pairs.
    pub fn between(from: &Coord, to: &Coord) -> Option<Direction> {
        if from.x == to.x && from.y > to.y {
            Some(Direction::North)
        } else if from.x == to.x && from.y < to.y {
            Some(Direction::South)
        } else if from.x < to.x && from.y == to.y {
            Some(Direction::East)
        } else if from.x > to.x && from.y == to.y {
            Some(Direction::West)
        } else {
            None
        }
    }
}
