use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Direction};
use crate::error::PolicyParseError;
use crate::grid::Grid;

/// How strictly a candidate move is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Legality {
    /// The move must stay on the board.
    #[default]
    Boundary,
    /// The move must stay on the board and must not run into a body segment, unless that
    /// segment is a tail leaving this turn.
    Occupancy,
}

impl Legality {
    pub fn is_legal(self, direction: Direction, head: Coord, grid: &Grid) -> bool {
        match self {
            Legality::Boundary => in_bounds(direction, head, grid),
            Legality::Occupancy => {
                in_bounds(direction, head, grid) && unoccupied(head.step(direction), grid)
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Legality::Boundary => "boundary",
            Legality::Occupancy => "occupancy",
        }
    }
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Legality {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boundary" | "minimal" => Ok(Legality::Boundary),
            "occupancy" | "hardened" => Ok(Legality::Occupancy),
            _ => Err(PolicyParseError::new("legality", s)),
        }
    }
}

/// Whether moving `direction` from `head` keeps the agent on the board.
pub fn is_legal(direction: Direction, head: Coord, grid: &Grid) -> bool {
    Legality::Boundary.is_legal(direction, head, grid)
}

/// Legal directions from `head` in priority order.
pub fn legal_moves(head: Coord, grid: &Grid, legality: Legality) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| legality.is_legal(d, head, grid))
        .collect()
}

// Both bounds of each axis are checked. Overflow past the i32 range is never on the board.
fn in_bounds(direction: Direction, head: Coord, grid: &Grid) -> bool {
    match direction {
        Direction::Up => head.y.checked_add(1).is_some_and(|y| y < grid.height()),
        Direction::Down => head.y.checked_sub(1).is_some_and(|y| y >= 0),
        Direction::Right => head.x.checked_add(1).is_some_and(|x| x < grid.width()),
        Direction::Left => head.x.checked_sub(1).is_some_and(|x| x >= 0),
    }
}

fn unoccupied(target: Coord, grid: &Grid) -> bool {
    match grid.cell(target) {
        Some(cell) => !cell.is_occupied() || grid.is_vacating(target),
        None => false,
    }
}
