use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Direction};
use crate::error::PolicyParseError;
use crate::grid::Grid;
use crate::legality::Legality;
use crate::turn::Turn;

/// Direction returned when no candidate passes the legality check.
pub const FALLBACK: Direction = Direction::Up;

/// Trait that defines how a move is picked for a turn.
///
/// Implementations hold no per-turn state, so one instance can serve any number of
/// concurrent turns.
pub trait Strategy: Send + Sync {
    /// Returns the name of this strategy for display purposes.
    fn name(&self) -> &str;

    /// Choose a move for the acting agent. Always returns a direction.
    fn choose_move(&self, turn: &Turn) -> Direction;
}

impl Strategy for Box<dyn Strategy> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&self, turn: &Turn) -> Direction {
        (**self).choose_move(turn)
    }
}

/// Picks the first legal direction in the order up, right, down, left.
pub fn select(head: Coord, grid: &Grid) -> Direction {
    select_with(head, grid, Legality::Boundary)
}

/// Like [`select`], with a configurable legality rule.
pub fn select_with(head: Coord, grid: &Grid, legality: Legality) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|&d| legality.is_legal(d, head, grid))
        .unwrap_or(FALLBACK)
}

/// Deterministic first-legal-move strategy.
#[derive(Debug, Clone)]
pub struct PriorityStrategy {
    name: String,
    legality: Legality,
}

impl PriorityStrategy {
    pub fn new(legality: Legality) -> Self {
        Self {
            name: format!("priority/{legality}"),
            legality,
        }
    }

    pub fn legality(&self) -> Legality {
        self.legality
    }
}

impl Default for PriorityStrategy {
    fn default() -> Self {
        Self::new(Legality::Boundary)
    }
}

impl Strategy for PriorityStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, turn: &Turn) -> Direction {
        select_with(turn.you().head, &turn.board, self.legality)
    }
}

/// Picks any of the four directions uniformly, without looking at the board.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    name: String,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            name: "random".to_string(),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, _turn: &Turn) -> Direction {
        let mut rng = rand::rng();
        Direction::ALL[rng.random_range(0..Direction::ALL.len())]
    }
}

/// The strategies that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Priority,
    Random,
}

impl StrategyKind {
    /// `legality` only affects strategies that filter moves.
    pub fn build(self, legality: Legality) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Priority => Box::new(PriorityStrategy::new(legality)),
            StrategyKind::Random => Box::new(RandomStrategy::new()),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Priority => "priority",
            StrategyKind::Random => "random",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Ok(StrategyKind::Priority),
            "random" => Ok(StrategyKind::Random),
            _ => Err(PolicyParseError::new("strategy", s)),
        }
    }
}
