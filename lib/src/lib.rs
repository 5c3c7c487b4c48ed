//! Board model and move selection for a grid snake game.
//!
//! A turn snapshot is decoded into a [`Turn`] holding a classified [`Grid`] and every
//! [`Agent`]; a [`Strategy`] then picks one [`Direction`]. Nothing is kept between turns.

mod coord;
mod error;
mod grid;
mod legality;
pub mod parse;
mod strategy;
mod turn;
pub mod wire;

pub use coord::{Coord, Direction};
pub use error::{PolicyParseError, SnapshotError};
pub use grid::{Cell, Grid, MAX_DIMENSION};
pub use legality::{is_legal, legal_moves, Legality};
pub use parse::{decode, decode_game_info, parse, parse_str};
pub use strategy::{
    select, select_with, PriorityStrategy, RandomStrategy, Strategy, StrategyKind, FALLBACK,
};
pub use turn::{Agent, GameInfo, Turn};
