//! The JSON shape the game engine posts to `/start`, `/move` and `/end`.
//!
//! Only the fields the engine actually reads are declared; everything else (ruleset,
//! hazards, customizations, ...) is ignored. Missing required fields and fields of the wrong
//! type are rejected by the deserializer.

use serde::Deserialize;

use crate::coord::Coord;

#[derive(Debug, Clone, Deserialize)]
pub struct WireSnapshot {
    pub game: WireGame,
    pub turn: u32,
    pub board: WireBoard,
    #[serde(default)]
    pub you: Option<WireAgent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireGame {
    pub id: String,
    pub timeout: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireBoard {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub food: Vec<Coord>,
    pub snakes: Vec<WireAgent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireAgent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i64,
    /// A `null` entry ends the body; see [`crate::parse::parse`].
    pub body: Vec<Option<Coord>>,
    pub head: Coord,
    pub length: u32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: String,
    #[serde(default)]
    pub squad: Option<String>,
}

/// Start and end notifications only need the game header.
#[derive(Debug, Clone, Deserialize)]
pub struct WireNotification {
    pub game: WireGame,
}
