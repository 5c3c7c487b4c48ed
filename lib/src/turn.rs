use crate::coord::Coord;
use crate::grid::Grid;

/// One snake on the board, built fresh from each snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub health: u8,
    /// Segments from head to tail.
    pub body: Vec<Coord>,
    pub head: Coord,
    /// The length the engine sent, which can disagree with `body` when the body list was cut
    /// short by a null entry.
    pub reported_length: u32,
    pub latency: String,
    pub shout: String,
    pub squad: Option<String>,
}

impl Agent {
    /// A healthy agent whose head is the first body segment.
    pub fn new(id: impl Into<String>, body: Vec<Coord>) -> Self {
        let head = body.first().copied().unwrap_or_default();
        Self {
            id: id.into(),
            name: String::new(),
            health: 100,
            reported_length: u32::try_from(body.len()).unwrap_or(u32::MAX),
            body,
            head,
            latency: String::new(),
            shout: String::new(),
            squad: None,
        }
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn tail(&self) -> Option<Coord> {
        self.body.last().copied()
    }

    /// An eliminated agent carries an empty body.
    pub fn is_eliminated(&self) -> bool {
        self.body.is_empty()
    }
}

/// Everything the engine knows when deciding a single move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub game_id: String,
    pub timeout_ms: u32,
    pub turn: u32,
    pub board: Grid,
    pub food: Vec<Coord>,
    /// All agents in snapshot order, the acting agent included.
    pub agents: Vec<Agent>,
    you_index: usize,
}

impl Turn {
    /// # Panics
    /// If `you_index` does not point into `agents`.
    pub fn new(
        game_id: String,
        timeout_ms: u32,
        turn: u32,
        food: Vec<Coord>,
        agents: Vec<Agent>,
        you_index: usize,
        board: Grid,
    ) -> Self {
        assert!(you_index < agents.len(), "acting agent must be on the board");
        Self {
            game_id,
            timeout_ms,
            turn,
            board,
            food,
            agents,
            you_index,
        }
    }

    /// The acting agent.
    pub fn you(&self) -> &Agent {
        &self.agents[self.you_index]
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Agent> {
        self.agents
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.you_index)
            .map(|(_, a)| a)
    }
}


/// The part of a snapshot that start and end notifications care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub game_id: String,
    pub timeout_ms: u32,
}
