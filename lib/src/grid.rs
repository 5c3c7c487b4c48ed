use std::fmt;

use crate::coord::Coord;
use crate::turn::Agent;

/// What occupies a single board cell this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Food,
    SelfBody,
    SelfHead,
    EnemyBody,
}

impl Cell {
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::SelfBody | Cell::SelfHead | Cell::EnemyBody)
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Food => '*',
            Cell::SelfHead => 'H',
            Cell::SelfBody => 'S',
            Cell::EnemyBody => 'E',
        }
    }
}

/// Largest accepted board side. Keeps a grid allocation small for any request.
pub const MAX_DIMENSION: i32 = 255;

/// The board for a single turn, with every cell classified.
///
/// A grid is built from one snapshot and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    /// Tail cells that are free by the time any head moves this turn.
    vacating: Vec<Coord>,
}

impl Grid {
    /// An all-empty grid.
    ///
    /// # Panics
    /// If either dimension is not in `1..=MAX_DIMENSION`.
    pub fn new(width: i32, height: i32) -> Self {
        let count = Self::cell_count(width, height)
            .unwrap_or_else(|| panic!("grid dimensions out of range, got {width}x{height}"));
        Self {
            width,
            height,
            cells: vec![Cell::Empty; count],
            vacating: Vec::new(),
        }
    }

    /// Classifies every cell from the food list and the bodies of all agents.
    ///
    /// Enemies are written before the acting agent, and the acting agent is written tail
    /// first so that its head wins on a stacked start-of-game body. Coordinates outside the
    /// board are skipped.
    pub fn classify(
        width: i32,
        height: i32,
        food: &[Coord],
        agents: &[Agent],
        you_index: usize,
    ) -> Self {
        let mut grid = Grid::new(width, height);
        for &f in food {
            grid.set(f, Cell::Food);
        }
        for (i, agent) in agents.iter().enumerate() {
            if i == you_index {
                continue;
            }
            for &segment in &agent.body {
                grid.set(segment, Cell::EnemyBody);
            }
            grid.note_tail(agent);
        }
        if let Some(you) = agents.get(you_index) {
            for (i, &segment) in you.body.iter().enumerate().rev() {
                grid.set(segment, if i == 0 { Cell::SelfHead } else { Cell::SelfBody });
            }
            grid.note_tail(you);
        }
        grid
    }

    /// Number of cells for a board of this size, or `None` if either side is outside
    /// `1..=MAX_DIMENSION`.
    pub fn cell_count(width: i32, height: i32) -> Option<usize> {
        let side = 1..=MAX_DIMENSION;
        if !side.contains(&width) || !side.contains(&height) {
            return None;
        }
        (width as usize).checked_mul(height as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, c: Coord) -> bool {
        (0..self.width).contains(&c.x) && (0..self.height).contains(&c.y)
    }

    /// The classification of `c`, or `None` when it lies off the board.
    pub fn cell(&self, c: Coord) -> Option<Cell> {
        self.index(c).map(|i| self.cells[i])
    }

    /// Whether `c` holds a tail segment that moves away before heads arrive.
    pub fn is_vacating(&self, c: Coord) -> bool {
        self.vacating.contains(&c)
    }

    pub fn set(&mut self, c: Coord, cell: Cell) {
        if let Some(i) = self.index(c) {
            self.cells[i] = cell;
        }
    }

    fn index(&self, c: Coord) -> Option<usize> {
        self.contains(c)
            .then(|| c.y as usize * self.width as usize + c.x as usize)
    }

    // A stacked tail means the agent just ate, so the tail stays put for one more turn.
    fn note_tail(&mut self, agent: &Agent) {
        if let [.., before_tail, tail] = agent.body.as_slice() {
            if before_tail != tail {
                self.vacating.push(*tail);
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let cell = self.cell(Coord::new(x, y)).unwrap_or_default();
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
