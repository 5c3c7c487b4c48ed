use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use snake_core::{Coord, Direction, Grid, Legality, Strategy, Turn};
use tabled::{Table, Tabled};

/// How one candidate direction fares under both legality rules.
#[derive(Clone, Debug, Serialize, Tabled)]
pub struct Candidate {
    pub direction: Direction,
    pub target: Coord,
    pub cell: String,
    pub boundary: bool,
    pub occupancy: bool,
}

/// What a strategy decided for one recorded turn.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub file: String,
    pub game_id: String,
    pub turn: u32,
    pub head: Coord,
    pub strategy: String,
    pub chosen: Direction,
    pub candidates: Vec<Candidate>,
}

impl Report {
    pub fn new(file: &Path, turn: &Turn, strategy: &dyn Strategy) -> Self {
        let head = turn.you().head;
        let candidates = Direction::ALL
            .into_iter()
            .map(|direction| {
                let target = head.step(direction);
                Candidate {
                    direction,
                    target,
                    cell: turn
                        .board
                        .cell(target)
                        .map_or_else(|| "off board".to_string(), |c| format!("{c:?}")),
                    boundary: Legality::Boundary.is_legal(direction, head, &turn.board),
                    occupancy: Legality::Occupancy.is_legal(direction, head, &turn.board),
                }
            })
            .collect();

        Self {
            file: file.display().to_string(),
            game_id: turn.game_id.clone(),
            turn: turn.turn,
            head,
            strategy: strategy.name().to_string(),
            chosen: strategy.choose_move(turn),
            candidates,
        }
    }

    pub fn print_summary(&self, grid: &Grid) {
        println!("\n{}", format!("=== {} ===", self.file).green().bold());
        println!(
            "Game: {} | Turn: {} | Head: {}",
            self.game_id.cyan(),
            self.turn.to_string().cyan(),
            self.head
        );
        println!();
        print!("{}", colored_board(grid));
        println!();
        println!("{}", Table::new(self.candidates.clone()));
        println!(
            "{} chooses {}",
            self.strategy.cyan(),
            self.chosen.to_string().green().bold()
        );
    }
}

/// The grid rendering with each kind of cell coloured.
pub fn colored_board(grid: &Grid) -> String {
    grid.to_string()
        .chars()
        .map(|c| {
            let s = c.to_string();
            match c {
                'H' => s.green().bold().to_string(),
                'S' => s.green().to_string(),
                'E' => s.red().to_string(),
                '*' => s.yellow().to_string(),
                '.' => s.dimmed().to_string(),
                _ => s,
            }
        })
        .collect()
}
