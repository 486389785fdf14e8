use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use flag::*;
pub use game::*;
pub use generator::*;
pub use reveal::*;
pub use status::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod flag;
mod game;
mod generator;
mod reveal;
mod status;
mod types;

/// Session parameters: board shape and how many mines go on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Validated construction: the shape is clamped to at least 1x1, and the
    /// mine count must be positive while leaving at least one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let rows = rows.max(1);
        let cols = cols.max(1);
        if mines == 0 || mines >= cell_total(rows, cols) {
            return Err(GameError::InvalidMineCount);
        }
        Ok(Self { rows, cols, mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_total(self.rows, self.cols)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            mines: 10,
        }
    }
}
