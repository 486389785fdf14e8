use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use crate::{Board, CellCount, Coord, Coord2, GameError, MineStatus, Result};

/// Strategy for seeding a board with mines once the first cell is chosen.
pub trait MineGenerator {
    /// Places `mines` mines on `board`, leaving `safe` untouched, and fills
    /// in the adjacency counts of every non-mine cell. Runs once per
    /// session.
    fn generate(self, board: &mut Board, mines: CellCount, safe: Coord2) -> Result<()>;
}

/// Deterministic, seed-driven mine placement.
///
/// Draws `mines` distinct positions uniformly over the grid and redraws the
/// entire sample whenever it contains the safe cell. Rejecting the whole
/// sample keeps the layout distribution uniform over all layouts excluding
/// the safe cell; swapping out just the colliding pick would not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeededMineGenerator {
    seed: u64,
}

impl SeededMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for SeededMineGenerator {
    fn generate(self, board: &mut Board, mines: CellCount, safe: Coord2) -> Result<()> {
        let total = board.total_cells();
        if mines == 0 || mines >= total {
            return Err(GameError::InvalidMineCount);
        }
        let safe = board.validate_coords(safe)?;

        let cols = board.cols() as usize;
        let safe_index = safe.0 as usize * cols + safe.1 as usize;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut picks = index::sample(&mut rng, total as usize, mines as usize).into_vec();
        while picks.contains(&safe_index) {
            log::trace!("mine sample hit the safe cell {:?}, redrawing", safe);
            picks = index::sample(&mut rng, total as usize, mines as usize).into_vec();
        }
        log::debug!("placing {} mines (seed {})", mines, self.seed);

        let positions: Vec<Coord2> = picks
            .into_iter()
            .map(|i| ((i / cols) as Coord, (i % cols) as Coord))
            .collect();
        place_mines(board, &positions);
        Ok(())
    }
}

/// Marks every position in `mines` as a mine and bumps the adjacency count
/// of its non-mine neighbors. Cells already holding a mine keep whatever
/// partial count they accumulated; nothing ever reads a mine's count.
pub(crate) fn place_mines(board: &mut Board, mines: &[Coord2]) {
    for &pos in mines {
        board[pos].mine_status = MineStatus::Mine;
        for neighbor in board.neighbors(pos) {
            let cell = &mut board[neighbor];
            if !cell.has_mine() {
                cell.bump_adjacent();
            }
        }
    }
}
