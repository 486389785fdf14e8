use serde::{Deserialize, Serialize};

use crate::{Board, Cell, CellCount, Coord2, Result};

/// Outcome of a flag command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Flag bookkeeping: how many flags the player may still place and how many
/// sit on the board. The budget equals the configured mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagTracker {
    total: CellCount,
    placed: CellCount,
}

impl FlagTracker {
    pub fn new(total: CellCount) -> Self {
        Self { total, placed: 0 }
    }

    pub fn placed(&self) -> CellCount {
        self.placed
    }

    /// Flags still available; `placed() + remaining()` always equals the
    /// budget.
    pub fn remaining(&self) -> CellCount {
        self.total.saturating_sub(self.placed)
    }

    /// Rewires the budget to a new mine total. Flags already on the board
    /// stay placed.
    pub(crate) fn reset_budget(&mut self, total: CellCount) {
        self.total = total;
    }

    /// Puts a flag on a hidden, unflagged cell if any budget is left;
    /// otherwise changes nothing. Flags only ever sit on hidden cells.
    pub(crate) fn place(&mut self, board: &mut Board, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let cell = *board.cell(coords)?;
        if self.remaining() == 0 || cell.is_flagged() || !cell.is_hidden() {
            return Ok(NoChange);
        }
        board.set_flag(coords, true)?;
        self.placed += 1;
        Ok(Changed)
    }

    /// Removes a flag, returning it to the budget; changes nothing if the
    /// cell is not flagged.
    pub(crate) fn remove(&mut self, board: &mut Board, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        if !board.cell(coords)?.is_flagged() {
            return Ok(NoChange);
        }
        board.set_flag(coords, false)?;
        self.placed -= 1;
        Ok(Changed)
    }

    /// The reveal path's flag accounting: clears the flag on a cell being
    /// uncovered and returns it to the budget, exactly once.
    pub(crate) fn release(&mut self, cell: &mut Cell) {
        if cell.flagged {
            cell.flagged = false;
            self.placed -= 1;
        }
    }
}
