use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::{Cell, CellCount, Coord, Coord2, GameError, NeighborIter, Result};

/// Rectangular grid of cells with checked, position-indexed access.
///
/// This layer only validates coordinates. Whether a particular change is
/// legal for the game in progress is the caller's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new(rows: Coord, cols: Coord) -> Self {
        Self {
            cells: Array2::default((rows as usize, cols as usize)),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn set_hidden(&mut self, coords: Coord2, hidden: bool) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords].hidden = hidden;
        Ok(())
    }

    /// Sets the raw flag bit. Flag budget accounting lives elsewhere; going
    /// through this directly leaves the counters untouched.
    pub fn set_flag(&mut self, coords: Coord2, flagged: bool) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords].flagged = flagged;
        Ok(())
    }

    /// In-bounds neighbors of `coords`. The iterator owns its bounds and
    /// does not borrow the board.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, col as usize)]
    }
}
