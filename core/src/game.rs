use serde::{Deserialize, Serialize};

use crate::reveal;
use crate::{
    Board, Cell, CellCount, Coord, Coord2, FlagOutcome, FlagTracker, GameConfig, GameError,
    GameStatus, MineGenerator, Result, RevealOutcome, SeededMineGenerator,
};

/// One game session: board, flag bookkeeping, status, and the seed that
/// makes the mine layout reproducible.
///
/// Mines are not placed at construction. The first reveal triggers
/// generation with the clicked cell excluded, so the first click can never
/// detonate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    flags: FlagTracker,
    status: GameStatus,
    mines_placed: bool,
    detonated: Option<Coord2>,
    seed: u64,
}

impl Game {
    /// Fresh session with a randomly drawn seed.
    pub fn new(config: GameConfig) -> Game {
        Self::with_seed(config, rand::random())
    }

    /// Fresh session with a caller-chosen seed; equal seeds and equal play
    /// reproduce equal sessions.
    pub fn with_seed(config: GameConfig, seed: u64) -> Game {
        Game {
            board: Board::new(config.rows, config.cols),
            flags: FlagTracker::new(config.mines),
            status: GameStatus::default(),
            mines_placed: false,
            detonated: None,
            seed,
            config,
        }
    }

    /// Convenience constructor straight from raw parameters.
    pub fn from_params(
        rows: Coord,
        cols: Coord,
        mines: CellCount,
        seed: Option<u64>,
    ) -> Result<Game> {
        let config = GameConfig::new(rows, cols, mines)?;
        Ok(match seed {
            Some(seed) => Self::with_seed(config, seed),
            None => Self::new(config),
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Read-only view of the grid for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        self.board.cell(coords)
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Display-only counter. It always equals the configured total; nothing
    /// during play decrements it.
    pub fn remaining_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn remaining_flags(&self) -> CellCount {
        self.flags.remaining()
    }

    pub fn placed_flags(&self) -> CellCount {
        self.flags.placed()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The mine that ended a lost game, for display highlighting.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    /// Handles a reveal click at `coords`.
    ///
    /// Flagged and already-revealed targets are silent no-ops. The first
    /// reveal of the session moves the status to Playing and places the
    /// mines with `coords` as the excluded safe cell. Revealing a mine
    /// uncovers the whole board and loses; otherwise the cell (and, for a
    /// zero-adjacency cell, its open region) is uncovered and the win
    /// condition is re-evaluated.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_final() {
            return Ok(RevealOutcome::NoChange);
        }
        if self.board[coords].is_flagged() {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.mines_placed {
            self.set_status(GameStatus::Playing);
            SeededMineGenerator::new(self.seed).generate(
                &mut self.board,
                self.config.mines,
                coords,
            )?;
            self.mines_placed = true;
        }

        if !self.board[coords].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.board[coords].has_mine() {
            self.detonated = Some(coords);
            reveal::reveal_all(&mut self.board, &mut self.flags);
            self.set_status(GameStatus::Lose);
            return Ok(RevealOutcome::Lost);
        }

        reveal::flood_reveal(&mut self.board, &mut self.flags, coords);

        if self.all_safe_cells_revealed() {
            reveal::reveal_all(&mut self.board, &mut self.flags);
            self.set_status(GameStatus::Win);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    pub fn place_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.status.is_final() {
            return Ok(FlagOutcome::NoChange);
        }
        self.flags.place(&mut self.board, coords)
    }

    pub fn remove_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.status.is_final() {
            return Ok(FlagOutcome::NoChange);
        }
        self.flags.remove(&mut self.board, coords)
    }

    /// Reconfigures the mine count, rewiring the flag budget with it. Only
    /// legal while no mines are placed yet.
    pub fn set_mine_count(&mut self, mines: CellCount) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        if mines == 0 || mines >= self.config.total_cells() {
            return Err(GameError::InvalidMineCount);
        }
        self.config.mines = mines;
        self.flags.reset_budget(mines);
        Ok(())
    }

    /// Ends the session outright.
    pub fn quit(&mut self) {
        self.set_status(GameStatus::End);
    }

    /// Win test: nothing left that is both hidden and safe.
    fn all_safe_cells_revealed(&self) -> bool {
        self.board
            .iter()
            .all(|cell| !cell.is_hidden() || cell.has_mine())
    }

    fn set_status(&mut self, next: GameStatus) {
        if self.status.can_transition(next) {
            log::debug!("status {:?} -> {:?}", self.status, next);
            self.status = next;
        } else {
            log::warn!(
                "ignoring illegal status transition {:?} -> {:?}",
                self.status,
                next
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_game(seed: u64) -> Game {
        // 10x10 with 10 mines, the stock configuration
        Game::with_seed(GameConfig::default(), seed)
    }

    fn mine_positions(game: &Game) -> Vec<Coord2> {
        let (rows, cols) = game.board().size();
        let mut found = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                if game.board()[(r, c)].has_mine() {
                    found.push((r, c));
                }
            }
        }
        found
    }

    fn safe_positions(game: &Game) -> Vec<Coord2> {
        let (rows, cols) = game.board().size();
        let mut found = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                if !game.board()[(r, c)].has_mine() {
                    found.push((r, c));
                }
            }
        }
        found
    }

    #[test]
    fn fresh_session_is_welcome_and_fully_hidden() {
        let game = small_game(1);
        assert_eq!(game.status(), GameStatus::Welcome);
        assert_eq!(game.total_mines(), 10);
        assert_eq!(game.remaining_flags(), 10);
        assert_eq!(game.placed_flags(), 0);
        assert!(game.board().iter().all(|cell| cell.is_hidden()));
        assert!(mine_positions(&game).is_empty());
    }

    #[test]
    fn first_reveal_places_mines_and_starts_play() {
        for seed in 0..32 {
            let mut game = small_game(seed);
            let outcome = game.reveal((5, 5)).unwrap();
            assert!(outcome.has_update(), "seed {seed}");
            assert_ne!(game.status(), GameStatus::Lose, "seed {seed}");
            assert!(!game.board()[(5, 5)].has_mine(), "seed {seed}");
            assert!(!game.board()[(5, 5)].is_hidden(), "seed {seed}");
            assert_eq!(mine_positions(&game).len(), 10, "seed {seed}");
        }
    }

    #[test]
    fn reveal_out_of_bounds_fails_loudly() {
        let mut game = small_game(1);
        assert_eq!(game.reveal((10, 0)), Err(GameError::OutOfBounds));
        assert_eq!(game.reveal((0, 10)), Err(GameError::OutOfBounds));
        // the failed click must not have started the game
        assert_eq!(game.status(), GameStatus::Welcome);
    }

    #[test]
    fn flagged_cell_ignores_reveal_even_as_first_click() {
        let mut game = small_game(2);
        game.place_flag((4, 4)).unwrap();

        assert_eq!(game.reveal((4, 4)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.status(), GameStatus::Welcome);
        assert!(mine_positions(&game).is_empty());
    }

    #[test]
    fn revealing_a_mine_loses_and_uncovers_everything() {
        let mut game = small_game(3);
        game.reveal((5, 5)).unwrap();
        let mine = mine_positions(&game)[0];

        assert_eq!(game.reveal(mine), Ok(RevealOutcome::Lost));
        assert_eq!(game.status(), GameStatus::Lose);
        assert_eq!(game.detonated(), Some(mine));
        assert!(game.board().iter().all(|cell| !cell.is_hidden()));

        // terminal: nothing else moves
        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.place_flag((0, 0)), Ok(FlagOutcome::NoChange));
        assert_eq!(game.status(), GameStatus::Lose);
    }

    #[test]
    fn clearing_every_safe_cell_wins() {
        let mut game = small_game(4);
        game.reveal((5, 5)).unwrap();

        let mut won = false;
        for pos in safe_positions(&game) {
            match game.reveal(pos).unwrap() {
                RevealOutcome::Won => won = true,
                RevealOutcome::Lost => panic!("safe reveal lost the game"),
                _ => {}
            }
        }

        assert!(won);
        assert_eq!(game.status(), GameStatus::Win);
        assert!(game.board().iter().all(|cell| !cell.is_hidden()));
        assert_eq!(game.detonated(), None);
        assert_eq!(game.placed_flags(), 0);
        assert_eq!(game.remaining_flags(), game.total_mines());
    }

    #[test]
    fn two_by_two_session_wins_after_all_three_safe_cells() {
        let mut game = Game::from_params(2, 2, 1, Some(11)).unwrap();

        // the corner borders the single mine, so only the corner opens
        assert_eq!(game.reveal((1, 1)), Ok(RevealOutcome::Revealed));
        assert_eq!(game.cell((1, 1)).unwrap().adjacent_count(), 1);
        assert_eq!(game.status(), GameStatus::Playing);

        let mut won = false;
        for pos in safe_positions(&game) {
            if game.reveal(pos).unwrap() == RevealOutcome::Won {
                won = true;
            }
        }
        assert!(won);
        assert_eq!(game.status(), GameStatus::Win);
    }

    #[test]
    fn remaining_mines_is_a_static_display_value() {
        let mut game = small_game(5);
        assert_eq!(game.remaining_mines(), 10);
        game.reveal((5, 5)).unwrap();
        game.place_flag((0, 0)).unwrap();
        assert_eq!(game.remaining_mines(), 10);
    }

    #[test]
    fn flag_budget_is_conserved_through_play() {
        let mut game = small_game(6);
        game.reveal((5, 5)).unwrap();

        game.place_flag((0, 0)).unwrap();
        game.place_flag((0, 1)).unwrap();
        game.remove_flag((0, 0)).unwrap();
        assert_eq!(game.placed_flags() + game.remaining_flags(), 10);

        // revealing a flagged-then-unflagged cell keeps the counts balanced
        game.remove_flag((0, 1)).unwrap();
        game.reveal((0, 1)).unwrap();
        assert_eq!(game.placed_flags() + game.remaining_flags(), 10);
    }

    #[test]
    fn mine_count_is_adjustable_only_before_first_reveal() {
        let mut game = small_game(7);
        game.set_mine_count(20).unwrap();
        assert_eq!(game.total_mines(), 20);
        assert_eq!(game.remaining_flags(), 20);

        assert_eq!(game.set_mine_count(0), Err(GameError::InvalidMineCount));
        assert_eq!(game.set_mine_count(100), Err(GameError::InvalidMineCount));

        game.reveal((5, 5)).unwrap();
        assert_eq!(game.set_mine_count(5), Err(GameError::MinesAlreadyPlaced));
        assert_eq!(mine_positions(&game).len(), 20);
    }

    #[test]
    fn quit_ends_the_session_from_any_phase() {
        let mut game = small_game(8);
        game.quit();
        assert_eq!(game.status(), GameStatus::End);
        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.place_flag((0, 0)), Ok(FlagOutcome::NoChange));

        let mut game = small_game(8);
        game.reveal((5, 5)).unwrap();
        game.quit();
        assert_eq!(game.status(), GameStatus::End);
    }

    #[test]
    fn equal_seeds_and_equal_play_give_equal_sessions() {
        let mut a = small_game(9);
        let mut b = small_game(9);
        for game in [&mut a, &mut b] {
            game.place_flag((9, 9)).unwrap();
            game.reveal((5, 5)).unwrap();
            game.reveal((0, 0)).unwrap();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn mid_game_snapshot_round_trips() {
        let mut game = small_game(10);
        game.reveal((5, 5)).unwrap();
        game.place_flag((0, 0)).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
    }
}
