use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Running
/// - Ready -> Win
/// - Running -> Win
/// - Running -> Loss
/// - Loss -> Running (undo)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Mines not placed yet, waiting for the first reveal
    #[default]
    Ready,
    Running,
    Win,
    Loss,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

/// Represents a game from the first click to the end.
///
/// Every transition leaves `self` untouched and hands back the next value, `None` meaning the
/// action did not apply in the current state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    status: GameStatus,
    remaining_flags: i64,
    elapsed_time: u32,
    rand_seed: u32,
}

impl Game {
    pub fn new(rand_seed: u32, difficulty: Difficulty) -> Result<Self> {
        // fail early on a seed the generator would refuse at the first reveal
        Lcg::new(rand_seed)?;
        let difficulty = difficulty.validate()?;
        Ok(Self {
            board: Board::new(difficulty),
            status: GameStatus::Ready,
            remaining_flags: i64::from(difficulty.num_mines()),
            elapsed_time: 0,
            rand_seed,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid(&self) -> &Grid {
        self.board.grid()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.board.difficulty()
    }

    pub fn num_cells(&self) -> CellCount {
        self.board.num_cells()
    }

    pub fn num_flagged(&self) -> CellCount {
        self.board.num_flagged()
    }

    pub fn saved_grid(&self) -> Option<&Grid> {
        self.board.saved_grid()
    }

    /// Mines minus flags, can go below zero, always zero once the game ended.
    pub fn remaining_flags(&self) -> i64 {
        self.remaining_flags
    }

    /// Seconds counted by ticks.
    pub fn elapsed_time(&self) -> u32 {
        self.elapsed_time
    }

    pub fn seed(&self) -> u32 {
        self.rand_seed
    }

    pub fn cell_at(&self, coords: Coordinate) -> Result<Cell> {
        self.grid().get(coords)
    }

    /// Out-of-range coordinates are an error in every status, checked before the status is.
    pub fn reveal(&self, coords: Coordinate) -> Result<Option<Self>> {
        let coords = self.board.validate_coords(coords)?;

        let (board, outcome) = match self.status {
            GameStatus::Win | GameStatus::Loss => return Ok(None),
            GameStatus::Ready => {
                let mut rng = Lcg::new(self.rand_seed)?;
                self.board.initiate(coords, &mut rng)?
            }
            GameStatus::Running => match self.board.reveal(coords)? {
                Some(next) => next,
                None => return Ok(None),
            },
        };

        let status = match outcome {
            RevealOutcome::Revealed => GameStatus::Running,
            RevealOutcome::Won => GameStatus::Win,
            RevealOutcome::HitMine => GameStatus::Loss,
        };
        Ok(Some(self.advance(board, status)))
    }

    /// Out-of-range coordinates are an error in every status, checked before the status is.
    pub fn toggle_flag(&self, coords: Coordinate) -> Result<Option<Self>> {
        let coords = self.board.validate_coords(coords)?;
        if !self.status.is_running() {
            return Ok(None);
        }

        let Some(board) = self.board.toggle_flag(coords)? else {
            return Ok(None);
        };
        let status = if board.is_won() {
            GameStatus::Win
        } else {
            GameStatus::Running
        };
        Ok(Some(self.advance(board, status)))
    }

    /// One second passes.
    pub fn tick(&self) -> Result<Self> {
        if self.status.is_finished() {
            return Err(GameError::IllegalState("cannot tick a finished game"));
        }
        Ok(Self {
            elapsed_time: self.elapsed_time.saturating_add(1),
            ..self.clone()
        })
    }

    /// Takes back the reveal that hit a mine.
    pub fn undo_losing_move(&self) -> Result<Self> {
        if self.status != GameStatus::Loss {
            return Err(GameError::IllegalState("only a lost game can be undone"));
        }
        let board = self.board.restore_saved_grid()?;
        log::debug!("Undoing losing move after {}s", self.elapsed_time);
        Ok(self.advance(board, GameStatus::Running))
    }

    fn advance(&self, board: Board, status: GameStatus) -> Self {
        if status != self.status {
            log::debug!("Game {:?} -> {:?}", self.status, status);
        }
        let remaining_flags = if status.is_finished() {
            0
        } else {
            i64::from(board.difficulty().num_mines()) - i64::from(board.num_flagged())
        };
        Self {
            board,
            status,
            remaining_flags,
            elapsed_time: self.elapsed_time,
            rand_seed: self.rand_seed,
        }
    }

    /// Checks the invariants a decoded snapshot has to satisfy.
    pub fn validate(&self) -> Result<()> {
        let difficulty = self
            .difficulty()
            .validate()
            .map_err(|_| GameError::CorruptSnapshot("difficulty is out of range"))?;
        Lcg::new(self.rand_seed).map_err(|_| GameError::CorruptSnapshot("seed is zero"))?;

        let grid = self.grid();
        if grid.height() != difficulty.height() || grid.width() != difficulty.width() {
            return Err(GameError::CorruptSnapshot("grid shape does not match difficulty"));
        }
        if self.num_cells() != difficulty.num_cells() {
            return Err(GameError::CorruptSnapshot("cell count does not match difficulty"));
        }
        if self.num_flagged() != grid.count_status(CellStatus::Flagged) {
            return Err(GameError::CorruptSnapshot("flag counter does not match grid"));
        }

        let expected_mines = if self.status.is_ready() {
            0
        } else {
            difficulty.num_mines()
        };
        if grid.count_mines() != expected_mines {
            return Err(GameError::CorruptSnapshot("mine count does not match status"));
        }
        if self.status.is_ready() && grid.iter().any(|(_, cell)| !cell.is_hidden()) {
            return Err(GameError::CorruptSnapshot("cells are open before the first reveal"));
        }
        let tally_mismatch = grid.iter().any(|(pos, cell)| {
            cell.mine_count()
                .is_some_and(|count| count != grid.adjacent_mine_count(pos))
        });
        if tally_mismatch {
            return Err(GameError::CorruptSnapshot("cell tally does not match its neighbors"));
        }

        let expected_flags = if self.status.is_finished() {
            0
        } else {
            i64::from(difficulty.num_mines()) - i64::from(self.num_flagged())
        };
        if self.remaining_flags != expected_flags {
            return Err(GameError::CorruptSnapshot("remaining flags do not match status"));
        }

        if let Some(saved) = self.saved_grid() {
            if saved.height() != grid.height() || saved.width() != grid.width() {
                return Err(GameError::CorruptSnapshot("saved grid shape does not match"));
            }
            if grid.iter().zip(saved.iter()).any(|((_, a), (_, b))| a.content != b.content) {
                return Err(GameError::CorruptSnapshot("saved grid has a different layout"));
            }
        }
        Ok(())
    }

    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        let game: Self = serde_json::from_str(snapshot)?;
        game.validate()?;
        Ok(game)
    }
}
