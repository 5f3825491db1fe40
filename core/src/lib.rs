use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use coordinate::*;
pub use error::*;
pub use game::*;
pub use grid::*;
pub use random::*;
pub use reducer::*;
pub use render::*;
pub use types::*;

mod board;
mod cell;
mod coordinate;
mod error;
mod game;
mod grid;
mod random;
mod reducer;
mod render;
mod types;

/// Board dimensions and mine count, fixed for the lifetime of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    height: Coord,
    width: Coord,
    num_mines: CellCount,
}

impl Difficulty {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(16, 30, 99);

    const fn new_unchecked(height: Coord, width: Coord, num_mines: CellCount) -> Self {
        Self {
            height,
            width,
            num_mines,
        }
    }

    pub fn new(height: Coord, width: Coord, num_mines: CellCount) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::InvalidArgument("board dimensions must be positive"));
        }
        if num_mines == 0 {
            return Err(GameError::InvalidArgument("mine count must be positive"));
        }
        if num_mines >= area(height, width) {
            return Err(GameError::InvalidArgument(
                "mine count must be smaller than the number of cells",
            ));
        }
        Ok(Self::new_unchecked(height, width, num_mines))
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn num_mines(&self) -> CellCount {
        self.num_mines
    }

    pub const fn num_cells(&self) -> CellCount {
        area(self.height, self.width)
    }

    pub const fn num_water_cells(&self) -> CellCount {
        self.num_cells() - self.num_mines
    }

    /// Re-runs the construction checks, used on values that skipped `new`.
    pub fn validate(self) -> Result<Self> {
        Self::new(self.height, self.width, self.num_mines)
    }
}

/// Outcome of revealing a hidden cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed,
    HitMine,
    Won,
}
