use serde::{Deserialize, Serialize};

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Hidden,
    Flagged,
    Revealed,
    /// The mine that ended the game.
    Detonated,
}

/// What a cell holds underneath, fixed once the board is filled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Water { mine_count: u8 },
    Mine,
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Water { mine_count: 0 }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub status: CellStatus,
    pub content: CellContent,
}

impl Cell {
    pub const fn water(mine_count: u8) -> Self {
        Self {
            status: CellStatus::Hidden,
            content: CellContent::Water { mine_count },
        }
    }

    pub const fn mine() -> Self {
        Self {
            status: CellStatus::Hidden,
            content: CellContent::Mine,
        }
    }

    pub const fn with_status(self, status: CellStatus) -> Self {
        Self {
            status,
            content: self.content,
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self.content, CellContent::Mine)
    }

    /// Adjacent mine tally, `None` for mine cells.
    pub const fn mine_count(self) -> Option<u8> {
        match self.content {
            CellContent::Water { mine_count } => Some(mine_count),
            CellContent::Mine => None,
        }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.status, CellStatus::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.status, CellStatus::Flagged)
    }

    /// Revealed or detonated, either way the content is on display.
    pub const fn is_open(self) -> bool {
        matches!(self.status, CellStatus::Revealed | CellStatus::Detonated)
    }
}
