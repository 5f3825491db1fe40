use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::*;

/// Cells closer than this (in king steps) to the first revealed cell never hold a mine.
const SAFE_RADIUS: Coord = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    difficulty: Difficulty,
    grid: Grid,
    num_cells: CellCount,
    num_flagged: CellCount,
    saved_grid: Option<Grid>,
}

impl Board {
    /// Board with no mines yet, every cell hidden.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            grid: Grid::new(difficulty.height(), difficulty.width()),
            num_cells: difficulty.num_cells(),
            num_flagged: 0,
            saved_grid: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn num_cells(&self) -> CellCount {
        self.num_cells
    }

    pub fn num_flagged(&self) -> CellCount {
        self.num_flagged
    }

    /// Grid as it was right before the losing reveal.
    pub fn saved_grid(&self) -> Option<&Grid> {
        self.saved_grid.as_ref()
    }

    pub fn has_mines(&self) -> bool {
        self.grid.count_mines() > 0
    }

    pub fn validate_coords(&self, coords: Coordinate) -> Result<Coordinate> {
        self.grid.validate_coords(coords)
    }

    /// Every water cell is revealed.
    pub fn is_won(&self) -> bool {
        self.has_mines() && self.grid.count_revealed_water() == self.difficulty.num_water_cells()
    }

    /// Places mines around `first` and reveals it.
    ///
    /// No mine lands within one step of `first`, unless the board is too crowded for that, in
    /// which case only `first` itself is kept clear.
    pub fn initiate(&self, first: Coordinate, rng: &mut Lcg) -> Result<(Self, RevealOutcome)> {
        let first = self.validate_coords(first)?;
        if self.has_mines() {
            return Err(GameError::IllegalState("mines have already been placed"));
        }

        let mines = self.place_mines(first, rng);
        let mut grid = self.grid.clone();
        for &pos in &mines {
            grid[pos] = Cell::mine().with_status(grid[pos].status);
        }
        for (pos, cell) in self.grid.iter() {
            if !mines.contains(&pos) {
                grid[pos] = Cell::water(grid.adjacent_mine_count(pos)).with_status(cell.status);
            }
        }

        if grid[first].is_mine() {
            return Err(GameError::IllegalState("first revealed cell holds a mine"));
        }
        log::debug!(
            "Placed {} mines around first reveal at {}",
            mines.len(),
            first
        );

        let mut next = Self {
            difficulty: self.difficulty,
            grid,
            num_cells: self.num_cells,
            num_flagged: self.num_flagged,
            saved_grid: None,
        };
        next.flood_reveal(first);
        Ok(next.settle())
    }

    fn place_mines(&self, first: Coordinate, rng: &mut Lcg) -> HashSet<Coordinate> {
        let height = self.difficulty.height();
        let width = self.difficulty.width();
        let wanted = self.difficulty.num_mines() as usize;

        let outside_safe_zone = self
            .grid
            .iter()
            .filter(|&(pos, _)| pos.step_distance(first) >= SAFE_RADIUS)
            .count();
        let radius = if wanted <= outside_safe_zone {
            SAFE_RADIUS
        } else {
            log::warn!(
                "Cannot keep neighbors of {} clear with {} mines, only the cell itself stays safe",
                first,
                wanted
            );
            1
        };

        let mut mines = HashSet::with_capacity(wanted);
        while mines.len() < wanted {
            let x = rng.next_below(width);
            let y = rng.next_below(height);
            let pos = Coordinate::new(x, y);
            if pos.step_distance(first) < radius {
                continue;
            }
            mines.insert(pos);
        }
        mines
    }

    /// Reveals the hidden cell at `coords`, returns `None` when nothing changes.
    pub fn reveal(&self, coords: Coordinate) -> Result<Option<(Self, RevealOutcome)>> {
        let coords = self.validate_coords(coords)?;
        let cell = self.grid[coords];
        if !cell.is_hidden() {
            return Ok(None);
        }

        let mut next = self.clone();
        if cell.is_mine() {
            next.detonate(coords);
            return Ok(Some((next, RevealOutcome::HitMine)));
        }

        next.flood_reveal(coords);
        Ok(Some(next.settle()))
    }

    /// Flags a hidden cell or clears an existing flag, returns `None` for open cells.
    pub fn toggle_flag(&self, coords: Coordinate) -> Result<Option<Self>> {
        let coords = self.validate_coords(coords)?;
        let cell = self.grid[coords];

        let mut next = match cell.status {
            CellStatus::Hidden => {
                let mut next = self.clone();
                next.grid[coords] = cell.with_status(CellStatus::Flagged);
                next.num_flagged += 1;
                next
            }
            CellStatus::Flagged => {
                let mut next = self.clone();
                next.grid[coords] = cell.with_status(CellStatus::Hidden);
                next.num_flagged -= 1;
                next
            }
            CellStatus::Revealed | CellStatus::Detonated => return Ok(None),
        };
        if next.is_won() {
            next.reveal_everything();
        }
        Ok(Some(next))
    }

    /// Puts back the grid saved by the losing reveal.
    pub fn restore_saved_grid(&self) -> Result<Self> {
        let Some(saved) = &self.saved_grid else {
            return Err(GameError::IllegalState("no saved grid to restore"));
        };
        Ok(Self {
            difficulty: self.difficulty,
            num_cells: self.num_cells,
            num_flagged: saved.count_status(CellStatus::Flagged),
            grid: saved.clone(),
            saved_grid: None,
        })
    }

    /// Reveals `start` and, through zero cells, everything connected to it.
    fn flood_reveal(&mut self, start: Coordinate) {
        let mut visited = HashSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(pos) = to_visit.pop_front() {
            let cell = self.grid[pos];
            // skip flagged or already opened cells
            if !cell.is_hidden() || cell.is_mine() {
                log::trace!("Skipping cell at {}", pos);
                continue;
            }

            self.grid[pos] = cell.with_status(CellStatus::Revealed);
            log::trace!("Revealed cell at {}, mine count: {:?}", pos, cell.mine_count());

            if cell.mine_count() == Some(0) {
                let grid = &self.grid;
                to_visit.extend(
                    grid.neighbors(pos)
                        .filter(|&next| grid[next].is_hidden())
                        .filter(|&next| visited.insert(next)),
                );
            }
        }
    }

    /// Checks the win condition after cells were revealed.
    fn settle(mut self) -> (Self, RevealOutcome) {
        if self.is_won() {
            self.reveal_everything();
            (self, RevealOutcome::Won)
        } else {
            (self, RevealOutcome::Revealed)
        }
    }

    fn detonate(&mut self, coords: Coordinate) {
        log::debug!("Mine hit at {}", coords);
        self.saved_grid = Some(self.grid.clone());
        self.grid[coords] = self.grid[coords].with_status(CellStatus::Detonated);
        self.grid
            .set_all_status(CellStatus::Revealed, |cell| cell.status == CellStatus::Detonated);
        self.num_flagged = 0;
    }

    fn reveal_everything(&mut self) {
        self.grid.set_all_status(CellStatus::Revealed, |_| false);
        self.num_flagged = 0;
    }
}
