use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular container of cells, stored row by row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// All cells hidden water with a zero tally.
    pub fn new(height: Coord, width: Coord) -> Self {
        Self {
            cells: Array2::default((usize::from(height), usize::from(width))),
        }
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GameError::InvalidArgument("grid must have at least one cell"));
        }
        if height > usize::from(Coord::MAX) || width > usize::from(Coord::MAX) {
            return Err(GameError::InvalidArgument("grid is too large"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidArgument("grid rows must have equal length"));
        }
        let data = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((height, width), data)
            .map_err(|_| GameError::InvalidArgument("grid shape does not match its cells"))?;
        Ok(Self { cells })
    }

    pub fn height(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn width(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.height(), self.width())
    }

    pub fn contains(&self, coords: Coordinate) -> bool {
        coords.is_within_bounds(self.height(), self.width())
    }

    pub fn validate_coords(&self, coords: Coordinate) -> Result<Coordinate> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                coords,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    pub fn get(&self, coords: Coordinate) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Returns a new grid with the cell at `coords` replaced.
    pub fn set(&self, coords: Coordinate, cell: Cell) -> Result<Self> {
        let coords = self.validate_coords(coords)?;
        let mut next = self.clone();
        next[coords] = cell;
        Ok(next)
    }

    pub fn neighbors(&self, coords: Coordinate) -> impl Iterator<Item = Coordinate> + use<> {
        coords.neighbors(self.height(), self.width())
    }

    /// Cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| (Coordinate::new(x as Coord, y as Coord), cell))
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Cell> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }

    pub fn count_status(&self, status: CellStatus) -> CellCount {
        self.cells.iter().filter(|cell| cell.status == status).count() as CellCount
    }

    pub fn count_mines(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine()).count() as CellCount
    }

    /// Water cells that have been revealed.
    pub fn count_revealed_water(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| !cell.is_mine() && cell.status == CellStatus::Revealed)
            .count() as CellCount
    }

    pub(crate) fn adjacent_mine_count(&self, coords: Coordinate) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// Sets every cell to `status` except the ones `keep` selects.
    pub(crate) fn set_all_status(&mut self, status: CellStatus, keep: impl Fn(Cell) -> bool) {
        for cell in self.cells.iter_mut() {
            if !keep(*cell) {
                cell.status = status;
            }
        }
    }
}

impl Index<Coordinate> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coordinate) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coords: Coordinate) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: Coord, y: Coord) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn new_grid_is_hidden_and_empty() {
        let grid = Grid::new(2, 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.total_cells(), 6);
        assert!(grid.iter().all(|(_, cell)| cell == Cell::default()));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::new(2, 2);
        let coords: Vec<_> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(coords, vec![c(0, 0), c(1, 0), c(0, 1), c(1, 1)]);
    }

    #[test]
    fn set_returns_new_grid_and_leaves_original() {
        let grid = Grid::new(2, 3);
        let next = grid.set(c(2, 1), Cell::mine()).unwrap();

        assert!(next.get(c(2, 1)).unwrap().is_mine());
        assert!(!grid.get(c(2, 1)).unwrap().is_mine());
        assert_eq!(next.count_mines(), 1);
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let grid = Grid::new(2, 3);
        assert_eq!(
            grid.get(c(3, 0)),
            Err(GameError::OutOfBounds {
                coords: c(3, 0),
                width: 3,
                height: 2
            })
        );
        assert!(grid.set(c(0, 2), Cell::mine()).is_err());
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![Cell::default(); 2], vec![Cell::default(); 3]];
        assert!(matches!(
            Grid::from_rows(rows),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(Grid::from_rows(vec![]).is_err());
    }

    #[test]
    fn from_rows_indexes_by_row_then_column() {
        let rows = vec![
            vec![Cell::water(0), Cell::mine()],
            vec![Cell::water(1), Cell::water(1)],
            vec![Cell::water(0), Cell::water(0)],
        ];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 2);
        assert!(grid[c(1, 0)].is_mine());
        assert_eq!(grid.adjacent_mine_count(c(0, 1)), 1);
        assert_eq!(grid.adjacent_mine_count(c(0, 2)), 0);
    }
}
