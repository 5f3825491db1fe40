use core::fmt;

use crate::*;

const HIDDEN: char = '#';
const FLAG: char = 'F';
const MINE: char = '*';
const DETONATED: char = 'X';
const EMPTY: char = '.';

fn cell_char(cell: Cell, reveal_all: bool) -> char {
    match (cell.status, cell.content) {
        (CellStatus::Detonated, _) => DETONATED,
        (CellStatus::Hidden, _) if !reveal_all => HIDDEN,
        (CellStatus::Flagged, _) if !reveal_all => FLAG,
        (_, CellContent::Mine) => MINE,
        (_, CellContent::Water { mine_count: 0 }) => EMPTY,
        (_, CellContent::Water { mine_count }) => char::from(b'0' + mine_count.min(9)),
    }
}

/// Renders the grid one row per line, cells separated by a space.
///
/// With `reveal_all` the content of hidden and flagged cells is shown too.
pub fn board_to_string(grid: &Grid, reveal_all: bool) -> String {
    let mut out = String::new();
    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, cell) in row.enumerate() {
            if j > 0 {
                out.push(' ');
            }
            out.push(cell_char(cell, reveal_all));
        }
    }
    out
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&board_to_string(self, false))
    }
}
