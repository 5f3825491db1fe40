/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Converts a board position into the `[row, column]` index used by `ndarray`.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Number of cells on a `height` x `width` board. Two `Coord`s always fit in a `CellCount`.
pub const fn area(height: Coord, width: Coord) -> CellCount {
    height as CellCount * width as CellCount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_does_not_overflow_coord() {
        assert_eq!(area(Coord::MAX, Coord::MAX), 4_294_836_225);
        assert_eq!(area(16, 30), 480);
    }
}
