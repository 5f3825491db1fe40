use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// A position on the board, `x` is the column and `y` is the row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: Coord,
    pub y: Coord,
}

impl Coordinate {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Builds a coordinate from signed input, rejecting negative or oversized components.
    pub fn try_new(x: i64, y: i64) -> Result<Self> {
        if x < 0 || y < 0 {
            return Err(GameError::InvalidArgument(
                "coordinate components must not be negative",
            ));
        }
        let x = Coord::try_from(x)
            .map_err(|_| GameError::InvalidArgument("coordinate x is too large"))?;
        let y = Coord::try_from(y)
            .map_err(|_| GameError::InvalidArgument("coordinate y is too large"))?;
        Ok(Self { x, y })
    }

    pub const fn is_within_bounds(self, height: Coord, width: Coord) -> bool {
        self.x < width && self.y < height
    }

    /// King-move distance: how many single steps (diagonals included) separate two cells.
    pub const fn step_distance(self, other: Self) -> Coord {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }

    pub const fn is_adjacent(self, other: Self) -> bool {
        self.step_distance(other) == 1
    }

    /// Iterates the up to 8 neighbors that fall inside a `height` x `width` board, row by row.
    pub fn neighbors(self, height: Coord, width: Coord) -> impl Iterator<Item = Coordinate> {
        (-1..=1i16)
            .flat_map(|dy| (-1..=1i16).map(move |dx| (dx, dy)))
            .filter(|&offset| offset != (0, 0))
            .filter_map(move |(dx, dy)| {
                let next = Self::new(
                    self.x.checked_add_signed(dx)?,
                    self.y.checked_add_signed(dy)?,
                );
                next.is_within_bounds(height, width).then_some(next)
            })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(Coord, Coord)> for Coordinate {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

impl TryFrom<(i64, i64)> for Coordinate {
    type Error = GameError;

    fn try_from((x, y): (i64, i64)) -> Result<Self> {
        Self::try_new(x, y)
    }
}

impl ToNdIndex for Coordinate {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.y.into(), self.x.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_negative_components() {
        assert!(matches!(
            Coordinate::try_new(-1, 0),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            Coordinate::try_new(0, -3),
            Err(GameError::InvalidArgument(_))
        ));
        assert_eq!(Coordinate::try_new(2, 5), Ok(Coordinate::new(2, 5)));
    }

    #[test]
    fn try_new_rejects_oversized_components() {
        assert!(Coordinate::try_new(i64::from(Coord::MAX) + 1, 0).is_err());
    }

    #[test]
    fn equality_is_by_component() {
        assert_eq!(Coordinate::new(1, 2), Coordinate::from((1, 2)));
        assert_ne!(Coordinate::new(1, 2), Coordinate::new(2, 1));
    }

    #[test]
    fn bounds_check_uses_height_then_width() {
        let c = Coordinate::new(4, 1);
        assert!(c.is_within_bounds(2, 5));
        assert!(!c.is_within_bounds(5, 2));
        assert!(!Coordinate::new(0, 2).is_within_bounds(2, 5));
    }

    #[test]
    fn step_distance_counts_diagonals_as_one() {
        let origin = Coordinate::new(3, 3);
        assert_eq!(origin.step_distance(origin), 0);
        assert_eq!(origin.step_distance(Coordinate::new(4, 4)), 1);
        assert_eq!(origin.step_distance(Coordinate::new(5, 2)), 2);
        assert!(origin.is_adjacent(Coordinate::new(2, 4)));
        assert!(!origin.is_adjacent(Coordinate::new(1, 3)));
    }

    #[test]
    fn neighbors_are_clipped_at_edges() {
        let corner: Vec<_> = Coordinate::new(0, 0).neighbors(3, 3).collect();
        assert_eq!(
            corner,
            vec![
                Coordinate::new(1, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1)
            ]
        );

        let center: Vec<_> = Coordinate::new(1, 1).neighbors(3, 3).collect();
        assert_eq!(center.len(), 8);
        assert!(!center.contains(&Coordinate::new(1, 1)));
    }

    #[test]
    fn neighbors_respect_non_square_bounds() {
        let edge: Vec<_> = Coordinate::new(3, 0).neighbors(1, 4).collect();
        assert_eq!(edge, vec![Coordinate::new(2, 0)]);
    }
}
