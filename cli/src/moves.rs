use std::str::FromStr;

use sweeper_core::{Action, Coordinate};

/// A single move on the command line: `r:X,Y`, `f:X,Y`, `t` or `u`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Reveal(Coordinate),
    Flag(Coordinate),
    Tick,
    Undo,
}

impl From<Move> for Action {
    fn from(other: Move) -> Self {
        match other {
            Move::Reveal(coords) => Action::Reveal(coords),
            Move::Flag(coords) => Action::ToggleFlag(coords),
            Move::Tick => Action::Tick,
            Move::Undo => Action::UndoLosingMove,
        }
    }
}

fn parse_coords(s: &str) -> Result<Coordinate, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x: i64 = x.trim().parse().map_err(|_| format!("bad x in {s:?}"))?;
    let y: i64 = y.trim().parse().map_err(|_| format!("bad y in {s:?}"))?;
    Coordinate::try_new(x, y).map_err(|err| err.to_string())
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("r", coords)) => Ok(Move::Reveal(parse_coords(coords)?)),
            Some(("f", coords)) => Ok(Move::Flag(parse_coords(coords)?)),
            None if s == "t" => Ok(Move::Tick),
            None if s == "u" => Ok(Move::Undo),
            _ => Err(format!("unknown move {s:?}, use r:X,Y f:X,Y t or u")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_moves() {
        assert_eq!(
            "r:3,4".parse(),
            Ok(Move::Reveal(Coordinate::new(3, 4)))
        );
        assert_eq!("f:0, 2".parse(), Ok(Move::Flag(Coordinate::new(0, 2))));
        assert_eq!("t".parse(), Ok(Move::Tick));
        assert_eq!("u".parse(), Ok(Move::Undo));
    }

    #[test]
    fn rejects_bad_input() {
        assert!("r:-1,2".parse::<Move>().is_err());
        assert!("r:1".parse::<Move>().is_err());
        assert!("x:1,1".parse::<Move>().is_err());
        assert!("tick".parse::<Move>().is_err());
    }

    #[test]
    fn maps_to_actions() {
        assert_eq!(Action::from(Move::Undo), Action::UndoLosingMove);
        assert_eq!(
            Action::from(Move::Flag(Coordinate::new(1, 1))),
            Action::ToggleFlag(Coordinate::new(1, 1))
        );
    }
}
