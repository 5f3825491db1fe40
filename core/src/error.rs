use thiserror::Error;

use crate::{Coord, Coordinate};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Coordinate {coords} is outside the {width}x{height} board")]
    OutOfBounds {
        coords: Coordinate,
        width: Coord,
        height: Coord,
    },
    #[error("Illegal state: {0}")]
    IllegalState(&'static str),
    #[error("Snapshot is inconsistent: {0}")]
    CorruptSnapshot(&'static str),
    #[error("Snapshot could not be encoded or decoded: {0}")]
    SnapshotFormat(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::SnapshotFormat(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
