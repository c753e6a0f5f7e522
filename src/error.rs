//! Error types for grid editing and search.

use grid_util::point::Point;
use thiserror::Error;

use crate::cell::CellState;

/// Grid states in which a search cannot be started.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidState {
    #[error("no start cell has been placed")]
    MissingStart,

    #[error("no end cell has been placed")]
    MissingEnd,

    #[error("walls were edited after the neighbours were computed")]
    StaleNeighbours,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{point} lies outside the {side}x{side} grid")]
    OutOfBounds { point: Point, side: usize },

    #[error("{point} is occupied by {state:?}")]
    Occupied { point: Point, state: CellState },

    #[error("invalid grid state: {0}")]
    InvalidState(#[from] InvalidState),

    #[error("layout line {line}, column {column}: unexpected {found:?}")]
    Layout {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("layout is {rows} rows by {columns} columns, expected a square")]
    NotSquare { rows: usize, columns: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
