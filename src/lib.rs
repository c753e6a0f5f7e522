//! # astar_visualizer
//!
//! An interactive grid pathfinding visualizer built around an incremental
//! [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm). The user paints walls and picks
//! a start and an end on a square grid, then watches the search grow its frontier and reveal the
//! shortest route.
//!
//! The core is independent of any display: [astar] paints [CellState]s onto a [Grid] and hands
//! the grid to a [Visualizer] after every step. Moves are orthogonal with unit cost and the
//! heuristic is the Manhattan distance, so the route found is a shortest one. A host can stop a
//! run early through a [CancelToken].
//!
//! ```
//! use astar_visualizer::{astar, pos, CancelToken, Grid, NoRedraw};
//!
//! let mut grid: Grid = "
//!     S.#
//!     ..#
//!     ..E
//! "
//! .parse()
//! .unwrap();
//! grid.compute_neighbours();
//! let outcome = astar(&mut grid, &mut NoRedraw, &CancelToken::new()).unwrap();
//! assert_eq!(outcome.path_len(), Some(4));
//! assert!(outcome.path().unwrap().contains(&pos(2, 1)));
//! ```
pub mod app;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod path;
pub mod render;
pub mod search;
pub mod visualizer;

pub use crate::cell::CellState;
pub use crate::error::{Error, InvalidState, Result};
pub use crate::grid::{Geometry, Grid};
pub use crate::search::{astar, CancelToken, SearchOutcome, SearchStats};
pub use crate::visualizer::{NoRedraw, Visualizer};
pub use grid_util::point::Point;

/// The point of the cell at `row`, `col`. Points store the column in `x` and the row in `y`.
pub fn pos(row: usize, col: usize) -> Point {
    Point::new(col as i32, row as i32)
}
