use crate::cell::CellState;
use crate::error::{Error, Result};
use crate::pos;
use core::fmt;
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;
use std::str::FromStr;

pub type Neighbours = SmallVec<[Point; 4]>;

/// Offsets in the order neighbours are listed: down, up, right, left. The search expands
/// neighbours in this order, so it fixes how ties between equal-cost paths are broken.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Screen geometry of a grid: `rows` cells along each side drawn into a square of `width` units.
/// Only renderers and pointer picking care about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub rows: usize,
    pub width: usize,
    /// Side length of a single cell.
    pub gap: usize,
}

impl Geometry {
    pub fn new(rows: usize, width: usize) -> Geometry {
        Geometry {
            rows,
            width,
            gap: (width / rows.max(1)).max(1),
        }
    }

    /// Maps a pointer position to the cell drawn under it.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<Point> {
        let row = y / self.gap;
        let col = x / self.gap;
        (row < self.rows && col < self.rows).then(|| pos(row, col))
    }

    /// Top-left corner of the square a cell is drawn in.
    pub fn origin(&self, point: Point) -> (usize, usize) {
        (point.x as usize * self.gap, point.y as usize * self.gap)
    }
}

/// [Grid] holds the state of every cell of a square board together with the adjacency the search
/// runs over. Neighbour lists are a snapshot: they are built by
/// [compute_neighbours](Self::compute_neighbours) and wall edits made afterwards only flag them as
/// stale. Connected components are derived from the same snapshot using a [UnionFind].
///
/// Points use `x` for the column and `y` for the row, see [pos].
#[derive(Clone, Debug)]
pub struct Grid {
    side: usize,
    geometry: Geometry,
    states: Vec<CellState>,
    neighbours: Vec<Neighbours>,
    components: UnionFind<usize>,
    neighbours_dirty: bool,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// An empty `side` x `side` grid drawn one unit per cell.
    pub fn new(side: usize) -> Grid {
        Grid::with_geometry(side, side)
    }

    /// An empty `rows` x `rows` grid drawn into a square of `width` units.
    pub fn with_geometry(rows: usize, width: usize) -> Grid {
        let n = rows * rows;
        Grid {
            side: rows,
            geometry: Geometry::new(rows, width),
            states: vec![CellState::Empty; n],
            neighbours: vec![Neighbours::new(); n],
            components: UnionFind::new(n),
            neighbours_dirty: true,
            start: None,
            end: None,
        }
    }

    /// Discards every cell state, the start and the end, and rebuilds the grid with a new geometry.
    pub fn reset(&mut self, rows: usize, width: usize) {
        info!("Resetting grid to {rows}x{rows}");
        *self = Grid::with_geometry(rows, width);
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Changes how wide the grid is drawn without touching any cell.
    pub fn set_width(&mut self, width: usize) {
        self.geometry = Geometry::new(self.side, width);
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.side
            && (point.y as usize) < self.side
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.side + point.x as usize
    }

    fn checked_ix(&self, point: Point) -> Result<usize> {
        if self.in_bounds(point) {
            Ok(self.get_ix_point(&point))
        } else {
            Err(Error::OutOfBounds {
                point,
                side: self.side,
            })
        }
    }

    pub fn get(&self, point: Point) -> Option<CellState> {
        self.in_bounds(point)
            .then(|| self.states[self.get_ix_point(&point)])
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        iproduct!(0..self.side, 0..self.side).map(move |(row, col)| {
            let p = pos(row, col);
            (p, self.states[self.get_ix_point(&p)])
        })
    }

    pub fn count(&self, state: CellState) -> usize {
        self.states.iter().filter(|s| **s == state).count()
    }

    /// Overwrites a cell, flagging the neighbours stale when a wall appears or disappears.
    fn put(&mut self, ix: usize, state: CellState) {
        if self.states[ix].is_wall() != state.is_wall() {
            self.neighbours_dirty = true;
        }
        self.states[ix] = state;
    }

    /// Places the start, moving it if one already exists. A wall under it is removed.
    pub fn set_start(&mut self, point: Point) -> Result<()> {
        let ix = self.checked_ix(point)?;
        if self.states[ix] == CellState::End {
            return Err(Error::Occupied {
                point,
                state: CellState::End,
            });
        }
        if let Some(old) = self.start.replace(point) {
            let old_ix = self.get_ix_point(&old);
            self.states[old_ix] = CellState::Empty;
        }
        self.put(ix, CellState::Start);
        Ok(())
    }

    /// Places the end, moving it if one already exists. A wall under it is removed.
    pub fn set_end(&mut self, point: Point) -> Result<()> {
        let ix = self.checked_ix(point)?;
        if self.states[ix] == CellState::Start {
            return Err(Error::Occupied {
                point,
                state: CellState::Start,
            });
        }
        if let Some(old) = self.end.replace(point) {
            let old_ix = self.get_ix_point(&old);
            self.states[old_ix] = CellState::Empty;
        }
        self.put(ix, CellState::End);
        Ok(())
    }

    /// Turns a cell into a wall. Refuses to cover the start or the end.
    pub fn set_wall(&mut self, point: Point) -> Result<()> {
        let ix = self.checked_ix(point)?;
        let state = self.states[ix];
        if state.is_endpoint() {
            return Err(Error::Occupied { point, state });
        }
        self.put(ix, CellState::Wall);
        Ok(())
    }

    /// Resets a cell to empty, forgetting the start or end if it was one.
    pub fn clear(&mut self, point: Point) -> Result<()> {
        let ix = self.checked_ix(point)?;
        if self.start == Some(point) {
            self.start = None;
        }
        if self.end == Some(point) {
            self.end = None;
        }
        self.put(ix, CellState::Empty);
        Ok(())
    }

    /// The edit a primary click performs: place the start if there is none, otherwise the end if
    /// there is none, otherwise a wall. Clicking the start or end leaves it alone. Returns the
    /// resulting state of the cell.
    pub fn paint(&mut self, point: Point) -> Result<CellState> {
        let ix = self.checked_ix(point)?;
        let state = self.states[ix];
        if self.start.is_none() && state != CellState::End {
            self.set_start(point)?;
        } else if self.end.is_none() && state != CellState::Start {
            self.set_end(point)?;
        } else if !state.is_endpoint() {
            self.set_wall(point)?;
        }
        Ok(self.states[ix])
    }

    /// The edit a secondary click performs.
    pub fn erase(&mut self, point: Point) -> Result<()> {
        self.clear(point)
    }

    /// Removes the frontier, visited and path marks of a previous run. Walls, start and end stay.
    pub fn clear_search(&mut self) {
        for state in self.states.iter_mut() {
            if state.is_search_decoration() {
                *state = CellState::Empty;
            }
        }
    }

    /// Scatters walls over empty cells, each one independently with probability `density`.
    pub fn scatter_walls<R: Rng>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        let mut placed = 0;
        for ix in 0..self.states.len() {
            if self.states[ix] == CellState::Empty && rng.gen_bool(density) {
                self.put(ix, CellState::Wall);
                placed += 1;
            }
        }
        debug!("Scattered {placed} walls at density {density}");
    }

    /// Paints search progress onto a cell. The start and end keep their own states.
    pub(crate) fn mark(&mut self, point: Point, state: CellState) {
        debug_assert!(state.is_search_decoration());
        let ix = self.get_ix_point(&point);
        if !self.states[ix].is_endpoint() {
            self.states[ix] = state;
        }
    }

    /// Rebuilds the neighbour list of every cell from the current walls and regenerates the
    /// connected components. Has to run after wall edits and before a search.
    pub fn compute_neighbours(&mut self) {
        let side = self.side as i32;
        for (row, col) in iproduct!(0..self.side, 0..self.side) {
            let point = pos(row, col);
            let ix = self.get_ix_point(&point);
            let neighbours = if self.states[ix].is_wall() {
                Neighbours::new()
            } else {
                NEUMANN_OFFSETS
                    .iter()
                    .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
                    .filter(|p| p.x >= 0 && p.y >= 0 && p.x < side && p.y < side)
                    .filter(|p| !self.states[self.get_ix_point(p)].is_wall())
                    .collect()
            };
            self.neighbours[ix] = neighbours;
        }
        self.neighbours_dirty = false;
        self.generate_components();
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.states.len());
        for ix in 0..self.neighbours.len() {
            for n in &self.neighbours[ix] {
                let n_ix = self.get_ix_point(n);
                self.components.union(ix, n_ix);
            }
        }
    }

    /// Whether walls were edited since the last [compute_neighbours](Self::compute_neighbours).
    pub fn is_stale(&self) -> bool {
        self.neighbours_dirty
    }

    /// Neighbours of a cell as of the last [compute_neighbours](Self::compute_neighbours).
    pub fn neighbours(&self, point: Point) -> &[Point] {
        match self.get(point) {
            Some(_) => self.neighbours[self.get_ix_point(&point)].as_slice(),
            None => &[],
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.in_bounds(*point)
            .then(|| self.components.find(self.get_ix_point(point)))
    }

    /// Checks if start and goal are on the same component. Only meaningful while the neighbours
    /// are not stale.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_component(start), self.get_component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.side {
            let line = (0..self.side)
                .map(|col| self.states[self.get_ix_point(&pos(row, col))].glyph())
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses a square layout of `.` (empty), `#` (wall), `S` (start) and `E` (end), one line per
/// row. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Grid> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        let side = lines.len();
        let mut grid = Grid::new(side);
        for (row, line) in lines.iter().enumerate() {
            let columns = line.chars().count();
            if columns != side {
                return Err(Error::NotSquare {
                    rows: side,
                    columns,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let point = pos(row, col);
                let layout_err = Error::Layout {
                    line: row + 1,
                    column: col + 1,
                    found: c,
                };
                match CellState::from_glyph(c) {
                    Some(CellState::Empty) => {}
                    Some(CellState::Wall) => grid.set_wall(point)?,
                    Some(CellState::Start) if grid.start.is_none() => grid.set_start(point)?,
                    Some(CellState::End) if grid.end.is_none() => grid.set_end(point)?,
                    _ => return Err(layout_err),
                }
            }
        }
        Ok(grid)
    }
}
