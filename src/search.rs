//! The A* search engine.
//!
//! The engine mirrors the textbook loop but is driven for display: every cell it queues is
//! painted [CellState::Frontier], every cell it finishes is painted [CellState::Visited], and the
//! [Visualizer] is called once per expansion. Those marks are left in place whatever the outcome.
use crate::cell::CellState;
use crate::error::{InvalidState, Result};
use crate::grid::{Grid, Neighbours};
use crate::heuristic::{manhattan, EDGE_COST, UNREACHED};
use crate::path::reconstruct_path;
use crate::visualizer::Visualizer;
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Shared flag a host raises to stop a running search. The search checks it once per expansion,
/// so it can be raised from inside a [Visualizer] or from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }

    /// Lowers the flag again so the token can be handed to the next run.
    pub fn reset(&self) {
        self.0.store(false, AtomicOrdering::Relaxed);
    }
}

/// Counters describing how much work a run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Entries popped from the open set.
    pub expanded: usize,
    /// Entries pushed onto the open set, the start excluded.
    pub pushed: usize,
    /// Pushes of cells that had already been expanded and were reached again more cheaply.
    pub reopened: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end was reached. `path` runs from start to end, both included.
    Found { path: Vec<Point>, stats: SearchStats },
    /// The open set ran dry: start and end are not connected.
    NoPath { stats: SearchStats },
    /// The [CancelToken] was raised before the search finished.
    Cancelled { stats: SearchStats },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchOutcome::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Number of moves on the found path.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            SearchOutcome::Found { stats, .. }
            | SearchOutcome::NoPath { stats }
            | SearchOutcome::Cancelled { stats } => *stats,
        }
    }
}

/// Open set entry. Ordered so that the [BinaryHeap] pops the lowest estimated cost first and,
/// among equal estimates, the entry pushed first.
struct OpenEntry {
    estimated_cost: u32,
    order: u64,
    point: Point,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.order == other.order
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.order.cmp(&self.order),
            s => s,
        }
    }
}

/// Scores, predecessors and the open set of a single run.
pub(crate) struct SearchState {
    end: Point,
    g_score: FxHashMap<Point, u32>,
    f_score: FxHashMap<Point, u32>,
    came_from: FxIndexMap<Point, Point>,
    open: BinaryHeap<OpenEntry>,
    open_members: FxHashSet<Point>,
    order: u64,
}

impl SearchState {
    pub(crate) fn new(start: Point, end: Point) -> SearchState {
        let mut state = SearchState {
            end,
            g_score: FxHashMap::default(),
            f_score: FxHashMap::default(),
            came_from: FxIndexMap::default(),
            open: BinaryHeap::new(),
            open_members: FxHashSet::default(),
            order: 0,
        };
        state.g_score.insert(start, 0);
        state.f_score.insert(start, manhattan(&start, &end));
        state.open.push(OpenEntry {
            estimated_cost: state.f(&start),
            order: 0,
            point: start,
        });
        state.open_members.insert(start);
        state
    }

    pub(crate) fn g(&self, point: &Point) -> u32 {
        self.g_score.get(point).copied().unwrap_or(UNREACHED)
    }

    pub(crate) fn f(&self, point: &Point) -> u32 {
        self.f_score.get(point).copied().unwrap_or(UNREACHED)
    }

    pub(crate) fn came_from(&self) -> &FxIndexMap<Point, Point> {
        &self.came_from
    }

    /// Removes the best entry from the open set.
    pub(crate) fn pop(&mut self) -> Option<Point> {
        let OpenEntry { point, .. } = self.open.pop()?;
        self.open_members.remove(&point);
        Some(point)
    }

    /// Tries to improve `neighbour` by reaching it from `current`. Returns true when the
    /// neighbour was newly pushed onto the open set. A neighbour that is already queued has its
    /// scores updated but keeps its original place in the queue. An expanded neighbour is pushed
    /// again only when its cost strictly improves.
    pub(crate) fn relax(&mut self, current: Point, neighbour: Point) -> bool {
        let tentative = self.g(&current).saturating_add(EDGE_COST);
        if tentative >= self.g(&neighbour) {
            return false;
        }
        self.came_from.insert(neighbour, current);
        self.g_score.insert(neighbour, tentative);
        self.f_score
            .insert(neighbour, tentative + manhattan(&neighbour, &self.end));
        if !self.open_members.insert(neighbour) {
            return false;
        }
        self.order += 1;
        self.open.push(OpenEntry {
            estimated_cost: self.f(&neighbour),
            order: self.order,
            point: neighbour,
        });
        true
    }
}

/// Checks the preconditions of a run and returns its start and end.
fn endpoints(grid: &Grid) -> std::result::Result<(Point, Point), InvalidState> {
    let start = grid.start().ok_or(InvalidState::MissingStart)?;
    let end = grid.end().ok_or(InvalidState::MissingEnd)?;
    if grid.is_stale() {
        return Err(InvalidState::StaleNeighbours);
    }
    Ok((start, end))
}

/// Searches for a shortest route from the grid's start to its end, painting progress onto the
/// grid and calling `visualizer` after every step. On success the route is painted as
/// [CellState::Path] before returning.
///
/// The grid needs a start, an end and up to date neighbours
/// ([compute_neighbours](Grid::compute_neighbours)), otherwise an
/// [InvalidState](crate::Error::InvalidState) error is returned and nothing is painted.
/// Not finding a path is a normal [SearchOutcome::NoPath].
pub fn astar<V>(grid: &mut Grid, visualizer: &mut V, cancel: &CancelToken) -> Result<SearchOutcome>
where
    V: Visualizer + ?Sized,
{
    let (start, end) = endpoints(grid)?;
    let mut state = SearchState::new(start, end);
    Ok(run(grid, &mut state, visualizer, cancel))
}

pub(crate) fn run<V>(
    grid: &mut Grid,
    state: &mut SearchState,
    visualizer: &mut V,
    cancel: &CancelToken,
) -> SearchOutcome
where
    V: Visualizer + ?Sized,
{
    let (start, end) = (grid.start(), grid.end());
    info!("Searching from {:?} to {:?}", start, end);
    let mut stats = SearchStats::default();
    loop {
        if cancel.is_cancelled() {
            info!("Search cancelled after {} expansions", stats.expanded);
            return SearchOutcome::Cancelled { stats };
        }
        let Some(current) = state.pop() else {
            break;
        };
        stats.expanded += 1;

        if Some(current) == end {
            let path = reconstruct_path(grid, state.came_from(), current, visualizer);
            info!(
                "Found a path of {} steps after {} expansions",
                path.len() - 1,
                stats.expanded
            );
            return SearchOutcome::Found { path, stats };
        }

        let neighbours: Neighbours = grid.neighbours(current).iter().copied().collect();
        for neighbour in neighbours {
            let expanded_before = grid.get(neighbour) == Some(CellState::Visited);
            if state.relax(current, neighbour) {
                stats.pushed += 1;
                if expanded_before {
                    stats.reopened += 1;
                }
                grid.mark(neighbour, CellState::Frontier);
            }
        }

        visualizer.redraw(grid);

        if Some(current) != start {
            grid.mark(current, CellState::Visited);
        }
    }

    if let (Some(s), Some(e)) = (start, end) {
        if grid.reachable(&s, &e) {
            warn!("Reachable end could not be pathed to, are the neighbours up to date?");
        }
    }
    debug!("Open set exhausted after {} expansions", stats.expanded);
    SearchOutcome::NoPath { stats }
}
