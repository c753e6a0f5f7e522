/// Fuzzes the search by checking for many random grids that it finds a path exactly when the end
/// is on the start's connected component, that the path is as short as a breadth-first search
/// says it can be, and that a failed search never paints outside the start's component.
use astar_visualizer::{astar, pos, CancelToken, CellState, Grid, NoRedraw, Point, SearchOutcome};
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

fn random_grid(n: usize, density: f64, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(n);
    grid.scatter_walls(rng, density);
    let (start, end) = (pos(0, 0), pos(n - 1, n - 1));
    grid.set_start(start).unwrap();
    grid.set_end(end).unwrap();
    grid.compute_neighbours();
    grid
}

fn visualize_grid(grid: &Grid) {
    println!("{}", grid);
}

/// Shortest distance in moves, following the same neighbour lists as the search.
fn bfs_distance(grid: &Grid, start: Point, end: Point) -> Option<usize> {
    let mut distance = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(p) = queue.pop_front() {
        let d = distance[&p];
        if p == end {
            return Some(d);
        }
        for &n in grid.neighbours(p) {
            distance.entry(n).or_insert_with(|| {
                queue.push_back(n);
                d + 1
            });
        }
    }
    None
}

fn is_valid_route(grid: &Grid, path: &[Point]) -> bool {
    path.windows(2)
        .all(|w| grid.neighbours(w[0]).contains(&w[1]))
}

#[test]
fn fuzz() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let cancel = CancelToken::new();
    for n in [2, 5, 10, 16] {
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(n, 0.35, &mut rng);
            let (start, end) = (pos(0, 0), pos(n - 1, n - 1));
            let reachable = grid.reachable(&start, &end);
            let shortest = bfs_distance(&grid, start, end);
            let outcome = astar(&mut grid, &mut NoRedraw, &cancel).unwrap();
            if outcome.is_found() != reachable || outcome.path_len() != shortest {
                visualize_grid(&grid);
            }
            assert_eq!(outcome.is_found(), reachable);
            assert_eq!(outcome.path_len(), shortest);
            match &outcome {
                SearchOutcome::Found { path, .. } => {
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&end));
                    assert!(is_valid_route(&grid, path));
                    assert_eq!(grid.count(CellState::Path), path.len() - 2);
                }
                SearchOutcome::NoPath { .. } => {
                    assert_eq!(grid.count(CellState::Path), 0);
                    for (p, state) in grid.cells() {
                        let explored = matches!(state, CellState::Frontier | CellState::Visited);
                        assert!(!explored || grid.reachable(&start, &p));
                        if p != start && grid.reachable(&start, &p) {
                            assert_eq!(state, CellState::Visited);
                        }
                    }
                }
                SearchOutcome::Cancelled { .. } => unreachable!(),
            }
        }
    }
}

#[test]
fn fuzz_determinism() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(1);
    let cancel = CancelToken::new();
    for _ in 0..200 {
        let template = random_grid(N, 0.35, &mut rng);
        let mut traces = Vec::new();
        for _ in 0..2 {
            let mut grid = template.clone();
            let mut frames = Vec::new();
            let outcome = astar(&mut grid, &mut |g: &Grid| frames.push(g.to_string()), &cancel)
                .unwrap();
            traces.push((outcome, frames));
        }
        assert_eq!(traces[0], traces[1]);
    }
}

/// An expanded cell only goes back to the frontier when it is reached more cheaply, which the
/// search counts as a reopening. When the open set runs dry every reopened cell has been
/// expanded again, so expansions split exactly into first visits and reopenings.
#[test]
fn fuzz_reopening() {
    let mut rng = StdRng::seed_from_u64(3);
    let cancel = CancelToken::new();
    let mut total_reopened = 0;
    for n in [4, 8, 16] {
        for _ in 0..3000 {
            let mut grid = random_grid(n, 0.3, &mut rng);
            let start = pos(0, 0);
            let mut previous: Option<Grid> = None;
            let mut seen_reopening = 0;
            let outcome = astar(
                &mut grid,
                &mut |g: &Grid| {
                    if let Some(before) = &previous {
                        seen_reopening += g
                            .cells()
                            .filter(|&(p, state)| {
                                state == CellState::Frontier
                                    && before.get(p) == Some(CellState::Visited)
                            })
                            .count();
                    }
                    previous = Some(g.clone());
                },
                &cancel,
            )
            .unwrap();
            let stats = outcome.stats();
            assert!(seen_reopening <= stats.reopened);
            if let SearchOutcome::NoPath { .. } = outcome {
                assert_eq!(stats.expanded, stats.pushed + 1);
                let first_visits = grid
                    .cells()
                    .filter(|&(p, _)| p != start && grid.reachable(&start, &p))
                    .count()
                    + 1;
                assert_eq!(stats.expanded - stats.reopened, first_visits);
                assert_eq!(grid.count(CellState::Visited) + 1, first_visits);
            }
            total_reopened += stats.reopened;
        }
    }
    assert!(total_reopened > 0);
}
