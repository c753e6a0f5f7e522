use astar_visualizer::{astar, pos, CancelToken, CellState, Grid, NoRedraw, SearchOutcome};

/// A 5x5 grid with a wall in column 2 covering `wall_rows`.
fn wall_column(wall_rows: std::ops::Range<usize>) -> Grid {
    let mut grid = Grid::new(5);
    grid.set_start(pos(0, 0)).unwrap();
    grid.set_end(pos(4, 4)).unwrap();
    for row in wall_rows {
        grid.set_wall(pos(row, 2)).unwrap();
    }
    grid.compute_neighbours();
    grid
}

#[test]
fn gap_in_wall_column() {
    let mut grid = wall_column(0..4);
    let outcome = astar(&mut grid, &mut NoRedraw, &CancelToken::new()).unwrap();
    assert_eq!(outcome.path_len(), Some(8));
    assert!(outcome.path().unwrap().contains(&pos(4, 2)));
    assert_eq!(grid.get(pos(4, 2)), Some(CellState::Path));
}

#[test]
fn closed_wall_column() {
    let mut grid = wall_column(0..5);
    let outcome = astar(&mut grid, &mut NoRedraw, &CancelToken::new()).unwrap();
    assert!(matches!(outcome, SearchOutcome::NoPath { .. }));
    for row in 0..5 {
        for col in 3..5 {
            assert!(!matches!(
                grid.get(pos(row, col)),
                Some(CellState::Frontier | CellState::Visited)
            ));
        }
    }
}

/// Every cell newly painted as frontier borders a cell the search had already reached.
#[test]
fn frontier_grows_from_the_expanded_cell() {
    let mut grid = wall_column(0..4);
    let neighbours = grid.clone();
    let mut previous = grid.to_string();
    let mut checked = 0;
    astar(
        &mut grid,
        &mut |g: &Grid| {
            let frame = g.to_string();
            let before = previous.lines().collect::<Vec<_>>();
            let new_frontier = g
                .cells()
                .filter(|(p, state)| {
                    *state == CellState::Frontier
                        && before[p.y as usize].as_bytes()[p.x as usize] != b'o'
                })
                .map(|(p, _)| p)
                .collect::<Vec<_>>();
            for p in &new_frontier {
                assert!(neighbours
                    .neighbours(*p)
                    .iter()
                    .any(|n| matches!(
                        g.get(*n),
                        Some(CellState::Start | CellState::Frontier | CellState::Visited)
                    )));
            }
            checked += new_frontier.len();
            previous = frame;
        },
        &CancelToken::new(),
    )
    .unwrap();
    assert!(checked > 0);
}

#[test]
fn clearing_and_replacing_gives_a_fresh_grid() {
    let mut grid = wall_column(0..4);
    astar(&mut grid, &mut NoRedraw, &CancelToken::new()).unwrap();
    grid.reset(5, 10);
    grid.set_start(pos(0, 0)).unwrap();
    grid.set_end(pos(4, 4)).unwrap();
    for row in 0..4 {
        grid.set_wall(pos(row, 2)).unwrap();
    }
    grid.compute_neighbours();
    let fresh = wall_column(0..4);
    assert_eq!(grid.to_string(), fresh.to_string());
    assert_eq!((grid.start(), grid.end()), (fresh.start(), fresh.end()));
}
