use astar_visualizer::{astar, CancelToken, Grid, NoRedraw, SearchOutcome};

// The end sits behind a closed wall, so the search explores the whole left-hand side and reports
// that no path exists.

fn main() {
    let mut grid: Grid = "
        S.#..
        ..#..
        ..#..
        ..#..
        ..#.E
    "
    .parse()
    .unwrap();
    grid.compute_neighbours();
    let outcome = astar(&mut grid, &mut NoRedraw, &CancelToken::new()).unwrap();
    print!("{}", grid);
    match outcome {
        SearchOutcome::NoPath { stats } => {
            println!("No path, {} cells expanded", stats.expanded)
        }
        other => println!("Unexpected outcome: {:?}", other),
    }
}
