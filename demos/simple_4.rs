use astar_visualizer::{astar, pos, CancelToken, Grid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Every step of the search is printed, frontier cells as `o`, visited cells as `x` and the
// final path as `*`.

fn main() {
    let mut grid = Grid::new(3);
    grid.set_start(pos(0, 0)).unwrap();
    grid.set_end(pos(2, 2)).unwrap();
    grid.set_wall(pos(1, 1)).unwrap();
    grid.compute_neighbours();
    println!("{}", grid);
    let mut step = 0;
    let outcome = astar(
        &mut grid,
        &mut |g: &Grid| {
            step += 1;
            println!("Step {step}:\n{g}");
        },
        &CancelToken::new(),
    )
    .unwrap();
    println!("Path:");
    for p in outcome.path().unwrap() {
        println!("{:?}", p);
    }
}
