use crate::cell::CellState;
use crate::grid::Grid;
use crate::search::FxIndexMap;
use crate::visualizer::Visualizer;
use grid_util::point::Point;
use log::debug;

/// Walks the predecessor chain back from `end`, painting every cell on the way as
/// [CellState::Path] and redrawing after each one. The start and end keep their own states.
/// Returns the route from start to end, both included.
///
/// The chain always terminates at the start: a cell only gains a predecessor when its cost
/// strictly drops, so following predecessors strictly lowers the cost.
pub fn reconstruct_path<V>(
    grid: &mut Grid,
    came_from: &FxIndexMap<Point, Point>,
    end: Point,
    visualizer: &mut V,
) -> Vec<Point>
where
    V: Visualizer + ?Sized,
{
    let mut path = vec![end];
    let mut current = end;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
        grid.mark(current, CellState::Path);
        visualizer.redraw(grid);
    }
    path.reverse();
    debug!("Reconstructed path of {} steps", path.len() - 1);
    path
}
