use crate::grid::Grid;

/// Observer the search calls after every visible change to the grid. Implementations render the
/// grid and should return promptly; a renderer that also watches for a quit request reports it
/// through the [CancelToken](crate::search::CancelToken) handed to the search.
pub trait Visualizer {
    fn redraw(&mut self, grid: &Grid);
}

impl<F> Visualizer for F
where
    F: FnMut(&Grid),
{
    fn redraw(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// A [Visualizer] that draws nothing, for running the search headless.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRedraw;

impl Visualizer for NoRedraw {
    fn redraw(&mut self, _grid: &Grid) {}
}
