use crate::error::Result;
use crate::grid::Grid;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Cells along each side of the grid. Ignored when a layout is loaded.
    #[arg(long, default_value_t = 25)]
    pub rows: usize,

    /// Width the grid is drawn with, in terminal columns. Defaults to two columns per cell.
    #[arg(long)]
    pub width: Option<usize>,

    /// Pause after every redraw of a running search.
    #[arg(long, default_value_t = 20)]
    pub delay_ms: u64,

    /// Text layout to start from: `.` empty, `#` wall, `S` start, `E` end.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Probability of each empty cell starting out as a wall.
    #[arg(long, default_value_t = 0.0)]
    pub wall_density: f64,

    /// Seed for the wall scatter, random when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run a single search without the interactive terminal and print the result.
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// With --headless, only print the final grid.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Config {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// The initial grid: the layout file if one is given, otherwise an empty grid of `rows`
    /// cells, with walls scattered over it when a density is set.
    pub fn build_grid(&self) -> Result<Grid> {
        let mut grid = match &self.layout {
            Some(path) => {
                info!("Loading layout from {}", path.display());
                fs::read_to_string(path)?.parse::<Grid>()?
            }
            None => Grid::new(self.rows),
        };
        grid.set_width(self.width.unwrap_or(grid.side() * 2));
        if self.wall_density > 0.0 {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            grid.scatter_walls(&mut rng, self.wall_density);
        }
        Ok(grid)
    }
}
