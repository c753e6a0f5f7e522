//! The host around the search: grid editing, running searches and presenting their outcome,
//! either in an interactive terminal session or once, headless.

use crate::config::Config;
use crate::error::Result;
use crate::grid::Grid;
use crate::render::{TerminalRenderer, TextRenderer};
use crate::search::{astar, CancelToken, SearchOutcome};
use crate::visualizer::{NoRedraw, Visualizer};
use grid_util::point::Point;
use log::{info, warn};
use std::io::Write;
use std::time::Duration;

/// Editing and control requests coming from the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Primary click: start, then end, then walls.
    Paint(Point),
    /// Secondary click: back to empty.
    Erase(Point),
    Run,
    /// Throws away the whole grid.
    Reset,
    /// Removes the marks of the last search only.
    ClearSearch,
    Quit,
}

const INPUT_TIMEOUT: Duration = Duration::from_millis(50);
const HELP: &str = "left: start/end/wall  right: erase  enter: search  c: clear  space: reset  q: quit";

pub struct App {
    grid: Grid,
    config: Config,
    cancel: CancelToken,
    last_outcome: Option<SearchOutcome>,
}

impl App {
    pub fn new(config: Config) -> Result<App> {
        let grid = config.build_grid()?;
        Ok(App {
            grid,
            config,
            cancel: CancelToken::new(),
            last_outcome: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Token raised to stop the running search. Renderers that watch for a quit key hold a
    /// clone of it.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Applies one input. Returns false once the session should end, which is the case after
    /// [Input::Quit] and after a search was cancelled.
    pub fn handle<V>(&mut self, input: Input, visualizer: &mut V) -> Result<bool>
    where
        V: Visualizer + ?Sized,
    {
        match input {
            Input::Paint(p) => {
                self.grid.paint(p)?;
            }
            Input::Erase(p) => self.grid.erase(p)?,
            Input::Run => {
                if self.grid.start().is_none() || self.grid.end().is_none() {
                    info!("Ignoring search request: start and end must both be placed");
                    return Ok(true);
                }
                let outcome = self.search(visualizer)?;
                let cancelled = matches!(outcome, SearchOutcome::Cancelled { .. });
                self.last_outcome = Some(outcome);
                return Ok(!cancelled);
            }
            Input::Reset => {
                let geometry = self.grid.geometry();
                self.grid.reset(geometry.rows, geometry.width);
                self.last_outcome = None;
            }
            Input::ClearSearch => {
                self.grid.clear_search();
                self.last_outcome = None;
            }
            Input::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Clears the marks of any previous run, recomputes the neighbours and runs the search.
    pub fn search<V>(&mut self, visualizer: &mut V) -> Result<SearchOutcome>
    where
        V: Visualizer + ?Sized,
    {
        self.grid.clear_search();
        self.grid.compute_neighbours();
        if let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) {
            if !self.grid.reachable(&start, &end) {
                info!("{} is not reachable from {}, the search will exhaust its component", end, start);
            }
        }
        self.cancel.reset();
        astar(&mut self.grid, visualizer, &self.cancel)
    }

    /// Runs the terminal session until the user quits.
    pub fn run_interactive(&mut self) -> Result<()> {
        let mut renderer = TerminalRenderer::new(self.config.delay(), self.cancel_token());
        renderer.init()?;
        renderer.set_status(HELP);
        loop {
            renderer.draw(&self.grid)?;
            let Some(input) = renderer.next_input(&self.grid, INPUT_TIMEOUT)? else {
                continue;
            };
            if input == Input::Run {
                renderer.set_status("searching  q: stop");
            }
            let keep_running = match self.handle(input, &mut renderer) {
                Ok(keep_running) => keep_running,
                Err(e) => {
                    warn!("{e}");
                    true
                }
            };
            if !keep_running {
                break;
            }
            renderer.set_status(match &self.last_outcome {
                Some(outcome) => format!("{}  |  {HELP}", summary(outcome)),
                None => HELP.to_owned(),
            });
        }
        renderer.close()
    }

    /// Runs a single search and writes the result to `out`: a frame per redraw unless the
    /// configuration asks for quiet output, then the final grid and a summary line.
    pub fn run_headless<W: Write>(&mut self, mut out: W) -> Result<SearchOutcome> {
        let outcome = if self.config.quiet {
            self.search(&mut NoRedraw)?
        } else {
            let mut renderer = TextRenderer::new(&mut out);
            let outcome = self.search(&mut renderer)?;
            renderer.finish()?;
            outcome
        };
        write!(out, "{}", self.grid)?;
        writeln!(out, "{}", summary(&outcome))?;
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }
}

/// One line describing a finished search.
pub fn summary(outcome: &SearchOutcome) -> String {
    let stats = outcome.stats();
    match outcome {
        SearchOutcome::Found { path, .. } => format!(
            "path found: {} steps, {} cells expanded",
            path.len() - 1,
            stats.expanded
        ),
        SearchOutcome::NoPath { .. } => {
            format!("no path exists: {} cells expanded", stats.expanded)
        }
        SearchOutcome::Cancelled { .. } => {
            format!("search cancelled after {} expansions", stats.expanded)
        }
    }
}
