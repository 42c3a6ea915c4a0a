use std::io::{self, Write};

use tracing::info;

use crate::game::RunStats;
use crate::graph::Link;
use crate::grid::TileGrid;

/// Callbacks for whatever wants to watch a run. The core only notifies;
/// implementations decide what to show or keep.
pub trait AgentObserver {
    /// Called once before the first decision cycle.
    fn on_run_start(&mut self, rows: i32, cols: i32);
    /// Called with the fresh snapshot at the top of every cycle.
    fn on_state_update(&mut self, cycle: u32, grid: &TileGrid);
    /// Called after each cycle with the link still being pursued, if any.
    fn on_link_selected(&mut self, link: Option<&Link>);
    /// Called once after the loop ends.
    fn on_run_finished(&mut self, stats: &RunStats);
}

/// Logs progress and dumps the playfield to stdout each cycle.
pub struct DefaultObserver;

impl AgentObserver for DefaultObserver {
    fn on_run_start(&mut self, rows: i32, cols: i32) {
        info!("run started on a {}x{} playfield", rows, cols);
    }

    fn on_state_update(&mut self, cycle: u32, grid: &TileGrid) {
        info!("cycle {}", cycle);
        let _ = writeln!(io::stdout(), "{}", grid.render_ascii());
    }

    fn on_link_selected(&mut self, link: Option<&Link>) {
        match link {
            Some(link) => info!(
                "pursuing {:?} link to ({}, {})",
                link.kind, link.to.row, link.to.col
            ),
            None => info!("no link pursued, replanning next cycle"),
        }
    }

    fn on_run_finished(&mut self, stats: &RunStats) {
        info!(
            "run finished: {} cycles, rightmost column {}, completed: {}",
            stats.cycles, stats.rightmost_column, stats.completed
        );
    }
}
