use std::time::Instant;

use serde::Serialize;
use tracing::warn;

use crate::agent::Agent;
use crate::emulator::Emulator;
use crate::graph::Link;
use crate::grid::{GRID_COLS, GRID_ROWS};
use crate::observer::AgentObserver;

/// Final numbers for a run, serialized into the results file.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub cycles: u32,
    pub rightmost_column: i32,
    pub completed: bool,
}

/// Drives decision cycles until the environment reports game over or the
/// cycle budget runs out.
pub struct Game<E: Emulator> {
    emulator: E,
    agent: Agent,
    observer: Box<dyn AgentObserver>,
}

impl<E: Emulator> Game<E> {
    pub fn new(emulator: E, agent: Agent, observer: impl AgentObserver + 'static) -> Self {
        Self {
            emulator,
            agent,
            observer: Box::new(observer),
        }
    }

    pub fn run(&mut self) -> RunStats {
        self.observer.on_run_start(GRID_ROWS, GRID_COLS);

        let mut stats = RunStats {
            cycles: 0,
            rightmost_column: 0,
            completed: false,
        };
        let mut current: Option<Link> = None;
        let max_cycles = self.agent.config().max_cycles;

        while !self.emulator.is_over() {
            if stats.cycles >= max_cycles {
                warn!(cycles = stats.cycles, "cycle budget exhausted, stopping");
                break;
            }

            let cycle_start = Instant::now();
            let grid = self.emulator.snapshot();
            if let Some(cell) = grid.agent_cell() {
                stats.rightmost_column = stats.rightmost_column.max(cell.col);
            }
            self.observer.on_state_update(stats.cycles, &grid);

            current = self.agent.decide_and_act(&mut self.emulator, current);
            self.observer.on_link_selected(current.as_ref());
            stats.cycles += 1;

            let elapsed = cycle_start.elapsed();
            if elapsed.as_millis() > 100 {
                warn!(
                    cycle = stats.cycles,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "slow decision cycle"
                );
            }
        }

        stats.completed = self.emulator.is_over();
        self.observer.on_run_finished(&stats);
        stats
    }
}
