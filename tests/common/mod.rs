use plumbot::config::FlagConfig;
use plumbot::grid::{AGENT_TILE, GRID_COLS};
use plumbot::observer::AgentObserver;
use plumbot::replay::{ReplayEmulator, ReplayFrame};
use plumbot::{Link, RunStats, TileGrid};

/// Two solid rows across the whole width; feet land on row 14.
pub fn floor_terrain() -> TileGrid {
    let mut terrain = TileGrid::empty();
    for col in 0..GRID_COLS {
        terrain.set(14, col, 10);
        terrain.set(15, col, 10);
    }
    terrain
}

/// Stamps the agent tile into a copy of `terrain` and wraps it as a grounded
/// frame.
pub fn frame(terrain: &TileGrid, agent: Option<(i32, i32)>, over: bool) -> ReplayFrame {
    let mut grid = terrain.clone();
    if let Some((row, col)) = agent {
        grid.set(row, col, AGENT_TILE);
    }
    ReplayFrame {
        tiles: grid.to_rows(),
        airborne: 0,
        jump_phase: 0,
        over,
    }
}

pub fn emulator_with(frames: Vec<ReplayFrame>) -> ReplayEmulator {
    ReplayEmulator::new(frames, FlagConfig::default()).expect("frames are well formed")
}

/// Swallows every callback; keeps test output clean.
pub struct SilentObserver;

impl AgentObserver for SilentObserver {
    fn on_run_start(&mut self, _rows: i32, _cols: i32) {}

    fn on_state_update(&mut self, _cycle: u32, _grid: &TileGrid) {}

    fn on_link_selected(&mut self, _link: Option<&Link>) {}

    fn on_run_finished(&mut self, _stats: &RunStats) {}
}
