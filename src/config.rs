use crate::grid::GRID_COLS;

/// Navigation tuning shared by the graph builder, planner, and actuator.
#[derive(Debug, Clone)]
pub struct NavConfig {
    /// Clear rows required above a standable cell.
    pub headroom: i32,
    /// Column threshold the planner drives toward.
    pub goal_col: i32,
    /// Enemy scan window, asymmetric around the agent.
    pub enemy_rows_up: i32,
    pub enemy_rows_down: i32,
    pub enemy_cols: i32,
    /// Horizontal distance beyond which scanned enemies are ignored.
    pub enemy_reach: i32,
    /// Horizontal band in which a walking agent reacts to an enemy.
    pub walk_band: i32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            headroom: 2,
            goal_col: GRID_COLS - 1,
            enemy_rows_up: 5,
            enemy_rows_down: 4,
            enemy_cols: 5,
            enemy_reach: 4,
            walk_band: 2,
        }
    }
}

/// Where the actuation flags live in emulator memory and how to decode them.
#[derive(Debug, Clone, Copy)]
pub struct FlagConfig {
    pub airborne_addr: u16,
    pub jump_phase_addr: u16,
    /// Jump-phase values at or above this mean the agent is on the way down.
    pub descending_threshold: u8,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            airborne_addr: 0xC20A,
            jump_phase_addr: 0xC207,
            descending_threshold: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Emulation ticks a button press is held each decision cycle.
    pub act_frequency: u32,
    /// Upper bound on decision cycles per run.
    pub max_cycles: u32,
    /// Folder for the final stats file; skipped when unset.
    pub results_folder: Option<String>,
    pub flags: FlagConfig,
    pub nav: NavConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            act_frequency: 10,
            max_cycles: 5000,
            results_folder: None,
            flags: FlagConfig::default(),
            nav: NavConfig::default(),
        }
    }
}
