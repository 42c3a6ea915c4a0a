use crate::config::NavConfig;
use crate::grid::TileGrid;
use crate::types::{Cell, Window};

/// Windowed scan for hostile tile codes around the agent.
pub struct EnemyLocator;

impl EnemyLocator {
    /// All hostile cells inside the configured window. Window offsets past
    /// the grid edges scan nothing.
    pub fn scan(grid: &TileGrid, agent: Cell, nav: &NavConfig) -> Vec<Cell> {
        let window = Window::around(
            agent,
            nav.enemy_rows_up,
            nav.enemy_rows_down,
            nav.enemy_cols,
            nav.enemy_cols,
        );
        let mut found = Vec::new();
        for row in window.rows() {
            for col in window.cols() {
                if grid.is_hostile_at(row, col) {
                    found.push(Cell::new(row, col));
                }
            }
        }
        found
    }

    /// One representative enemy close enough to matter: nearest by column
    /// distance, then by row distance. `None` when nothing is in reach.
    pub fn nearest(grid: &TileGrid, agent: Cell, nav: &NavConfig) -> Option<Cell> {
        Self::scan(grid, agent, nav)
            .into_iter()
            .filter(|enemy| (enemy.col - agent.col).abs() <= nav.enemy_reach)
            .min_by_key(|enemy| ((enemy.col - agent.col).abs(), (enemy.row - agent.row).abs()))
    }
}
