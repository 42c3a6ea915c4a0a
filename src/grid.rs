use crate::types::Cell;

pub const GRID_ROWS: i32 = 16;
pub const GRID_COLS: i32 = 20;

/// Tile code the environment uses for the agent's own cell(s).
pub const AGENT_TILE: u8 = 1;
/// Codes at or above this are terrain the agent can stand on.
pub const SOLID_THRESHOLD: u8 = 10;
/// Codes at or above this are hostile entities.
pub const HOSTILE_THRESHOLD: u8 = 15;

pub fn is_solid(code: u8) -> bool {
    code >= SOLID_THRESHOLD
}

pub fn is_hostile(code: u8) -> bool {
    code >= HOSTILE_THRESHOLD
}

pub fn is_agent(code: u8) -> bool {
    code == AGENT_TILE
}

/// One snapshot of the visible playfield, row 0 at the top. Produced fresh by
/// the emulator every decision cycle and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: [[u8; GRID_COLS as usize]; GRID_ROWS as usize],
}

impl TileGrid {
    pub fn empty() -> Self {
        Self {
            tiles: [[0; GRID_COLS as usize]; GRID_ROWS as usize],
        }
    }

    /// Builds a grid from row-major tile rows; `None` unless the shape is
    /// exactly `GRID_ROWS` x `GRID_COLS`.
    pub fn from_rows(rows: &[Vec<u8>]) -> Option<Self> {
        if rows.len() != GRID_ROWS as usize {
            return None;
        }
        let mut grid = Self::empty();
        for (row, codes) in rows.iter().enumerate() {
            if codes.len() != GRID_COLS as usize {
                return None;
            }
            for (col, &code) in codes.iter().enumerate() {
                grid.tiles[row][col] = code;
            }
        }
        Some(grid)
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.tiles.iter().map(|row| row.to_vec()).collect()
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        row >= 0 && row < GRID_ROWS && col >= 0 && col < GRID_COLS
    }

    pub fn get(&self, row: i32, col: i32) -> Option<u8> {
        if Self::in_bounds(row, col) {
            Some(self.tiles[row as usize][col as usize])
        } else {
            None
        }
    }

    /// Out-of-bounds writes are dropped; the synthetic frame builders rely on
    /// that.
    pub fn set(&mut self, row: i32, col: i32, code: u8) {
        if Self::in_bounds(row, col) {
            self.tiles[row as usize][col as usize] = code;
        }
    }

    pub fn is_solid_at(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(is_solid)
    }

    pub fn is_hostile_at(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(is_hostile)
    }

    /// Bottom-right-most tile carrying the agent code. The agent can occupy
    /// two stacked cells; the anchor is the one closest to its support.
    pub fn agent_cell(&self) -> Option<Cell> {
        let mut anchor = None;
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                if self.get(row, col).is_some_and(is_agent) {
                    anchor = Some(Cell::new(row, col));
                }
            }
        }
        anchor
    }

    /// First solid cell straight below the agent anchor: the cell the agent is
    /// standing on, or will land on. `None` when the agent is over a pit or
    /// not in the snapshot at all.
    pub fn agent_support_cell(&self) -> Option<Cell> {
        let anchor = self.agent_cell()?;
        for row in anchor.row + 1..GRID_ROWS {
            if self.is_solid_at(row, anchor.col) {
                return Some(Cell::new(row, anchor.col));
            }
        }
        None
    }

    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((GRID_ROWS * (GRID_COLS + 1)) as usize);
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let code = self.tiles[row as usize][col as usize];
                let ch = if is_agent(code) {
                    '@'
                } else if is_hostile(code) {
                    'x'
                } else if is_solid(code) {
                    '#'
                } else if code == 0 {
                    '.'
                } else {
                    '?'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
