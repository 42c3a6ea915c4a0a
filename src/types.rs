#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance.
    pub fn distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Chessboard distance: 1 covers all eight surrounding cells.
    pub fn chebyshev(&self, other: &Cell) -> i32 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

impl Window {
    pub fn around(center: Cell, up: i32, down: i32, left: i32, right: i32) -> Self {
        Self {
            min_row: center.row - up,
            max_row: center.row + down,
            min_col: center.col - left,
            max_col: center.col + right,
        }
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.row >= self.min_row
            && cell.row <= self.max_row
            && cell.col >= self.min_col
            && cell.col <= self.max_col
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<i32> {
        self.min_row..=self.max_row
    }

    pub fn cols(&self) -> std::ops::RangeInclusive<i32> {
        self.min_col..=self.max_col
    }
}
