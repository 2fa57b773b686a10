//! Game board representation and collision detection

use crate::piece::{Piece, Pos};
use crate::tetromino::PieceType;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled by a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    fn index(pos: Pos) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < BOARD_HEIGHT && col < BOARD_WIDTH).then_some((row, col))
    }

    /// Get the cell at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        Self::index(pos).map(|(row, col)| self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match Self::index(pos) {
            Some((row, col)) => {
                self.cells[row][col] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a position on the board holds a locked cell.
    /// Positions off the board are never occupied.
    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(|cell| cell.is_filled())
    }

    /// Check if a falling-piece cell may sit at a position.
    ///
    /// Columns must lie on the board and rows may not pass the floor. Rows
    /// above the board are always free.
    pub fn is_valid_position(&self, pos: Pos) -> bool {
        if pos.col < 0 || pos.col >= BOARD_WIDTH as i32 {
            return false;
        }
        if pos.row > BOARD_HEIGHT as i32 - 1 {
            return false;
        }
        !self.is_occupied(pos)
    }

    /// Check if a set of positions are all valid
    pub fn are_positions_valid(&self, positions: &[Pos]) -> bool {
        positions.iter().all(|&pos| self.is_valid_position(pos))
    }

    /// Whether any of the positions lands on a locked cell
    pub fn overlaps(&self, positions: &[Pos]) -> bool {
        positions.iter().any(|&pos| self.is_occupied(pos))
    }

    /// Write a piece's on-board cells into the grid.
    /// Cells above the board are dropped.
    pub fn place_piece(&mut self, piece: &Piece) {
        let cell = Cell::Filled(piece.kind());
        for &pos in piece.cells() {
            if pos.row >= 0 && pos.col >= 0 {
                self.set(pos, cell);
            }
        }
    }

    /// Check if a line is completely filled
    pub fn is_full_line(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Clear full rows from `from_row` down to the floor.
    ///
    /// Each full row is removed by pulling everything above it down one row
    /// and emptying row 0. Returns the number of rows cleared.
    pub fn clear_and_compact(&mut self, from_row: i32) -> usize {
        let start = usize::try_from(from_row).unwrap_or(0);
        let mut cleared = 0;

        for row in start..BOARD_HEIGHT {
            if !self.is_full_line(row) {
                continue;
            }
            cleared += 1;
            for i in (1..=row).rev() {
                self.cells[i] = self.cells[i - 1];
            }
            self.cells[0] = [Cell::Empty; BOARD_WIDTH];
        }

        cleared
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells.iter()
    }
}
