//! Falling piece geometry: translation and rotation about a pivot
//!
//! Nothing here looks at the board. Moves and rotations always succeed and
//! the engine is responsible for checking (and undoing) the result.

use crate::tetromino::PieceType;
use rand::Rng;

/// A (row, col) coordinate. Row grows downward, col grows rightward.
/// Rows above the board are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// A falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceType,
    cells: [Pos; 4],
    /// Index into `cells`; `None` for O
    pivot: Option<usize>,
}

impl Piece {
    /// Create a piece in its spawn layout
    pub fn new(kind: PieceType) -> Self {
        let (cells, pivot) = kind.spawn_layout();
        Self { kind, cells, pivot }
    }

    /// Pick a random piece type and give it a random spawn orientation.
    ///
    /// O always spawns as laid out. Every other type keeps rotating while its
    /// rotation count is below a fresh roll of `0..bound` (bound 2 for I, 4 for
    /// the rest), so the roll is drawn again before each extra rotation.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let kind = PieceType::ALL[rng.gen_range(0..PieceType::ALL.len())];
        let mut piece = Self::new(kind);
        if let Some(bound) = kind.spawn_rotation_roll() {
            let mut turns = 0;
            while turns < rng.gen_range(0..bound) {
                piece.rotate();
                turns += 1;
            }
        }
        piece
    }

    pub fn kind(&self) -> PieceType {
        self.kind
    }

    pub fn cells(&self) -> &[Pos; 4] {
        &self.cells
    }

    pub fn pivot(&self) -> Option<Pos> {
        self.pivot.map(|i| self.cells[i])
    }

    /// Smallest row among the cells
    pub fn top_row(&self) -> i32 {
        self.cells.iter().map(|c| c.row).min().unwrap_or(0)
    }

    /// Whether any cell is still above the board
    pub fn is_above_board(&self) -> bool {
        self.cells.iter().any(|c| c.row < 0)
    }

    pub fn move_down(&mut self) {
        self.shift(1, 0);
    }

    pub fn move_left(&mut self) {
        self.shift(0, -1);
    }

    pub fn move_right(&mut self) {
        self.shift(0, 1);
    }

    fn shift(&mut self, rows: i32, cols: i32) {
        for cell in &mut self.cells {
            cell.row += rows;
            cell.col += cols;
        }
    }

    /// Rotate a quarter turn about the pivot. No-op for O.
    pub fn rotate(&mut self) {
        let Some(pivot_idx) = self.pivot else {
            return;
        };
        let pivot = self.cells[pivot_idx];
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if i == pivot_idx {
                continue;
            }
            let row = -(cell.col - pivot.col) + pivot.row;
            let col = (cell.row - pivot.row) + pivot.col;
            *cell = Pos::new(row, col);
        }
    }
}
