//! Piece types and their spawn layouts

use crate::piece::Pos;
use ratatui::style::Color;

/// The 7 piece types, in the order used for random selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    O, // Yellow - square
    I, // Cyan - long bar
    T, // Purple - T-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
    Z, // Red - Z-shape
    S, // Green - S-shape
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::O,
        PieceType::I,
        PieceType::T,
        PieceType::J,
        PieceType::L,
        PieceType::Z,
        PieceType::S,
    ];

    /// Get the color for this piece type
    pub fn color(&self) -> Color {
        match self {
            PieceType::O => Color::Yellow,
            PieceType::I => Color::Cyan,
            PieceType::T => Color::Magenta,
            PieceType::J => Color::Blue,
            PieceType::L => Color::Rgb(255, 165, 0), // Orange
            PieceType::Z => Color::Red,
            PieceType::S => Color::Green,
        }
    }

    /// Spawn cells and the index of the pivot cell.
    ///
    /// Pieces spawn straddling the top edge: row -1 is just above the board,
    /// so every piece is partly hidden when it first appears.
    pub fn spawn_layout(&self) -> ([Pos; 4], Option<usize>) {
        let p = Pos::new;
        match self {
            // O never rotates
            PieceType::O => ([p(-1, 4), p(-1, 5), p(0, 4), p(0, 5)], None),
            PieceType::I => ([p(-1, 3), p(-1, 4), p(-1, 5), p(-1, 6)], Some(1)),
            PieceType::T => ([p(-1, 3), p(-1, 4), p(-1, 5), p(0, 4)], Some(1)),
            PieceType::J => ([p(-1, 3), p(-1, 4), p(-1, 5), p(0, 5)], Some(1)),
            PieceType::L => ([p(-1, 3), p(-1, 4), p(-1, 5), p(0, 3)], Some(1)),
            PieceType::Z => ([p(-1, 3), p(-1, 4), p(0, 4), p(0, 5)], Some(1)),
            PieceType::S => ([p(-1, 5), p(-1, 4), p(0, 4), p(0, 3)], Some(1)),
        }
    }

    /// Upper bound of the roll that limits extra spawn rotations.
    ///
    /// `None` means the piece always spawns as laid out and no roll is drawn.
    pub fn spawn_rotation_roll(&self) -> Option<u32> {
        match self {
            PieceType::O => None,
            PieceType::I => Some(2),
            _ => Some(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layouts_have_four_distinct_cells() {
        for kind in PieceType::ALL {
            let (cells, _) = kind.spawn_layout();
            let unique: HashSet<_> = cells.iter().collect();
            assert_eq!(unique.len(), 4, "{:?} has duplicate cells", kind);
        }
    }

    #[test]
    fn test_only_o_lacks_pivot() {
        for kind in PieceType::ALL {
            let (_, pivot) = kind.spawn_layout();
            assert_eq!(pivot.is_none(), kind == PieceType::O);
        }
    }

    #[test]
    fn test_layouts_fit_board_columns() {
        for kind in PieceType::ALL {
            let (cells, _) = kind.spawn_layout();
            assert!(cells.iter().all(|c| (0..10).contains(&c.col)));
            assert!(cells.iter().all(|c| c.row == -1 || c.row == 0));
        }
    }
}
