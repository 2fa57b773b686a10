//! BLOCKFALL - a falling-block puzzle engine
//!
//! The engine lives in [`game`], built on [`piece`] geometry and the
//! [`board`] grid. [`session`] serialises gravity ticks and commands against
//! one game. The rest is the terminal front end.

pub mod board;
pub mod game;
pub mod input;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod session;
pub mod settings;
pub mod tetromino;
pub mod ui;

pub use board::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::{Action, Control, Game, GameState, LockOutcome, Snapshot};
pub use piece::{Piece, Pos};
pub use session::{spawn_gravity, SharedGame};
pub use tetromino::PieceType;
