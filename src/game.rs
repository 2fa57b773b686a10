//! Core game state and logic

use crate::board::{Board, BOARD_HEIGHT};
use crate::piece::{Piece, Pos};
use crate::randomizer::PieceGenerator;
use crate::score::Score;
use tracing::{debug, info};

/// Game lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Ready,
    Running,
    Pausing,
    Over,
}

/// Commands the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    /// Hard drop
    Drop,
    Rotate,
    /// Start a fresh session, from any state
    Start,
    Pause,
    Resume,
    Quit,
}

/// What the host should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Result of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: usize,
    pub points: u32,
    /// The lock ended the game
    pub topped_out: bool,
}

/// Owned copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub current: Piece,
    pub next: Piece,
    pub board: Board,
    pub score: Score,
    pub state: GameState,
    pub last_lock: Option<LockOutcome>,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    board: Board,
    /// Current falling piece
    current: Piece,
    /// Preview piece, promoted on the next successful lock
    next: Piece,
    /// Piece randomizer
    generator: PieceGenerator,
    /// Score tracking
    score: Score,
    /// Current game state
    state: GameState,
    last_lock: Option<LockOutcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a game in the READY state with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a game in the READY state with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        let mut generator = PieceGenerator::with_seed(seed);
        let current = generator.next();
        let next = generator.next();

        Self {
            board: Board::new(),
            current,
            next,
            generator,
            score: Score::new(),
            state: GameState::Ready,
            last_lock: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn last_lock(&self) -> Option<LockOutcome> {
        self.last_lock
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current: self.current.clone(),
            next: self.next.clone(),
            board: self.board.clone(),
            score: self.score,
            state: self.state,
            last_lock: self.last_lock,
        }
    }

    /// Process a command. Commands that don't apply to the current state
    /// are ignored.
    pub fn process_action(&mut self, action: Action) -> Control {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::MoveDown => self.move_down(),
            Action::Drop => self.move_down_to_bottom(),
            Action::Rotate => self.rotate(),
            Action::Start => self.start(),
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
            Action::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Gravity step. Returns false when the game isn't running.
    pub fn tick(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        self.move_down();
        true
    }

    /// Reset the session and start running
    pub fn start(&mut self) {
        self.board = Board::new();
        self.current = self.generator.next();
        self.next = self.generator.next();
        self.score = Score::new();
        self.last_lock = None;
        self.state = GameState::Running;
        info!(current = ?self.current.kind(), next = ?self.next.kind(), "game started");
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Pausing;
            info!("game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Pausing {
            self.state = GameState::Running;
            info!("game resumed");
        }
    }

    pub fn move_left(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.current.move_left();
        if !self.fits(&self.current) {
            self.current.move_right();
        }
    }

    pub fn move_right(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.current.move_right();
        if !self.fits(&self.current) {
            self.current.move_left();
        }
    }

    pub fn rotate(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        self.current.rotate();
        if !self.fits(&self.current) {
            // Three more quarter turns restore the original orientation
            for _ in 0..3 {
                self.current.rotate();
            }
        }
    }

    /// Move down one row, or lock the piece if it can't descend
    pub fn move_down(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        if self.can_move_down() {
            self.current.move_down();
        } else {
            self.lock_piece();
        }
    }

    /// Hard drop: fall as far as possible, then lock
    pub fn move_down_to_bottom(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        while self.can_move_down() {
            self.current.move_down();
        }
        self.lock_piece();
    }

    fn fits(&self, piece: &Piece) -> bool {
        self.board.are_positions_valid(piece.cells())
    }

    /// A piece resting on the floor, or with a locked cell directly under one
    /// of its cells, can't descend. Cells more than one row above the board
    /// have nothing under them.
    fn can_move_down(&self) -> bool {
        let floor = BOARD_HEIGHT as i32 - 1;
        self.current.cells().iter().all(|pos| {
            if pos.row >= floor {
                return false;
            }
            let below = Pos::new(pos.row + 1, pos.col);
            !(pos.row >= -1 && self.board.is_occupied(below))
        })
    }

    /// Lock the current piece and spawn next
    fn lock_piece(&mut self) {
        // Blocked before fully entering the board
        if self.current.is_above_board() {
            self.finish(LockOutcome {
                lines_cleared: 0,
                points: 0,
                topped_out: true,
            });
            return;
        }

        self.board.place_piece(&self.current);
        let lines_cleared = self.board.clear_and_compact(self.current.top_row());
        let points = self.score.add_lines(lines_cleared);
        debug!(
            piece = ?self.current.kind(),
            lines_cleared,
            points,
            total = self.score.points,
            "piece locked"
        );

        // No room for the next piece
        if self.board.overlaps(self.next.cells()) {
            self.finish(LockOutcome {
                lines_cleared,
                points,
                topped_out: true,
            });
            return;
        }

        self.current = std::mem::replace(&mut self.next, self.generator.next());
        self.last_lock = Some(LockOutcome {
            lines_cleared,
            points,
            topped_out: false,
        });
    }

    fn finish(&mut self, outcome: LockOutcome) {
        self.state = GameState::Over;
        self.last_lock = Some(outcome);
        info!(score = self.score.points, lines = self.score.lines, "game over");
    }
}
