//! Scoring: a flat award per cleared line

/// Points awarded for each cleared line
pub const LINE_CLEAR_POINTS: u32 = 20;

/// Score tracking for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the lines cleared by one lock and return the points awarded
    pub fn add_lines(&mut self, lines: usize) -> u32 {
        let lines = lines as u32;
        let awarded = lines * LINE_CLEAR_POINTS;
        self.lines += lines;
        self.points += awarded;
        awarded
    }
}
