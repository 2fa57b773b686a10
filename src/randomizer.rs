//! Seeded piece generator
//!
//! Each game owns its own generator, so two games built from the same seed
//! deal identical pieces.

use crate::piece::Piece;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deals random pieces from an owned ChaCha stream
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: ChaCha8Rng,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Create a generator with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a generator with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Deal the next piece in its spawn position
    pub fn next(&mut self) -> Piece {
        Piece::random(&mut self.rng)
    }
}
