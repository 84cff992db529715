use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::agent::Agent;
use crate::isolation::{Board, Move};

pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_entropy(),
        }
    }

    /// reproducible sequence of choices
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn get_move(&mut self, board: &Board, _time_left: Duration) -> Option<Move> {
        board.legal_moves().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}
