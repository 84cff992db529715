use std::time::Duration;

use crate::agent::Agent;
use crate::isolation::{Board, Move};

/// agent that always picks the first available move
/// useful for performance tests since, unlike RandomAgent, it's deterministic
#[derive(Debug, Default)]
pub struct FirstMoveAgent;

impl FirstMoveAgent {
    pub fn new() -> Self {
        FirstMoveAgent
    }
}

impl Agent for FirstMoveAgent {
    fn get_move(&mut self, board: &Board, _time_left: Duration) -> Option<Move> {
        board.legal_moves().first().copied()
    }

    fn name(&self) -> &str {
        "first"
    }
}
