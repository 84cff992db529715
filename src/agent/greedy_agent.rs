use std::time::Duration;

use crate::agent::Agent;
use crate::isolation::valuation::own_mobility_valuation;
use crate::isolation::{Board, Move, Valuation, ValuationFn};

/// Looks a single ply ahead and takes the move leaving the best position according to `valuation_fn`.
pub struct GreedyAgent {
    valuation_fn: ValuationFn,
}

impl GreedyAgent {
    pub fn new(valuation_fn: ValuationFn) -> Self {
        GreedyAgent { valuation_fn }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        GreedyAgent::new(own_mobility_valuation)
    }
}

impl Agent for GreedyAgent {
    fn get_move(&mut self, board: &Board, _time_left: Duration) -> Option<Move> {
        let player = board.active_player();

        let mut best: Option<(Move, Valuation)> = None;

        for legal_move in board.legal_moves() {
            let next_board = board.apply_move(legal_move);

            // opponent is stuck: nothing beats that
            if next_board.is_terminal() {
                return Some(legal_move);
            }

            let value = (self.valuation_fn)(&next_board, player);

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((legal_move, value));
            }
        }

        best.map(|(best_move, _)| best_move)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
