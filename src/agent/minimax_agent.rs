use std::time::Duration;

use log::warn;

use crate::agent::Agent;
use crate::config::SearchConfig;
use crate::isolation::{Board, Move, ValuationFn};
use crate::minimax::{SearchTimer, SearchWorker};

/// Searches to a fixed depth, with or without alpha-beta pruning.
///
/// Falls back to the first legal move if the search doesn't finish in time.
pub struct MinimaxAgent {
    depth: u32,
    alpha_beta_prune: bool,
    config: SearchConfig,
    valuation_fn: ValuationFn,
}

impl MinimaxAgent {
    pub fn new(depth: u32, alpha_beta_prune: bool, config: SearchConfig, valuation_fn: ValuationFn) -> Self {
        assert!(depth > 0, "MinimaxAgent needs a search depth of at least 1");

        MinimaxAgent {
            depth,
            alpha_beta_prune,
            config,
            valuation_fn,
        }
    }
}

impl Agent for MinimaxAgent {
    fn get_move(&mut self, board: &Board, time_left: Duration) -> Option<Move> {
        let timer = SearchTimer::new(time_left, self.config.safety_margin());

        // use first legal move as a fallback in case the search doesn't complete
        let fallback_move = *board.legal_moves().first()?;

        let mut worker =
            SearchWorker::new(&timer, self.valuation_fn, &self.config).with_pruning(self.alpha_beta_prune);

        match worker.search_root(board, self.depth) {
            Ok((best_move, _)) => best_move,
            Err(_) => {
                warn!(
                    "Depth {} search didn't finish within {:?}, playing {}",
                    self.depth, time_left, fallback_move
                );
                Some(fallback_move)
            }
        }
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/*====================================================================================================================*/
