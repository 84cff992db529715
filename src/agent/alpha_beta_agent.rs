use std::time::Duration;

use log::{debug, warn};

use crate::agent::Agent;
use crate::config::SearchConfig;
use crate::isolation::valuation::mobility_valuation;
use crate::isolation::{Board, Move, ValuationFn};
use crate::minimax::{iterative_deepening, SearchResult, SearchTimer};

/// Iterative deepening alpha-beta agent: searches as deep as the time budget allows and plays the best move of
/// the deepest completed depth.
pub struct AlphaBetaAgent {
    config: SearchConfig,
    valuation_fn: ValuationFn,

    last_result: Option<SearchResult>,
}

impl AlphaBetaAgent {
    pub fn new(config: SearchConfig, valuation_fn: ValuationFn) -> Self {
        AlphaBetaAgent {
            config,
            valuation_fn,
            last_result: None,
        }
    }

    /// Result of the search behind the last returned move, `None` if no search was run or none completed.
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }
}

impl Default for AlphaBetaAgent {
    fn default() -> Self {
        AlphaBetaAgent::new(SearchConfig::default(), mobility_valuation)
    }
}

impl Agent for AlphaBetaAgent {
    fn get_move(&mut self, board: &Board, time_left: Duration) -> Option<Move> {
        let timer = SearchTimer::new(time_left, self.config.safety_margin());

        self.last_result = None;

        let legal_moves = board.legal_moves();

        // no legal move: forfeit
        let first_move = *legal_moves.first()?;

        if legal_moves.len() == 1 {
            debug!("Only legal move {}, not searching", first_move);
            return Some(first_move);
        }

        let best_move = match iterative_deepening(board, &timer, self.valuation_fn, &self.config) {
            Some(result) => {
                self.last_result = Some(result);
                result.best_move.unwrap_or(first_move)
            }
            None => {
                warn!(
                    "Depth 1 didn't finish within {:?}, falling back to first legal move {}",
                    time_left, first_move
                );
                first_move
            }
        };

        assert!(
            board.is_legal_move(best_move),
            "Search picked illegal move {} in position\n{}",
            best_move,
            board
        );

        Some(best_move)
    }

    fn name(&self) -> &str {
        "alphabeta"
    }
}

/*====================================================================================================================*/
