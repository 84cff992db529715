use std::time::{Duration, Instant};

use log::debug;

use crate::config::SearchConfig;
use crate::isolation::{Board, Move, Valuation, ValuationFn};

use super::{SearchCutoff, SearchTimer, SearchWorker};

/// Outcome of the deepest fully completed search iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub value: Valuation,
    pub depth: u32,
    pub nodes_visited: u64,
}

fn estimate_next_depth(last_depth_dur: Duration, factor: f64) -> Duration {
    Duration::try_from_secs_f64(last_depth_dur.as_secs_f64() * factor).unwrap_or(Duration::MAX)
}

/// Iterative deepening over [`SearchWorker::search_root`].
///
/// Depths 1, 2, 3, ... are searched until the timer says the next one won't fit, a depth gets cut off, a win is
/// found or the game tree is exhausted. Only fully completed depths count; `None` means not even depth 1 finished.
pub fn iterative_deepening(
    board: &Board,
    timer: &SearchTimer,
    valuation_fn: ValuationFn,
    config: &SearchConfig,
) -> Option<SearchResult> {
    assert!(
        board.has_legal_move(),
        "Called iterative_deepening on board with no legal moves"
    );

    let mut worker = SearchWorker::new(timer, valuation_fn, config);
    let mut current_best: Option<SearchResult> = None;
    let mut last_depth_dur = Duration::ZERO;

    // every ply blocks a cell, the game can't go on any longer than this
    let max_depth = config.max_depth.unwrap_or(u32::MAX).min(board.open_cells());

    for depth in 1..=max_depth {
        let estimate = estimate_next_depth(last_depth_dur, config.next_depth_cost_factor);

        if !timer.should_continue(estimate) {
            debug!(
                "Not starting depth {}: {:?} left, estimated {:?}",
                depth,
                timer.remaining(),
                estimate
            );
            break;
        }

        let depth_start_t = Instant::now();

        let (best_move, value) = match worker.search_root(board, depth) {
            Ok(root_result) => root_result,
            Err(SearchCutoff) => {
                debug!("Depth {} cut off after {:?}", depth, depth_start_t.elapsed());
                break;
            }
        };

        last_depth_dur = depth_start_t.elapsed();

        current_best = Some(SearchResult {
            best_move,
            value,
            depth,
            nodes_visited: worker.nodes_visited(),
        });

        debug!(
            "Depth {} done in {:?}: best move {:?} with value {}",
            depth, last_depth_dur, best_move, value
        );

        if value.is_win() {
            debug!("Found certain win: {}", value);
            break;
        }

        if value.is_loss() {
            // don't exit early on a certain loss: the opponent might not have found it
            debug!("Certain loss within {} plies, searching on", depth);
        }

        if !worker.depth_limited() {
            debug!("Game tree exhausted at depth {}", depth);
            break;
        }
    }

    let elapsed = timer.elapsed().as_secs_f64();
    debug!("--------------------------------------------");
    match current_best {
        Some(result) => debug!("* Search finished after depth {} with value {}", result.depth, result.value),
        None => debug!("* Search didn't complete a single depth"),
    }
    debug!(
        "* Nodes: {}, NPS: {:.2e}",
        worker.nodes_visited(),
        worker.nodes_visited() as f64 / elapsed.max(f64::EPSILON)
    );
    debug!("--------------------------------------------");

    current_best
}

/*====================================================================================================================*/
