use crate::config::SearchConfig;
use crate::isolation::{Board, Move, Valuation, ValuationFn};

use super::SearchTimer;

/// The timer ran out while a depth was in flight; its result must be thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCutoff;

/*====================================================================================================================*/

/// Depth limited negamax over [`Board`]s.
///
/// Values are always from the perspective of the player on the move at the node being searched; a child's value
/// is negated on the way up and the search window is negated and swapped on the way down.
pub struct SearchWorker<'a> {
    timer: &'a SearchTimer,
    valuation_fn: ValuationFn,
    alpha_beta_prune: bool,
    poll_interval: u64,

    nodes_visited: u64,
    // a non-terminal leaf was scored by the heuristic during the last root search
    depth_limited: bool,
}

impl<'a> SearchWorker<'a> {
    pub fn new(timer: &'a SearchTimer, valuation_fn: ValuationFn, config: &SearchConfig) -> Self {
        SearchWorker {
            timer,
            valuation_fn,
            alpha_beta_prune: true,
            poll_interval: config.poll_interval.max(1),
            nodes_visited: 0,
            depth_limited: false,
        }
    }

    pub fn with_pruning(mut self, alpha_beta_prune: bool) -> Self {
        self.alpha_beta_prune = alpha_beta_prune;
        self
    }

    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Whether the last root search hit the depth limit anywhere. If it didn't, every line was played out to the
    /// end of the game and searching deeper can't change the result.
    pub fn depth_limited(&self) -> bool {
        self.depth_limited
    }

    fn poll(&mut self) -> Result<(), SearchCutoff> {
        self.nodes_visited += 1;

        if self.nodes_visited % self.poll_interval == 0 && self.timer.is_expired() {
            return Err(SearchCutoff);
        }

        Ok(())
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        remaining_depth: u32,
        ply: u32,
        alpha: Valuation,
        beta: Valuation,
    ) -> Result<Valuation, SearchCutoff> {
        self.poll()?;

        // the player on the move is stuck and has lost
        if board.is_terminal() {
            return Ok(Valuation::TerminalLoss { plies: ply });
        }

        if remaining_depth == 0 {
            self.depth_limited = true;
            return Ok((self.valuation_fn)(board, board.active_player()));
        }

        let mut best_value = Valuation::MIN;
        let mut alpha = alpha;

        for legal_move in board.legal_moves() {
            let next_board = board.apply_move(legal_move);

            let value = -self.alpha_beta(&next_board, remaining_depth - 1, ply + 1, -beta, -alpha)?;

            if value > best_value {
                best_value = value;
            }

            if self.alpha_beta_prune {
                if value > alpha {
                    alpha = value;
                }

                if alpha >= beta {
                    // beta cutoff, return early
                    break;
                }
            }
        }

        Ok(best_value)
    }

    /// Searches every root move to `depth` plies and returns the first move reaching the best value, in the order
    /// [`Board::legal_moves`] produced them.
    pub fn search_root(&mut self, board: &Board, depth: u32) -> Result<(Option<Move>, Valuation), SearchCutoff> {
        assert!(depth > 0, "Root search needs a depth of at least 1");
        assert!(board.has_legal_move(), "Called search_root on board with no legal moves");

        self.depth_limited = false;
        self.nodes_visited += 1;

        // always check at the root, polling alone may let a small tree run past the deadline
        if self.timer.is_expired() {
            return Err(SearchCutoff);
        }

        let mut best_move = None;
        let mut best_value = Valuation::MIN;

        let mut alpha = Valuation::MIN;
        let beta = Valuation::MAX;

        for legal_move in board.legal_moves() {
            let next_board = board.apply_move(legal_move);

            let value = -self.alpha_beta(&next_board, depth - 1, 1, -beta, -alpha)?;

            if best_move.is_none() || value > best_value {
                best_move = Some(legal_move);
                best_value = value;
            }

            if self.alpha_beta_prune && value > alpha {
                alpha = value;
            }
        }

        Ok((best_move, best_value))
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::isolation::valuation::mobility_valuation;
    use crate::isolation::{BoardConfig, Player};

    // plain minimax with separate max and min plies, scored from `root_player`'s perspective
    fn exhaustive_minimax(board: &Board, depth: u32, ply: u32, root_player: Player) -> (Option<Move>, Valuation) {
        let maximizing = board.active_player() == root_player;

        if board.is_terminal() {
            let value = if maximizing {
                Valuation::TerminalLoss { plies: ply }
            } else {
                Valuation::TerminalWin { plies: ply }
            };
            return (None, value);
        }

        if depth == 0 {
            return (None, mobility_valuation(board, root_player));
        }

        let mut best: Option<(Move, Valuation)> = None;

        for legal_move in board.legal_moves() {
            let (_, value) = exhaustive_minimax(&board.apply_move(legal_move), depth - 1, ply + 1, root_player);

            let improves = match best {
                None => true,
                Some((_, best_value)) if maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };

            if improves {
                best = Some((legal_move, value));
            }
        }

        let (best_move, best_value) = best.unwrap();
        (Some(best_move), best_value)
    }

    fn random_position(rng: &mut StdRng) -> Board {
        let config = BoardConfig::new(rng.gen_range(4..=7), rng.gen_range(4..=7)).unwrap();
        let mut board = Board::new(config);

        for _ in 0..rng.gen_range(2..10) {
            match board.legal_moves().choose(rng) {
                Some(&legal_move) => board = board.apply_move(legal_move),
                None => break,
            }
        }

        board
    }

    #[test]
    fn test_pruning_matches_exhaustive_minimax() {
        let mut rng = StdRng::seed_from_u64(0x15_01a7);
        let timer = SearchTimer::unlimited();
        let config = SearchConfig::default();
        let mut checked = 0;

        while checked < 40 {
            let board = random_position(&mut rng);

            if board.is_terminal() {
                continue;
            }

            for depth in 1..=5 {
                let expected = exhaustive_minimax(&board, depth, 0, board.active_player());

                let mut pruned = SearchWorker::new(&timer, mobility_valuation, &config);
                let mut unpruned = SearchWorker::new(&timer, mobility_valuation, &config).with_pruning(false);

                assert_eq!(pruned.search_root(&board, depth), Ok(expected), "depth {}\n{}", depth, board);
                assert_eq!(unpruned.search_root(&board, depth), Ok(expected), "depth {}\n{}", depth, board);
                assert!(pruned.nodes_visited() <= unpruned.nodes_visited());
            }

            checked += 1;
        }
    }

    #[test]
    fn test_ties_go_to_the_first_move() {
        // both players unplaced on an empty board: every placement scores the same at depth 1
        let board = Board::new(BoardConfig::new(5, 5).unwrap());
        let timer = SearchTimer::unlimited();
        let mut worker = SearchWorker::new(&timer, mobility_valuation, &SearchConfig::default());

        let (best_move, _) = worker.search_root(&board, 1).unwrap();

        let values: Vec<Valuation> = board
            .legal_moves()
            .into_iter()
            .map(|m| -mobility_valuation(&board.apply_move(m), Player::Second))
            .collect();
        let best_value = *values.iter().max().unwrap();
        let first_best = values.iter().position(|&v| v == best_value).unwrap();

        assert_eq!(best_move, Some(board.legal_moves()[first_best]));
    }

    #[test]
    #[should_panic(expected = "no legal moves")]
    fn test_terminal_root_panics() {
        let timer = SearchTimer::unlimited();
        let lost: Board = "3x3 ply 2\n##1\n#..\n.#2".parse().unwrap();
        let mut worker = SearchWorker::new(&timer, mobility_valuation, &SearchConfig::default());

        let _ = worker.search_root(&lost, 3);
    }

    #[test]
    fn test_resolved_search() {
        let timer = SearchTimer::unlimited();
        let config = SearchConfig::default();

        // every line ends within two plies, so a depth 4 search never needs the heuristic
        let board: Board = "3x3 ply 2\n##1\n...\n..2".parse().unwrap();
        let mut worker = SearchWorker::new(&timer, mobility_valuation, &config);
        let (best_move, value) = worker.search_root(&board, 4).unwrap();

        assert_eq!(best_move, Some(Move::new(3)));
        assert_eq!(value, Valuation::TerminalWin { plies: 1 });
        assert!(!worker.depth_limited());

        worker.search_root(&board, 1).unwrap();
        assert!(worker.depth_limited());
    }

    #[test]
    fn test_expired_timer_cuts_search() {
        let timer = SearchTimer::new(Duration::ZERO, Duration::ZERO);
        let config = SearchConfig {
            poll_interval: 1,
            ..SearchConfig::default()
        };
        let mut worker = SearchWorker::new(&timer, mobility_valuation, &config);

        assert_eq!(worker.search_root(&Board::default(), 3), Err(SearchCutoff));
    }

    #[test]
    fn test_deadline_interrupts_deep_recursion() {
        let budget = Duration::from_millis(10);
        let timer = SearchTimer::new(budget, Duration::ZERO);
        let config = SearchConfig {
            poll_interval: 1,
            ..SearchConfig::default()
        };
        // without pruning a depth 8 tree from the middle of the board has millions of nodes
        let mut worker = SearchWorker::new(&timer, mobility_valuation, &config).with_pruning(false);
        let board = Board::default().apply_move(Move::new(38)).apply_move(Move::new(60));

        assert_eq!(worker.search_root(&board, 8), Err(SearchCutoff));

        assert!(worker.nodes_visited() > 1);
        assert!(timer.elapsed() >= budget);
        assert!(timer.elapsed() < budget + Duration::from_millis(40), "took {:?}", timer.elapsed());
    }
}
