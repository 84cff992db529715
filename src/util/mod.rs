use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::agent::{Agent, RandomAgent};
use crate::isolation::Board;

/// Plays up to `plies` random moves from `board`, stopping early if the game ends.
pub fn random_opening(board: Board, plies: u32, rng: &mut StdRng) -> Board {
    let mut board = board;
    let mut random_agent = RandomAgent::with_seed(rng.gen());

    for _ in 0..plies {
        match random_agent.get_move(&board, Duration::ZERO) {
            Some(random_move) => board = board.apply_move(random_move),
            None => break,
        }
    }

    board
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::isolation::{BoardConfig, Player};

    #[test]
    fn test_random_opening() {
        let board = Board::new(BoardConfig::new(5, 5).unwrap());

        let opening = random_opening(board, 2, &mut StdRng::seed_from_u64(11));
        let replay = random_opening(board, 2, &mut StdRng::seed_from_u64(11));

        assert_eq!(opening, replay);
        assert_eq!(opening.ply_count(), 2);
        assert!(opening.location(Player::First).is_some());
        assert!(opening.location(Player::Second).is_some());
    }

    #[test]
    fn test_random_opening_stops_at_game_end() {
        let board: Board = "3x3 ply 2\n##1\n#..\n.#2".parse().unwrap();

        assert_eq!(random_opening(board, 4, &mut StdRng::seed_from_u64(0)), board);
    }
}
