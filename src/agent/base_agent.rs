use std::time::Duration;

use crate::isolation::{Board, Move};

/// Anything that can pick a move for the player on the move.
pub trait Agent {
    /// Move for the active player of `board`, expected within `time_left`.
    ///
    /// `None` forfeits the game and is only returned when `board` has no legal move left.
    fn get_move(&mut self, board: &Board, time_left: Duration) -> Option<Move>;

    fn name(&self) -> &str {
        "Agent"
    }
}
