use std::fmt::Display;

use crate::isolation::{Board, Player};

pub type ValuationFn = fn(&Board, Player) -> Valuation;

// liberties of the player on the move; zero means `board` is terminal, which no heuristic may be asked to score
fn assert_non_terminal(board: &Board, ours: u32, theirs: u32, player: Player) {
    let active_liberties = if board.active_player() == player { ours } else { theirs };

    assert!(
        active_liberties > 0,
        "Heuristic called on terminal position\n{}",
        board
    );
}

/// Difference between the legal move counts of `player` and the opponent.
pub fn mobility_valuation(board: &Board, player: Player) -> Valuation {
    let ours = board.liberties(player);
    let theirs = board.liberties(!player);

    assert_non_terminal(board, ours, theirs, player);

    Valuation::NonTerminal {
        value: ours as i32 - theirs as i32,
    }
}

/// Only counts the moves available to `player`.
pub fn own_mobility_valuation(board: &Board, player: Player) -> Valuation {
    let ours = board.liberties(player);
    let theirs = board.liberties(!player);

    assert_non_terminal(board, ours, theirs, player);

    Valuation::NonTerminal { value: ours as i32 }
}

/*====================================================================================================================*/

/// Score of a position from the perspective of one player.
///
/// Terminal outcomes rank above (`TerminalWin`) or below (`TerminalLoss`) every heuristic value and carry the
/// number of plies from the search root to the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Valuation {
    NonTerminal { value: i32 },
    TerminalWin { plies: u32 },
    TerminalLoss { plies: u32 },
}

impl Valuation {
    /// lower bound of every valuation; only reachable by a root that is already lost
    pub const MIN: Valuation = Valuation::TerminalLoss { plies: 0 };
    /// upper bound of every valuation
    pub const MAX: Valuation = Valuation::TerminalWin { plies: 0 };

    pub fn is_win(&self) -> bool {
        matches!(self, Valuation::TerminalWin { .. })
    }

    pub fn is_loss(&self) -> bool {
        matches!(self, Valuation::TerminalLoss { .. })
    }
}

/// flip the player perspective of the valuation
impl std::ops::Neg for Valuation {
    type Output = Valuation;

    fn neg(self) -> Self::Output {
        use Valuation::{NonTerminal, TerminalLoss, TerminalWin};

        match self {
            NonTerminal { value } => NonTerminal { value: -value },
            TerminalWin { plies } => TerminalLoss { plies },
            TerminalLoss { plies } => TerminalWin { plies },
        }
    }
}

impl PartialOrd for Valuation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Valuation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering::{Greater, Less};
        use Valuation::{NonTerminal, TerminalLoss, TerminalWin};

        match (self, other) {
            (NonTerminal { value: v1 }, NonTerminal { value: v2 }) => v1.cmp(v2),
            // pick the win with fewer plies
            (TerminalWin { plies: p1 }, TerminalWin { plies: p2 }) => p1.cmp(p2).reverse(),
            // pick the loss with more plies: opponent might not find it
            (TerminalLoss { plies: p1 }, TerminalLoss { plies: p2 }) => p1.cmp(p2),
            (TerminalWin { .. }, _) => Greater,
            (_, TerminalWin { .. }) => Less,
            (TerminalLoss { .. }, _) => Less,
            (_, TerminalLoss { .. }) => Greater,
        }
    }
}

impl Display for Valuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Valuation::NonTerminal { value } => write!(f, "{:+}", value),
            Valuation::TerminalWin { plies } => write!(f, "win in {} plies", plies),
            Valuation::TerminalLoss { plies } => write!(f, "loss in {} plies", plies),
        }
    }
}

/*====================================================================================================================*/
