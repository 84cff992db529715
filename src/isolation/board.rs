use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub type Cell = u8;

// the open-cell mask is a u128
const MAX_CELLS: u32 = 128;

// (column delta, row delta) with rows growing downwards
// order: NNE, ENE, ESE, SSE, SSW, WSW, WNW, NNW
const KNIGHT_STEPS: [(i16, i16); 8] = [(1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1), (-2, -1), (-1, -2)];

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { width: 11, height: 9 }
    }
}

impl BoardConfig {
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        let config = BoardConfig { width, height };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.num_cells() > MAX_CELLS {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }

    pub fn num_cells(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    fn full_mask(&self) -> u128 {
        match self.num_cells() {
            MAX_CELLS => u128::MAX,
            n => (1u128 << n) - 1,
        }
    }
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

// flip the player, i.e. First -> Second and Second -> First
impl std::ops::Not for Player {
    type Output = Player;

    fn not(self) -> Self::Output {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "Player 1"),
            Player::Second => write!(f, "Player 2"),
        }
    }
}

/*====================================================================================================================*/

/// Destination cell of the active player's next step.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    cell: Cell,
}

impl Move {
    pub fn new(cell: Cell) -> Self {
        assert!(u32::from(cell) < MAX_CELLS, "Cell needs to be smaller than 128");

        Move { cell }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cell)
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({})", self.cell)
    }
}

/*====================================================================================================================*/

/// Immutable knight's Isolation position.
///
/// Open cells are the set bits of `open`, cell `row * width + col` with row 0 on top. Cells a player has
/// stepped on stay blocked for the rest of the game. A player without a location has not been placed yet and may
/// move to any open cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    open: u128,
    ply_count: u32,
    locs: [Option<Cell>; 2],
    config: BoardConfig,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        assert!(config.validate().is_ok(), "Invalid board config {:?}", config);

        Board {
            open: config.full_mask(),
            ply_count: 0,
            locs: [None, None],
            config,
        }
    }

    pub(crate) fn from_parts(config: BoardConfig, open: u128, ply_count: u32, locs: [Option<Cell>; 2]) -> Self {
        Board {
            open: open & config.full_mask(),
            ply_count,
            locs,
            config,
        }
    }

    pub fn width(&self) -> u8 {
        self.config.width
    }

    pub fn height(&self) -> u8 {
        self.config.height
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    pub fn active_player(&self) -> Player {
        if self.ply_count % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    pub fn location(&self, player: Player) -> Option<Cell> {
        self.locs[player.index()]
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        u32::from(cell) < self.config.num_cells() && self.open & (1u128 << cell) != 0
    }

    pub fn open_cells(&self) -> u32 {
        self.open.count_ones()
    }

    /// (column, row) of a cell
    pub fn coords(&self, cell: Cell) -> (u8, u8) {
        (cell % self.config.width, cell / self.config.width)
    }

    pub fn cell_at(&self, col: u8, row: u8) -> Cell {
        assert!(
            col < self.config.width && row < self.config.height,
            "({}, {}) is outside the board",
            col,
            row
        );

        row * self.config.width + col
    }

    fn knight_targets(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let (col, row) = self.coords(cell);
        let width = i16::from(self.config.width);
        let height = i16::from(self.config.height);

        KNIGHT_STEPS.iter().filter_map(move |&(dc, dr)| {
            let c = i16::from(col) + dc;
            let r = i16::from(row) + dr;

            if c < 0 || r < 0 || c >= width || r >= height {
                None
            } else {
                Some((r * width + c) as Cell)
            }
        })
    }

    fn moves_for(&self, player: Player) -> Vec<Move> {
        match self.location(player) {
            None => (0..self.config.num_cells() as Cell)
                .filter(|&cell| self.is_open(cell))
                .map(Move::new)
                .collect(),
            Some(loc) => self
                .knight_targets(loc)
                .filter(|&cell| self.is_open(cell))
                .map(Move::new)
                .collect(),
        }
    }

    /// Legal moves of the active player, in a fixed order: cell order while unplaced, otherwise knight step order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.moves_for(self.active_player())
    }

    /// Number of moves `player` would have if it were their turn.
    pub fn liberties(&self, player: Player) -> u32 {
        match self.location(player) {
            None => self.open_cells(),
            Some(loc) => self.knight_targets(loc).filter(|&cell| self.is_open(cell)).count() as u32,
        }
    }

    pub fn has_legal_move(&self) -> bool {
        match self.location(self.active_player()) {
            None => self.open != 0,
            Some(loc) => self.knight_targets(loc).any(|cell| self.is_open(cell)),
        }
    }

    /// The active player has no move left and has lost.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move()
    }

    pub fn winner(&self) -> Option<Player> {
        if self.is_terminal() {
            Some(!self.active_player())
        } else {
            None
        }
    }

    pub fn is_legal_move(&self, move_: Move) -> bool {
        let cell = move_.cell();

        if !self.is_open(cell) {
            return false;
        }

        match self.location(self.active_player()) {
            None => true,
            Some(loc) => self.knight_targets(loc).any(|target| target == cell),
        }
    }

    /// Position after the active player steps to `move_`; `self` is left untouched.
    #[must_use]
    pub fn apply_move(&self, move_: Move) -> Board {
        assert!(
            self.is_legal_move(move_),
            "Trying to apply illegal move {} in position\n{}",
            move_,
            self
        );

        let mut next = *self;

        next.open &= !(1u128 << move_.cell());
        next.locs[self.active_player().index()] = Some(move_.cell());
        next.ply_count += 1;

        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(BoardConfig::default())
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_new() {
        let board = Board::default();

        assert_eq!(board.width(), 11);
        assert_eq!(board.height(), 9);
        assert_eq!(board.open_cells(), 99);
        assert_eq!(board.active_player(), Player::First);
        assert_eq!(board.location(Player::First), None);
        assert_eq!(board.location(Player::Second), None);
    }

    #[test]
    fn test_config_limits() {
        assert!(BoardConfig::new(16, 8).is_ok());
        assert!(BoardConfig::new(0, 5).is_err());
        assert!(BoardConfig::new(13, 10).is_err());

        let board = Board::new(BoardConfig::new(16, 8).unwrap());
        assert_eq!(board.open_cells(), 128);
        assert_eq!(board.legal_moves().len(), 128);
    }

    #[test]
    fn test_opening_moves_are_all_open_cells() {
        let board = Board::default();
        let moves = board.legal_moves();

        assert_eq!(moves.len(), 99);
        assert_eq!(moves.first(), Some(&Move::new(0)));
        assert_eq!(moves.last(), Some(&Move::new(98)));

        // second player may not pick the occupied cell
        let board = board.apply_move(Move::new(40));
        assert_eq!(board.active_player(), Player::Second);
        assert_eq!(board.legal_moves().len(), 98);
        assert!(!board.is_legal_move(Move::new(40)));
    }

    #[test]
    fn test_knight_moves_in_step_order() {
        let board = Board::default().apply_move(Move::new(0)).apply_move(Move::new(98));

        // from the top left corner only ESE (2, 1) and SSE (1, 2) stay on the board
        assert_eq!(board.legal_moves(), vec![Move::new(13), Move::new(23)]);
        assert_eq!(board.liberties(Player::First), 2);

        // centre of the board reaches all eight targets, NNE first
        let board = Board::default().apply_move(Move::new(49)).apply_move(Move::new(0));
        let targets: Vec<(u8, u8)> = board.legal_moves().iter().map(|m| board.coords(m.cell())).collect();

        assert_eq!(
            targets,
            vec![(6, 2), (7, 3), (7, 5), (6, 6), (4, 6), (3, 5), (3, 3), (4, 2)]
        );
    }

    #[test]
    fn test_apply_move_is_pure() {
        let board = Board::default();
        let next = board.apply_move(Move::new(5));

        assert_eq!(board.open_cells(), 99);
        assert_eq!(board.ply_count(), 0);
        assert_eq!(next.open_cells(), 98);
        assert_eq!(next.ply_count(), 1);
        assert_eq!(next.location(Player::First), Some(5));
        assert!(!next.is_open(5));
    }

    #[test]
    fn test_terminal_and_winner() {
        let config = BoardConfig::new(3, 3).unwrap();
        // first player in the centre has no knight targets on a 3x3 board
        let board = Board::new(config).apply_move(Move::new(4)).apply_move(Move::new(0));

        assert!(board.is_terminal());
        assert_eq!(board.winner(), Some(Player::Second));
        assert!(board.legal_moves().is_empty());
        assert_eq!(board.liberties(Player::Second), 2);
    }

    #[test]
    #[should_panic]
    fn test_illegal_move_panics() {
        let board = Board::default().apply_move(Move::new(0)).apply_move(Move::new(98));
        let _ = board.apply_move(Move::new(1));
    }
}
