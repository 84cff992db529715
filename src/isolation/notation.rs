//! Plain text form of a [`Board`]:
//!
//! ```text
//! 3x3 ply 2
//! ##1
//! ...
//! ..2
//! ```
//!
//! The header gives the board dimensions and the number of plies played so far (which decides the player on
//! the move), followed by one line per row: `.` open, `#` blocked, `1`/`2` the players' current cells.

use std::fmt::Display;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::NotationError;
use crate::isolation::{Board, BoardConfig, Cell, Player};

lazy_static! {
    static ref HEADER_REGEX: Regex =
        Regex::new(r"^\s*(?P<width>\d+)\s*x\s*(?P<height>\d+)\s+ply\s+(?P<ply>\d+)\s*$").unwrap();
}

const OPEN: char = '.';
const BLOCKED: char = '#';

impl FromStr for Board {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().ok_or(NotationError::MissingHeader)?;

        let header_captures = HEADER_REGEX
            .captures(header)
            .ok_or_else(|| NotationError::BadHeader(header.to_owned()))?;

        let bad_header = |_| NotationError::BadHeader(header.to_owned());

        let width: u8 = header_captures["width"].parse().map_err(bad_header)?;
        let height: u8 = header_captures["height"].parse().map_err(bad_header)?;
        let ply_count: u32 = header_captures["ply"].parse().map_err(bad_header)?;

        let config = BoardConfig::new(width, height)?;

        let rows: Vec<&str> = lines.collect();

        if rows.len() != usize::from(height) {
            return Err(NotationError::RowCount {
                expected: usize::from(height),
                found: rows.len(),
            });
        }

        let mut open = 0u128;
        let mut locs: [Option<Cell>; 2] = [None, None];

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();

            if found != usize::from(width) {
                return Err(NotationError::RowLength {
                    row,
                    expected: usize::from(width),
                    found,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let cell = (row * usize::from(width) + col) as Cell;

                match ch {
                    OPEN => open |= 1u128 << cell,
                    BLOCKED => {}
                    '1' | '2' => {
                        let player = if ch == '1' { Player::First } else { Player::Second };

                        if locs[player.index()].replace(cell).is_some() {
                            return Err(NotationError::DuplicatePlayer(player.index() as u8 + 1));
                        }
                    }
                    _ => return Err(NotationError::UnknownCell { row, ch }),
                }
            }
        }

        Ok(Board::from_parts(config, open, ply_count, locs))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} ply {}", self.width(), self.height(), self.ply_count())?;

        for row in 0..self.height() {
            writeln!(f)?;

            for col in 0..self.width() {
                let cell = self.cell_at(col, row);

                let symbol = if self.location(Player::First) == Some(cell) {
                    '1'
                } else if self.location(Player::Second) == Some(cell) {
                    '2'
                } else if self.is_open(cell) {
                    OPEN
                } else {
                    BLOCKED
                };

                write!(f, "{}", symbol)?;
            }
        }

        Ok(())
    }
}

/*====================================================================================================================*/
