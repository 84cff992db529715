mod board;
mod notation;
pub mod valuation;

pub use board::{Board, BoardConfig, Cell, Move, Player};
pub use valuation::{Valuation, ValuationFn};
