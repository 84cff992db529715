pub mod agent;
pub mod config;
pub mod error;
pub mod isolation;
pub mod minimax;
pub mod tournament;
mod util;

pub use isolation::{Board, Move, Player};
