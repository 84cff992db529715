use thiserror::Error;

/// Failure to read a board from its text notation.
#[derive(Debug, Error)]
pub enum NotationError {
    #[error("missing header line")]
    MissingHeader,
    #[error("header \"{0}\" didn't match `WIDTHxHEIGHT ply N`")]
    BadHeader(String),
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },
    #[error("unexpected character '{ch}' in row {row}")]
    UnknownCell { row: usize, ch: char },
    #[error("player {0} appears more than once")]
    DuplicatePlayer(u8),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions {width}x{height} are invalid (at most 128 cells, both sides non-zero)")]
    Dimensions { width: u8, height: u8 },
    #[error("could not read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unknown agent \"{0}\" (expected first, random, greedy, minimax or alphabeta)")]
    UnknownAgent(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}
