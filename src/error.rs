use thiserror::Error;

/// Failures while reading a problem. Both are fatal and stop the run before any search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed board: {0}")]
    MalformedBoard(String),
    #[error("unrecognized robot id {ch:?} at ({row}, {col}); robot count is {robot_count}")]
    UnrecognizedRobotId {
        ch: char,
        row: usize,
        col: usize,
        robot_count: usize,
    },
}

impl ParseError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ParseError::MalformedBoard(msg.into())
    }
}

/// A move outside the five atomic ones. Seeing this from the search means a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid move encoding: delta ({dr}, {dc})")]
    InvalidDelta { dr: i32, dc: i32 },
    #[error("invalid move encoding: symbol {0:?}")]
    InvalidSymbol(char),
    #[error("plan has {found} lines but the problem has {expected} robots")]
    RobotCount { expected: usize, found: usize },
}
