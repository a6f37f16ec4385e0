use crate::board::Color;
use crate::square::Square;

/// Failures decoding a coordinate token or building a square.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    #[error("malformed coordinate {0:?}: expected a letter A-H followed by a digit 1-8")]
    Malformed(String),

    #[error("coordinate out of range: file {file}, rank {rank} (both must be 1-8)")]
    OutOfRange { file: i32, rank: i32 },
}

/// Errors returned by the turn engine. None of them leave the game in a
/// partially applied state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("there is no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {owner}")]
    WrongOwner { square: Square, owner: Color },

    #[error("it is {expected}'s turn, not {got}'s")]
    NotYourTurn { expected: Color, got: Color },

    #[error("the piece on {0} has no legal moves")]
    NoLegalMoves(Square),

    #[error("{0} is not a legal destination for the selected piece")]
    IllegalDestination(Square),

    #[error("no piece is selected")]
    NoSelection,

    #[error("{0} is already occupied")]
    SquareOccupied(Square),

    #[error("the game has ended")]
    GameEnded,
}
