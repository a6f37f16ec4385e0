pub mod board;
pub mod cli;
pub mod error;
pub mod game;
pub mod movegen;
pub mod square;

pub use board::{Board, Color, Piece, PieceKind, RenderStyle};
pub use error::{CoordinateError, GameError};
pub use game::{Game, TurnState};
pub use square::Square;
