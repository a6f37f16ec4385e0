use crate::board::{Board, Color};
use crate::error::GameError;
use crate::movegen::legal_destinations;
use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    AwaitingSelection,
    /// A piece is selected; `legal_moves` is fixed until the move is applied
    /// or the selection is replaced.
    AwaitingDestination {
        from: Square,
        legal_moves: Vec<Square>,
    },
    Ended,
}

/// The turn engine: owns the board and whose turn it is, and is the only
/// thing that mutates either.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    state: TurnState,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::White)
    }

    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            state: TurnState::AwaitingSelection,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == TurnState::Ended
    }

    /// Selects the piece on `square` for `side`. On success the engine waits
    /// for a destination; on failure nothing changes, including any earlier
    /// selection.
    pub fn select(&mut self, square: Square, side: Color) -> Result<&[Square], GameError> {
        if self.is_ended() {
            return Err(GameError::GameEnded);
        }
        let piece = self.board.piece_at(square).ok_or(GameError::EmptySquare(square))?;
        if piece.color() != side {
            return Err(GameError::WrongOwner {
                square,
                owner: piece.color(),
            });
        }
        if side != self.side_to_move {
            return Err(GameError::NotYourTurn {
                expected: self.side_to_move,
                got: side,
            });
        }

        let legal_moves = legal_destinations(piece, &self.board.occupancy());
        if legal_moves.is_empty() {
            return Err(GameError::NoLegalMoves(square));
        }

        self.state = TurnState::AwaitingDestination {
            from: square,
            legal_moves,
        };
        Ok(self.legal_moves())
    }

    /// Legal destinations of the current selection, empty when nothing is
    /// selected.
    pub fn legal_moves(&self) -> &[Square] {
        match &self.state {
            TurnState::AwaitingDestination { legal_moves, .. } => legal_moves,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<Square> {
        match self.state {
            TurnState::AwaitingDestination { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Moves the selected piece to `to`, captures whatever stood there and
    /// passes the turn. An illegal `to` leaves the selection in place.
    pub fn apply_move(&mut self, to: Square) -> Result<&Board, GameError> {
        let from = match &self.state {
            TurnState::Ended => return Err(GameError::GameEnded),
            TurnState::AwaitingSelection => return Err(GameError::NoSelection),
            TurnState::AwaitingDestination { from, legal_moves } => {
                if !legal_moves.contains(&to) {
                    return Err(GameError::IllegalDestination(to));
                }
                *from
            }
        };

        self.board.relocate(from, to)?;
        self.side_to_move = self.side_to_move.opposite();
        self.state = TurnState::AwaitingSelection;
        Ok(&self.board)
    }

    /// Drops the current selection without moving.
    pub fn cancel_selection(&mut self) -> Result<(), GameError> {
        match self.state {
            TurnState::Ended => Err(GameError::GameEnded),
            _ => {
                self.state = TurnState::AwaitingSelection;
                Ok(())
            }
        }
    }

    pub fn quit(&mut self) -> &TurnState {
        self.state = TurnState::Ended;
        &self.state
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, PieceKind};

    fn sq(token: &str) -> Square {
        token.parse().unwrap()
    }

    #[test]
    fn test_select_empty_square() {
        let mut game = Game::new();
        let before = game.board().active_pieces().to_vec();
        assert_eq!(game.select(sq("e4"), Color::White), Err(GameError::EmptySquare(sq("e4"))));
        assert_eq!(game.state(), &TurnState::AwaitingSelection);
        assert_eq!(game.board().active_pieces(), &before[..]);
    }

    #[test]
    fn test_select_opponent_piece() {
        let mut game = Game::new();
        assert_eq!(
            game.select(sq("e7"), Color::White),
            Err(GameError::WrongOwner {
                square: sq("e7"),
                owner: Color::Black
            })
        );
    }

    #[test]
    fn test_select_checks_square_before_turn() {
        let mut game = Game::new();
        assert_eq!(game.select(sq("e4"), Color::Black), Err(GameError::EmptySquare(sq("e4"))));
        assert_eq!(
            game.select(sq("e2"), Color::Black),
            Err(GameError::WrongOwner {
                square: sq("e2"),
                owner: Color::White
            })
        );
        assert_eq!(game.state(), &TurnState::AwaitingSelection);
    }

    #[test]
    fn test_select_out_of_turn() {
        let mut game = Game::new();
        assert_eq!(
            game.select(sq("e7"), Color::Black),
            Err(GameError::NotYourTurn {
                expected: Color::White,
                got: Color::Black
            })
        );
        assert_eq!(game.state(), &TurnState::AwaitingSelection);
    }

    #[test]
    fn test_select_boxed_in_piece() {
        let mut game = Game::new();
        assert_eq!(game.select(sq("a1"), Color::White), Err(GameError::NoLegalMoves(sq("a1"))));
        assert_eq!(game.state(), &TurnState::AwaitingSelection);
    }

    #[test]
    fn test_failed_reselection_keeps_previous() {
        let mut game = Game::new();
        game.select(sq("g1"), Color::White).unwrap();
        assert!(game.select(sq("d1"), Color::White).is_err());
        assert_eq!(game.selected(), Some(sq("g1")));

        game.select(sq("b2"), Color::White).unwrap();
        assert_eq!(game.selected(), Some(sq("b2")));
    }

    #[test]
    fn test_illegal_destination_allows_retry() {
        let mut game = Game::new();
        let legal = game.select(sq("g1"), Color::White).unwrap().to_vec();

        assert_eq!(game.apply_move(sq("g3")).unwrap_err(), GameError::IllegalDestination(sq("g3")));
        assert_eq!(game.apply_move(sq("g2")).unwrap_err(), GameError::IllegalDestination(sq("g2")));
        assert_eq!(game.legal_moves(), &legal[..]);
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.board().piece_at(sq("g1")).is_some());

        game.apply_move(sq("f3")).unwrap();
        assert_eq!(game.board().piece_at(sq("f3")).unwrap().kind(), PieceKind::Knight);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.state(), &TurnState::AwaitingSelection);
    }

    #[test]
    fn test_apply_without_selection() {
        let mut game = Game::new();
        assert_eq!(game.apply_move(sq("e4")).unwrap_err(), GameError::NoSelection);
    }

    #[test]
    fn test_capture_moves_exactly_one_piece() {
        let board = Board::with_pieces([
            Piece::new(PieceKind::Queen, Color::White, sq("d1")),
            Piece::new(PieceKind::Rook, Color::Black, sq("d6")),
            Piece::new(PieceKind::Pawn, Color::Black, sq("d7")),
            Piece::new(PieceKind::King, Color::Black, sq("e8")),
        ])
        .unwrap();
        let mut game = Game::from_board(board, Color::White);
        game.select(sq("d1"), Color::White).unwrap();
        let board = game.apply_move(sq("d6")).unwrap();

        assert_eq!(board.active_pieces().len(), 3);
        assert_eq!(board.captured_pieces().len(), 1);
        assert_eq!(board.captured_pieces()[0].kind(), PieceKind::Rook);
        assert_eq!(board.piece_at(sq("d6")).unwrap().kind(), PieceKind::Queen);
        assert_eq!(board.piece_at(sq("d7")).unwrap().kind(), PieceKind::Pawn);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn test_cancel_selection() {
        let mut game = Game::new();
        game.select(sq("e2"), Color::White).unwrap();
        game.cancel_selection().unwrap();
        assert_eq!(game.selected(), None);
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_quit_from_any_state() {
        let mut game = Game::new();
        game.select(sq("e2"), Color::White).unwrap();
        assert_eq!(game.quit(), &TurnState::Ended);
        assert_eq!(game.apply_move(sq("e4")).unwrap_err(), GameError::GameEnded);
        assert_eq!(game.select(sq("e2"), Color::White), Err(GameError::GameEnded));
        assert_eq!(game.cancel_selection(), Err(GameError::GameEnded));
        assert!(game.board().piece_at(sq("e2")).is_some());

        let mut fresh = Game::new();
        assert_eq!(fresh.quit(), &TurnState::Ended);
    }
}
