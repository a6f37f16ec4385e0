use std::fmt;

use crate::error::GameError;
use crate::movegen::{Occupancy, Occupant};
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// A piece in play. Only the board moves it; its kind and color never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self { kind, color, square }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn square(&self) -> Square {
        self.square
    }
}

/// How the text renderer draws pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Wrap black pieces in ANSI magenta.
    pub ansi_color: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self { ansi_color: true }
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Active and captured pieces, plus a square -> active-list index that is
/// kept in sync with every mutation.
#[derive(Debug, Clone)]
pub struct Board {
    active: Vec<Piece>,
    captured: Vec<Piece>,
    index: [Option<usize>; 64],
}

impl Board {
    /// The standard 32-piece starting layout.
    pub fn new() -> Self {
        let mut active = Vec::with_capacity(32);
        for file in 1..=8 {
            let kind = BACK_RANK[file as usize - 1];
            for (color, back, front) in [(Color::White, 1, 2), (Color::Black, 8, 7)] {
                active.push(Piece::new(kind, color, square(file, back)));
                active.push(Piece::new(PieceKind::Pawn, color, square(file, front)));
            }
        }
        let mut board = Self {
            active,
            captured: Vec::new(),
            index: [None; 64],
        };
        board.reindex();
        board
    }

    pub fn empty() -> Self {
        Self {
            active: Vec::new(),
            captured: Vec::new(),
            index: [None; 64],
        }
    }

    /// An arbitrary setup. Fails if two pieces share a square.
    pub fn with_pieces<I>(pieces: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut board = Self::empty();
        for piece in pieces {
            let slot = &mut board.index[piece.square.index()];
            if slot.is_some() {
                return Err(GameError::SquareOccupied(piece.square));
            }
            *slot = Some(board.active.len());
            board.active.push(piece);
        }
        Ok(board)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.index[square.index()].map(|i| &self.active[i])
    }

    pub fn active_pieces(&self) -> &[Piece] {
        &self.active
    }

    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    /// Read-only occupancy snapshot for move generation.
    pub fn occupancy(&self) -> Occupancy {
        let mut occupancy = Occupancy::empty();
        for piece in &self.active {
            occupancy.set(
                piece.square,
                Occupant {
                    kind: piece.kind,
                    color: piece.color,
                },
            );
        }
        occupancy
    }

    /// Moves the piece on `from` to `to`. Whatever stood on `to` is taken
    /// out of play and returned. Callers are responsible for legality.
    pub(crate) fn relocate(
        &mut self,
        from: Square,
        to: Square,
    ) -> Result<Option<Piece>, GameError> {
        let mover = self.index[from.index()].ok_or(GameError::EmptySquare(from))?;
        let victim = self.index[to.index()];
        self.active[mover].square = to;

        let captured = victim.map(|i| {
            let piece = self.active.remove(i);
            self.captured.push(piece);
            piece
        });
        self.reindex();
        Ok(captured)
    }

    fn reindex(&mut self) {
        self.index = [None; 64];
        for (i, piece) in self.active.iter().enumerate() {
            self.index[piece.square.index()] = Some(i);
        }
    }

    pub fn render(&self, style: RenderStyle) -> String {
        let paint = |piece: &Piece| {
            let symbol = piece.kind.symbol();
            if style.ansi_color && piece.color == Color::Black {
                format!("\u{1b}[35m{}\u{1b}[0m", symbol)
            } else {
                symbol.to_string()
            }
        };

        let mut result = String::from(" ┌─┬─┬─┬─┬─┬─┬─┬─┐\n");
        for rank in (1..=8).rev() {
            result.push_str(&rank.to_string());
            for file in 1..=8 {
                result.push('│');
                match self.piece_at(square(file, rank)) {
                    Some(piece) => result.push_str(&paint(piece)),
                    None if (file + rank) % 2 == 1 => result.push('█'),
                    None => result.push('░'),
                }
            }
            result.push_str("│\n");
            if rank != 1 {
                result.push_str(" ├─┼─┼─┼─┼─┼─┼─┼─┤\n");
            }
        }
        result.push_str(" └─┴─┴─┴─┴─┴─┴─┴─┘\n  a b c d e f g h\n");

        if !self.captured.is_empty() {
            for color in [Color::White, Color::Black] {
                let taken: Vec<String> = self
                    .captured
                    .iter()
                    .filter(|p| p.color == color.opposite())
                    .map(|p| paint(p))
                    .collect();
                result.push_str(&format!("Captured by {}: {}\n", color, taken.join(" ")));
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(RenderStyle { ansi_color: false }))
    }
}

// Only called with literal in-range coordinates.
fn square(file: i32, rank: i32) -> Square {
    match Square::new(file, rank) {
        Ok(square) => square,
        Err(e) => unreachable!("{}", e),
    }
}
