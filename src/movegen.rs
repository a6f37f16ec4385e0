use crate::board::{Color, Piece, PieceKind};
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub kind: PieceKind,
    pub color: Color,
}

/// What stands on each square, frozen at the moment it was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    squares: [Option<Occupant>; 64],
}

impl Occupancy {
    pub fn empty() -> Self {
        Self { squares: [None; 64] }
    }

    pub(crate) fn set(&mut self, square: Square, occupant: Occupant) {
        self.squares[square.index()] = Some(occupant);
    }

    pub fn get(&self, square: Square) -> Option<Occupant> {
        self.squares[square.index()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }
}

/// A move-search strategy: legal destinations for `piece` given `occupancy`.
pub type MoveRule = fn(&Piece, &Occupancy) -> Vec<Square>;

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];
const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1),
];

pub fn rule_for(kind: PieceKind) -> MoveRule {
    match kind {
        PieceKind::Pawn => pawn_moves,
        PieceKind::Knight => knight_moves,
        PieceKind::Bishop => bishop_moves,
        PieceKind::Rook => rook_moves,
        PieceKind::Queen => queen_moves,
        PieceKind::King => king_moves,
    }
}

pub fn legal_destinations(piece: &Piece, occupancy: &Occupancy) -> Vec<Square> {
    rule_for(piece.kind())(piece, occupancy)
}

fn rook_moves(piece: &Piece, occupancy: &Occupancy) -> Vec<Square> {
    sliding_moves(piece, occupancy, &ROOK_DIRECTIONS)
}

fn bishop_moves(piece: &Piece, occupancy: &Occupancy) -> Vec<Square> {
    sliding_moves(piece, occupancy, &BISHOP_DIRECTIONS)
}

fn queen_moves(piece: &Piece, occupancy: &Occupancy) -> Vec<Square> {
    sliding_moves(piece, occupancy, &QUEEN_DIRECTIONS)
}

fn knight_moves(piece: &Piece, occupancy: &Occupancy) -> Vec<Square> {
    fixed_offset_moves(piece, occupancy, &KNIGHT_OFFSETS)
}

fn king_moves(piece: &Piece, occupancy: &Occupancy) -> Vec<Square> {
    fixed_offset_moves(piece, occupancy, &KING_OFFSETS)
}

/// Walks each ray outward until it leaves the board or hits a piece. An
/// enemy blocker is included, a friendly one is not, and nothing past either.
pub fn sliding_moves(
    piece: &Piece,
    occupancy: &Occupancy,
    directions: &[(i32, i32)],
) -> Vec<Square> {
    let mut moves = Vec::new();
    let from = piece.square();

    for &(df, dr) in directions {
        for distance in 1..=7 {
            let target = match from.offset(df * distance, dr * distance) {
                Some(target) => target,
                None => break,
            };
            match occupancy.get(target) {
                None => moves.push(target),
                Some(occupant) => {
                    if occupant.color != piece.color() {
                        moves.push(target);
                    }
                    break;
                }
            }
        }
    }
    moves
}

pub fn fixed_offset_moves(
    piece: &Piece,
    occupancy: &Occupancy,
    offsets: &[(i32, i32)],
) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| piece.square().offset(df, dr))
        .filter(|&target| {
            occupancy
                .get(target)
                .map_or(true, |occupant| occupant.color != piece.color())
        })
        .collect()
}

/// Rank direction a pawn of `color` advances in.
pub fn pawn_direction(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

pub fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 2,
        Color::Black => 7,
    }
}

pub fn pawn_moves(piece: &Piece, occupancy: &Occupancy) -> Vec<Square> {
    let mut moves = Vec::new();
    let from = piece.square();
    let direction = pawn_direction(piece.color());

    if let Some(one) = from.offset(0, direction).filter(|&sq| occupancy.is_empty(sq)) {
        moves.push(one);
        if from.rank() == pawn_start_rank(piece.color()) {
            if let Some(two) = from.offset(0, 2 * direction).filter(|&sq| occupancy.is_empty(sq)) {
                moves.push(two);
            }
        }
    }

    // Diagonals only ever capture.
    for df in [-1, 1] {
        if let Some(target) = from.offset(df, direction) {
            if let Some(occupant) = occupancy.get(target) {
                if occupant.color != piece.color() {
                    moves.push(target);
                }
            }
        }
    }
    moves
}
