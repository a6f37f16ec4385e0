use std::fmt;
use std::str::FromStr;

use crate::error::CoordinateError;

/// A square on the 8x8 grid. `file` and `rank` are both 1-based and always
/// within `1..=8`; there is no way to build one outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: i32, rank: i32) -> Result<Self, CoordinateError> {
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Ok(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            Err(CoordinateError::OutOfRange { file, rank })
        }
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Square reached by moving `df` files and `dr` ranks, or `None` if that
    /// lands off the board.
    pub fn offset(&self, df: i32, dr: i32) -> Option<Square> {
        Square::new(self.file as i32 + df, self.rank as i32 + dr).ok()
    }

    /// Dense index in `0..64`, rank-major from a1.
    pub fn index(&self) -> usize {
        (self.rank as usize - 1) * 8 + (self.file as usize - 1)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (1..=8).flat_map(|rank| (1..=8).map(move |file| Square { file, rank }))
    }
}

impl FromStr for Square {
    type Err = CoordinateError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed(token.to_string());
        let mut chars = token.chars();
        let (letter, digit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(letter), Some(digit), None) => (letter, digit),
            _ => return Err(malformed()),
        };
        if !letter.is_ascii_alphabetic() {
            return Err(malformed());
        }
        let rank = digit.to_digit(10).ok_or_else(malformed)? as i32;
        let file = (letter.to_ascii_uppercase() as u8 - b'A') as i32 + 1;
        Square::new(file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file - 1) as char, self.rank)
    }
}
