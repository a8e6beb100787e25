//! Shogi board squares, encoded file-major.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::file::File;
use crate::rank::Rank;

/// A square on the 9×9 shogi board, encoded as a `u8`.
///
/// Index = file * 9 + rank, so 1a = 0, 1b = 1, ..., 1i = 8, 2a = 9, ..., 9i = 80.
/// Rotating the board by 180 degrees maps index `i` to `80 - i`, see
/// [`Square::inverse`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 81;

    /// Black king's starting square.
    pub const SQ_5I: Square = Square::new(File::File5, Rank::RankI);
    /// White king's starting square.
    pub const SQ_5A: Square = Square::new(File::File5, Rank::RankA);

    /// Create a square from a file and a rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Square {
        Square(file.index() as u8 * 9 + rank.index() as u8)
    }

    /// Create a square from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 81 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Create a square from a zero-based index without bounds checking.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `index < 81`.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Square {
        debug_assert!(index < 81);
        Square(index)
    }

    /// Parse USI notation (e.g. "7g") into a square.
    pub fn from_usi(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file_byte = bytes[0];
        let rank_byte = bytes[1];

        if !(b'1'..=b'9').contains(&file_byte) || !(b'a'..=b'i').contains(&rank_byte) {
            return None;
        }

        let file = File::from_index(file_byte - b'1')?;
        let rank = Rank::from_index(rank_byte - b'a')?;
        Some(Square::new(file, rank))
    }

    /// Return the zero-based index (0..80).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 / 9) as usize]
    }

    /// Return the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 % 9) as usize]
    }

    /// The same square seen from the other side of the board.
    #[inline]
    pub const fn inverse(self) -> Square {
        Square(80 - self.0)
    }

    /// Iterate over all 81 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..81).map(Square)
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_usi(s).ok_or_else(|| ParseError::InvalidSquare {
            found: s.to_string(),
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::Square;
    use crate::file::File;
    use crate::rank::Rank;

    #[test]
    fn new_and_accessors() {
        let sq = Square::new(File::File1, Rank::RankA);
        assert_eq!(sq.index(), 0);
        assert_eq!(sq.file(), File::File1);
        assert_eq!(sq.rank(), Rank::RankA);

        let sq = Square::new(File::File9, Rank::RankI);
        assert_eq!(sq.index(), 80);
    }

    #[test]
    fn file_rank_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::new(sq.file(), sq.rank()), sq);
        }
    }

    #[test]
    fn from_index_bounds() {
        assert!(Square::from_index(80).is_some());
        assert!(Square::from_index(81).is_none());
    }

    #[test]
    fn inverse_is_involution() {
        for sq in Square::all() {
            assert_eq!(sq.inverse().inverse(), sq);
        }
        assert_eq!(Square::SQ_5I.inverse(), Square::SQ_5A);
        // The centre square maps onto itself.
        assert_eq!(Square::from_usi("5e").unwrap().inverse().to_string(), "5e");
    }

    #[test]
    fn usi_notation() {
        assert_eq!(Square::from_usi("5i"), Some(Square::SQ_5I));
        assert_eq!(Square::from_usi("1a").map(Square::index), Some(0));
        assert_eq!(format!("{}", Square::SQ_5A), "5a");
        assert_eq!("7g".parse::<Square>().unwrap().to_string(), "7g");
    }

    #[test]
    fn usi_invalid() {
        assert!(Square::from_usi("0a").is_none());
        assert!(Square::from_usi("1j").is_none());
        assert!(Square::from_usi("").is_none());
        assert!(Square::from_usi("5").is_none());
        assert!("5e5".parse::<Square>().is_err());
    }

    #[test]
    fn all_iterator_count() {
        assert_eq!(Square::all().count(), Square::COUNT);
    }
}
