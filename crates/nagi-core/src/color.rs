//! Shogi sides.

use std::fmt;
use std::ops::Not;

/// A side: Black (sente, moves first) or White (gote).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// All colors in index order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Return the index (0 for Black, 1 for White).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Return `+1` for Black and `-1` for White.
    ///
    /// Scores are stored from Black's point of view; multiplying by this
    /// converts them to the given side's point of view.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "b"),
            Color::White => write!(f, "w"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn index_values() {
        assert_eq!(Color::Black.index(), 0);
        assert_eq!(Color::White.index(), 1);
    }

    #[test]
    fn flip_roundtrip() {
        assert_eq!(Color::Black.flip(), Color::White);
        assert_eq!(Color::White.flip(), Color::Black);
        assert_eq!(Color::Black.flip().flip(), Color::Black);
    }

    #[test]
    fn not_operator() {
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(!Color::White, Color::Black);
    }

    #[test]
    fn sign_matches_perspective() {
        assert_eq!(Color::Black.sign(), 1);
        assert_eq!(Color::White.sign(), -1);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::Black), "b");
        assert_eq!(format!("{}", Color::White), "w");
    }
}
