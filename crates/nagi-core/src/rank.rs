//! Shogi board ranks (rows a–i, `a` on White's side).

use std::fmt;

/// A rank (row) on the shogi board, from RankA (White's back rank) to RankI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    RankA = 0,
    RankB = 1,
    RankC = 2,
    RankD = 3,
    RankE = 4,
    RankF = 5,
    RankG = 6,
    RankH = 7,
    RankI = 8,
}

impl Rank {
    /// Total number of ranks.
    pub const COUNT: usize = 9;

    /// All ranks in index order.
    pub const ALL: [Rank; 9] = [
        Rank::RankA,
        Rank::RankB,
        Rank::RankC,
        Rank::RankD,
        Rank::RankE,
        Rank::RankF,
        Rank::RankG,
        Rank::RankH,
        Rank::RankI,
    ];

    /// Return the index (0..8).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Create a rank from a zero-based index (0 = RankA, 8 = RankI).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Rank> {
        if index < 9 {
            Some(Rank::ALL[index as usize])
        } else {
            None
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = (b'a' + self.index() as u8) as char;
        write!(f, "{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_index_roundtrip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_index(rank.index() as u8), Some(rank));
        }
    }

    #[test]
    fn from_index_out_of_range() {
        assert_eq!(Rank::from_index(9), None);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rank::RankA), "a");
        assert_eq!(format!("{}", Rank::RankI), "i");
    }

    #[test]
    fn ordering() {
        assert!(Rank::RankA < Rank::RankI);
    }
}
