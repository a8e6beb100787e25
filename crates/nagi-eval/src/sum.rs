//! Decomposed running sums used by full and differential evaluation.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use nagi_core::Color;

/// A (board, turn) pair of raw table values.
///
/// The board component is relative to the board: it favours Black when
/// positive and flips sign with the side to move. The turn component is
/// relative to the side to move and is never flipped. Scalar tables only
/// ever produce a zero turn component.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Pair {
    pub board: i32,
    pub turn: i32,
}

impl Pair {
    /// Both components zero.
    pub const ZERO: Pair = Pair { board: 0, turn: 0 };

    #[inline]
    pub const fn new(board: i32, turn: i32) -> Pair {
        Pair { board, turn }
    }
}

impl Add for Pair {
    type Output = Pair;

    #[inline]
    fn add(self, rhs: Pair) -> Pair {
        Pair::new(self.board + rhs.board, self.turn + rhs.turn)
    }
}

impl AddAssign for Pair {
    #[inline]
    fn add_assign(&mut self, rhs: Pair) {
        self.board += rhs.board;
        self.turn += rhs.turn;
    }
}

impl Sub for Pair {
    type Output = Pair;

    #[inline]
    fn sub(self, rhs: Pair) -> Pair {
        Pair::new(self.board - rhs.board, self.turn - rhs.turn)
    }
}

impl SubAssign for Pair {
    #[inline]
    fn sub_assign(&mut self, rhs: Pair) {
        self.board -= rhs.board;
        self.turn -= rhs.turn;
    }
}

impl Neg for Pair {
    type Output = Pair;

    #[inline]
    fn neg(self) -> Pair {
        Pair::new(-self.board, -self.turn)
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pair(board: {}, turn: {})", self.board, self.turn)
    }
}

/// Index of the Black-king KPP accumulator.
pub const BLACK_KPP: usize = 0;
/// Index of the White-king KPP accumulator (mirrored features).
pub const WHITE_KPP: usize = 1;
/// Index of the KK + KKP + material accumulator.
pub const KINGS: usize = 2;

/// The running evaluation sum of a position, before scaling.
///
/// Kept in three parts so that a king move can recompute one side's KPP
/// accumulator while reusing the other's.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct EvalSum {
    pub p: [Pair; 3],
}

impl EvalSum {
    pub const ZERO: EvalSum = EvalSum { p: [Pair::ZERO; 3] };

    /// Combine the parts into a single raw score from `side_to_move`'s view.
    ///
    /// The White-king accumulator is built from mirrored features, so its
    /// board component counts against Black.
    #[inline]
    pub fn combine(&self, side_to_move: Color) -> i32 {
        let board = self.p[BLACK_KPP].board - self.p[WHITE_KPP].board + self.p[KINGS].board;
        let turn = self.p[BLACK_KPP].turn + self.p[WHITE_KPP].turn + self.p[KINGS].turn;
        board * side_to_move.sign() + turn
    }
}

impl Add for EvalSum {
    type Output = EvalSum;

    #[inline]
    fn add(mut self, rhs: EvalSum) -> EvalSum {
        self += rhs;
        self
    }
}

impl AddAssign for EvalSum {
    #[inline]
    fn add_assign(&mut self, rhs: EvalSum) {
        for (a, b) in self.p.iter_mut().zip(rhs.p) {
            *a += b;
        }
    }
}

impl Sub for EvalSum {
    type Output = EvalSum;

    #[inline]
    fn sub(mut self, rhs: EvalSum) -> EvalSum {
        self -= rhs;
        self
    }
}

impl SubAssign for EvalSum {
    #[inline]
    fn sub_assign(&mut self, rhs: EvalSum) {
        for (a, b) in self.p.iter_mut().zip(rhs.p) {
            *a -= b;
        }
    }
}

impl fmt::Debug for EvalSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalSum")
            .field("black_kpp", &self.p[BLACK_KPP])
            .field("white_kpp", &self.p[WHITE_KPP])
            .field("kings", &self.p[KINGS])
            .finish()
    }
}
