//! Shogi move representation, bit-packed into a u32.
//!
//! Besides the squares, a move carries the kind of the moving piece and of
//! the captured piece, so consumers (evaluation in particular) can classify
//! it without consulting the board.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

// Private bit-field constants.
const DST_MASK: u32 = 0x0000_007F;
const SRC_MASK: u32 = 0x0000_3F80;
const PROMO_FLAG: u32 = 0x0000_4000;
const PIECE_MASK: u32 = 0x0007_8000;
const CAPTURE_MASK: u32 = 0x0078_0000;
const SRC_SHIFT: u32 = 7;
const PIECE_SHIFT: u32 = 15;
const CAPTURE_SHIFT: u32 = 19;

/// Source values at or above this mark a drop; the dropped kind is
/// `source - DROP_BASE` as a [`PieceKind`] index.
const DROP_BASE: u32 = Square::COUNT as u32;

/// A shogi move encoded in 32 bits.
///
/// ```text
/// bits  0-6:  destination square       (0-80)
/// bits  7-13: source square            (0-80), or 81 + kind index for drops
/// bit  14:    promotion flag
/// bits 15-18: moving piece kind        (before promotion)
/// bits 19-22: captured kind + 1        (0 = no capture)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Null move sentinel (passing). Never a legal move.
    pub const NULL: Move = Move(0);

    /// "No move" sentinel, used for unset slots. Never a legal move.
    pub const NONE: Move = Move(u32::MAX);

    /// Create a board move (quiet or capture) without promotion.
    pub const fn new(source: Square, dest: Square, piece: PieceKind, captured: Option<PieceKind>) -> Move {
        Move(
            (dest.index() as u32)
                | ((source.index() as u32) << SRC_SHIFT)
                | ((piece as u32) << PIECE_SHIFT)
                | capture_bits(captured),
        )
    }

    /// Create a promoting board move. `piece` is the kind before promotion.
    pub const fn new_promotion(
        source: Square,
        dest: Square,
        piece: PieceKind,
        captured: Option<PieceKind>,
    ) -> Move {
        Move(Move::new(source, dest, piece, captured).0 | PROMO_FLAG)
    }

    /// Create a drop of a piece from hand.
    pub const fn new_drop(kind: PieceKind, dest: Square) -> Move {
        Move(
            (dest.index() as u32)
                | ((DROP_BASE + kind as u32) << SRC_SHIFT)
                | ((kind as u32) << PIECE_SHIFT),
        )
    }

    /// Extract the destination square.
    pub const fn dest(self) -> Square {
        Square::from_index_unchecked((self.0 & DST_MASK) as u8)
    }

    /// Extract the source square.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the move is not a drop.
    pub const fn source(self) -> Square {
        debug_assert!(!self.is_drop());
        Square::from_index_unchecked(((self.0 & SRC_MASK) >> SRC_SHIFT) as u8)
    }

    /// Return `true` if this move drops a piece from hand.
    pub const fn is_drop(self) -> bool {
        (self.0 & SRC_MASK) >> SRC_SHIFT >= DROP_BASE
    }

    /// The kind of the moving (or dropped) piece, before any promotion.
    pub const fn piece_kind(self) -> PieceKind {
        match PieceKind::from_index(((self.0 & PIECE_MASK) >> PIECE_SHIFT) as u8) {
            Some(kind) => kind,
            None => PieceKind::Pawn,
        }
    }

    /// The kind of the captured piece, if any.
    pub const fn captured(self) -> Option<PieceKind> {
        let bits = (self.0 & CAPTURE_MASK) >> CAPTURE_SHIFT;
        if bits == 0 {
            None
        } else {
            PieceKind::from_index((bits - 1) as u8)
        }
    }

    /// Return `true` if this move captures a piece.
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_MASK != 0
    }

    /// Return `true` if this move promotes the moving piece.
    pub const fn is_promotion(self) -> bool {
        self.0 & PROMO_FLAG != 0
    }

    /// Return `true` if the king is the moving piece.
    pub const fn is_king_move(self) -> bool {
        !self.is_drop() && matches!(self.piece_kind(), PieceKind::King)
    }

    /// Return `true` if this is the null move sentinel.
    pub const fn is_null(self) -> bool {
        self.0 == Move::NULL.0
    }

    /// Return `true` for an actual move (neither [`Move::NULL`] nor [`Move::NONE`]).
    pub const fn is_ok(self) -> bool {
        self.0 != Move::NULL.0 && self.0 != Move::NONE.0
    }

    /// Return the USI string representation.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the move is a real move.
    pub fn to_usi(self) -> String {
        debug_assert!(self.is_ok(), "to_usi called on a sentinel move");
        self.to_string()
    }
}

const fn capture_bits(captured: Option<PieceKind>) -> u32 {
    match captured {
        Some(kind) => (kind as u32 + 1) << CAPTURE_SHIFT,
        None => 0,
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "0000")
        } else if *self == Move::NONE {
            write!(f, "none")
        } else if self.is_drop() {
            write!(f, "{}*{}", self.piece_kind().usi_char(), self.dest())
        } else if self.is_promotion() {
            write!(f, "{}{}+", self.source(), self.dest())
        } else {
            write!(f, "{}{}", self.source(), self.dest())
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            write!(
                f,
                "Move({} piece={:?} captured={:?})",
                self,
                self.piece_kind(),
                self.captured()
            )
        } else {
            write!(f, "Move({})", self)
        }
    }
}
