//! Piece placement (board plus hands) and SFEN parsing.
//!
//! This is a static description of a position. It carries no move
//! generation state; evaluation builds its feature lists from it.

use std::str::FromStr;

use crate::color::Color;
use crate::error::SfenError;
use crate::file::File;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// The SFEN string for the standard starting position.
pub const STARTING_SFEN: &str =
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// Number of non-king pieces in a full shogi set.
pub const NON_KING_PIECES: usize = 38;

/// A piece standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

/// Board contents, hands and side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Pieces on the board, kings included, in SFEN scan order.
    board: Vec<PlacedPiece>,
    /// Hand counts indexed by `[Color::index()][position in PieceKind::HAND]`.
    hands: [[u8; 7]; Color::COUNT],
    side_to_move: Color,
}

impl Placement {
    /// Return the standard starting position.
    pub fn startpos() -> Placement {
        // STARTING_SFEN is a valid constant; parsing cannot fail.
        match STARTING_SFEN.parse() {
            Ok(placement) => placement,
            Err(err) => unreachable!("starting SFEN rejected: {err}"),
        }
    }

    /// Pieces on the board, kings included.
    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.board
    }

    /// Which side moves next.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Square of the given side's king.
    pub fn king_square(&self, color: Color) -> Square {
        self.board
            .iter()
            .find(|p| p.color == color && p.kind == PieceKind::King)
            .map(|p| p.square)
            .unwrap_or_else(|| unreachable!("placement validated with one king per side"))
    }

    /// Number of `kind` pieces in `color`'s hand.
    ///
    /// Returns 0 for kinds that cannot be held in hand.
    pub fn hand_count(&self, color: Color, kind: PieceKind) -> u8 {
        hand_slot(kind).map_or(0, |slot| self.hands[color.index()][slot])
    }

    /// Validate king counts and total piece count.
    fn validate(&self) -> Result<(), SfenError> {
        for color in Color::ALL {
            let count = self
                .board
                .iter()
                .filter(|p| p.color == color && p.kind == PieceKind::King)
                .count();
            if count != 1 {
                let color = match color {
                    Color::Black => "black",
                    Color::White => "white",
                };
                return Err(SfenError::InvalidKingCount { color, count });
            }
        }

        let on_board = self.board.iter().filter(|p| p.kind != PieceKind::King).count();
        let in_hand: usize = self.hands.iter().flatten().map(|&n| n as usize).sum();
        let count = on_board + in_hand;
        if count > NON_KING_PIECES {
            return Err(SfenError::TooManyPieces { count });
        }
        Ok(())
    }
}

/// Position of `kind` within [`PieceKind::HAND`].
fn hand_slot(kind: PieceKind) -> Option<usize> {
    PieceKind::HAND.iter().position(|&k| k == kind)
}

impl FromStr for Placement {
    type Err = SfenError;

    fn from_str(sfen: &str) -> Result<Placement, SfenError> {
        let fields: Vec<&str> = sfen.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(SfenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 9 {
            return Err(SfenError::WrongRankCount { found: ranks.len() });
        }

        let mut board = Vec::with_capacity(40);
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            let rank = Rank::ALL[rank_index];
            // SFEN ranks list files from 9 down to 1.
            let mut scanned: usize = 0;
            let mut promoted = false;

            for c in rank_str.chars() {
                if c == '+' {
                    promoted = true;
                    continue;
                }
                if let Some(digit) = c.to_digit(10) {
                    if promoted || !(1..=9).contains(&digit) {
                        return Err(SfenError::InvalidPieceChar { character: c });
                    }
                    scanned += digit as usize;
                    continue;
                }

                let base = PieceKind::from_usi_char(c)
                    .ok_or(SfenError::InvalidPieceChar { character: c })?;
                let kind = if promoted {
                    base.promote().ok_or(SfenError::BadPromotion { character: c })?
                } else {
                    base
                };
                promoted = false;

                if scanned >= 9 {
                    return Err(SfenError::BadRankLength {
                        rank_index,
                        length: scanned + 1,
                    });
                }
                let file = File::ALL[8 - scanned];
                let color = if c.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };
                board.push(PlacedPiece {
                    color,
                    kind,
                    square: Square::new(file, rank),
                });
                scanned += 1;
            }

            if scanned != 9 {
                return Err(SfenError::BadRankLength {
                    rank_index,
                    length: scanned,
                });
            }
        }

        let side_to_move = match fields[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => {
                return Err(SfenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let mut hands = [[0u8; 7]; Color::COUNT];
        if fields[2] != "-" {
            let mut count: u32 = 0;
            for c in fields[2].chars() {
                if let Some(digit) = c.to_digit(10) {
                    count = count * 10 + digit;
                    continue;
                }
                let kind = PieceKind::from_usi_char(c)
                    .filter(|k| k.is_hand_kind())
                    .ok_or(SfenError::InvalidPieceChar { character: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };
                let slot = hand_slot(kind).ok_or(SfenError::InvalidPieceChar { character: c })?;
                let n = count.max(1).min(u8::MAX as u32) as u8;
                hands[color.index()][slot] = hands[color.index()][slot].saturating_add(n);
                count = 0;
            }
        }

        let placement = Placement {
            board,
            hands,
            side_to_move,
        };
        placement.validate()?;
        Ok(placement)
    }
}
