//! Core shogi types: squares, colors, piece kinds, moves and placements.

mod color;
mod error;
mod file;
mod piece_kind;
mod placement;
mod rank;
mod shogi_move;
mod square;

pub use color::Color;
pub use error::{ParseError, SfenError};
pub use file::File;
pub use piece_kind::PieceKind;
pub use placement::{NON_KING_PIECES, PlacedPiece, Placement, STARTING_SFEN};
pub use rank::Rank;
pub use shogi_move::Move;
pub use square::Square;
