//! Error types for table files and position snapshots.

use std::path::PathBuf;

use nagi_core::{Color, Move, PieceKind, Square};

/// Errors that occur while reading or writing table files.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A table file could not be opened, read or written.
    #[error("{table} table at {}: {source}", path.display())]
    Io {
        /// Which table ("KK", "KKP" or "KPP").
        table: &'static str,
        /// The file involved.
        path: PathBuf,
        source: std::io::Error,
    },
    /// A table does not have the size its shape requires.
    #[error("{table} table is {found} bytes, expected {expected}")]
    ShapeMismatch {
        /// Which table ("KK", "KKP" or "KPP").
        table: &'static str,
        /// Required size in bytes.
        expected: usize,
        /// Actual size in bytes.
        found: usize,
    },
    /// `KPP[king][a][b]` differs from `KPP[king][b][a]`.
    ///
    /// Differential evaluation would drift from a full recompute on such a
    /// table, so it is rejected like a damaged file.
    #[error("KPP table is not symmetric: [{king}][{a}][{b}] differs from [{king}][{b}][{a}]")]
    AsymmetricKpp { king: Square, a: usize, b: usize },
}

/// Errors that occur while building or updating a [`crate::snapshot::Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// More pieces of one kind in hand than a set contains.
    #[error("{color} holds too many {kind} in hand: {count}")]
    HandOverflow {
        color: Color,
        kind: PieceKind,
        count: u8,
    },
    /// The moving piece is not on the source square.
    #[error("move {mv}: no {color} {kind} on {square}")]
    NoPiece {
        mv: Move,
        color: Color,
        kind: PieceKind,
        square: Square,
    },
    /// A drop of a kind the side to move does not hold.
    #[error("move {mv}: no {kind} in hand")]
    EmptyHand { mv: Move, kind: PieceKind },
    /// The destination does not hold what the move says it captures.
    #[error("move {mv}: destination {square} does not match the capture")]
    BadDestination { mv: Move, square: Square },
    /// A promotion of a kind that cannot promote.
    #[error("move {mv}: {kind} cannot promote")]
    BadPromotion { mv: Move, kind: PieceKind },
}
