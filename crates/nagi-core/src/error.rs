//! Error types for USI notation and SFEN parsing.

/// Errors that occur when parsing a single USI token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The string is not a square in USI notation ("1a" to "9i").
    #[error("invalid square: \"{found}\"")]
    InvalidSquare {
        /// The rejected string.
        found: String,
    },
}

/// Errors that occur when parsing an SFEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SfenError {
    /// The SFEN string has fewer than 3 space-separated fields.
    #[error("expected at least 3 SFEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The board section does not have exactly 9 ranks.
    #[error("expected 9 ranks in board section, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank describes more or fewer than 9 squares.
    #[error("rank {rank_index} describes {length} squares, expected 9")]
    BadRankLength {
        /// Zero-based rank index (0 = rank a).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the board or hand section.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// A '+' prefix was applied to a kind that cannot promote.
    #[error("piece '{character}' cannot be promoted")]
    BadPromotion {
        /// The piece letter following '+'.
        character: char,
    },
    /// The side-to-move field is not "b" or "w".
    #[error("invalid side to move: \"{found}\"")]
    InvalidColor {
        /// The invalid string.
        found: String,
    },
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// The position holds more non-king pieces than a shogi set contains.
    #[error("too many pieces: {count}")]
    TooManyPieces {
        /// Number of non-king pieces found.
        count: usize,
    },
}
