//! Piece values and material balance.
//!
//! Material is kept from Black's point of view (positive = Black ahead).
//! Evaluation stores it scaled by [`crate::evaluator::FV_SCALE`].

use nagi_core::{Color, PieceKind, Placement};

/// Value of one piece, indexed by [`PieceKind::index()`].
pub const PIECE_VALUE: [i32; PieceKind::COUNT] = [
    86,     // Pawn
    235,    // Lance
    257,    // Knight
    369,    // Silver
    564,    // Bishop
    637,    // Rook
    444,    // Gold
    15_000, // King
    542,    // ProPawn
    492,    // ProLance
    516,    // ProKnight
    489,    // ProSilver
    823,    // Horse
    946,    // Dragon
];

/// Gain from promoting a piece of this kind; zero for kinds that cannot promote.
pub const PROMOTE_VALUE: [i32; PieceKind::COUNT] = promote_values();

/// Swing in material when a piece of this kind is captured: the victim loses
/// the piece and the captor gains its unpromoted form in hand. Zero for kings.
pub const EXCHANGE_VALUE: [i32; PieceKind::COUNT] = exchange_values();

const fn promote_values() -> [i32; PieceKind::COUNT] {
    let mut out = [0; PieceKind::COUNT];
    let mut i = 0;
    while i < PieceKind::COUNT {
        if let Some(kind) = PieceKind::from_index(i as u8)
            && let Some(promoted) = kind.promote()
        {
            out[i] = PIECE_VALUE[promoted.index()] - PIECE_VALUE[i];
        }
        i += 1;
    }
    out
}

const fn exchange_values() -> [i32; PieceKind::COUNT] {
    let mut out = [0; PieceKind::COUNT];
    let mut i = 0;
    while i < PieceKind::COUNT {
        if let Some(kind) = PieceKind::from_index(i as u8)
            && !matches!(kind, PieceKind::King)
        {
            out[i] = PIECE_VALUE[i] + PIECE_VALUE[kind.unpromote().index()];
        }
        i += 1;
    }
    out
}

/// Material balance of a placement from Black's point of view, kings excluded.
pub fn material(placement: &Placement) -> i32 {
    let board: i32 = placement
        .pieces()
        .iter()
        .filter(|p| p.kind != PieceKind::King)
        .map(|p| PIECE_VALUE[p.kind.index()] * p.color.sign())
        .sum();
    let hands: i32 = Color::ALL
        .into_iter()
        .flat_map(|color| PieceKind::HAND.into_iter().map(move |kind| (color, kind)))
        .map(|(color, kind)| {
            PIECE_VALUE[kind.index()] * i32::from(placement.hand_count(color, kind)) * color.sign()
        })
        .sum();
    board + hands
}
