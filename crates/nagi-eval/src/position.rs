//! What the evaluator needs to know about a position.

use nagi_core::{Color, Square};

use crate::features::FeatureIndex;

/// Read access to a position's feature lists, maintained by the board.
///
/// Both lists hold one slot per non-king piece, in the same slot order for
/// Black's and White's view. Slots are stable across moves: after a king
/// move no slot changes, after any other non-capturing move (drops included)
/// exactly slot [`EvalPosition::list_index_move`] changes, and after a
/// capture that slot and [`EvalPosition::list_index_capture`] change.
pub trait EvalPosition {
    /// Which side moves next.
    fn side_to_move(&self) -> Color;

    /// Square of `color`'s king.
    fn king_square(&self, color: Color) -> Square;

    /// Current feature list seen from `perspective`.
    fn list(&self, perspective: Color) -> &[FeatureIndex];

    /// Feature list before the last move, seen from `perspective`.
    fn prev_list(&self, perspective: Color) -> &[FeatureIndex];

    /// Slot of the piece that made the last move. Meaningless after a king move.
    fn list_index_move(&self) -> usize;

    /// Slot of the piece captured by the last move, if it was a capture.
    fn list_index_capture(&self) -> Option<usize>;

    /// Material balance from Black's point of view, unscaled.
    fn material(&self) -> i32;
}
