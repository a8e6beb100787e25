//! Evaluation as a correction to the previous ply's sum.
//!
//! Exact: for every move handled here the result equals [`crate::full::full_sum`] of the
//! new position, provided the previous sum was exact and the KPP table is
//! symmetric.

use nagi_core::{Color, Move, Square};

use crate::evaluator::FV_SCALE;
use crate::features::FeatureIndex;
use crate::full::{kings_sum, kpp_sum};
use crate::layout::{Cell, Layout};
use crate::position::EvalPosition;
use crate::stack::PlyRecord;
use crate::sum::{BLACK_KPP, EvalSum, KINGS, Pair, WHITE_KPP};
use crate::tables::Tables;

/// How a move changed the feature lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveShape {
    /// King moved without capturing: no slot changed, one king square did.
    KingMove,
    /// Drop or non-capturing move: one slot changed.
    SlotMove,
    /// Capture by a non-king piece: two slots changed.
    Capture,
    /// King captured a piece: a slot and a king square changed together.
    KingCapture,
}

impl MoveShape {
    pub fn of(mv: Move) -> MoveShape {
        match (mv.is_king_move(), mv.is_capture()) {
            (true, false) => MoveShape::KingMove,
            (true, true) => MoveShape::KingCapture,
            (false, false) => MoveShape::SlotMove,
            (false, true) => MoveShape::Capture,
        }
    }
}

/// New sum of `pos`, reached from the position of `prev` by `mv`.
///
/// Returns `None` when the move cannot be handled incrementally; the caller
/// then evaluates from scratch.
pub fn diff_sum<L: Layout, P: EvalPosition + ?Sized>(
    tables: &Tables<L>,
    pos: &P,
    mv: Move,
    prev: &PlyRecord,
) -> Option<EvalSum> {
    let black_king = pos.king_square(Color::Black);
    let white_king = pos.king_square(Color::White);
    let scaled_material = pos.material() * FV_SCALE;
    let material_delta = Pair::new(scaled_material - prev.material, 0);
    let mut sum = prev.sum;

    match MoveShape::of(mv) {
        MoveShape::KingMove => {
            // The side that just moved is the one not to move now.
            match !pos.side_to_move() {
                Color::Black => sum.p[BLACK_KPP] = kpp_sum(tables, black_king, pos.list(Color::Black)),
                Color::White => {
                    sum.p[WHITE_KPP] = kpp_sum(tables, white_king.inverse(), pos.list(Color::White))
                }
            }
            sum.p[KINGS] = kings_sum(tables, black_king, white_king, pos.list(Color::Black), scaled_material);
        }
        MoveShape::SlotMove => {
            let idx = pos.list_index_move();
            sum.p[BLACK_KPP] += slot_delta(tables, black_king, pos.prev_list(Color::Black), pos.list(Color::Black), idx);
            sum.p[WHITE_KPP] += slot_delta(
                tables,
                white_king.inverse(),
                pos.prev_list(Color::White),
                pos.list(Color::White),
                idx,
            );
            sum.p[KINGS] += kkp_delta(tables, black_king, white_king, pos, &[idx]) + material_delta;
        }
        MoveShape::Capture => {
            let moved = pos.list_index_move();
            let captured = pos.list_index_capture()?;
            debug_assert_ne!(moved, captured);
            sum.p[BLACK_KPP] += two_slot_delta(
                tables,
                black_king,
                pos.prev_list(Color::Black),
                pos.list(Color::Black),
                moved,
                captured,
            );
            sum.p[WHITE_KPP] += two_slot_delta(
                tables,
                white_king.inverse(),
                pos.prev_list(Color::White),
                pos.list(Color::White),
                moved,
                captured,
            );
            sum.p[KINGS] += kkp_delta(tables, black_king, white_king, pos, &[moved, captured]) + material_delta;
        }
        // Both king axes of KKP and one KPP king move while a slot changes.
        MoveShape::KingCapture => return None,
    }
    Some(sum)
}

/// Change in the KPP pair sum when slot `idx` goes from `prev[idx]` to `cur[idx]`
/// and every other slot stays put.
pub(crate) fn slot_delta<L: Layout>(
    tables: &Tables<L>,
    king: Square,
    prev: &[FeatureIndex],
    cur: &[FeatureIndex],
    idx: usize,
) -> Pair {
    debug_assert!(idx < cur.len() && prev.len() == cur.len());
    let old_row = tables.kpp_row(king, prev[idx]);
    let new_row = tables.kpp_row(king, cur[idx]);
    let mut delta = Pair::ZERO;
    for (j, (&p, &c)) in prev.iter().zip(cur).enumerate() {
        if j != idx {
            delta += new_row[c.index()].widen();
            delta -= old_row[p.index()].widen();
        }
    }
    delta
}

/// Change in the KPP pair sum when slots `a` and `b` change together.
///
/// Each single-slot pass counts the pair between `a` and `b`, so one copy of
/// its change is taken back out.
fn two_slot_delta<L: Layout>(
    tables: &Tables<L>,
    king: Square,
    prev: &[FeatureIndex],
    cur: &[FeatureIndex],
    a: usize,
    b: usize,
) -> Pair {
    debug_assert!(b < cur.len());
    let mut delta = slot_delta(tables, king, prev, cur, a) + slot_delta(tables, king, prev, cur, b);
    delta += tables.kpp(king, prev[a], prev[b]).widen();
    delta -= tables.kpp(king, cur[a], cur[b]).widen();
    delta
}

fn kkp_delta<L: Layout, P: EvalPosition + ?Sized>(
    tables: &Tables<L>,
    black_king: Square,
    white_king: Square,
    pos: &P,
    slots: &[usize],
) -> Pair {
    let (prev, cur) = (pos.prev_list(Color::Black), pos.list(Color::Black));
    slots.iter().fold(Pair::ZERO, |acc, &i| {
        acc + tables.kkp(black_king, white_king, cur[i]).widen() - tables.kkp(black_king, white_king, prev[i]).widen()
    })
}
