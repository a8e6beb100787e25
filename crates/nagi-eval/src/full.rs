//! Evaluation from scratch.

use nagi_core::{Color, Square};

use crate::evaluator::FV_SCALE;
use crate::features::FeatureIndex;
use crate::layout::{Cell, Layout};
use crate::position::EvalPosition;
use crate::sum::{BLACK_KPP, EvalSum, KINGS, Pair, WHITE_KPP};
use crate::tables::Tables;

/// Sum of `KPP[king][a][b]` over every unordered pair of slots in `list`.
pub fn kpp_sum<L: Layout>(tables: &Tables<L>, king: Square, list: &[FeatureIndex]) -> Pair {
    let mut sum = Pair::ZERO;
    for (i, &a) in list.iter().enumerate() {
        let row = tables.kpp_row(king, a);
        for &b in &list[..i] {
            sum += row[b.index()].widen();
        }
    }
    sum
}

/// `KK` plus `KKP` for every slot plus scaled material (board component).
pub fn kings_sum<L: Layout>(
    tables: &Tables<L>,
    black_king: Square,
    white_king: Square,
    black_list: &[FeatureIndex],
    scaled_material: i32,
) -> Pair {
    let mut sum = tables.kk(black_king, white_king).widen();
    for &f in black_list {
        sum += tables.kkp(black_king, white_king, f).widen();
    }
    sum.board += scaled_material;
    sum
}

/// Evaluate `pos` from first principles.
///
/// The White-king accumulator uses the rotated king square and White's
/// feature list, so one KPP table serves both sides.
pub fn full_sum<L: Layout, P: EvalPosition + ?Sized>(tables: &Tables<L>, pos: &P) -> EvalSum {
    let black_king = pos.king_square(Color::Black);
    let white_king = pos.king_square(Color::White);
    let black_list = pos.list(Color::Black);

    let mut sum = EvalSum::ZERO;
    sum.p[BLACK_KPP] = kpp_sum(tables, black_king, black_list);
    sum.p[WHITE_KPP] = kpp_sum(tables, white_king.inverse(), pos.list(Color::White));
    sum.p[KINGS] = kings_sum(tables, black_king, white_king, black_list, pos.material() * FV_SCALE);
    sum
}
