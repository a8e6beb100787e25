//! Evaluation entry point: picks full or differential evaluation and scales
//! the result.

use std::sync::Arc;

use nagi_core::Move;
use tracing::error;

use crate::diff::diff_sum;
use crate::full::full_sum;
use crate::layout::{DefaultLayout, Layout};
use crate::position::EvalPosition;
use crate::stack::EvalStack;
use crate::sum::EvalSum;
use crate::tables::Tables;

/// Scale of stored sums relative to returned scores.
pub const FV_SCALE: i32 = 32;

/// Bonus for having the move.
pub const TEMPO: i32 = 80;

/// Score of a mate in zero plies. Search encodes forced outcomes near here.
pub const MATE: i32 = 32_000;

/// Bound no evaluation may reach.
pub const INF: i32 = 32_601;

/// Cross-check every differential result against a full recompute.
const VERIFY: bool = cfg!(any(feature = "verify", debug_assertions));

/// Evaluates positions against one shared set of tables.
///
/// Cloning is cheap; each search worker keeps its own clone and its own
/// [`EvalStack`].
#[derive(Debug)]
pub struct Evaluator<L: Layout = DefaultLayout> {
    tables: Arc<Tables<L>>,
}

impl<L: Layout> Clone for Evaluator<L> {
    fn clone(&self) -> Evaluator<L> {
        Evaluator {
            tables: Arc::clone(&self.tables),
        }
    }
}

impl<L: Layout> Evaluator<L> {
    pub fn new(tables: Arc<Tables<L>>) -> Evaluator<L> {
        Evaluator { tables }
    }

    pub fn tables(&self) -> &Arc<Tables<L>> {
        &self.tables
    }

    /// Score of `pos` for the side to move.
    ///
    /// `stack.record(ply)` must hold the move that reached `pos` (see
    /// [`EvalStack::enter`]). When the previous ply was evaluated on this line
    /// the score is derived from its cached sum; otherwise from scratch.
    /// Either way the sum is cached at `ply` for the next call.
    pub fn evaluate<P: EvalPosition + ?Sized>(&self, pos: &P, stack: &mut EvalStack, ply: usize) -> i32 {
        let mv = stack.record(ply).reached_by;
        let incremental = stack
            .previous(ply)
            .filter(|prev| prev.evaluated && mv.is_ok() && !(mv.is_king_move() && mv.is_capture()))
            .and_then(|prev| diff_sum(&self.tables, pos, mv, prev));

        let sum = match incremental {
            Some(sum) => {
                if VERIFY {
                    self.verify(pos, &sum, mv, ply);
                }
                sum
            }
            None => full_sum(&self.tables, pos),
        };
        self.store(pos, stack, ply, sum)
    }

    /// Score of `pos` for the side to move, always from scratch.
    pub fn evaluate_full<P: EvalPosition + ?Sized>(&self, pos: &P, stack: &mut EvalStack, ply: usize) -> i32 {
        let sum = full_sum(&self.tables, pos);
        self.store(pos, stack, ply, sum)
    }

    fn store<P: EvalPosition + ?Sized>(&self, pos: &P, stack: &mut EvalStack, ply: usize, sum: EvalSum) -> i32 {
        let record = stack.record_mut(ply);
        record.sum = sum;
        record.material = pos.material() * FV_SCALE;
        record.evaluated = true;

        let score = sum.combine(pos.side_to_move()) / FV_SCALE + TEMPO;
        debug_assert!(score.abs() < INF, "evaluation {score} out of range at ply {ply}");
        score
    }

    /// Abort if the differential sum disagrees with a full recompute.
    fn verify<P: EvalPosition + ?Sized>(&self, pos: &P, sum: &EvalSum, mv: Move, ply: usize) {
        if let Err(divergence) = self.check(pos, sum) {
            error!(
                ply,
                mv = %mv,
                differential = ?divergence.differential,
                full = ?divergence.full,
                "differential evaluation diverged from full evaluation"
            );
            std::process::abort();
        }
    }

    /// Compare `sum` with a full recompute of `pos`.
    pub(crate) fn check<P: EvalPosition + ?Sized>(&self, pos: &P, sum: &EvalSum) -> Result<(), Divergence> {
        let full = full_sum(&self.tables, pos);
        if full == *sum {
            Ok(())
        } else {
            Err(Divergence {
                differential: *sum,
                full,
            })
        }
    }
}

/// A differential sum that a full recompute contradicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Divergence {
    pub differential: EvalSum,
    pub full: EvalSum,
}
