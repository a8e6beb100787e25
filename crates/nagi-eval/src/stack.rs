//! Per-ply evaluation cache.

use nagi_core::Move;

use crate::sum::EvalSum;

/// Deepest ply a search line may reach.
pub const MAX_PLY: usize = 128;

/// Cached evaluation state of one ply of the current search line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlyRecord {
    /// The move that produced this ply's position.
    pub reached_by: Move,
    /// Whether `sum` and `material` belong to the current position at this ply.
    pub evaluated: bool,
    pub sum: EvalSum,
    /// Material balance from Black's view, times [`crate::evaluator::FV_SCALE`].
    pub material: i32,
}

impl PlyRecord {
    pub const EMPTY: PlyRecord = PlyRecord {
        reached_by: Move::NONE,
        evaluated: false,
        sum: EvalSum::ZERO,
        material: 0,
    };
}

impl Default for PlyRecord {
    fn default() -> PlyRecord {
        PlyRecord::EMPTY
    }
}

/// One record per ply, `0..=MAX_PLY`. Owned by a single search line.
///
/// Evaluation at ply `p` reads record `p - 1` as its baseline, so records
/// must describe the line currently being searched. [`EvalStack::enter`]
/// keeps that true when the search descends into a new child.
#[derive(Clone)]
pub struct EvalStack {
    records: Box<[PlyRecord]>,
}

impl EvalStack {
    pub fn new() -> EvalStack {
        EvalStack {
            records: vec![PlyRecord::EMPTY; MAX_PLY + 1].into_boxed_slice(),
        }
    }

    /// Record that `mv` led to the position at `ply`, invalidating its cached sum.
    ///
    /// # Panics
    ///
    /// Panics if `ply > MAX_PLY`.
    #[inline]
    pub fn enter(&mut self, ply: usize, mv: Move) {
        let record = &mut self.records[ply];
        record.reached_by = mv;
        record.evaluated = false;
    }

    /// Forget everything, e.g. before searching a new root position.
    pub fn clear(&mut self) {
        self.records.fill(PlyRecord::EMPTY);
    }

    /// The record at `ply`.
    ///
    /// # Panics
    ///
    /// Panics if `ply > MAX_PLY`.
    #[inline]
    pub fn record(&self, ply: usize) -> &PlyRecord {
        &self.records[ply]
    }

    #[inline]
    pub(crate) fn record_mut(&mut self, ply: usize) -> &mut PlyRecord {
        &mut self.records[ply]
    }

    /// The record before `ply`, or `None` at the root.
    #[inline]
    pub fn previous(&self, ply: usize) -> Option<&PlyRecord> {
        ply.checked_sub(1).map(|p| &self.records[p])
    }
}

impl Default for EvalStack {
    fn default() -> EvalStack {
        EvalStack::new()
    }
}

impl std::fmt::Debug for EvalStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let evaluated = self.records.iter().filter(|r| r.evaluated).count();
        f.debug_struct("EvalStack").field("evaluated", &evaluated).finish()
    }
}
