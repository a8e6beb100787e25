//! Fixed-capacity feature lists for both perspectives.

use nagi_core::{Color, NON_KING_PIECES};

use crate::features::{FeatureIndex, FeaturePair};

/// Maximum number of slots: one per non-king piece of a full set.
pub const LIST_NUM: usize = NON_KING_PIECES;

/// Feature lists of one position, Black's view and White's view, slot-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalList {
    black: [FeatureIndex; LIST_NUM],
    white: [FeatureIndex; LIST_NUM],
    len: usize,
}

impl EvalList {
    /// An empty list.
    pub const EMPTY: EvalList = EvalList {
        black: [FeatureIndex::new(0); LIST_NUM],
        white: [FeatureIndex::new(0); LIST_NUM],
        len: 0,
    };

    /// Build a list from feature pairs, one per slot.
    ///
    /// # Panics
    ///
    /// Panics if more than [`LIST_NUM`] pairs are given.
    pub fn from_pairs(pairs: &[FeaturePair]) -> EvalList {
        assert!(pairs.len() <= LIST_NUM, "{} slots exceed {LIST_NUM}", pairs.len());
        let mut list = EvalList::EMPTY;
        for (slot, &pair) in pairs.iter().enumerate() {
            list.black[slot] = pair.black;
            list.white[slot] = pair.white;
        }
        list.len = pairs.len();
        list
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The slots seen from `perspective`.
    #[inline]
    pub fn view(&self, perspective: Color) -> &[FeatureIndex] {
        match perspective {
            Color::Black => &self.black[..self.len],
            Color::White => &self.white[..self.len],
        }
    }

    /// Both views of one slot.
    #[inline]
    pub fn get(&self, slot: usize) -> FeaturePair {
        debug_assert!(slot < self.len);
        FeaturePair {
            black: self.black[slot],
            white: self.white[slot],
        }
    }

    /// Overwrite one slot.
    #[inline]
    pub fn set(&mut self, slot: usize, pair: FeaturePair) {
        debug_assert!(slot < self.len);
        self.black[slot] = pair.black;
        self.white[slot] = pair.white;
    }
}

impl Default for EvalList {
    fn default() -> EvalList {
        EvalList::EMPTY
    }
}
