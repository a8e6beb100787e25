//! Hand-built positions and tables for unit tests.

use nagi_core::{Color, Square};

use crate::features::FeatureIndex;
use crate::layout::Layout;
use crate::position::EvalPosition;
use crate::tables::{TableShape, Tables};

/// A position given directly as feature lists.
#[derive(Debug, Clone)]
pub(crate) struct ListPosition {
    pub side_to_move: Color,
    pub kings: [Square; 2],
    pub list: [Vec<FeatureIndex>; 2],
    pub prev: [Vec<FeatureIndex>; 2],
    pub idx_move: usize,
    pub idx_capture: Option<usize>,
    pub material: i32,
}

impl ListPosition {
    /// A position whose Black and White lists are `black` and `white`.
    pub fn new(black: &[usize], white: &[usize]) -> ListPosition {
        let to_features = |raw: &[usize]| raw.iter().map(|&i| FeatureIndex::new(i)).collect::<Vec<_>>();
        let list = [to_features(black), to_features(white)];
        ListPosition {
            side_to_move: Color::Black,
            kings: [Square::SQ_5I, Square::SQ_5A],
            prev: list.clone(),
            list,
            idx_move: 0,
            idx_capture: None,
            material: 0,
        }
    }

    /// Replace slot `idx` in both views.
    pub fn change_slot(&mut self, idx: usize, black: usize, white: usize) {
        self.list[0][idx] = FeatureIndex::new(black);
        self.list[1][idx] = FeatureIndex::new(white);
    }

    /// Start a new move: the current lists become the previous ones.
    pub fn begin_move(&mut self) {
        self.prev = self.list.clone();
        self.idx_capture = None;
        self.side_to_move = !self.side_to_move;
    }
}

impl EvalPosition for ListPosition {
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    fn list(&self, perspective: Color) -> &[FeatureIndex] {
        &self.list[perspective.index()]
    }

    fn prev_list(&self, perspective: Color) -> &[FeatureIndex] {
        &self.prev[perspective.index()]
    }

    fn list_index_move(&self) -> usize {
        self.idx_move
    }

    fn list_index_capture(&self) -> Option<usize> {
        self.idx_capture
    }

    fn material(&self) -> i32 {
        self.material
    }
}

/// A position whose feature indices are folded into `0..features`.
///
/// Lets real positions run against small tables: evaluation is exact for
/// any lists, as long as current and previous lists are folded alike.
pub(crate) struct Folded<'a, P: EvalPosition> {
    pos: &'a P,
    list: [Vec<FeatureIndex>; 2],
    prev: [Vec<FeatureIndex>; 2],
}

impl<'a, P: EvalPosition> Folded<'a, P> {
    pub fn new(pos: &'a P, features: usize) -> Folded<'a, P> {
        let fold = |list: &[FeatureIndex]| {
            list.iter().map(|f| FeatureIndex::new(f.index() % features)).collect::<Vec<_>>()
        };
        Folded {
            pos,
            list: [fold(pos.list(Color::Black)), fold(pos.list(Color::White))],
            prev: [fold(pos.prev_list(Color::Black)), fold(pos.prev_list(Color::White))],
        }
    }
}

impl<P: EvalPosition> EvalPosition for Folded<'_, P> {
    fn side_to_move(&self) -> Color {
        self.pos.side_to_move()
    }

    fn king_square(&self, color: Color) -> Square {
        self.pos.king_square(color)
    }

    fn list(&self, perspective: Color) -> &[FeatureIndex] {
        &self.list[perspective.index()]
    }

    fn prev_list(&self, perspective: Color) -> &[FeatureIndex] {
        &self.prev[perspective.index()]
    }

    fn list_index_move(&self) -> usize {
        self.pos.list_index_move()
    }

    fn list_index_capture(&self) -> Option<usize> {
        self.pos.list_index_capture()
    }

    fn material(&self) -> i32 {
        self.pos.material()
    }
}

/// Pseudo-random but deterministic tables over `features` features.
pub(crate) fn hashed_tables<L: Layout>(features: usize) -> Tables<L> {
    use crate::layout::Cell;
    use crate::sum::Pair;

    fn mix(a: usize, b: usize, c: usize, d: usize) -> i32 {
        let mut x = (a as u64) << 48 ^ (b as u64) << 32 ^ (c as u64) << 16 ^ d as u64 ^ 0x9E37_79B9_7F4A_7C15;
        x ^= x >> 33;
        x = x.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
        x ^= x >> 33;
        (x % 201) as i32 - 100
    }

    Tables::from_fn(
        TableShape { features },
        |bk, wk| Cell::narrow(Pair::new(mix(1, bk.index(), wk.index(), 0), mix(2, bk.index(), wk.index(), 0))),
        |bk, wk, p| {
            Cell::narrow(Pair::new(
                mix(3, bk.index(), wk.index(), p.index()),
                mix(4, bk.index(), wk.index(), p.index()),
            ))
        },
        |k, a, b| {
            Cell::narrow(Pair::new(
                mix(5, k.index(), a.index(), b.index()),
                mix(6, k.index(), a.index(), b.index()),
            ))
        },
    )
}
