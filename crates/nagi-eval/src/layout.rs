//! Table cell layouts.
//!
//! A layout fixes the cell type of each table. [`Plain`] stores one scalar
//! per cell, a board-relative value. [`Twig`] stores a (board, turn) pair per
//! cell. Evaluation code is written once against [`Cell::widen`], which lifts
//! either representation to a [`Pair`].

use std::fmt;

use crate::sum::Pair;

/// A fixed-size little-endian table cell.
pub trait Cell: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Size of one cell on disk.
    const BYTES: usize;

    /// Decode one cell. `bytes` is exactly [`Cell::BYTES`] long.
    fn from_le_bytes(bytes: &[u8]) -> Self;

    /// Append the little-endian encoding of this cell to `out`.
    fn write_le_bytes(self, out: &mut Vec<u8>);

    /// Lift to a (board, turn) pair.
    fn widen(self) -> Pair;

    /// Build a cell from a pair, dropping the turn part for scalar cells.
    ///
    /// Values are truncated to the cell width.
    fn narrow(pair: Pair) -> Self;
}

impl Cell for i16 {
    const BYTES: usize = 2;

    #[inline]
    fn from_le_bytes(bytes: &[u8]) -> i16 {
        i16::from_le_bytes([bytes[0], bytes[1]])
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn widen(self) -> Pair {
        Pair::new(i32::from(self), 0)
    }

    fn narrow(pair: Pair) -> i16 {
        pair.board as i16
    }
}

impl Cell for i32 {
    const BYTES: usize = 4;

    #[inline]
    fn from_le_bytes(bytes: &[u8]) -> i32 {
        i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn widen(self) -> Pair {
        Pair::new(self, 0)
    }

    fn narrow(pair: Pair) -> i32 {
        pair.board
    }
}

impl Cell for [i16; 2] {
    const BYTES: usize = 4;

    #[inline]
    fn from_le_bytes(bytes: &[u8]) -> [i16; 2] {
        [<i16 as Cell>::from_le_bytes(&bytes[..2]), <i16 as Cell>::from_le_bytes(&bytes[2..4])]
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        self[0].write_le_bytes(out);
        self[1].write_le_bytes(out);
    }

    #[inline]
    fn widen(self) -> Pair {
        Pair::new(i32::from(self[0]), i32::from(self[1]))
    }

    fn narrow(pair: Pair) -> [i16; 2] {
        [pair.board as i16, pair.turn as i16]
    }
}

impl Cell for [i32; 2] {
    const BYTES: usize = 8;

    #[inline]
    fn from_le_bytes(bytes: &[u8]) -> [i32; 2] {
        [<i32 as Cell>::from_le_bytes(&bytes[..4]), <i32 as Cell>::from_le_bytes(&bytes[4..8])]
    }

    fn write_le_bytes(self, out: &mut Vec<u8>) {
        self[0].write_le_bytes(out);
        self[1].write_le_bytes(out);
    }

    #[inline]
    fn widen(self) -> Pair {
        Pair::new(self[0], self[1])
    }

    fn narrow(pair: Pair) -> [i32; 2] {
        [pair.board, pair.turn]
    }
}

/// Cell types for the three tables.
pub trait Layout: Copy + Default + fmt::Debug + Send + Sync + 'static {
    type Kpp: Cell;
    type Kkp: Cell;
    type Kk: Cell;

    /// Short name used in logs.
    const NAME: &'static str;
}

/// Scalar cells: KPP `i16`, KKP and KK `i32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

impl Layout for Plain {
    type Kpp = i16;
    type Kkp = i32;
    type Kk = i32;

    const NAME: &'static str = "plain";
}

/// Paired (board, turn) cells: KPP `[i16; 2]`, KKP and KK `[i32; 2]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Twig;

impl Layout for Twig {
    type Kpp = [i16; 2];
    type Kkp = [i32; 2];
    type Kk = [i32; 2];

    const NAME: &'static str = "twig";
}

/// Layout selected at build time by the `twig` feature.
#[cfg(feature = "twig")]
pub type DefaultLayout = Twig;

/// Layout selected at build time by the `twig` feature.
#[cfg(not(feature = "twig"))]
pub type DefaultLayout = Plain;

#[cfg(test)]
mod tests {
    use super::{Cell, Layout, Plain, Twig};
    use crate::sum::Pair;

    #[test]
    fn scalar_cells_have_no_turn_part() {
        assert_eq!((-7i16).widen(), Pair::new(-7, 0));
        assert_eq!(123_456i32.widen(), Pair::new(123_456, 0));
    }

    #[test]
    fn paired_cells_widen_both_parts() {
        assert_eq!([3i16, -4].widen(), Pair::new(3, -4));
        assert_eq!([-100_000i32, 9].widen(), Pair::new(-100_000, 9));
    }

    #[test]
    fn little_endian_decoding() {
        assert_eq!(<i16 as Cell>::from_le_bytes(&[0x34, 0x12]), 0x1234);
        assert_eq!(<i16 as Cell>::from_le_bytes(&[0xff, 0xff]), -1);
        assert_eq!(<[i16; 2] as Cell>::from_le_bytes(&[1, 0, 0xfe, 0xff]), [1, -2]);
        assert_eq!(<i32 as Cell>::from_le_bytes(&[0, 0, 1, 0]), 65_536);
    }

    #[test]
    fn write_then_read() {
        let mut out = Vec::new();
        [-5i32, 77].write_le_bytes(&mut out);
        assert_eq!(out.len(), <[i32; 2] as Cell>::BYTES);
        assert_eq!(<[i32; 2] as Cell>::from_le_bytes(&out), [-5, 77]);
    }

    #[test]
    fn layout_cell_sizes() {
        assert_eq!(<<Plain as Layout>::Kpp as Cell>::BYTES, 2);
        assert_eq!(<<Plain as Layout>::Kkp as Cell>::BYTES, 4);
        assert_eq!(<<Twig as Layout>::Kpp as Cell>::BYTES, 4);
        assert_eq!(<<Twig as Layout>::Kk as Cell>::BYTES, 8);
    }
}
