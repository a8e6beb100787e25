//! The KK, KKP and KPP evaluation tables.

use nagi_core::Square;

use crate::error::TableError;
use crate::features::FeatureIndex;
use crate::layout::{Cell, Layout};

const SQ: usize = Square::COUNT;

/// Dimensions of a table set.
///
/// The king axes are always 81 squares. The feature axis is
/// [`FeatureIndex::COUNT`] in production; tests use smaller shapes so the
/// KPP table stays a few kilobytes instead of a few hundred megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableShape {
    pub features: usize,
}

impl TableShape {
    /// The full feature set.
    pub const STANDARD: TableShape = TableShape {
        features: FeatureIndex::COUNT,
    };

    /// Number of cells in the KK table.
    pub const fn kk_len(self) -> usize {
        SQ * SQ
    }

    /// Number of cells in the KKP table.
    pub const fn kkp_len(self) -> usize {
        SQ * SQ * self.features
    }

    /// Number of cells in the KPP table.
    pub const fn kpp_len(self) -> usize {
        SQ * self.features * self.features
    }
}

impl Default for TableShape {
    fn default() -> TableShape {
        TableShape::STANDARD
    }
}

/// The three evaluation tables, stored flat.
///
/// `KPP[k][a][b]` must equal `KPP[k][b][a]`: evaluation visits each unordered
/// pair once, in whichever order the piece lists happen to present it.
/// Built once by the loader and then only read.
#[derive(Clone, PartialEq)]
pub struct Tables<L: Layout> {
    shape: TableShape,
    kk: Vec<L::Kk>,
    kkp: Vec<L::Kkp>,
    kpp: Vec<L::Kpp>,
}

impl<L: Layout> Tables<L> {
    /// All-zero tables. Evaluation with these yields material only.
    pub fn zeroed(shape: TableShape) -> Tables<L> {
        Tables {
            shape,
            kk: vec![L::Kk::default(); shape.kk_len()],
            kkp: vec![L::Kkp::default(); shape.kkp_len()],
            kpp: vec![L::Kpp::default(); shape.kpp_len()],
        }
    }

    /// Build tables from raw cell vectors, checking every length.
    pub fn from_parts(
        shape: TableShape,
        kk: Vec<L::Kk>,
        kkp: Vec<L::Kkp>,
        kpp: Vec<L::Kpp>,
    ) -> Result<Tables<L>, TableError> {
        check_len::<L::Kk>("KK", shape.kk_len(), kk.len())?;
        check_len::<L::Kkp>("KKP", shape.kkp_len(), kkp.len())?;
        check_len::<L::Kpp>("KPP", shape.kpp_len(), kpp.len())?;
        Ok(Tables { shape, kk, kkp, kpp })
    }

    /// Fill tables from generator functions.
    ///
    /// `kpp` is only called with `a <= b` and the result is stored at both
    /// `[k][a][b]` and `[k][b][a]`, so the KPP table is symmetric.
    pub fn from_fn(
        shape: TableShape,
        kk: impl Fn(Square, Square) -> L::Kk,
        kkp: impl Fn(Square, Square, FeatureIndex) -> L::Kkp,
        kpp: impl Fn(Square, FeatureIndex, FeatureIndex) -> L::Kpp,
    ) -> Tables<L> {
        let mut tables = Tables::zeroed(shape);
        let f = shape.features;
        for bk in Square::all() {
            for wk in Square::all() {
                tables.kk[bk.index() * SQ + wk.index()] = kk(bk, wk);
                for a in 0..f {
                    tables.kkp[(bk.index() * SQ + wk.index()) * f + a] = kkp(bk, wk, FeatureIndex::new(a));
                }
            }
        }
        for k in Square::all() {
            for a in 0..f {
                for b in a..f {
                    let value = kpp(k, FeatureIndex::new(a), FeatureIndex::new(b));
                    tables.kpp[(k.index() * f + a) * f + b] = value;
                    tables.kpp[(k.index() * f + b) * f + a] = value;
                }
            }
        }
        tables
    }

    #[inline]
    pub fn shape(&self) -> TableShape {
        self.shape
    }

    #[inline]
    pub fn kk(&self, bk: Square, wk: Square) -> L::Kk {
        self.kk[bk.index() * SQ + wk.index()]
    }

    #[inline]
    pub fn kkp(&self, bk: Square, wk: Square, feature: FeatureIndex) -> L::Kkp {
        debug_assert!(feature.index() < self.shape.features);
        self.kkp[(bk.index() * SQ + wk.index()) * self.shape.features + feature.index()]
    }

    #[inline]
    pub fn kpp(&self, k: Square, a: FeatureIndex, b: FeatureIndex) -> L::Kpp {
        self.kpp_row(k, a)[b.index()]
    }

    /// All KPP cells pairing feature `a` with each feature, for king square `k`.
    #[inline]
    pub fn kpp_row(&self, k: Square, a: FeatureIndex) -> &[L::Kpp] {
        let f = self.shape.features;
        debug_assert!(a.index() < f);
        let start = (k.index() * f + a.index()) * f;
        &self.kpp[start..start + f]
    }

    pub(crate) fn kk_cells(&self) -> &[L::Kk] {
        &self.kk
    }

    pub(crate) fn kkp_cells(&self) -> &[L::Kkp] {
        &self.kkp
    }

    pub(crate) fn kpp_cells(&self) -> &[L::Kpp] {
        &self.kpp
    }

    /// Total in-memory size of the cells.
    pub fn byte_size(&self) -> usize {
        self.kk.len() * <L::Kk as Cell>::BYTES
            + self.kkp.len() * <L::Kkp as Cell>::BYTES
            + self.kpp.len() * <L::Kpp as Cell>::BYTES
    }

    /// Return `true` if every `KPP[k][a][b] == KPP[k][b][a]`.
    pub fn is_kpp_symmetric(&self) -> bool {
        self.kpp_asymmetry().is_none()
    }

    /// The first `(k, a, b)` with `KPP[k][a][b] != KPP[k][b][a]`, if any.
    pub fn kpp_asymmetry(&self) -> Option<(Square, FeatureIndex, FeatureIndex)> {
        let f = self.shape.features;
        for k in Square::all() {
            let base = k.index() * f * f;
            for a in 0..f {
                for b in a + 1..f {
                    if self.kpp[base + a * f + b] != self.kpp[base + b * f + a] {
                        return Some((k, FeatureIndex::new(a), FeatureIndex::new(b)));
                    }
                }
            }
        }
        None
    }
}

impl<L: Layout> std::fmt::Debug for Tables<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tables")
            .field("layout", &L::NAME)
            .field("shape", &self.shape)
            .field("bytes", &self.byte_size())
            .finish()
    }
}

fn check_len<C: Cell>(table: &'static str, expected: usize, found: usize) -> Result<(), TableError> {
    if expected == found {
        Ok(())
    } else {
        Err(TableError::ShapeMismatch {
            table,
            expected: expected * C::BYTES,
            found: found * C::BYTES,
        })
    }
}

#[cfg(test)]
mod tests {
    use nagi_core::Square;

    use super::{TableShape, Tables};
    use crate::error::TableError;
    use crate::features::FeatureIndex;
    use crate::layout::{Plain, Twig};

    const SMALL: TableShape = TableShape { features: 6 };

    #[test]
    fn standard_sizes() {
        let shape = TableShape::STANDARD;
        assert_eq!(shape.kk_len(), 6561);
        assert_eq!(shape.kkp_len(), 6561 * 1548);
        assert_eq!(shape.kpp_len(), 81 * 1548 * 1548);
    }

    #[test]
    fn from_fn_indexes_all_axes() {
        let tables: Tables<Plain> = Tables::from_fn(
            SMALL,
            |bk, wk| (bk.index() * 100 + wk.index()) as i32,
            |bk, wk, p| (bk.index() * 10_000 + wk.index() * 100 + p.index()) as i32,
            |k, a, b| (k.index() * 100 + a.index() * 10 + b.index()) as i16,
        );
        let bk = Square::from_usi("5i").unwrap();
        let wk = Square::from_usi("5a").unwrap();
        assert_eq!(tables.kk(bk, wk), (bk.index() * 100 + wk.index()) as i32);
        assert_eq!(
            tables.kkp(bk, wk, FeatureIndex::new(4)),
            (bk.index() * 10_000 + wk.index() * 100 + 4) as i32
        );
        let a = FeatureIndex::new(2);
        let b = FeatureIndex::new(5);
        let expected = (bk.index() * 100 + 25) as i16;
        assert_eq!(tables.kpp(bk, a, b), expected);
        assert_eq!(tables.kpp(bk, b, a), expected);
        assert!(tables.is_kpp_symmetric());
    }

    #[test]
    fn from_parts_rejects_wrong_length() {
        let err = Tables::<Twig>::from_parts(
            SMALL,
            vec![[0; 2]; SMALL.kk_len()],
            vec![[0; 2]; SMALL.kkp_len() - 1],
            vec![[0; 2]; SMALL.kpp_len()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::ShapeMismatch { table: "KKP", found, .. } if found == (SMALL.kkp_len() - 1) * 8
        ));
    }

    #[test]
    fn asymmetry_is_located() {
        let mut kpp = vec![0i16; SMALL.kpp_len()];
        let k = Square::from_usi("3c").unwrap();
        // KPP[k][1][4] = 7 while KPP[k][4][1] stays 0.
        kpp[(k.index() * 6 + 1) * 6 + 4] = 7;
        let tables =
            Tables::<Plain>::from_parts(SMALL, vec![0; SMALL.kk_len()], vec![0; SMALL.kkp_len()], kpp).unwrap();
        assert!(!tables.is_kpp_symmetric());
        assert_eq!(tables.kpp_asymmetry(), Some((k, FeatureIndex::new(1), FeatureIndex::new(4))));
        assert_eq!(tables.shape(), SMALL);
        assert!(Tables::<Plain>::zeroed(SMALL).kpp_asymmetry().is_none());
    }

    #[test]
    fn zeroed_is_zero() {
        let tables: Tables<Twig> = Tables::zeroed(SMALL);
        assert!(tables.kpp_row(Square::SQ_5A, FeatureIndex::new(0)).iter().all(|&c| c == [0, 0]));
        assert_eq!(tables.byte_size(), 6561 * 8 + 6561 * 6 * 8 + 81 * 36 * 4);
    }
}
