//! Feature index mapping for KPP evaluation.
//!
//! A feature is one non-king piece seen from one side: its kind, whether it
//! belongs to that side ("friend") or the opponent ("enemy"), and where it
//! is. Every feature has a fixed index in `0..FE_END`:
//!
//! ```text
//!    0..90    pieces in hand, per kind, friend range then enemy range
//!             (pawn 19+19, lance/knight/silver/gold 5+5 each, bishop/rook 3+3)
//!   90..1548  pieces on board, 81 squares per range, friend then enemy,
//!             kinds in order pawn lance knight silver gold bishop horse rook dragon
//! ```
//!
//! Promoted pawns, lances, knights and silvers use the gold ranges. A hand
//! feature's offset within its range is the ordinal of that piece in hand
//! (the third pawn in hand is `F_HAND_PAWN + 3`).

use nagi_core::{Color, PieceKind, Square};

/// Index of a feature in the KPP/KKP tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FeatureIndex(u16);

/// Whether a feature's piece belongs to the viewing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Friend,
    Enemy,
}

impl Relation {
    /// The relation seen from the other side.
    #[inline]
    pub const fn flip(self) -> Relation {
        match self {
            Relation::Friend => Relation::Enemy,
            Relation::Enemy => Relation::Friend,
        }
    }

    /// Relation of a piece owned by `owner` as seen by `viewer`.
    #[inline]
    pub fn of(owner: Color, viewer: Color) -> Relation {
        if owner == viewer { Relation::Friend } else { Relation::Enemy }
    }
}

/// Where a feature's piece is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// On the board, from the viewer's orientation.
    Board(Square),
    /// In hand; the value is the piece's ordinal (1-based) among its kind.
    Hand(u8),
}

/// A decoded feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feature {
    /// Piece kind. Promoted small pieces decode as [`PieceKind::Gold`].
    pub kind: PieceKind,
    pub relation: Relation,
    pub location: Location,
}

/// The two views of one piece: from Black's side and from White's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeaturePair {
    pub black: FeatureIndex,
    pub white: FeatureIndex,
}

impl FeaturePair {
    /// The view from `perspective`.
    #[inline]
    pub fn get(self, perspective: Color) -> FeatureIndex {
        match perspective {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }
}

/// Hand ranges: kind, friend-range start, range length.
const HAND_RANGES: [(PieceKind, u16, u16); 7] = [
    (PieceKind::Pawn, 0, 19),
    (PieceKind::Lance, 38, 5),
    (PieceKind::Knight, 48, 5),
    (PieceKind::Silver, 58, 5),
    (PieceKind::Gold, 68, 5),
    (PieceKind::Bishop, 78, 3),
    (PieceKind::Rook, 84, 3),
];

/// Board ranges in index order; each kind owns 2 * 81 consecutive indices.
const BOARD_KINDS: [PieceKind; 9] = [
    PieceKind::Pawn,
    PieceKind::Lance,
    PieceKind::Knight,
    PieceKind::Silver,
    PieceKind::Gold,
    PieceKind::Bishop,
    PieceKind::Horse,
    PieceKind::Rook,
    PieceKind::Dragon,
];

const SQUARES: u16 = Square::COUNT as u16;

impl FeatureIndex {
    pub const F_HAND_PAWN: FeatureIndex = FeatureIndex(0);
    pub const E_HAND_PAWN: FeatureIndex = FeatureIndex(19);
    pub const F_HAND_LANCE: FeatureIndex = FeatureIndex(38);
    pub const E_HAND_LANCE: FeatureIndex = FeatureIndex(43);
    pub const F_HAND_KNIGHT: FeatureIndex = FeatureIndex(48);
    pub const E_HAND_KNIGHT: FeatureIndex = FeatureIndex(53);
    pub const F_HAND_SILVER: FeatureIndex = FeatureIndex(58);
    pub const E_HAND_SILVER: FeatureIndex = FeatureIndex(63);
    pub const F_HAND_GOLD: FeatureIndex = FeatureIndex(68);
    pub const E_HAND_GOLD: FeatureIndex = FeatureIndex(73);
    pub const F_HAND_BISHOP: FeatureIndex = FeatureIndex(78);
    pub const E_HAND_BISHOP: FeatureIndex = FeatureIndex(81);
    pub const F_HAND_ROOK: FeatureIndex = FeatureIndex(84);
    pub const E_HAND_ROOK: FeatureIndex = FeatureIndex(87);
    pub const FE_HAND_END: FeatureIndex = FeatureIndex(90);

    pub const F_PAWN: FeatureIndex = FeatureIndex(90);
    pub const E_PAWN: FeatureIndex = FeatureIndex(90 + SQUARES);
    pub const F_GOLD: FeatureIndex = FeatureIndex(90 + 8 * SQUARES);
    pub const F_HORSE: FeatureIndex = FeatureIndex(90 + 12 * SQUARES);
    pub const F_DRAGON: FeatureIndex = FeatureIndex(90 + 16 * SQUARES);

    /// One past the last feature index.
    pub const FE_END: FeatureIndex = FeatureIndex(90 + 18 * SQUARES);

    /// Number of distinct features.
    pub const COUNT: usize = Self::FE_END.0 as usize;

    /// Wrap a raw index.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `raw` fits in `u16`. Values beyond [`FeatureIndex::COUNT`]
    /// are allowed so that reduced-size tables can be addressed in tests.
    #[inline]
    pub const fn new(raw: usize) -> FeatureIndex {
        debug_assert!(raw <= u16::MAX as usize);
        FeatureIndex(raw as u16)
    }

    /// Return the raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return `true` if this feature describes a piece in hand.
    #[inline]
    pub const fn is_hand(self) -> bool {
        self.0 < Self::FE_HAND_END.0
    }

    /// Decode into kind, relation and location.
    ///
    /// Returns `None` for indices at or beyond [`FeatureIndex::FE_END`].
    pub fn decode(self) -> Option<Feature> {
        if self.0 >= Self::FE_END.0 {
            return None;
        }
        if self.is_hand() {
            for (kind, start, len) in HAND_RANGES {
                if self.0 < start + 2 * len {
                    let offset = self.0 - start;
                    let relation = if offset < len { Relation::Friend } else { Relation::Enemy };
                    return Some(Feature {
                        kind,
                        relation,
                        location: Location::Hand((offset % len) as u8),
                    });
                }
            }
            return None;
        }

        let offset = self.0 - Self::FE_HAND_END.0;
        let kind = BOARD_KINDS[(offset / (2 * SQUARES)) as usize];
        let within = offset % (2 * SQUARES);
        let relation = if within < SQUARES { Relation::Friend } else { Relation::Enemy };
        let square = Square::from_index((within % SQUARES) as u8)?;
        Some(Feature {
            kind,
            relation,
            location: Location::Board(square),
        })
    }

    /// The same piece seen from the other side: relation swapped and,
    /// for board features, the square rotated.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the index is below [`FeatureIndex::FE_END`].
    pub fn inverse(self) -> FeatureIndex {
        debug_assert!(self.0 < Self::FE_END.0, "inverse of out-of-range feature {self:?}");
        let Some(feature) = self.decode() else {
            return self;
        };
        let location = match feature.location {
            Location::Board(sq) => Location::Board(sq.inverse()),
            hand => hand,
        };
        encode(feature.kind, feature.relation.flip(), location).unwrap_or(self)
    }
}

/// Encode a feature seen by some viewer.
///
/// Returns `None` for kings, and for hand ordinals beyond the range size.
pub fn encode(kind: PieceKind, relation: Relation, location: Location) -> Option<FeatureIndex> {
    match location {
        Location::Board(sq) => {
            let kind = match kind {
                PieceKind::ProPawn | PieceKind::ProLance | PieceKind::ProKnight | PieceKind::ProSilver => {
                    PieceKind::Gold
                }
                other => other,
            };
            let segment = BOARD_KINDS.iter().position(|&k| k == kind)? as u16;
            let rel = match relation {
                Relation::Friend => 0,
                Relation::Enemy => SQUARES,
            };
            Some(FeatureIndex(
                FeatureIndex::FE_HAND_END.0 + segment * 2 * SQUARES + rel + sq.index() as u16,
            ))
        }
        Location::Hand(count) => {
            let (_, start, len) = HAND_RANGES.iter().copied().find(|&(k, _, _)| k == kind)?;
            if u16::from(count) >= len {
                return None;
            }
            let rel = match relation {
                Relation::Friend => 0,
                Relation::Enemy => len,
            };
            Some(FeatureIndex(start + rel + u16::from(count)))
        }
    }
}

/// Features of a piece of `kind` owned by `owner` standing on `sq`.
///
/// From White's side the square is rotated, so a black pawn on 7g and a
/// white pawn on 3c are the same feature from their owners' points of view.
/// Returns `None` for kings.
#[inline]
pub fn board_feature(kind: PieceKind, owner: Color, sq: Square) -> Option<FeaturePair> {
    let black = encode(kind, Relation::of(owner, Color::Black), Location::Board(sq))?;
    let white = encode(kind, Relation::of(owner, Color::White), Location::Board(sq.inverse()))?;
    Some(FeaturePair { black, white })
}

/// Features of the `count`-th piece of `kind` in `owner`'s hand (`count >= 1`).
///
/// Returns `None` for kinds that cannot be held in hand and for counts beyond
/// the number of such pieces in a set.
#[inline]
pub fn hand_feature(kind: PieceKind, owner: Color, count: u8) -> Option<FeaturePair> {
    if !kind.is_hand_kind() || count == 0 {
        return None;
    }
    let black = encode(kind, Relation::of(owner, Color::Black), Location::Hand(count))?;
    let white = encode(kind, Relation::of(owner, Color::White), Location::Hand(count))?;
    Some(FeaturePair { black, white })
}

#[cfg(test)]
mod tests {
    use nagi_core::{Color, PieceKind, Square};

    use super::{FeatureIndex, Location, Relation, board_feature, encode, hand_feature};

    #[test]
    fn layout_constants() {
        assert_eq!(FeatureIndex::FE_HAND_END.index(), 90);
        assert_eq!(FeatureIndex::F_PAWN.index(), 90);
        assert_eq!(FeatureIndex::E_PAWN.index(), 171);
        assert_eq!(FeatureIndex::FE_END.index(), 1548);
        assert_eq!(FeatureIndex::COUNT, 1548);
    }

    /// Every encodable feature decodes back to itself and stays in range.
    #[test]
    fn encode_decode_bounds() {
        let mut seen = std::collections::HashSet::new();
        for raw in 0..FeatureIndex::COUNT {
            let idx = FeatureIndex::new(raw);
            let feature = idx.decode().unwrap();
            let back = encode(feature.kind, feature.relation, feature.location);
            assert_eq!(back, Some(idx), "raw={raw} decoded as {feature:?}");
            assert!(seen.insert(idx));
        }
        assert!(FeatureIndex::FE_END.decode().is_none());
    }

    #[test]
    fn promoted_small_pieces_share_gold_range() {
        let sq = Square::from_usi("5e").unwrap();
        let gold = board_feature(PieceKind::Gold, Color::Black, sq).unwrap();
        for kind in [
            PieceKind::ProPawn,
            PieceKind::ProLance,
            PieceKind::ProKnight,
            PieceKind::ProSilver,
        ] {
            assert_eq!(board_feature(kind, Color::Black, sq), Some(gold));
        }
        assert_eq!(gold.black.index(), FeatureIndex::F_GOLD.index() + sq.index());
    }

    #[test]
    fn range_reveals_kind() {
        let sq = Square::from_usi("2h").unwrap();
        let rook = board_feature(PieceKind::Rook, Color::Black, sq).unwrap();
        let dragon = board_feature(PieceKind::Dragon, Color::White, sq).unwrap();
        assert_eq!(rook.black.decode().unwrap().kind, PieceKind::Rook);
        assert_eq!(dragon.black.decode().unwrap().kind, PieceKind::Dragon);
        assert_eq!(dragon.black.decode().unwrap().relation, Relation::Enemy);
        assert!(dragon.black.index() >= FeatureIndex::F_DRAGON.index());
        let horse = board_feature(PieceKind::Horse, Color::Black, sq).unwrap();
        assert_eq!(horse.black.index(), FeatureIndex::F_HORSE.index() + sq.index());
        assert_eq!(horse.black.decode().unwrap().kind, PieceKind::Horse);
    }

    #[test]
    fn kings_are_not_features() {
        assert_eq!(board_feature(PieceKind::King, Color::Black, Square::SQ_5I), None);
        assert_eq!(hand_feature(PieceKind::King, Color::Black, 1), None);
    }

    #[test]
    fn black_and_white_views_are_mirrors() {
        for kind in PieceKind::ALL {
            for owner in Color::ALL {
                for sq in Square::all() {
                    let Some(pair) = board_feature(kind, owner, sq) else {
                        assert_eq!(kind, PieceKind::King);
                        continue;
                    };
                    assert_eq!(pair.black.inverse(), pair.white);
                    assert_eq!(pair.white.inverse(), pair.black);
                    assert!(pair.black.index() < FeatureIndex::COUNT);
                    assert!(pair.white.index() < FeatureIndex::COUNT);
                }
            }
        }
    }

    /// A black pawn on S, seen by Black, equals a white pawn on inverse(S), seen by White.
    #[test]
    fn owner_symmetry() {
        let sq = Square::from_usi("7g").unwrap();
        let black_pawn = board_feature(PieceKind::Pawn, Color::Black, sq).unwrap();
        let white_pawn = board_feature(PieceKind::Pawn, Color::White, sq.inverse()).unwrap();
        assert_eq!(black_pawn.black, white_pawn.white);
        assert_eq!(black_pawn.white, white_pawn.black);
    }

    #[test]
    fn hand_features() {
        let pair = hand_feature(PieceKind::Pawn, Color::Black, 3).unwrap();
        assert_eq!(pair.black.index(), FeatureIndex::F_HAND_PAWN.index() + 3);
        assert_eq!(pair.white.index(), FeatureIndex::E_HAND_PAWN.index() + 3);
        assert!(pair.black.is_hand());

        let pair = hand_feature(PieceKind::Rook, Color::White, 2).unwrap();
        assert_eq!(pair.black.index(), FeatureIndex::E_HAND_ROOK.index() + 2);
        assert_eq!(pair.white.index(), FeatureIndex::F_HAND_ROOK.index() + 2);
        assert_eq!(pair.black.inverse(), pair.white);

        assert_eq!(hand_feature(PieceKind::Pawn, Color::Black, 18).map(|p| p.black.index()), Some(18));
        assert_eq!(hand_feature(PieceKind::Pawn, Color::Black, 19), None);
        assert_eq!(hand_feature(PieceKind::Bishop, Color::Black, 3), None);
        assert_eq!(hand_feature(PieceKind::Gold, Color::Black, 0), None);
        assert_eq!(hand_feature(PieceKind::Horse, Color::Black, 1), None);
    }

    #[test]
    fn hand_decode() {
        let feature = FeatureIndex::new(FeatureIndex::E_HAND_SILVER.index() + 4).decode().unwrap();
        assert_eq!(feature.kind, PieceKind::Silver);
        assert_eq!(feature.relation, Relation::Enemy);
        assert_eq!(feature.location, Location::Hand(4));
    }
}
