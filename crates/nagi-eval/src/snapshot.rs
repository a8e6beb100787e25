//! A minimal board that keeps feature lists up to date.
//!
//! `Snapshot` applies moves without checking how pieces move; it only
//! enforces what the feature lists depend on (who stands where, what is in
//! hand). Search-side boards implement [`EvalPosition`] themselves; this one
//! serves the demo binary and the tests.

use nagi_core::{Color, Move, PieceKind, Placement, Square};

use crate::error::SnapshotError;
use crate::features::{FeatureIndex, FeaturePair, Location, board_feature, hand_feature};
use crate::list::EvalList;
use crate::material::{EXCHANGE_VALUE, PROMOTE_VALUE, material};
use crate::position::EvalPosition;

/// The piece behind one list slot. Board squares are absolute (Black's orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotPiece {
    owner: Color,
    kind: PieceKind,
    location: Location,
}

impl SlotPiece {
    fn features(self) -> Result<FeaturePair, SnapshotError> {
        let pair = match self.location {
            Location::Board(sq) => board_feature(self.kind, self.owner, sq),
            Location::Hand(count) => hand_feature(self.kind, self.owner, count),
        };
        pair.ok_or(SnapshotError::HandOverflow {
            color: self.owner,
            kind: self.kind,
            count: match self.location {
                Location::Hand(count) => count,
                Location::Board(_) => 0,
            },
        })
    }
}

/// A position plus its current and previous feature lists.
#[derive(Debug, Clone)]
pub struct Snapshot {
    side_to_move: Color,
    kings: [Square; Color::COUNT],
    slots: Vec<SlotPiece>,
    /// Slot of the non-king piece on each square.
    board: [Option<u8>; Square::COUNT],
    hands: [[u8; 7]; Color::COUNT],
    list: EvalList,
    prev: EvalList,
    idx_move: usize,
    idx_capture: Option<usize>,
    material: i32,
}

impl Snapshot {
    /// Build from a placement. Board pieces take the first slots, in placement
    /// order, then pieces in hand.
    pub fn from_placement(placement: &Placement) -> Result<Snapshot, SnapshotError> {
        let mut slots = Vec::new();
        let mut board = [None; Square::COUNT];
        for piece in placement.pieces().iter().filter(|p| p.kind != PieceKind::King) {
            board[piece.square.index()] = Some(slots.len() as u8);
            slots.push(SlotPiece {
                owner: piece.color,
                kind: piece.kind,
                location: Location::Board(piece.square),
            });
        }

        let mut hands = [[0u8; 7]; Color::COUNT];
        for color in Color::ALL {
            for (h, kind) in PieceKind::HAND.into_iter().enumerate() {
                let count = placement.hand_count(color, kind);
                hands[color.index()][h] = count;
                for ordinal in 1..=count {
                    slots.push(SlotPiece {
                        owner: color,
                        kind,
                        location: Location::Hand(ordinal),
                    });
                }
            }
        }

        let pairs = slots.iter().map(|s| s.features()).collect::<Result<Vec<_>, _>>()?;
        let list = EvalList::from_pairs(&pairs);
        Ok(Snapshot {
            side_to_move: placement.side_to_move(),
            kings: [placement.king_square(Color::Black), placement.king_square(Color::White)],
            slots,
            board,
            hands,
            list,
            prev: list,
            idx_move: 0,
            idx_capture: None,
            material: material(placement),
        })
    }

    /// The standard starting position.
    pub fn startpos() -> Snapshot {
        match Snapshot::from_placement(&Placement::startpos()) {
            Ok(snapshot) => snapshot,
            Err(err) => unreachable!("starting position rejected: {err}"),
        }
    }

    /// The piece on `sq`, kings included.
    pub fn piece_at(&self, sq: Square) -> Option<(Color, PieceKind)> {
        if let Some(color) = Color::ALL.into_iter().find(|&c| self.kings[c.index()] == sq) {
            return Some((color, PieceKind::King));
        }
        self.board[sq.index()].map(|slot| {
            let piece = self.slots[slot as usize];
            (piece.owner, piece.kind)
        })
    }

    /// Number of `kind` pieces in `color`'s hand.
    pub fn hand_count(&self, color: Color, kind: PieceKind) -> u8 {
        hand_slot(kind).map_or(0, |h| self.hands[color.index()][h])
    }

    /// Apply `mv`, dispatching on its shape.
    pub fn play(&mut self, mv: Move) -> Result<(), SnapshotError> {
        if mv.is_king_move() {
            self.play_king_move(mv)
        } else if mv.is_capture() {
            self.play_capture(mv)
        } else {
            self.play_slot_move(mv)
        }
    }

    /// Apply a drop or a non-capturing move of a non-king piece. One slot changes.
    pub fn play_slot_move(&mut self, mv: Move) -> Result<(), SnapshotError> {
        debug_assert!(!mv.is_king_move() && !mv.is_capture());
        let us = self.side_to_move;
        let dest = mv.dest();
        if self.piece_at(dest).is_some() {
            return Err(SnapshotError::BadDestination { mv, square: dest });
        }

        let (slot, piece, promote_gain) = if mv.is_drop() {
            let kind = mv.piece_kind();
            let count = self.hand_count(us, kind);
            let slot = self
                .slots
                .iter()
                .position(|s| s.owner == us && s.kind == kind && s.location == Location::Hand(count))
                .ok_or(SnapshotError::EmptyHand { mv, kind })?;
            let piece = SlotPiece {
                owner: us,
                kind,
                location: Location::Board(dest),
            };
            (slot, piece, 0)
        } else {
            let slot = self.mover_slot(mv)?;
            let (kind, gain) = self.moved_kind(mv)?;
            let piece = SlotPiece {
                owner: us,
                kind,
                location: Location::Board(dest),
            };
            (slot, piece, gain)
        };
        let features = piece.features()?;

        self.prev = self.list;
        match self.slots[slot].location {
            Location::Board(from) => self.board[from.index()] = None,
            Location::Hand(_) => self.take_from_hand(us, piece.kind),
        }
        self.board[dest.index()] = Some(slot as u8);
        self.slots[slot] = piece;
        self.list.set(slot, features);
        self.idx_move = slot;
        self.idx_capture = None;
        self.material += promote_gain * us.sign();
        self.side_to_move = !us;
        Ok(())
    }

    /// Apply a capture by a non-king piece. Two slots change.
    pub fn play_capture(&mut self, mv: Move) -> Result<(), SnapshotError> {
        debug_assert!(!mv.is_king_move() && mv.is_capture() && !mv.is_drop());
        let us = self.side_to_move;
        let dest = mv.dest();
        let slot = self.mover_slot(mv)?;
        let (kind, gain) = self.moved_kind(mv)?;
        let (victim, captured) = self.victim(mv)?;
        let piece = SlotPiece {
            owner: us,
            kind,
            location: Location::Board(dest),
        };
        let features = piece.features()?;
        let captured_features = captured.features()?;

        self.prev = self.list;
        if let Location::Board(from) = self.slots[slot].location {
            self.board[from.index()] = None;
        }
        self.board[dest.index()] = Some(slot as u8);
        self.slots[slot] = piece;
        self.list.set(slot, features);
        self.put_in_hand(victim, captured, captured_features, mv);
        self.idx_move = slot;
        self.material += gain * us.sign();
        self.side_to_move = !us;
        Ok(())
    }

    /// Apply a king move. No slot changes, unless it captures.
    pub fn play_king_move(&mut self, mv: Move) -> Result<(), SnapshotError> {
        debug_assert!(mv.is_king_move() && !mv.is_drop());
        let us = self.side_to_move;
        let source = mv.source();
        if self.kings[us.index()] != source {
            return Err(SnapshotError::NoPiece {
                mv,
                color: us,
                kind: PieceKind::King,
                square: source,
            });
        }
        let capture = if mv.is_capture() {
            let (victim, captured) = self.victim(mv)?;
            Some((victim, captured, captured.features()?))
        } else if self.piece_at(mv.dest()).is_some() {
            return Err(SnapshotError::BadDestination { mv, square: mv.dest() });
        } else {
            None
        };

        self.prev = self.list;
        self.idx_capture = None;
        if let Some((victim, captured, features)) = capture {
            self.put_in_hand(victim, captured, features, mv);
        }
        self.kings[us.index()] = mv.dest();
        self.side_to_move = !us;
        Ok(())
    }

    /// Slot of the non-king piece the side to move moves from `mv.source()`.
    fn mover_slot(&self, mv: Move) -> Result<usize, SnapshotError> {
        let us = self.side_to_move;
        let source = mv.source();
        self.board[source.index()]
            .map(|slot| slot as usize)
            .filter(|&slot| self.slots[slot].owner == us && self.slots[slot].kind == mv.piece_kind())
            .ok_or(SnapshotError::NoPiece {
                mv,
                color: us,
                kind: mv.piece_kind(),
                square: source,
            })
    }

    /// Kind of the moved piece after the move, and the material gained by promoting.
    fn moved_kind(&self, mv: Move) -> Result<(PieceKind, i32), SnapshotError> {
        let kind = mv.piece_kind();
        if !mv.is_promotion() {
            return Ok((kind, 0));
        }
        kind.promote()
            .map(|promoted| (promoted, PROMOTE_VALUE[kind.index()]))
            .ok_or(SnapshotError::BadPromotion { mv, kind })
    }

    /// Slot of the captured piece and what it becomes in the captor's hand.
    fn victim(&self, mv: Move) -> Result<(usize, SlotPiece), SnapshotError> {
        let us = self.side_to_move;
        let dest = mv.dest();
        let bad = SnapshotError::BadDestination { mv, square: dest };
        let slot = self.board[dest.index()].map(|slot| slot as usize).ok_or(bad.clone())?;
        let piece = self.slots[slot];
        if piece.owner == us || Some(piece.kind) != mv.captured() {
            return Err(bad);
        }
        let kind = piece.kind.unpromote();
        Ok((
            slot,
            SlotPiece {
                owner: us,
                kind,
                location: Location::Hand(self.hand_count(us, kind) + 1),
            },
        ))
    }

    fn put_in_hand(&mut self, slot: usize, piece: SlotPiece, features: FeaturePair, mv: Move) {
        let us = piece.owner;
        if let Some(victim) = mv.captured() {
            self.material += EXCHANGE_VALUE[victim.index()] * us.sign();
        }
        // Board slot of the victim is taken over by the captor; only the hand changes here.
        if let Some(h) = hand_slot(piece.kind) {
            self.hands[us.index()][h] += 1;
        }
        self.slots[slot] = piece;
        self.list.set(slot, features);
        self.idx_capture = Some(slot);
    }

    fn take_from_hand(&mut self, color: Color, kind: PieceKind) {
        if let Some(h) = hand_slot(kind) {
            self.hands[color.index()][h] -= 1;
        }
    }
}

fn hand_slot(kind: PieceKind) -> Option<usize> {
    PieceKind::HAND.iter().position(|&k| k == kind)
}

impl EvalPosition for Snapshot {
    #[inline]
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[inline]
    fn list(&self, perspective: Color) -> &[FeatureIndex] {
        self.list.view(perspective)
    }

    #[inline]
    fn prev_list(&self, perspective: Color) -> &[FeatureIndex] {
        self.prev.view(perspective)
    }

    #[inline]
    fn list_index_move(&self) -> usize {
        self.idx_move
    }

    #[inline]
    fn list_index_capture(&self) -> Option<usize> {
        self.idx_capture
    }

    #[inline]
    fn material(&self) -> i32 {
        self.material
    }
}
