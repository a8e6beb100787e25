//! Integration tests for differential evaluation along simulated search lines.
//!
//! Walks random lines from the starting position, descending and
//! backtracking like a search would, and checks at every node that the
//! incremental score and sum equal a from-scratch evaluation.

use std::sync::Arc;

use nagi_core::{Color, Move, PieceKind, Square};
use nagi_eval::layout::{Cell, Layout};
use nagi_eval::sum::Pair;
use nagi_eval::{
    EvalPosition, EvalStack, Evaluator, FeatureIndex, INF, MATE, MAX_PLY, Plain, Snapshot, TEMPO, TableShape, Tables, Twig,
};

/// Feature axis of the test tables; real feature indices are folded into it.
const FOLD: usize = 97;

/// Deterministic xorshift64 generator.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn small(&mut self) -> i32 {
        self.below(41) as i32 - 20
    }
}

/// A position with every feature index reduced modulo [`FOLD`].
///
/// The library's own `Folded` helper is compiled only under `cfg(test)` and
/// is not visible to integration tests, which link the normal build.
struct Folded<'a> {
    pos: &'a Snapshot,
    list: [Vec<FeatureIndex>; 2],
    prev: [Vec<FeatureIndex>; 2],
}

impl<'a> Folded<'a> {
    fn new(pos: &'a Snapshot) -> Folded<'a> {
        let fold = |list: &[FeatureIndex]| list.iter().map(|f| FeatureIndex::new(f.index() % FOLD)).collect();
        Folded {
            pos,
            list: [fold(pos.list(Color::Black)), fold(pos.list(Color::White))],
            prev: [fold(pos.prev_list(Color::Black)), fold(pos.prev_list(Color::White))],
        }
    }
}

impl EvalPosition for Folded<'_> {
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

fn random_tables<L: Layout>(seed: u64) -> Tables<L> {
    let cell = |seed: u64, a: usize, b: usize, c: usize| {
        let mut rng = Rng(seed ^ ((a as u64) << 40) ^ ((b as u64) << 20) ^ c as u64 ^ 0xD1B5_4A32_D192_ED03);
        rng.next_u64();
        Pair::new(rng.small(), rng.small())
    };
    Tables::from_fn(
        TableShape { features: FOLD },
        |bk, wk| Cell::narrow(cell(seed, 1, bk.index(), wk.index())),
        |bk, wk, p| Cell::narrow(cell(seed + 1, bk.index(), wk.index(), p.index())),
        |k, a, b| Cell::narrow(cell(seed + 2, k.index(), a.index(), b.index())),
    )
}

/// A random move for the side to move. Piece movement rules are ignored;
/// only occupancy and hands are respected.
fn random_move(pos: &Snapshot, rng: &mut Rng) -> Move {
    let us = pos.side_to_move();
    let squares: Vec<Square> = Square::all().collect();
    loop {
        let dest = squares[rng.below(squares.len())];
        let target = pos.piece_at(dest);
        if matches!(target, Some((_, PieceKind::King))) {
            continue;
        }
        if matches!(target, Some((color, _)) if color == us) {
            continue;
        }
        let captured = target.map(|(_, kind)| kind);

        match rng.below(10) {
            0 => {
                let kind = PieceKind::HAND[rng.below(PieceKind::HAND.len())];
                if captured.is_none() && pos.hand_count(us, kind) > 0 {
                    return Move::new_drop(kind, dest);
                }
            }
            1 => return Move::new(pos.king_square(us), dest, PieceKind::King, captured),
            _ => {
                let source = squares[rng.below(squares.len())];
                let Some((color, kind)) = pos.piece_at(source) else {
                    continue;
                };
                if color != us || kind == PieceKind::King || source == dest {
                    continue;
                }
                if kind.promote().is_some() && rng.below(3) == 0 {
                    return Move::new_promotion(source, dest, kind, captured);
                }
                return Move::new(source, dest, kind, captured);
            }
        }
    }
}

/// Walk a line of `steps` nodes, occasionally backtracking, checking every node.
fn walk<L: Layout>(seed: u64, steps: usize) {
    let eval = Evaluator::new(Arc::new(random_tables::<L>(seed)));
    let mut rng = Rng(seed | 1);
    let mut stack = EvalStack::new();
    let mut line = vec![Snapshot::startpos()];
    eval.evaluate(&Folded::new(&line[0]), &mut stack, 0);

    let (mut differential, mut king_moves, mut captures) = (0, 0, 0);
    for _ in 0..steps {
        if line.len() > 1 && (line.len() > 24 || rng.below(4) == 0) {
            line.truncate(1 + rng.below(line.len() - 1));
            continue;
        }
        let ply = line.len();
        assert!(ply <= MAX_PLY);
        let mut pos = line[ply - 1].clone();
        let mv = random_move(&pos, &mut rng);
        pos.play(mv).unwrap_or_else(|err| panic!("{err}"));
        stack.enter(ply, mv);

        let folded = Folded::new(&pos);
        let score = eval.evaluate(&folded, &mut stack, ply);
        let mut scratch = EvalStack::new();
        let full = eval.evaluate_full(&folded, &mut scratch, ply);
        assert_eq!(score, full, "seed {seed}, ply {ply}, move {mv}");
        assert_eq!(stack.record(ply).sum, scratch.record(ply).sum, "seed {seed}, ply {ply}, move {mv}");
        assert!(score.abs() < INF);
        // Static scores stay clear of the range search reserves for mates.
        assert!(score.abs() < MATE, "seed {seed}, ply {ply}: {score}");

        if !(mv.is_king_move() && mv.is_capture()) {
            differential += 1;
        }
        king_moves += usize::from(mv.is_king_move());
        captures += usize::from(mv.is_capture());
        line.push(pos);
    }
    assert!(differential > steps / 3);
    assert!(king_moves > 0);
    assert!(captures > 0);
}

#[test]
fn random_lines_plain() {
    for seed in [0x1234_5678, 0xDEAD_BEEF, 42] {
        walk::<Plain>(seed, 400);
    }
}

#[test]
fn random_lines_twig() {
    for seed in [0x0BAD_CAFE, 7, 0x5EED] {
        walk::<Twig>(seed, 400);
    }
}

#[test]
fn zero_tables_score_material_only() {
    let eval = Evaluator::new(Arc::new(Tables::<Plain>::zeroed(TableShape { features: FOLD })));
    let mut rng = Rng(99);
    let mut stack = EvalStack::new();
    let mut pos = Snapshot::startpos();
    assert_eq!(eval.evaluate(&Folded::new(&pos), &mut stack, 0), TEMPO);

    for ply in 1..=60 {
        let mv = random_move(&pos, &mut rng);
        pos.play(mv).unwrap();
        stack.enter(ply, mv);
        let score = eval.evaluate(&Folded::new(&pos), &mut stack, ply);
        assert_eq!(score, TEMPO + pos.material() * pos.side_to_move().sign(), "ply {ply}, move {mv}");
    }
}
