use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rookery::{
    attack,
    movegen::{legal, semilegal},
    Color, Coord, Position,
};

const POSITIONS: [(&str, &str); 10] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w kq - 0 11",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w - - 4 43",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w - - 0 1"),
    ("pawn_move", "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3 w - - 0 1"),
    ("pawn_attack", "4k3/8/8/pppppppp/PPPPPPPP/8/8/4K3 w - - 0 1"),
    (
        "pawn_promote",
        "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8 w - - 0 1",
    ),
    (
        "cydonia",
        "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2 w - - 0 1",
    ),
];

fn positions() -> impl Iterator<Item = (&'static str, Position)> {
    POSITIONS
        .iter()
        .map(|&(name, fen)| (name, Position::from_fen(fen).unwrap()))
}

fn bench_gen_semilegal(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_semilegal");
    for (name, pos) in positions() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(semilegal::gen_all(&pos).len()))
        });
    }
}

fn bench_gen_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_legal");
    for (name, pos) in positions() {
        group.bench_function(name, |b| b.iter(|| black_box(legal::gen_all(&pos).len())));
    }
}

fn bench_make_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_move");
    for (name, pos) in positions() {
        let moves = legal::gen_all(&pos);
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    black_box(pos.make_move_unchecked(*mv));
                }
            })
        });
    }
}

fn bench_make_move_checked(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_move_checked");
    for (name, pos) in positions() {
        let moves = semilegal::gen_all(&pos);
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    black_box(pos.make_move(*mv).is_ok());
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, pos) in positions() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(attack::is_cell_attacked(pos.board(), coord, color));
                    }
                }
            })
        });
    }
}

fn bench_is_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_check");
    for (name, pos) in positions() {
        group.bench_function(name, |b| b.iter(|| black_box(pos.is_check())));
    }
}

fn bench_calc_outcome(c: &mut Criterion) {
    let mut group = c.benchmark_group("calc_outcome");
    for (name, pos) in positions() {
        group.bench_function(name, |b| b.iter(|| black_box(pos.calc_outcome())));
    }
}

criterion_group!(
    chess,
    bench_gen_semilegal,
    bench_gen_legal,
    bench_make_move,
    bench_make_move_checked,
    bench_is_attacked,
    bench_is_check,
    bench_calc_outcome,
);

criterion_main!(chess);
