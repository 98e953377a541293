use criterion::{criterion_group, criterion_main, Criterion};
use grid_dijkstra::{search_with, Board, Frontier, HeapFrontier, SearchState, SortedFrontier};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const WALL_DENSITIES: [f64; 3] = [0.0, 0.2, 0.35];

fn random_reference_board(density: f64, rng: &mut StdRng) -> Board {
    let mut board = Board::reference();
    for ix in 0..board.cell_count() {
        let p = board.point(ix);
        if !board.is_start(p) && !board.is_finish(p) && rng.gen_bool(density) {
            // Start and finish are skipped above, so this cannot fail.
            let _ = board.set_wall(p, true);
        }
    }
    board.update();
    board
}

fn reference_bench_frontier<F: Frontier>(c: &mut Criterion, frontier_name: &str) {
    let mut rng = StdRng::seed_from_u64(0);
    for density in WALL_DENSITIES {
        let board = random_reference_board(density, &mut rng);
        c.bench_function(
            format!("reference 20x50, {frontier_name}, {density} walls").as_str(),
            |b| {
                b.iter(|| {
                    let outcome = search_with::<F>(&board, SearchState::new(&board));
                    black_box(outcome.path())
                })
            },
        );
    }
}

fn reference_bench_heap(c: &mut Criterion) {
    reference_bench_frontier::<HeapFrontier>(c, "heap");
}

fn reference_bench_sorted(c: &mut Criterion) {
    reference_bench_frontier::<SortedFrontier>(c, "sorted");
}

criterion_group!(benches, reference_bench_heap, reference_bench_sorted);
criterion_main!(benches);
