/// Fuzzes the search by checking on many random boards that the finish is found exactly when
/// it is on the same connected component as the start, that found paths are shortest walks
/// around the walls, and that the heap frontier reproduces the trace of the naive re-sorting
/// frontier cell for cell.
use grid_dijkstra::{
    cell, search, search_with, Board, HeapFrontier, Point, SearchState, SearchStatus,
    SortedFrontier,
};
use rand::prelude::*;

fn random_board(rows: usize, cols: usize, rng: &mut StdRng, density: f64) -> Board {
    let start = cell(rng.gen_range(0..rows), rng.gen_range(0..cols));
    let mut finish = start;
    while finish == start {
        finish = cell(rng.gen_range(0..rows), rng.gen_range(0..cols));
    }
    let mut board = Board::new(rows, cols, start, finish).unwrap();
    for ix in 0..board.cell_count() {
        let p = board.point(ix);
        if !board.is_start(p) && !board.is_finish(p) && rng.gen_bool(density) {
            board.set_wall(p, true).unwrap();
        }
    }
    board.update();
    board
}

fn is_walk(board: &Board, path: &[Point]) -> bool {
    path.windows(2)
        .all(|w| w[0].manhattan_distance(&w[1]) == 1 && board.neighbours_of(w[0]).contains(&w[1]))
}

#[test]
fn fuzz() {
    const N_BOARDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_BOARDS {
        let rows = rng.gen_range(1..=10);
        let cols = rng.gen_range(2..=10);
        let board = random_board(rows, cols, &mut rng, 0.35);
        let reachable = board.reachable(&board.start(), &board.finish());
        let outcome = search(&board);
        if outcome.found() != reachable {
            println!("{}", board);
        }
        assert_eq!(outcome.found(), reachable);
        assert_eq!(outcome.trace.first(), Some(&board.start()));
        assert!(outcome.trace.iter().all(|p| !board.is_wall(*p)));
        assert_eq!(outcome.trace.contains(&board.finish()), reachable);

        let path = outcome.path();
        if reachable {
            assert_eq!(outcome.trace.last(), Some(&board.finish()));
            assert_eq!(path.first(), Some(&board.start()));
            assert_eq!(path.last(), Some(&board.finish()));
            assert!(is_walk(&board, &path));
            assert!(path.iter().all(|p| !board.is_wall(*p)));
            assert_eq!(
                path.len() as u32,
                outcome.state().distance(board.finish()) + 1
            );
        } else {
            assert_eq!(outcome.status(), SearchStatus::Exhausted);
            assert_eq!(path, vec![board.finish()]);
        }
    }
}

#[test]
fn fuzz_frontier_equivalence() {
    const N_BOARDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for density in [0.0, 0.2, 0.4] {
        for _ in 0..N_BOARDS {
            let rows = rng.gen_range(1..=8);
            let cols = rng.gen_range(2..=8);
            let board = random_board(rows, cols, &mut rng, density);
            let heap = search_with::<HeapFrontier>(&board, SearchState::new(&board));
            let sorted = search_with::<SortedFrontier>(&board, SearchState::new(&board));
            if heap.trace != sorted.trace {
                println!("{}", board);
            }
            assert_eq!(heap.trace, sorted.trace);
            assert_eq!(heap.status(), sorted.status());
            assert_eq!(heap.path(), sorted.path());
        }
    }
}

/// Without walls every path is as long as the Manhattan distance between start and finish.
#[test]
fn fuzz_open_boards() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..500 {
        let rows = rng.gen_range(1..=12);
        let cols = rng.gen_range(2..=12);
        let board = random_board(rows, cols, &mut rng, 0.0);
        let outcome = search(&board);
        assert!(outcome.found());
        assert_eq!(
            outcome.path().len() as i32,
            1 + board.start().manhattan_distance(&board.finish())
        );
    }
}

#[test]
fn repeated_runs_are_identical() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let board = random_board(9, 9, &mut rng, 0.3);
        let first = search(&board);
        let (trace, path) = (first.trace.clone(), first.path());
        let second = search_with::<HeapFrontier>(&board, first.into_state());
        assert_eq!(second.trace, trace);
        assert_eq!(second.path(), path);
    }
}
