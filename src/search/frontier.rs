//! Selection of the next cell to expand. The contract for every [Frontier] is the one of the
//! naive strategy in [SortedFrontier]: keep every cell in row-major order, stably sort the
//! remaining cells by distance before each selection and take the first. Equal distances are
//! therefore ordered by the expansion step that relaxed them and then by row-major index.
use super::{Distance, SearchState};
use crate::board::Board;
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

pub trait Frontier {
    /// Creates the frontier for a fresh run over `board`.
    fn for_board(board: &Board) -> Self
    where
        Self: Sized;

    /// Notifies the frontier that the cell at `index` now has tentative `distance`, assigned
    /// while performing expansion number `step` (the start cell is seeded with step 0).
    fn relaxed(&mut self, index: usize, distance: Distance, step: usize);

    /// Removes and returns the index of the next cell to consider, or [None] if no candidate
    /// is left. May return walls and cells that were never reached.
    fn pop(&mut self, state: &SearchState) -> Option<usize>;
}

/// Binary heap keyed by `(distance, relaxation step, index)`. Cells that were never relaxed
/// are not in the heap at all, so an empty heap means the rest of the board is unreachable.
#[derive(Clone, Debug, Default)]
pub struct HeapFrontier {
    heap: BinaryHeap<Reverse<(Distance, usize, usize)>>,
}

impl Frontier for HeapFrontier {
    fn for_board(board: &Board) -> Self {
        HeapFrontier {
            heap: BinaryHeap::with_capacity(board.cell_count()),
        }
    }

    fn relaxed(&mut self, index: usize, distance: Distance, step: usize) {
        self.heap.push(Reverse((distance, step, index)));
    }

    fn pop(&mut self, state: &SearchState) -> Option<usize> {
        while let Some(Reverse((distance, _, index))) = self.heap.pop() {
            // Entries left behind by a later improvement of the same cell are stale.
            if state.is_visited_at(index) || state.distance_at(index) != distance {
                continue;
            }
            return Some(index);
        }
        None
    }
}

/// Keeps every not-yet-selected cell, walls included, and stably re-sorts them by distance on
/// every selection. Quadratic, but it is the reference the heap is checked against.
#[derive(Clone, Debug)]
pub struct SortedFrontier {
    unvisited: FxIndexSet<usize>,
}

impl Frontier for SortedFrontier {
    fn for_board(board: &Board) -> Self {
        SortedFrontier {
            unvisited: (0..board.cell_count()).collect(),
        }
    }

    fn relaxed(&mut self, _: usize, _: Distance, _: usize) {}

    fn pop(&mut self, state: &SearchState) -> Option<usize> {
        self.unvisited
            .sort_by(|a, b| state.distance_at(*a).cmp(&state.distance_at(*b)));
        self.unvisited.shift_remove_index(0)
    }
}
