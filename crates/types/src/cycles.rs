//! Cycle decomposition of the drawer permutation.
//!
//! The hidden assignment induces a functional graph on drawers: follow the
//! number found inside a drawer to the drawer labelled with that number.
//! Every drawer sits on exactly one cycle of that graph, so the decomposition
//! is a partition and costs O(N) total.
//!
//! The decomposition never influences the outcome of a run. It exists for
//! display: drawers can be grouped spatially by cycle (`slot`) and tinted by
//! cycle (`color`), and the longest cycle length predicts the optimal
//! strategy's result.

use crate::{palette, DrawerId, Permutation};
use std::cmp::Reverse;

/// Per-drawer placement in the canonical cycle ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePlacement {
    /// Index of the drawer's cycle, longest cycle first.
    pub cycle: usize,
    /// Position in the concatenated longest-first cycle order.
    pub slot: usize,
}

/// Decompose a permutation into its cycles, in discovery order.
///
/// Discovery order scans drawer positions ascending and walks each unvisited
/// cycle to completion, so the result is canonical for a given permutation:
/// recomputing always yields the same cycles in the same order.
pub fn decompose(permutation: &Permutation) -> Vec<Vec<DrawerId>> {
    let mut visited = vec![false; permutation.len()];
    let mut cycles = Vec::new();

    for start in 0..permutation.len() {
        if visited[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut current = start;
        while !visited[current] {
            visited[current] = true;
            cycle.push(DrawerId(current));
            current = permutation.image(current);
        }
        cycles.push(cycle);
    }

    cycles
}

/// Canonical display layout derived once from a run's permutation.
///
/// Cycles are ordered by descending length so the largest cycle always
/// occupies the first contiguous block of slots; cycles of equal length keep
/// their discovery order (the sort is stable).
#[derive(Debug, Clone)]
pub struct CycleLayout {
    /// Indexed by drawer position.
    placements: Vec<CyclePlacement>,
    /// Cycle lengths, longest first.
    lengths: Vec<usize>,
}

impl CycleLayout {
    /// Compute the layout for a permutation.
    pub fn new(permutation: &Permutation) -> Self {
        let mut cycles = decompose(permutation);
        cycles.sort_by_key(|cycle| Reverse(cycle.len()));

        let mut placements = vec![CyclePlacement { cycle: 0, slot: 0 }; permutation.len()];
        let mut slot = 0;
        for (cycle_index, cycle) in cycles.iter().enumerate() {
            for drawer in cycle {
                placements[drawer.index()] = CyclePlacement {
                    cycle: cycle_index,
                    slot,
                };
                slot += 1;
            }
        }

        let lengths = cycles.iter().map(Vec::len).collect();
        Self {
            placements,
            lengths,
        }
    }

    /// Placement of a drawer in the canonical ordering.
    pub fn placement(&self, drawer: DrawerId) -> CyclePlacement {
        self.placements[drawer.index()]
    }

    /// Display color of the drawer's cycle.
    pub fn color(&self, drawer: DrawerId) -> &'static str {
        palette::cycle_color(self.placements[drawer.index()].cycle)
    }

    /// Number of disjoint cycles.
    pub fn cycle_count(&self) -> usize {
        self.lengths.len()
    }

    /// Length of the longest cycle, or 0 for an empty permutation.
    pub fn longest(&self) -> usize {
        self.lengths.first().copied().unwrap_or(0)
    }

    /// Cycle lengths, longest first.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Number of drawers covered.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// True for the zero-drawer layout.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
