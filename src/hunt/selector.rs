//! Non-repeating candidate selection.
//!
//! One [`Selection`] lives for exactly one cycle. It remembers which entity
//! ids it has already handed out and never returns the same one twice, in
//! either random or sequential mode. Once every candidate has been picked it
//! returns `None` and the cycle ends.

use std::collections::HashSet;

use rand::Rng;

use super::candidates::Candidate;

/// Visited-set tracker for one cycle.
///
/// Keyed by stable entity id rather than list position (index-based
/// tracking would alias items if the candidate list were ever rebuilt
/// mid-cycle).
#[derive(Debug, Default)]
pub struct Selection {
    visited: HashSet<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many candidates have been handed out so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Pick an unvisited candidate, or `None` when all are exhausted.
    ///
    /// Random mode draws uniformly from the unvisited subset; sequential
    /// mode returns the lowest unvisited index. A single-element list is
    /// always answered with that element regardless of mode.
    pub fn pick<'a>(&mut self, candidates: &'a [Candidate], random: bool) -> Option<&'a Candidate> {
        let unvisited: Vec<usize> = (0..candidates.len())
            .filter(|&i| !self.visited.contains(&candidates[i].key()))
            .collect();

        if unvisited.is_empty() {
            return None;
        }

        let idx = if random && candidates.len() > 1 {
            let mut rng = rand::rng();
            unvisited[rng.random_range(0..unvisited.len())]
        } else {
            unvisited[0]
        };

        let chosen = &candidates[idx];
        self.visited.insert(chosen.key());
        Some(chosen)
    }
}
