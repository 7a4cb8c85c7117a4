//! Phase 1: drive orientations and the middle-layer edge set home.
//!
//! Iterative-deepening A* over the (twist, flip, slice) coordinates with all
//! 18 moves. The goal is the half-turn subgroup: both orientation
//! coordinates zero and the four middle-layer edges somewhere in the middle
//! layer.

use crate::coords::SLICE_HOME;
use crate::moves::Move;
use crate::tables::Tables;
use crate::working;
use log::{debug, log_enabled, Level};

pub(crate) const MAX_DEPTH: u8 = 12;

enum Outcome {
    Found,
    /// Smallest f-value seen beyond the bound, the next bound to try.
    Cutoff(u8),
}

struct Search<'a> {
    tables: &'a Tables,
    solution: Vec<Move>,
    nodes: u64,
}

/// A move sequence taking the given coordinates into the half-turn
/// subgroup, or `None` when none exists within the depth cap.
pub(crate) fn solve_to_subgroup(
    tables: &Tables,
    twist: u16,
    flip: u16,
    slice: u16,
) -> Option<Vec<Move>> {
    let mut search = Search {
        tables,
        solution: Vec::with_capacity(MAX_DEPTH as usize),
        nodes: 0,
    };

    let mut bound = tables.pruning.phase1_bound(twist, flip, slice);
    while bound <= MAX_DEPTH {
        debug!(working!("phase 1 searching bound {}"), bound);
        match search.run(twist, flip, slice, 0, bound, None) {
            Outcome::Found => {
                debug!(
                    working!("phase 1 found {} moves over {} nodes"),
                    search.solution.len(),
                    search.nodes
                );
                return Some(search.solution);
            }
            Outcome::Cutoff(next) => {
                debug_assert!(next > bound);
                bound = next;
            }
        }
    }
    None
}

impl Search<'_> {
    fn run(
        &mut self,
        twist: u16,
        flip: u16,
        slice: u16,
        depth: u8,
        bound: u8,
        last: Option<Move>,
    ) -> Outcome {
        if log_enabled!(Level::Debug) {
            self.nodes += 1;
        }

        let lower_bound = self.tables.pruning.phase1_bound(twist, flip, slice);
        let estimate = depth + lower_bound;
        if estimate > bound {
            return Outcome::Cutoff(estimate);
        }
        if twist == 0 && flip == 0 && slice == SLICE_HOME {
            return Outcome::Found;
        }
        if depth == bound {
            return Outcome::Cutoff(bound + 1);
        }

        let mut cheapest_cutoff = u8::MAX;
        for move_ in Move::ALL {
            if !move_.allowed_after(last) {
                continue;
            }
            let m = move_.index();
            let next_twist = self.tables.moves.twist[twist as usize][m];
            let next_flip = self.tables.moves.flip[flip as usize][m];
            let next_slice = self.tables.moves.slice[slice as usize][m];

            self.solution.push(move_);
            match self.run(next_twist, next_flip, next_slice, depth + 1, bound, Some(move_)) {
                Outcome::Found => return Outcome::Found,
                Outcome::Cutoff(value) => {
                    self.solution.pop();
                    cheapest_cutoff = cheapest_cutoff.min(value);
                }
            }
        }
        Outcome::Cutoff(cheapest_cutoff)
    }
}
