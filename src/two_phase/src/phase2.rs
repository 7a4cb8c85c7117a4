//! Phase 2: permute a subgroup member to solved.
//!
//! The same iterative-deepening A* shape as phase 1, restricted to the ten
//! subgroup-preserving moves and running over the three permutation
//! coordinates. The goal is the identity of all three.

use crate::moves::{Move, PHASE2_MOVES};
use crate::tables::Tables;
use crate::working;
use log::{debug, log_enabled, Level};

pub(crate) const MAX_DEPTH: u8 = 18;

enum Outcome {
    Found,
    Cutoff(u8),
}

struct Search<'a> {
    tables: &'a Tables,
    solution: Vec<Move>,
    nodes: u64,
}

/// A subgroup move sequence solving the given permutation coordinates, or
/// `None` when none exists within the depth cap.
pub(crate) fn solve_subgroup(
    tables: &Tables,
    corner_perm: u32,
    ud_edge_perm: u32,
    slice_perm: u16,
) -> Option<Vec<Move>> {
    let mut search = Search {
        tables,
        solution: Vec::with_capacity(MAX_DEPTH as usize),
        nodes: 0,
    };

    let mut bound = tables
        .pruning
        .phase2_bound(corner_perm, ud_edge_perm, slice_perm);
    while bound <= MAX_DEPTH {
        debug!(working!("phase 2 searching bound {}"), bound);
        match search.run(corner_perm, ud_edge_perm, slice_perm, 0, bound, None) {
            Outcome::Found => {
                debug!(
                    working!("phase 2 found {} moves over {} nodes"),
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
        corner_perm: u32,
        ud_edge_perm: u32,
        slice_perm: u16,
        depth: u8,
        bound: u8,
        last: Option<Move>,
    ) -> Outcome {
        if log_enabled!(Level::Debug) {
            self.nodes += 1;
        }

        let lower_bound = self
            .tables
            .pruning
            .phase2_bound(corner_perm, ud_edge_perm, slice_perm);
        let estimate = depth + lower_bound;
        if estimate > bound {
            return Outcome::Cutoff(estimate);
        }
        if corner_perm == 0 && ud_edge_perm == 0 && slice_perm == 0 {
            return Outcome::Found;
        }
        if depth == bound {
            return Outcome::Cutoff(bound + 1);
        }

        let mut cheapest_cutoff = u8::MAX;
        for (local, move_) in PHASE2_MOVES.into_iter().enumerate() {
            if !move_.allowed_after(last) {
                continue;
            }
            let m = move_.index();
            let next_corners = self.tables.moves.corner_perm[corner_perm as usize][m];
            let next_edges = self.tables.moves.ud_edge_perm[ud_edge_perm as usize][m];
            let next_slice = self.tables.moves.slice_perm[slice_perm as usize][local];

            self.solution.push(move_);
            match self.run(next_corners, next_edges, next_slice, depth + 1, bound, Some(move_)) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{encode_perm4, encode_perm8};
    use crate::cubie::CubieLayout;
    use crate::tables::TABLES;
    use facelet_cube::{parse_moves, Cube};

    fn phase2_coordinates(cube: &Cube) -> (u32, u32, u16) {
        let layout = CubieLayout::read(cube).unwrap();
        (
            encode_perm8(&layout.corners),
            encode_perm8(&layout.ud_edge_permutation().unwrap()),
            encode_perm4(&layout.slice_permutation().unwrap()),
        )
    }

    #[test]
    fn solved_needs_no_moves() {
        let solution = solve_subgroup(&TABLES, 0, 0, 0).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn subgroup_scrambles_solve_back_to_identity() {
        for scramble in ["R2", "U R2 D' B2", "U2 F2 L2 D R2 B2 U' F2"] {
            let mut cube = Cube::solved();
            cube.apply_turns(&parse_moves(scramble).unwrap());
            let (corners, edges, slice) = phase2_coordinates(&cube);

            let solution = solve_subgroup(&TABLES, corners, edges, slice).unwrap();
            for move_ in solution {
                cube.apply_turn(move_.face_turn());
            }
            assert!(cube.is_solved(), "{scramble} was not undone");
        }
    }

    #[test]
    fn half_turn_scramble_is_undone_optimally() {
        let mut cube = Cube::solved();
        cube.apply_turns(&parse_moves("R2").unwrap());
        let (corners, edges, slice) = phase2_coordinates(&cube);
        let solution = solve_subgroup(&TABLES, corners, edges, slice).unwrap();
        assert_eq!(solution.len(), 1);
        assert_eq!(solution[0].name(), "R2");
    }
}
