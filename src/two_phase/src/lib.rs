//! A two-phase solver for the 3x3x3 cube.
//!
//! Solving runs in two searches over precomputed tables. Phase 1 uses all 18
//! face moves to bring every corner and edge into its home orientation and
//! the four middle-layer edges into the middle layer; from there, phase 2
//! restores the three remaining permutations using only the ten moves that
//! preserve those properties. Both searches are iterative-deepening A* with
//! exact projected distances as heuristics, so solutions come out near the
//! short end of what the two-phase decomposition allows.
//!
//! ```no_run
//! use facelet_cube::{parse_moves, Cube};
//!
//! let mut cube = Cube::solved();
//! cube.apply_turns(&parse_moves("F R U' D' L B'").unwrap());
//!
//! let solution = two_phase::solve(&cube).unwrap();
//! for move_ in &solution {
//!     cube.apply_turn(move_.face_turn());
//! }
//! assert!(cube.is_solved());
//! ```
//!
//! The eleven backing tables cost a few seconds and ~9 MB once per process;
//! they are built lazily on the first solve, or eagerly via
//! [`initialize_tables`].

use facelet_cube::Cube;
use itertools::Itertools;
use log::{debug, info};
use std::time::Instant;
use thiserror::Error;

mod coords;
mod cubie;
mod moves;
mod phase1;
mod phase2;
mod tables;

pub use moves::Move;
pub use tables::initialize as initialize_tables;

use coords::SLICE_HOME;
use cubie::CubieLayout;
use tables::TABLES;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// The grid is well-formed but no move sequence can solve it: some
    /// sticker combination matches no piece, a piece occurs twice, or the
    /// orientation and permutation parities rule a solution out.
    #[error("cube state violates solvability invariants and cannot be solved")]
    InconsistentCube,
    /// A phase hit its depth cap. With sound tables this is unreachable for
    /// any solvable cube.
    #[error("phase {phase} search exhausted its depth bound of {bound}")]
    SearchExhausted { phase: u8, bound: u8 },
}

/// Compute a move sequence that solves `cube`.
///
/// The input is never mutated; a solved input yields an empty sequence. The
/// result is deterministic in the input.
///
/// # Errors
///
/// [`SolveError::InconsistentCube`] when the sticker state is not reachable
/// from a solved cube, [`SolveError::SearchExhausted`] when a phase's depth
/// cap is hit.
pub fn solve(cube: &Cube) -> Result<Vec<Move>, SolveError> {
    let tables = &*TABLES;
    if cube.is_solved() {
        return Ok(Vec::new());
    }

    info!(start!("searching for a solution"));
    let begin = Instant::now();

    let mut work = cube.clone();
    let layout = CubieLayout::read(&work).ok_or(SolveError::InconsistentCube)?;
    if !layout.satisfies_solvability_invariants() {
        return Err(SolveError::InconsistentCube);
    }

    let twist = coords::encode_twist(&layout.corner_orientations);
    let flip = coords::encode_flip(&layout.edge_orientations);
    let slice = coords::slice_of_edges(&layout.edges);

    let mut solution = if twist == 0 && flip == 0 && slice == SLICE_HOME {
        Vec::new()
    } else {
        phase1::solve_to_subgroup(tables, twist, flip, slice).ok_or(
            SolveError::SearchExhausted {
                phase: 1,
                bound: phase1::MAX_DEPTH,
            },
        )?
    };

    debug!("phase 1 contributes {} moves", solution.len());
    for move_ in &solution {
        work.apply_turn(move_.face_turn());
    }

    let layout = CubieLayout::read(&work).ok_or(SolveError::InconsistentCube)?;
    let corner_perm = coords::encode_perm8(&layout.corners);
    let ud_edge_perm = coords::encode_perm8(
        &layout
            .ud_edge_permutation()
            .ok_or(SolveError::InconsistentCube)?,
    );
    let slice_perm = coords::encode_perm4(
        &layout
            .slice_permutation()
            .ok_or(SolveError::InconsistentCube)?,
    );

    if corner_perm != 0 || ud_edge_perm != 0 || slice_perm != 0 {
        let finish = phase2::solve_subgroup(tables, corner_perm, ud_edge_perm, slice_perm).ok_or(
            SolveError::SearchExhausted {
                phase: 2,
                bound: phase2::MAX_DEPTH,
            },
        )?;
        solution.extend(finish);
    }

    info!(
        success!("found {} moves in {:.3}s"),
        solution.len(),
        begin.elapsed().as_secs_f64()
    );
    Ok(solution)
}

/// Render a solution as a whitespace-separated stream of single clockwise
/// quarter turns: a half turn becomes two tokens and a counter-clockwise
/// turn three, so `U2 F'` renders as `"U U F F F"`.
pub fn format_expanded(solution: &[Move]) -> String {
    solution
        .iter()
        .flat_map(|move_| {
            std::iter::repeat(move_.face().letter()).take(move_.quarter_turns() as usize)
        })
        .join(" ")
}

/// Render a solution in compact notation, such as `"U2 F'"`.
pub fn format_compact(solution: &[Move]) -> String {
    solution.iter().join(" ")
}
