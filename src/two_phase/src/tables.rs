//! Transition and pruning tables, generated once per process.

use crate::coords::{
    self, FLIP_COUNT, PERM4_COUNT, PERM8_COUNT, SLICE_COUNT, SLICE_HOME, TWIST_COUNT,
};
use crate::cubie::CubieMove;
use crate::moves::{MOVE_COUNT, PHASE2_MOVES, PHASE2_MOVE_COUNT};
use crate::{start, success};
use log::info;
use std::collections::VecDeque;
use std::sync::LazyLock;
use std::time::Instant;

/// Depth marker for cells the breadth-first search has not reached.
const UNVISITED: u8 = u8::MAX;

/// For each coordinate value and move, the coordinate value after the move.
pub(crate) struct MoveTables {
    pub twist: Vec<[u16; MOVE_COUNT]>,
    pub flip: Vec<[u16; MOVE_COUNT]>,
    pub slice: Vec<[u16; MOVE_COUNT]>,
    pub corner_perm: Vec<[u32; MOVE_COUNT]>,
    pub ud_edge_perm: Vec<[u32; MOVE_COUNT]>,
    pub slice_perm: [[u16; PHASE2_MOVE_COUNT]; PERM4_COUNT],
}

/// Exact distances to each phase's goal in a projection of the cube, used as
/// admissible heuristics. A cell holds the minimum number of moves from the
/// indexed state to the goal under that phase's move set.
pub(crate) struct PruningTables {
    pub twist_slice: Vec<u8>,
    pub flip_slice: Vec<u8>,
    pub twist_flip: Vec<u8>,
    pub corner_slice: Vec<u8>,
    pub ud_edge_slice: Vec<u8>,
}

pub(crate) struct Tables {
    pub moves: MoveTables,
    pub pruning: PruningTables,
}

/// Process-wide tables, built on first use and immutable afterwards.
pub(crate) static TABLES: LazyLock<Tables> = LazyLock::new(|| {
    info!(start!("generating move and pruning tables"));
    let begin = Instant::now();
    let moves = MoveTables::generate();
    let pruning = PruningTables::generate(&moves);
    info!(
        success!("tables ready in {:.3}s"),
        begin.elapsed().as_secs_f64()
    );
    Tables { moves, pruning }
});

/// Force table construction now instead of on the first solve.
pub fn initialize() {
    LazyLock::force(&TABLES);
}

impl MoveTables {
    fn generate() -> MoveTables {
        let actions = CubieMove::all();

        let mut twist = vec![[0; MOVE_COUNT]; TWIST_COUNT];
        for (value, row) in twist.iter_mut().enumerate() {
            let orientations = coords::decode_twist(value as u16);
            for (action, cell) in actions.iter().zip(row.iter_mut()) {
                let mut moved = [0; 8];
                for i in 0..8 {
                    let from = action.corner_from[i] as usize;
                    moved[i] = (orientations[from] + action.corner_twist[i]) % 3;
                }
                *cell = coords::encode_twist(&moved);
            }
        }

        let mut flip = vec![[0; MOVE_COUNT]; FLIP_COUNT];
        for (value, row) in flip.iter_mut().enumerate() {
            let orientations = coords::decode_flip(value as u16);
            for (action, cell) in actions.iter().zip(row.iter_mut()) {
                let mut moved = [0; 12];
                for i in 0..12 {
                    let from = action.edge_from[i] as usize;
                    moved[i] = orientations[from] ^ action.edge_flip[i];
                }
                *cell = coords::encode_flip(&moved);
            }
        }

        let mut slice = vec![[0; MOVE_COUNT]; SLICE_COUNT];
        for (value, row) in slice.iter_mut().enumerate() {
            let mut occupied = [false; 12];
            for position in coords::decode_slice(value as u16) {
                occupied[position as usize] = true;
            }
            for (action, cell) in actions.iter().zip(row.iter_mut()) {
                let mut positions = [0; 4];
                let mut found = 0;
                for i in 0..12 {
                    if occupied[action.edge_from[i] as usize] {
                        positions[found] = i as u8;
                        found += 1;
                    }
                }
                *cell = coords::encode_slice(positions);
            }
        }

        let mut corner_perm = vec![[0; MOVE_COUNT]; PERM8_COUNT];
        for (value, row) in corner_perm.iter_mut().enumerate() {
            let corners = coords::decode_perm8(value as u32);
            for (action, cell) in actions.iter().zip(row.iter_mut()) {
                let mut moved = [0; 8];
                for i in 0..8 {
                    moved[i] = corners[action.corner_from[i] as usize];
                }
                *cell = coords::encode_perm8(&moved);
            }
        }

        // Meaningful only for the ten subgroup-preserving moves; quarter
        // turns of the side faces pull middle-layer edges in, and those
        // slots fall back to the unmoved edge.
        let mut ud_edge_perm = vec![[0; MOVE_COUNT]; PERM8_COUNT];
        for (value, row) in ud_edge_perm.iter_mut().enumerate() {
            let edges = coords::decode_perm8(value as u32);
            for (action, cell) in actions.iter().zip(row.iter_mut()) {
                let mut moved = [0; 8];
                for i in 0..8 {
                    let from = action.edge_from[i] as usize;
                    moved[i] = if from < 8 { edges[from] } else { edges[i] };
                }
                *cell = coords::encode_perm8(&moved);
            }
        }

        let mut slice_perm = [[0; PHASE2_MOVE_COUNT]; PERM4_COUNT];
        for (value, row) in slice_perm.iter_mut().enumerate() {
            let slice_edges = coords::decode_perm4(value as u16);
            for (move_, cell) in PHASE2_MOVES.into_iter().zip(row.iter_mut()) {
                let action = &actions[move_.index()];
                let mut moved = [0; 4];
                for i in 0..4 {
                    let from = action.edge_from[8 + i] as usize;
                    moved[i] = if from >= 8 { slice_edges[from - 8] } else { slice_edges[i] };
                }
                *cell = coords::encode_perm4(&moved);
            }
        }

        MoveTables {
            twist,
            flip,
            slice,
            corner_perm,
            ud_edge_perm,
            slice_perm,
        }
    }
}

/// Backward breadth-first search from `goal` over an implicit graph of
/// `size` states, taking every state's `move_count` successors from
/// `successor`. Each reached cell ends up holding its exact distance to the
/// goal.
fn backward_bfs(
    size: usize,
    goal: usize,
    move_count: usize,
    successor: impl Fn(usize, usize) -> usize,
) -> Vec<u8> {
    let mut depths = vec![UNVISITED; size];
    let mut queue = VecDeque::with_capacity(size);
    depths[goal] = 0;
    queue.push_back(goal as u32);

    while let Some(state) = queue.pop_front() {
        let depth = depths[state as usize];
        for move_index in 0..move_count {
            let next = successor(state as usize, move_index);
            if depths[next] == UNVISITED {
                depths[next] = depth + 1;
                queue.push_back(next as u32);
            }
        }
    }
    depths
}

impl PruningTables {
    fn generate(moves: &MoveTables) -> PruningTables {
        let twist_slice = backward_bfs(
            TWIST_COUNT * SLICE_COUNT,
            SLICE_HOME as usize,
            MOVE_COUNT,
            |state, m| {
                let (twist, slice) = (state / SLICE_COUNT, state % SLICE_COUNT);
                moves.twist[twist][m] as usize * SLICE_COUNT + moves.slice[slice][m] as usize
            },
        );

        let flip_slice = backward_bfs(
            FLIP_COUNT * SLICE_COUNT,
            SLICE_HOME as usize,
            MOVE_COUNT,
            |state, m| {
                let (flip, slice) = (state / SLICE_COUNT, state % SLICE_COUNT);
                moves.flip[flip][m] as usize * SLICE_COUNT + moves.slice[slice][m] as usize
            },
        );

        let twist_flip = backward_bfs(TWIST_COUNT * FLIP_COUNT, 0, MOVE_COUNT, |state, m| {
            let (twist, flip) = (state / FLIP_COUNT, state % FLIP_COUNT);
            moves.twist[twist][m] as usize * FLIP_COUNT + moves.flip[flip][m] as usize
        });

        let corner_slice = backward_bfs(
            PERM8_COUNT * PERM4_COUNT,
            0,
            PHASE2_MOVE_COUNT,
            |state, m| {
                let (corner, slice) = (state / PERM4_COUNT, state % PERM4_COUNT);
                moves.corner_perm[corner][PHASE2_MOVES[m].index()] as usize * PERM4_COUNT
                    + moves.slice_perm[slice][m] as usize
            },
        );

        let ud_edge_slice = backward_bfs(
            PERM8_COUNT * PERM4_COUNT,
            0,
            PHASE2_MOVE_COUNT,
            |state, m| {
                let (edge, slice) = (state / PERM4_COUNT, state % PERM4_COUNT);
                moves.ud_edge_perm[edge][PHASE2_MOVES[m].index()] as usize * PERM4_COUNT
                    + moves.slice_perm[slice][m] as usize
            },
        );

        PruningTables {
            twist_slice,
            flip_slice,
            twist_flip,
            corner_slice,
            ud_edge_slice,
        }
    }

    /// Admissible lower bound on the moves needed to reach the phase-1 goal.
    pub fn phase1_bound(&self, twist: u16, flip: u16, slice: u16) -> u8 {
        let (twist, flip, slice) = (twist as usize, flip as usize, slice as usize);
        let by_twist_slice = self.twist_slice[twist * SLICE_COUNT + slice];
        let by_flip_slice = self.flip_slice[flip * SLICE_COUNT + slice];
        let by_twist_flip = self.twist_flip[twist * FLIP_COUNT + flip];
        [by_twist_slice, by_flip_slice, by_twist_flip]
            .into_iter()
            .map(|bound| if bound == UNVISITED { 0 } else { bound })
            .max()
            .unwrap_or(0)
    }

    /// Admissible lower bound on the moves needed to finish phase 2.
    pub fn phase2_bound(&self, corner_perm: u32, ud_edge_perm: u32, slice_perm: u16) -> u8 {
        let by_corners = self.corner_slice
            [corner_perm as usize * PERM4_COUNT + slice_perm as usize];
        let by_edges = self.ud_edge_slice
            [ud_edge_perm as usize * PERM4_COUNT + slice_perm as usize];
        [by_corners, by_edges]
            .into_iter()
            .map(|bound| if bound == UNVISITED { 0 } else { bound })
            .max()
            .unwrap_or(0)
    }
}
