//! The cubie-level view of a sticker cube.
//!
//! Corners are numbered 0..8 and edges 0..12. Edges 0..8 live in the top and
//! bottom layers; edges 8..12 are the four middle-layer pieces:
//!
//! ```text
//! corners: 0 URF  1 UFL  2 ULB  3 UBR  4 DFR  5 DLF  6 DBL  7 DRB
//! edges:   0 UR   1 UF   2 UL   3 UB   4 DR   5 DF   6 DL   7 DB
//!          8 FR   9 FL  10 BL  11 BR
//! ```
//!
//! A piece is identified by the color multiset of its stickers. Orientation
//! is framed per position: each position fixes a reference facelet (the
//! up/down-face cell for layer positions, the front/back-face cell for
//! middle-layer positions) and each piece a reference sticker (its up/down
//! color, or its front/back color for middle-layer pieces). A piece is
//! oriented when its reference sticker sits on the reference facelet. This
//! framing makes the orientation change of a turn depend on the turn and the
//! position alone, never on which piece happens to pass through.

use facelet_cube::{Cube, Face};

pub(crate) const CORNER_COUNT: usize = 8;
pub(crate) const EDGE_COUNT: usize = 12;

/// Grid cells of the three stickers of each corner position. The first cell
/// is the reference facelet on the up or down face; the remaining two follow
/// clockwise as seen from that face.
const CORNER_FACELETS: [[(usize, usize); 3]; CORNER_COUNT] = [
    [(2, 5), (3, 6), (3, 5)], // URF
    [(2, 3), (3, 3), (3, 2)], // UFL
    [(0, 3), (3, 0), (3, 11)], // ULB
    [(0, 5), (3, 9), (3, 8)], // UBR
    [(6, 5), (5, 5), (5, 6)], // DFR
    [(6, 3), (5, 2), (5, 3)], // DLF
    [(8, 3), (5, 11), (5, 0)], // DBL
    [(8, 5), (5, 8), (5, 9)], // DRB
];

/// Grid cells of the two stickers of each edge position, reference facelet
/// first.
const EDGE_FACELETS: [[(usize, usize); 2]; EDGE_COUNT] = [
    [(1, 5), (3, 7)],  // UR
    [(2, 4), (3, 4)],  // UF
    [(1, 3), (3, 1)],  // UL
    [(0, 4), (3, 10)], // UB
    [(7, 5), (5, 7)],  // DR
    [(6, 4), (5, 4)],  // DF
    [(7, 3), (5, 1)],  // DL
    [(8, 4), (5, 10)], // DB
    [(4, 5), (4, 6)],  // FR
    [(4, 3), (4, 2)],  // FL
    [(4, 11), (4, 0)], // BL
    [(4, 9), (4, 8)],  // BR
];

/// Sorted color multiset of each corner piece.
const CORNER_COLORS: [[u8; 3]; CORNER_COUNT] = [
    [b'B', b'O', b'W'], // URF
    [b'G', b'O', b'W'], // UFL
    [b'G', b'O', b'Y'], // ULB
    [b'B', b'O', b'Y'], // UBR
    [b'B', b'R', b'W'], // DFR
    [b'G', b'R', b'W'], // DLF
    [b'G', b'R', b'Y'], // DBL
    [b'B', b'R', b'Y'], // DRB
];

/// Sorted color multiset of each edge piece.
const EDGE_COLORS: [[u8; 2]; EDGE_COUNT] = [
    [b'B', b'O'], // UR
    [b'O', b'W'], // UF
    [b'G', b'O'], // UL
    [b'O', b'Y'], // UB
    [b'B', b'R'], // DR
    [b'R', b'W'], // DF
    [b'G', b'R'], // DL
    [b'R', b'Y'], // DB
    [b'B', b'W'], // FR
    [b'G', b'W'], // FL
    [b'G', b'Y'], // BL
    [b'B', b'Y'], // BR
];

fn is_ud_color(color: u8) -> bool {
    color == Face::Up.color() || color == Face::Down.color()
}

fn is_fb_color(color: u8) -> bool {
    color == Face::Front.color() || color == Face::Back.color()
}

/// The corner piece at a position together with its orientation (0 oriented,
/// 1 twisted clockwise, 2 twisted counter-clockwise). `None` when the
/// stickers match no corner piece.
pub(crate) fn corner_at(cube: &Cube, position: usize) -> Option<(u8, u8)> {
    let [(r0, c0), (r1, c1), (r2, c2)] = CORNER_FACELETS[position];
    let colors = [
        cube.sticker(r0, c0),
        cube.sticker(r1, c1),
        cube.sticker(r2, c2),
    ];

    let mut sorted = colors;
    sorted.sort_unstable();
    let piece = CORNER_COLORS.iter().position(|&home| home == sorted)?;

    let orientation = colors.iter().position(|&color| is_ud_color(color))?;
    Some((piece as u8, orientation as u8))
}

/// The edge piece at a position together with its orientation (0 oriented,
/// 1 flipped). `None` when the stickers match no edge piece.
pub(crate) fn edge_at(cube: &Cube, position: usize) -> Option<(u8, u8)> {
    let [(r0, c0), (r1, c1)] = EDGE_FACELETS[position];
    let colors = [cube.sticker(r0, c0), cube.sticker(r1, c1)];

    let mut sorted = colors;
    sorted.sort_unstable();
    let piece = EDGE_COLORS.iter().position(|&home| home == sorted)?;

    // Top/bottom pieces are framed by their up/down sticker, middle-layer
    // pieces by their front/back sticker.
    let reference = if piece < 8 { is_ud_color } else { is_fb_color };
    let orientation = u8::from(!reference(colors[0]));
    Some((piece as u8, orientation))
}

/// Every piece and orientation of a cube.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CubieLayout {
    pub corners: [u8; CORNER_COUNT],
    pub corner_orientations: [u8; CORNER_COUNT],
    pub edges: [u8; EDGE_COUNT],
    pub edge_orientations: [u8; EDGE_COUNT],
}

impl CubieLayout {
    /// Read a cube at the cubie level. `None` when some position holds an
    /// unidentifiable sticker combination or a piece occurs twice.
    pub fn read(cube: &Cube) -> Option<CubieLayout> {
        let mut layout = CubieLayout {
            corners: [0; CORNER_COUNT],
            corner_orientations: [0; CORNER_COUNT],
            edges: [0; EDGE_COUNT],
            edge_orientations: [0; EDGE_COUNT],
        };

        let mut seen_corners = [false; CORNER_COUNT];
        for position in 0..CORNER_COUNT {
            let (piece, orientation) = corner_at(cube, position)?;
            if std::mem::replace(&mut seen_corners[piece as usize], true) {
                return None;
            }
            layout.corners[position] = piece;
            layout.corner_orientations[position] = orientation;
        }

        let mut seen_edges = [false; EDGE_COUNT];
        for position in 0..EDGE_COUNT {
            let (piece, orientation) = edge_at(cube, position)?;
            if std::mem::replace(&mut seen_edges[piece as usize], true) {
                return None;
            }
            layout.edges[position] = piece;
            layout.edge_orientations[position] = orientation;
        }

        Some(layout)
    }

    /// A cube is solvable only when its twists sum to a multiple of three,
    /// its flips to a multiple of two, and its two permutations have equal
    /// parity.
    pub fn satisfies_solvability_invariants(&self) -> bool {
        let twist: u32 = self.corner_orientations.iter().map(|&o| u32::from(o)).sum();
        let flip: u32 = self.edge_orientations.iter().map(|&o| u32::from(o)).sum();
        twist % 3 == 0
            && flip % 2 == 0
            && crate::coords::is_odd_permutation(&self.corners)
                == crate::coords::is_odd_permutation(&self.edges)
    }

    /// The permutation of the eight top/bottom edges over positions 0..8.
    /// `None` outside the half-turn subgroup.
    pub fn ud_edge_permutation(&self) -> Option<[u8; 8]> {
        let mut perm = [0; 8];
        for (slot, &edge) in perm.iter_mut().zip(&self.edges[..8]) {
            if edge >= 8 {
                return None;
            }
            *slot = edge;
        }
        Some(perm)
    }

    /// The permutation of the four middle-layer edges over positions 8..12.
    /// `None` outside the half-turn subgroup.
    pub fn slice_permutation(&self) -> Option<[u8; 4]> {
        let mut perm = [0; 4];
        for (slot, &edge) in perm.iter_mut().zip(&self.edges[8..]) {
            if edge < 8 {
                return None;
            }
            *slot = edge - 8;
        }
        Some(perm)
    }
}

/// How one move acts at the cubie level: for every position, where the
/// arriving piece comes from and the orientation it picks up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct CubieMove {
    pub corner_from: [u8; CORNER_COUNT],
    pub corner_twist: [u8; CORNER_COUNT],
    pub edge_from: [u8; EDGE_COUNT],
    pub edge_flip: [u8; EDGE_COUNT],
}

impl CubieMove {
    pub const IDENTITY: CubieMove = CubieMove {
        corner_from: [0, 1, 2, 3, 4, 5, 6, 7],
        corner_twist: [0; CORNER_COUNT],
        edge_from: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        edge_flip: [0; EDGE_COUNT],
    };

    /// The action of a single clockwise quarter turn, read off the sticker
    /// mechanics: turning a solved cube leaves at every position exactly the
    /// source piece and the orientation delta of that position.
    fn quarter_turn(face: Face) -> CubieMove {
        let mut cube = Cube::solved();
        cube.apply(face, 1);

        let mut action = CubieMove::IDENTITY;
        for position in 0..CORNER_COUNT {
            let (piece, orientation) =
                corner_at(&cube, position).expect("a face turn keeps every corner identifiable");
            action.corner_from[position] = piece;
            action.corner_twist[position] = orientation;
        }
        for position in 0..EDGE_COUNT {
            let (piece, orientation) =
                edge_at(&cube, position).expect("a face turn keeps every edge identifiable");
            action.edge_from[position] = piece;
            action.edge_flip[position] = orientation;
        }
        action
    }

    /// The combined action of `self` followed by `next`.
    fn then(&self, next: &CubieMove) -> CubieMove {
        let mut combined = CubieMove::IDENTITY;
        for i in 0..CORNER_COUNT {
            let via = next.corner_from[i] as usize;
            combined.corner_from[i] = self.corner_from[via];
            combined.corner_twist[i] = (self.corner_twist[via] + next.corner_twist[i]) % 3;
        }
        for i in 0..EDGE_COUNT {
            let via = next.edge_from[i] as usize;
            combined.edge_from[i] = self.edge_from[via];
            combined.edge_flip[i] = self.edge_flip[via] ^ next.edge_flip[i];
        }
        combined
    }

    /// Cubie actions of all 18 moves, in move enumeration order. Half and
    /// counter-clockwise turns are the square and cube of the quarter turn.
    pub fn all() -> [CubieMove; crate::moves::MOVE_COUNT] {
        let mut actions = [CubieMove::IDENTITY; crate::moves::MOVE_COUNT];
        for (f, face) in Face::ALL.into_iter().enumerate() {
            let quarter = CubieMove::quarter_turn(face);
            actions[3 * f] = quarter;
            actions[3 * f + 1] = quarter.then(&quarter);
            actions[3 * f + 2] = actions[3 * f + 1].then(&quarter);
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use facelet_cube::parse_moves;

    #[test]
    fn solved_cube_reads_as_identity_layout() {
        let layout = CubieLayout::read(&Cube::solved()).unwrap();
        assert_eq!(layout.corners, [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(layout.corner_orientations, [0; 8]);
        assert_eq!(layout.edges, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(layout.edge_orientations, [0; 12]);
        assert!(layout.satisfies_solvability_invariants());
        assert_eq!(layout.ud_edge_permutation(), Some([0, 1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(layout.slice_permutation(), Some([0, 1, 2, 3]));
    }

    #[test]
    fn home_color_tables_match_the_solved_cube() {
        let solved = Cube::solved();
        for (position, facelets) in CORNER_FACELETS.iter().enumerate() {
            let mut colors: Vec<u8> = facelets
                .iter()
                .map(|&(row, col)| solved.sticker(row, col))
                .collect();
            colors.sort_unstable();
            assert_eq!(colors, CORNER_COLORS[position]);
        }
        for (position, facelets) in EDGE_FACELETS.iter().enumerate() {
            let mut colors: Vec<u8> = facelets
                .iter()
                .map(|&(row, col)| solved.sticker(row, col))
                .collect();
            colors.sort_unstable();
            assert_eq!(colors, EDGE_COLORS[position]);
        }
    }

    #[test]
    fn quarter_turn_actions_are_permutations_of_order_four() {
        for face in Face::ALL {
            let quarter = CubieMove::quarter_turn(face);

            let mut corner_seen = [false; CORNER_COUNT];
            for &from in &quarter.corner_from {
                assert!(!std::mem::replace(&mut corner_seen[from as usize], true));
            }
            let mut edge_seen = [false; EDGE_COUNT];
            for &from in &quarter.edge_from {
                assert!(!std::mem::replace(&mut edge_seen[from as usize], true));
            }

            let half = quarter.then(&quarter);
            let full = half.then(&half);
            assert_eq!(full, CubieMove::IDENTITY, "{face:?}^4 is not the identity");
        }
    }

    #[test]
    fn orientation_deltas_preserve_parity() {
        for face in Face::ALL {
            let quarter = CubieMove::quarter_turn(face);
            let twist: u32 = quarter.corner_twist.iter().map(|&o| u32::from(o)).sum();
            let flip: u32 = quarter.edge_flip.iter().map(|&o| u32::from(o)).sum();
            assert_eq!(twist % 3, 0);
            assert_eq!(flip % 2, 0);
        }
    }

    #[test]
    fn only_front_and_back_turns_flip_edges() {
        for (f, face) in Face::ALL.into_iter().enumerate() {
            let quarter = CubieMove::all()[3 * f];
            let flipped: u32 = quarter.edge_flip.iter().map(|&o| u32::from(o)).sum();
            match face {
                Face::Front | Face::Back => assert_eq!(flipped, 4, "{face:?}"),
                _ => assert_eq!(flipped, 0, "{face:?}"),
            }
        }
    }

    #[test]
    fn up_and_down_turns_never_twist_corners() {
        let actions = CubieMove::all();
        for move_ in [Move::ALL[0], Move::ALL[9]] {
            assert_eq!(actions[move_.index()].corner_twist, [0; 8]);
        }
    }

    #[test]
    fn layout_composition_matches_cube_mechanics() {
        let actions = CubieMove::all();
        let mut cube = Cube::solved();
        let mut corners = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let mut twists = [0u8; 8];

        for token in ["F", "R2", "U'", "B", "L2", "D"] {
            let turn = parse_moves(token).unwrap()[0];
            let move_ = Move::ALL
                .into_iter()
                .find(|m| m.face() == turn.face && m.quarter_turns() == turn.quarter_turns)
                .unwrap();
            cube.apply_turn(turn);

            let action = &actions[move_.index()];
            let mut next_corners = [0; 8];
            let mut next_twists = [0; 8];
            for i in 0..8 {
                let from = action.corner_from[i] as usize;
                next_corners[i] = corners[from];
                next_twists[i] = (twists[from] + action.corner_twist[i]) % 3;
            }
            corners = next_corners;
            twists = next_twists;

            let layout = CubieLayout::read(&cube).unwrap();
            assert_eq!(layout.corners, corners);
            assert_eq!(layout.corner_orientations, twists);
        }
    }

    #[test]
    fn twisted_corner_fails_the_invariants() {
        let mut grid = Cube::solved().to_string().into_bytes();
        // Rotate the stickers of one corner in place: grid cells (2,5), (3,6)
        // and (3,5) as byte offsets into the 9-line text, where wing lines
        // are 7 bytes and belt lines 13.
        let offset = |row: usize, col: usize| {
            let before: usize = (0..row)
                .map(|r| if (3..6).contains(&r) { 13 } else { 7 })
                .sum();
            before + col
        };
        let cells = [offset(2, 5), offset(3, 6), offset(3, 5)];
        let rotated = [grid[cells[2]], grid[cells[0]], grid[cells[1]]];
        for (&cell, &byte) in cells.iter().zip(&rotated) {
            grid[cell] = byte;
        }

        let cube = Cube::from_grid(&String::from_utf8(grid).unwrap()).unwrap();
        let layout = CubieLayout::read(&cube).unwrap();
        assert!(!layout.satisfies_solvability_invariants());
    }
}
