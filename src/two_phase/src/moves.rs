//! The move alphabet of the search.

use facelet_cube::{Face, FaceTurn};
use std::fmt;

pub const MOVE_COUNT: usize = 18;
pub const PHASE2_MOVE_COUNT: usize = 10;

/// One of the 18 named moves, indexed face-major in the order U, R, F, D, L,
/// B, each face contributing clockwise, half and counter-clockwise turns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move(u8);

/// The ten moves that keep a cube inside the half-turn subgroup: any turn of
/// the up and down faces, half turns of the rest.
pub const PHASE2_MOVES: [Move; PHASE2_MOVE_COUNT] = [
    Move(0),
    Move(1),
    Move(2),
    Move(9),
    Move(10),
    Move(11),
    Move(4),
    Move(13),
    Move(7),
    Move(16),
];

const NAMES: [&str; MOVE_COUNT] = [
    "U", "U2", "U'", "R", "R2", "R'", "F", "F2", "F'", "D", "D2", "D'", "L", "L2", "L'", "B", "B2",
    "B'",
];

impl Move {
    pub const ALL: [Move; MOVE_COUNT] = {
        let mut all = [Move(0); MOVE_COUNT];
        let mut i = 0;
        while i < MOVE_COUNT {
            all[i] = Move(i as u8);
            i += 1;
        }
        all
    };

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn face(self) -> Face {
        Face::ALL[self.index() / 3]
    }

    /// Clockwise quarter turns applied to the face: 1, 2 or 3.
    pub fn quarter_turns(self) -> u8 {
        self.0 % 3 + 1
    }

    pub fn face_turn(self) -> FaceTurn {
        FaceTurn {
            face: self.face(),
            quarter_turns: self.quarter_turns(),
        }
    }

    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// The redundancy rule of move generation: never turn the face that was
    /// just turned, and order each opposite pair so that only one of its two
    /// interleavings is explored (no U directly after D, R after L, F after
    /// B).
    pub fn allowed_after(self, last: Option<Move>) -> bool {
        let Some(last) = last else {
            return true;
        };
        let face = self.index() / 3;
        let last_face = last.index() / 3;
        face != last_face && face + 3 != last_face
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_enumerate_face_major() {
        assert_eq!(Move::ALL[0].name(), "U");
        assert_eq!(Move::ALL[4].name(), "R2");
        assert_eq!(Move::ALL[17].name(), "B'");
        for (i, move_) in Move::ALL.into_iter().enumerate() {
            assert_eq!(move_.index(), i);
            assert_eq!(move_.face(), Face::ALL[i / 3]);
            assert_eq!(move_.quarter_turns() as usize, i % 3 + 1);
        }
    }

    #[test]
    fn phase2_moves_preserve_the_subgroup() {
        let names: Vec<&str> = PHASE2_MOVES.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            ["U", "U2", "U'", "D", "D2", "D'", "R2", "L2", "F2", "B2"]
        );
    }

    #[test]
    fn redundancy_rule() {
        let by_name = |name: &str| Move::ALL.into_iter().find(|m| m.name() == name).unwrap();
        let (u, u2, d, r, l, f, b) = (
            by_name("U"),
            by_name("U2"),
            by_name("D"),
            by_name("R"),
            by_name("L"),
            by_name("F"),
            by_name("B"),
        );

        assert!(u.allowed_after(None));
        // Same face, any multiple.
        assert!(!u.allowed_after(Some(u2)));
        assert!(!u2.allowed_after(Some(u)));
        // Opposite faces commute; only one order survives.
        assert!(d.allowed_after(Some(u)));
        assert!(!u.allowed_after(Some(d)));
        assert!(l.allowed_after(Some(r)));
        assert!(!r.allowed_after(Some(l)));
        assert!(b.allowed_after(Some(f)));
        assert!(!f.allowed_after(Some(b)));
        // Unrelated faces are unrestricted.
        assert!(r.allowed_after(Some(u)));
        assert!(f.allowed_after(Some(r)));
    }
}
