//! The sticker-level 3x3x3 cube.
//!
//! A cube is a 9x12 grid of ASCII color bytes laid out as the usual
//! cross-shaped unfolding:
//!
//! ```text
//!    OOO
//!    OOO
//!    OOO
//! GGGWWWBBBYYY
//! GGGWWWBBBYYY
//! GGGWWWBBBYYY
//!    RRR
//!    RRR
//!    RRR
//! ```
//!
//! Rows 0-2 hold the up face, rows 6-8 the down face, and rows 3-5 hold the
//! left, front, right and back faces side by side. The twelve corner cells of
//! the grid are blank. Face turns are in-place sticker cycles; nothing here
//! knows about cubies or coordinates.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const GRID_ROWS: usize = 9;
pub const GRID_COLS: usize = 12;

const BLANK: u8 = b' ';

/// The six faces, in the order the solver enumerates moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Face {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Right,
        Face::Front,
        Face::Down,
        Face::Left,
        Face::Back,
    ];

    /// The letter used in move notation.
    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    /// The sticker byte of this face in the solved cube.
    pub fn color(self) -> u8 {
        match self {
            Face::Up => b'O',
            Face::Right => b'B',
            Face::Front => b'W',
            Face::Down => b'R',
            Face::Left => b'G',
            Face::Back => b'Y',
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    /// Top-left grid cell of this face's 3x3 block.
    fn origin(self) -> (usize, usize) {
        match self {
            Face::Up => (0, 3),
            Face::Left => (3, 0),
            Face::Front => (3, 3),
            Face::Right => (3, 6),
            Face::Back => (3, 9),
            Face::Down => (6, 3),
        }
    }
}

/// The face a grid cell belongs to, or `None` for the blank corners of the
/// unfolding.
pub fn face_at(row: usize, col: usize) -> Option<Face> {
    Face::ALL.into_iter().find(|face| {
        let (r0, c0) = face.origin();
        (r0..r0 + 3).contains(&row) && (c0..c0 + 3).contains(&col)
    })
}

fn is_color(byte: u8) -> bool {
    matches!(byte, b'O' | b'R' | b'W' | b'Y' | b'G' | b'B')
}

/// A face turn of one, two or three clockwise quarter turns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FaceTurn {
    pub face: Face,
    pub quarter_turns: u8,
}

impl fmt::Display for FaceTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face.letter())?;
        match self.quarter_turns {
            1 => Ok(()),
            2 => write!(f, "2"),
            _ => write!(f, "'"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("unrecognized move token {0:?}")]
    BadToken(String),
}

impl FromStr for FaceTurn {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bad = || ParseMoveError::BadToken(token.to_owned());
        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(bad)?;
        let quarter_turns = match chars.next() {
            None => 1,
            Some('2') => 2,
            Some('\'') => 3,
            Some(_) => return Err(bad()),
        };
        if chars.next().is_some() {
            return Err(bad());
        }
        Ok(FaceTurn { face, quarter_turns })
    }
}

/// Parse a whitespace-separated sequence of move tokens such as `"F R2 U'"`.
pub fn parse_moves(text: &str) -> Result<Vec<FaceTurn>, ParseMoveError> {
    text.split_whitespace().map(str::parse).collect()
}

/// The order of a move sequence in the cube group: how many times it must be
/// applied to a solved cube before the cube is solved again.
pub fn order(moves: &[FaceTurn]) -> u32 {
    let mut cube = Cube::solved();
    let mut count = 0;
    loop {
        cube.apply_turns(moves);
        count += 1;
        if cube.is_solved() {
            return count;
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCubeError {
    #[error("expected 9 grid lines, got {0}")]
    WrongLineCount(usize),
    #[error("line {0} must be 3 spaces followed by 3 color characters")]
    BadWingRow(usize),
    #[error("line {0} must be exactly 12 color characters")]
    BadBeltRow(usize),
    #[error("invalid color character {found:?} on line {line}")]
    BadColor { line: usize, found: char },
    #[error("expected nine {color} stickers, got {count}")]
    BadColorCount { color: char, count: usize },
}

/// The full sticker state of a cube.
#[derive(Clone, PartialEq, Eq)]
pub struct Cube {
    grid: [[u8; GRID_COLS]; GRID_ROWS],
}

impl Cube {
    /// The canonical solved cube.
    pub fn solved() -> Cube {
        let mut grid = [[BLANK; GRID_COLS]; GRID_ROWS];
        for face in Face::ALL {
            let (r0, c0) = face.origin();
            for row in &mut grid[r0..r0 + 3] {
                for cell in &mut row[c0..c0 + 3] {
                    *cell = face.color();
                }
            }
        }
        Cube { grid }
    }

    /// Parse the 9-line grid format.
    ///
    /// # Errors
    ///
    /// Any structural deviation is rejected: wrong line count, wrong row
    /// widths or prefixes, characters outside the six color letters, or a
    /// sticker multiset that is not nine of each color.
    pub fn from_grid(text: &str) -> Result<Cube, ParseCubeError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != GRID_ROWS {
            return Err(ParseCubeError::WrongLineCount(lines.len()));
        }

        let mut grid = [[BLANK; GRID_COLS]; GRID_ROWS];
        for (row, line) in lines.iter().enumerate() {
            let wing = !(3..6).contains(&row);
            if wing && (line.len() != 6 || !line.starts_with("   ")) {
                return Err(ParseCubeError::BadWingRow(row));
            }
            if !wing && line.len() != GRID_COLS {
                return Err(ParseCubeError::BadBeltRow(row));
            }
            let start = if wing { 3 } else { 0 };
            for (col, byte) in line.bytes().enumerate().skip(start) {
                if !is_color(byte) {
                    return Err(ParseCubeError::BadColor {
                        line: row,
                        found: byte as char,
                    });
                }
                grid[row][col] = byte;
            }
        }

        for face in Face::ALL {
            let color = face.color();
            let count = grid
                .iter()
                .flatten()
                .filter(|&&byte| byte == color)
                .count();
            if count != 9 {
                return Err(ParseCubeError::BadColorCount {
                    color: color as char,
                    count,
                });
            }
        }
        Ok(Cube { grid })
    }

    /// The sticker byte at a grid cell; blank cells hold a space.
    pub fn sticker(&self, row: usize, col: usize) -> u8 {
        self.grid[row][col]
    }

    /// True when every sticker matches its face's center.
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let (r0, c0) = face.origin();
            let center = self.grid[r0 + 1][c0 + 1];
            self.grid[r0..r0 + 3]
                .iter()
                .all(|row| row[c0..c0 + 3].iter().all(|&cell| cell == center))
        })
    }

    /// Rotate `face` clockwise by `quarter_turns` in {1, 2, 3}.
    pub fn apply(&mut self, face: Face, quarter_turns: u8) {
        debug_assert!((1..=3).contains(&quarter_turns));
        for _ in 0..quarter_turns {
            self.quarter_turn(face);
        }
    }

    pub fn apply_turn(&mut self, turn: FaceTurn) {
        self.apply(turn.face, turn.quarter_turns);
    }

    pub fn apply_turns(&mut self, turns: &[FaceTurn]) {
        for &turn in turns {
            self.apply_turn(turn);
        }
    }

    /// Four-cycle of grid cells: `a` receives `b`, `b` receives `c`,
    /// `c` receives `d`, and `d` receives the old `a`.
    fn cycle(&mut self, a: (usize, usize), b: (usize, usize), c: (usize, usize), d: (usize, usize)) {
        let kept = self.grid[a.0][a.1];
        self.grid[a.0][a.1] = self.grid[b.0][b.1];
        self.grid[b.0][b.1] = self.grid[c.0][c.1];
        self.grid[c.0][c.1] = self.grid[d.0][d.1];
        self.grid[d.0][d.1] = kept;
    }

    /// Rotate a face's own 3x3 block clockwise.
    fn rotate_block(&mut self, face: Face) {
        let (r, c) = face.origin();
        self.cycle((r, c), (r + 2, c), (r + 2, c + 2), (r, c + 2));
        self.cycle((r, c + 1), (r + 1, c), (r + 2, c + 1), (r + 1, c + 2));
    }

    fn quarter_turn(&mut self, face: Face) {
        self.rotate_block(face);
        match face {
            Face::Up => {
                // Belt row 3: front <- right <- back <- left <- front.
                for k in 0..3 {
                    self.cycle((3, 3 + k), (3, 6 + k), (3, 9 + k), (3, k));
                }
            }
            Face::Down => {
                // Belt row 5, turning the other way around.
                for k in 0..3 {
                    self.cycle((5, 3 + k), (5, k), (5, 9 + k), (5, 6 + k));
                }
            }
            Face::Right => {
                // The back's left column meets the up face upside down.
                self.cycle((5, 9), (0, 5), (3, 5), (6, 5));
                self.cycle((4, 9), (1, 5), (4, 5), (7, 5));
                self.cycle((3, 9), (2, 5), (5, 5), (8, 5));
            }
            Face::Left => {
                self.cycle((3, 3), (0, 3), (5, 11), (6, 3));
                self.cycle((4, 3), (1, 3), (4, 11), (7, 3));
                self.cycle((5, 3), (2, 3), (3, 11), (8, 3));
            }
            Face::Front => {
                self.cycle((2, 3), (5, 2), (6, 5), (3, 6));
                self.cycle((2, 4), (4, 2), (6, 4), (4, 6));
                self.cycle((2, 5), (3, 2), (6, 3), (5, 6));
            }
            Face::Back => {
                self.cycle((0, 3), (3, 8), (8, 5), (5, 0));
                self.cycle((0, 4), (4, 8), (8, 4), (4, 0));
                self.cycle((0, 5), (5, 8), (8, 3), (3, 0));
            }
        }
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, line) in self.grid.iter().enumerate() {
            let wing = !(3..6).contains(&row);
            let width = if wing { 6 } else { GRID_COLS };
            for &byte in &line[..width] {
                write!(f, "{}", byte as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cube(\n{self})")
    }
}

impl FromStr for Cube {
    type Err = ParseCubeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Cube::from_grid(text)
    }
}
