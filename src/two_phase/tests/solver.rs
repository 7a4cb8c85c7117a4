use facelet_cube::{parse_moves, Cube, Face};
use two_phase::{format_expanded, solve, Move, SolveError};

fn scrambled(moves: &str) -> Cube {
    let mut cube = Cube::solved();
    cube.apply_turns(&parse_moves(moves).unwrap());
    cube
}

fn apply_solution(cube: &mut Cube, solution: &[Move]) {
    for move_ in solution {
        cube.apply_turn(move_.face_turn());
    }
}

/// Quarter turns in a solution, counting a half turn as two.
fn quarter_turns(solution: &[Move]) -> usize {
    solution
        .iter()
        .map(|move_| if move_.quarter_turns() == 2 { 2 } else { 1 })
        .sum()
}

#[test_log::test]
fn solved_cube_needs_no_moves() {
    let solution = solve(&Cube::solved()).unwrap();
    assert!(solution.is_empty());
    assert_eq!(format_expanded(&solution), "");
}

#[test_log::test]
fn single_quarter_turn_scramble() {
    let mut cube = scrambled("F");
    let solution = solve(&cube).unwrap();

    assert!(quarter_turns(&solution) <= 4);
    apply_solution(&mut cube, &solution);
    assert!(cube.is_solved());
}

#[test_log::test]
fn two_move_scramble() {
    let mut cube = scrambled("F R");
    let solution = solve(&cube).unwrap();

    assert!(quarter_turns(&solution) <= 4);
    apply_solution(&mut cube, &solution);
    assert!(cube.is_solved());
}

#[test_log::test]
fn six_move_scramble() {
    let mut cube = scrambled("F R U' D' L B'");
    let solution = solve(&cube).unwrap();

    assert!(solution.len() <= 30);
    apply_solution(&mut cube, &solution);
    assert!(cube.is_solved());
}

#[test_log::test]
fn subgroup_scramble_skips_phase_1() {
    let mut cube = scrambled("U R2 F2 D' L2 B2 U2");
    let solution = solve(&cube).unwrap();

    // Every move of the answer stays inside the subgroup alphabet.
    assert!(solution.iter().all(|move_| {
        move_.quarter_turns() == 2
            || matches!(move_.face(), Face::Up | Face::Down)
    }));
    apply_solution(&mut cube, &solution);
    assert!(cube.is_solved());
}

#[test_log::test]
fn random_scrambles_solve() {
    for seed in [1u64, 2, 3] {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut cube = Cube::solved();
        let mut previous_face = None;
        for _ in 0..12 {
            let face = loop {
                let face = Face::ALL[rng.usize(..6)];
                if Some(face) != previous_face {
                    break face;
                }
            };
            previous_face = Some(face);
            cube.apply(face, rng.u8(1..=3));
        }

        let solution = solve(&cube).unwrap();
        assert!(solution.len() <= 30);
        apply_solution(&mut cube, &solution);
        assert!(cube.is_solved(), "seed {seed} was not solved");
    }
}

#[test_log::test]
fn solving_is_deterministic_and_leaves_the_input_alone() {
    let cube = scrambled("F R U' D' L B'");
    let before = cube.clone();

    let first = solve(&cube).unwrap();
    let second = solve(&cube).unwrap();
    assert_eq!(first, second);
    assert_eq!(cube, before);
}

/// Byte offset of a grid cell in the 9-line text form, where wing lines are
/// 7 bytes and belt lines 13.
fn offset(row: usize, col: usize) -> usize {
    let before: usize = (0..row)
        .map(|r| if (3..6).contains(&r) { 13 } else { 7 })
        .sum();
    before + col
}

#[test_log::test]
fn twisted_corner_is_inconsistent() {
    let mut grid = Cube::solved().to_string().into_bytes();
    let cells = [offset(2, 5), offset(3, 6), offset(3, 5)];
    let rotated = [grid[cells[2]], grid[cells[0]], grid[cells[1]]];
    for (&cell, &byte) in cells.iter().zip(&rotated) {
        grid[cell] = byte;
    }

    let cube = Cube::from_grid(&String::from_utf8(grid).unwrap()).unwrap();
    assert_eq!(solve(&cube), Err(SolveError::InconsistentCube));
}

#[test_log::test]
fn flipped_edge_is_inconsistent() {
    let mut grid = Cube::solved().to_string().into_bytes();
    grid.swap(offset(2, 4), offset(3, 4));

    let cube = Cube::from_grid(&String::from_utf8(grid).unwrap()).unwrap();
    assert_eq!(solve(&cube), Err(SolveError::InconsistentCube));
}

#[test_log::test]
fn swapped_edges_are_inconsistent() {
    let mut grid = Cube::solved().to_string().into_bytes();
    // Exchange the pieces at the top-front and top-right edge positions by
    // swapping their side stickers.
    grid.swap(offset(3, 4), offset(3, 7));

    let cube = Cube::from_grid(&String::from_utf8(grid).unwrap()).unwrap();
    assert_eq!(solve(&cube), Err(SolveError::InconsistentCube));
}
