use log::debug;
use smallvec::SmallVec;
use std::time::Instant;

use crate::cells::{Cell, CellIndex, GridDirection};
use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::maze::Maze;
use crate::maze_rng::MazeRng;
use crate::units::{Height, Width};

/// Validate the dimensions and carve a `width` x `height` maze with the recursive backtracker.
///
/// The same arguments always produce the same maze.
pub fn generate(width: Width, height: Height, seed: u64) -> Result<Maze> {
    let dimensions = GridDimensions::new(width, height)?;
    Ok(recursive_backtracker(&dimensions, seed))
}

/// Apply the recursive backtracker maze generation algorithm to a fresh, fully walled grid.
///
/// It is a randomised depth first walk: step to a random unvisited neighbour, knocking down the wall between
/// the two cells, until the current cell has no unvisited neighbours. Then back up to the most recent cell
/// on the stack that still has one and carry on from there. Every cell is visited exactly once, so the
/// result is a spanning tree of the grid, i.e. a perfect maze.
///
/// The walk always starts from cell `(0, 0)` and keeps its own stack, so the grid size is not limited by
/// the call stack depth.
pub fn recursive_backtracker(dimensions: &GridDimensions, seed: u64) -> Maze {
    let start_time = Instant::now();

    let mut cells: Vec<Cell> = dimensions.iter()
        .map(|(x, y)| Cell::new(x, y, dimensions))
        .collect();
    let mut rng = MazeRng::new(seed);
    carve_passages(&mut cells, &mut rng);

    debug!("recursive backtracker carved {}x{} maze (seed {}) in {:?}",
           dimensions.width(),
           dimensions.height(),
           seed,
           start_time.elapsed());

    Maze::from_carved_cells(*dimensions, seed, cells)
}

fn carve_passages(cells: &mut [Cell], rng: &mut MazeRng) {
    let mut stack: Vec<usize> = Vec::with_capacity(cells.len());
    let mut candidates: SmallVec<[usize; 4]> = SmallVec::new();

    stack.push(0);
    while let Some(mut current) = stack.pop() {
        cells[current].is_visited = true;

        loop {
            usable_neighbours(cells, current, &mut candidates);
            if candidates.is_empty() {
                // Dead end, the next pop resumes from the latest branch point.
                break;
            }

            let next = candidates[rng.draw_index(candidates.len())];
            cells[next].is_visited = true;
            stack.push(current);
            remove_walls(cells, current, next);
            current = next;
        }
    }
}

/// Unvisited in bounds neighbours of `current`, in top, left, bottom, right order.
#[inline]
fn usable_neighbours(cells: &[Cell], current: usize, candidates: &mut SmallVec<[usize; 4]>) {
    candidates.clear();
    candidates.extend(cells[current].neighbours()
        .iter()
        .filter_map(|neighbour: &CellIndex| neighbour.get())
        .filter(|&index| !cells[index].is_visited));
}

/// Knock down the wall pair shared by two adjacent cells.
fn remove_walls(cells: &mut [Cell], current: usize, next: usize) {
    let dx = i64::from(cells[next].x) - i64::from(cells[current].x);
    let dy = i64::from(cells[next].y) - i64::from(cells[current].y);

    if let Some(direction) = GridDirection::from_offset(dx, dy) {
        cells[current].remove_wall(direction);
        cells[next].remove_wall(direction.opposite());
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use quickcheck::{quickcheck, TestResult};

    fn maze(w: usize, h: usize, seed: u64) -> Maze {
        generate(Width(w), Height(h), seed).expect("valid dimensions")
    }

    // (top, left, bottom, right)
    fn walls(m: &Maze) -> Vec<[bool; 4]> {
        m.iter().map(|cell| cell.walls()).collect()
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        for &(w, h) in &[(0, 1), (1, 0), (0, 0)] {
            let err = generate(Width(w), Height(h), 1).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidDimensions(..) => {}
                ref other => panic!("unexpected error kind {:?}", other),
            }
        }
    }

    #[test]
    fn single_cell_keeps_all_walls() {
        for seed in 0..5 {
            let m = maze(1, 1, seed);
            assert_eq!(m.size(), 1);
            let cell = m.cells()[0];
            assert_eq!(cell.walls(), [true; 4]);
            assert!(cell.is_visited);
            assert_eq!(cell.neighbours(), [CellIndex::NONE; 4]);
            assert_eq!(m.links_count(), 0);
        }
    }

    #[test]
    fn two_cells_share_one_passage() {
        let m = maze(2, 1, 5);
        assert_eq!(walls(&m), vec![[true, true, true, false], [true, false, true, true]]);
        assert_eq!(m.links_count(), 1);

        let m = maze(1, 2, 5);
        assert_eq!(walls(&m), vec![[false, true, true, true], [true, true, false, true]]);
        assert_eq!(m.links_count(), 1);
    }

    #[test]
    fn golden_2x2_seed_42() {
        let m = maze(2, 2, 42);
        assert_eq!(walls(&m),
                   vec![[false, true, true, true],
                        [false, true, true, true],
                        [true, true, false, false],
                        [true, false, false, true]]);
    }

    #[test]
    fn golden_3x3_seed_7() {
        let m = maze(3, 3, 7);
        assert_eq!(walls(&m),
                   vec![[true, true, true, false],
                        [true, false, true, false],
                        [false, false, true, true],
                        [false, true, true, false],
                        [true, false, true, false],
                        [true, false, false, true],
                        [true, true, false, false],
                        [true, false, true, false],
                        [true, false, true, true]]);
        assert!(m.is_perfect());
    }

    #[test]
    fn golden_5x4_seed_2024() {
        let t = true;
        let f = false;
        let m = maze(5, 4, 2024);
        assert_eq!(walls(&m),
                   vec![[t, t, t, f], [f, f, t, t], [t, t, t, f], [t, f, t, f], [f, f, t, t],
                        [f, t, t, t], [t, t, f, f], [t, f, t, f], [f, f, t, t], [f, t, f, t],
                        [f, t, f, t], [f, t, t, f], [f, f, t, t], [f, t, f, t], [f, t, f, t],
                        [t, t, f, f], [t, f, f, t], [t, t, f, f], [t, f, f, f], [t, f, f, t]]);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = maze(17, 9, 1234);
        let b = maze(17, 9, 1234);
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let mazes: Vec<Vec<[bool; 4]>> = (0..8).map(|seed| walls(&maze(10, 10, seed))).collect();
        assert!(mazes.iter().skip(1).any(|w| *w != mazes[0]));
    }

    #[test]
    fn every_cell_is_visited() {
        let m = maze(31, 7, 3);
        assert!(m.iter().all(|cell| cell.is_visited));
    }

    #[test]
    fn large_grid_is_a_spanning_tree() {
        // Deep enough that a recursive walk would be in trouble.
        let m = maze(300, 300, 20000);
        assert_eq!(m.size(), 90000);
        assert_eq!(m.links_count(), 90000 - 1);
        assert!(m.is_perfect());
    }

    #[test]
    fn long_corridor() {
        let m = maze(1000, 1, 9);
        assert_eq!(m.links_count(), 999);
        assert!(m.iter().skip(1).all(|cell| !cell.wall_left));
        assert!(m.iter().take(999).all(|cell| !cell.wall_right));
    }

    #[test]
    fn stored_neighbours_match_rederived_neighbours() {
        let m = maze(6, 4, 11);
        let d = *m.dimensions();
        for cell in m.iter() {
            assert_eq!(cell.index, d.index_of(i64::from(cell.x), i64::from(cell.y)));
            for &dir in GridDirection::ALL.iter() {
                assert_eq!(cell.neighbour(dir), d.neighbour_index(cell.x, cell.y, dir));
            }
        }
    }

    #[test]
    fn quickcheck_generated_mazes_are_perfect() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            if w == 0 || h == 0 {
                return TestResult::discard();
            }
            let m = maze(w as usize % 40 + 1, h as usize % 40 + 1, seed);
            let all_visited = m.iter().all(|cell| cell.is_visited);
            TestResult::from_bool(all_visited && m.has_symmetric_walls() && m.is_perfect() &&
                                  m.links_count() == m.size() - 1)
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_generation_is_deterministic() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 20 + 1, h as usize % 20 + 1);
            maze(w, h, seed) == maze(w, h, seed)
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }
}
