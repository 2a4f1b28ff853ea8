//! # Cellular Automaton
//!
//! Random fill followed by "4-5 rule" style smoothing.
//!
//! ## Smoothing Semantics
//!
//! Smoothing is double-buffered: each pass reads only the grid produced by
//! the previous pass and writes into a second buffer, then the two are
//! swapped. No cell ever sees a neighbor updated in the same pass, so the
//! result does not depend on sweep order.
//!
//! Neighbors outside the grid count as solid, which keeps the map edges from
//! eroding.

use std::cmp::Ordering;

use cavern_shared::{CellState, Grid, GridResult};
use rand::Rng;

/// Fills a grid with random noise.
///
/// Cells are visited column by column (x outer, y inner). Edge cells are
/// always solid and consume no draw; every other cell is solid when
/// `rng.gen_range(0..100) < fill_percent`.
///
/// # Errors
///
/// Returns an error if either dimension is zero.
pub fn random_fill<R: Rng>(
    width: usize,
    height: usize,
    fill_percent: u8,
    rng: &mut R,
) -> GridResult<Grid> {
    let mut grid = Grid::filled(width, height, CellState::Open)?;

    for coord in grid.coords().collect::<Vec<_>>() {
        let solid = grid.is_edge(coord.x, coord.y) || rng.gen_range(0..100u8) < fill_percent;
        if solid {
            grid.set(coord.x, coord.y, CellState::Solid);
        }
    }

    Ok(grid)
}

/// Counts solid cells among the 8 neighbors of `(x, y)`.
///
/// Out-of-bounds neighbors count as solid.
#[must_use]
pub fn surrounding_wall_count(grid: &Grid, x: i32, y: i32) -> u8 {
    let mut count = 0;
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            if nx == x && ny == y {
                continue;
            }
            match grid.get(nx, ny) {
                Some(CellState::Solid) | None => count += 1,
                Some(CellState::Open) => {}
            }
        }
    }
    count
}

/// Double-buffered smoother.
///
/// Owns the back buffer so repeated passes reuse one allocation.
pub struct Smoother {
    surround_threshold: u8,
    back: Option<Grid>,
}

impl Smoother {
    /// Creates a smoother with the given keep-state threshold.
    #[must_use]
    pub const fn new(surround_threshold: u8) -> Self {
        Self {
            surround_threshold,
            back: None,
        }
    }

    /// Runs `iterations` smoothing passes over `grid` in place.
    pub fn smooth(&mut self, grid: &mut Grid, iterations: u32) {
        if iterations == 0 {
            return;
        }

        let mut back = match self.back.take() {
            Some(buffer) if buffer.width() == grid.width() && buffer.height() == grid.height() => {
                buffer
            }
            _ => grid.clone(),
        };

        for _ in 0..iterations {
            self.pass(grid, &mut back);
            std::mem::swap(grid, &mut back);
        }

        self.back = Some(back);
    }

    /// One pass: reads `front`, writes every cell of `back`.
    fn pass(&self, front: &Grid, back: &mut Grid) {
        for coord in front.coords() {
            let walls = surrounding_wall_count(front, coord.x, coord.y);
            let next = match walls.cmp(&self.surround_threshold) {
                Ordering::Greater => CellState::Solid,
                Ordering::Less => CellState::Open,
                Ordering::Equal => front.at(coord).unwrap_or(CellState::Solid),
            };
            back.set(coord.x, coord.y, next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::CaveSeed;

    #[test]
    fn test_fill_edges_always_solid() {
        let mut rng = CaveSeed::new(1).rng();
        let grid = random_fill(20, 15, 0, &mut rng).unwrap();
        for coord in grid.coords() {
            let expected = grid.is_edge(coord.x, coord.y);
            assert_eq!(grid.is_solid(coord.x, coord.y), expected, "at {coord:?}");
        }
    }

    #[test]
    fn test_fill_extremes() {
        let mut rng = CaveSeed::new(1).rng();
        let full = random_fill(12, 12, 100, &mut rng).unwrap();
        assert_eq!(full.count(CellState::Open), 0);
    }

    #[test]
    fn test_fill_is_deterministic() {
        let a = random_fill(64, 48, 45, &mut CaveSeed::new(99).rng()).unwrap();
        let b = random_fill(64, 48, 45, &mut CaveSeed::new(99).rng()).unwrap();
        let c = random_fill(64, 48, 45, &mut CaveSeed::new(100).rng()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_ne!(a.as_bytes(), c.as_bytes());
    }

    #[test]
    fn test_out_of_bounds_counts_as_wall() {
        let grid = Grid::from_ascii("...\n...\n...").unwrap();
        assert_eq!(surrounding_wall_count(&grid, 0, 0), 5);
        assert_eq!(surrounding_wall_count(&grid, 1, 1), 0);
        assert_eq!(surrounding_wall_count(&grid, 1, 0), 3);
    }

    #[test]
    fn test_equal_count_keeps_state() {
        // Center has exactly 4 solid neighbors: it must keep its state.
        let open_center = Grid::from_ascii("#.#\n...\n#.#").unwrap();
        let mut grid = open_center.clone();
        let mut smoother = Smoother::new(4);
        smoother.smooth(&mut grid, 1);
        assert_eq!(grid.get(1, 1), Some(CellState::Open));
    }

    #[test]
    fn test_smoothing_reads_snapshot() {
        // A single open cell in a solid field closes; an isolated solid cell in
        // an open field opens. With a snapshot both flip in the same pass.
        let mut grid = Grid::from_ascii(
            "#####\n\
             #.###\n\
             #####\n\
             .....\n\
             ...#.\n\
             .....",
        )
        .unwrap();
        let mut smoother = Smoother::new(4);
        smoother.smooth(&mut grid, 1);
        assert_eq!(grid.get(1, 1), Some(CellState::Solid));
        assert_eq!(grid.get(3, 4), Some(CellState::Open));
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let original = random_fill(30, 30, 50, &mut CaveSeed::new(5).rng()).unwrap();
        let mut grid = original.clone();
        Smoother::new(4).smooth(&mut grid, 0);
        assert_eq!(grid, original);
    }

    #[test]
    fn test_smoothing_is_order_independent() {
        // Transposing the input must transpose the output.
        let grid = random_fill(25, 25, 48, &mut CaveSeed::new(17).rng()).unwrap();
        let mut transposed = Grid::filled(25, 25, CellState::Open).unwrap();
        for coord in grid.coords() {
            if let Some(state) = grid.at(coord) {
                transposed.set(coord.y, coord.x, state);
            }
        }

        let mut a = grid.clone();
        let mut b = transposed.clone();
        Smoother::new(4).smooth(&mut a, 3);
        Smoother::new(4).smooth(&mut b, 3);

        for coord in a.coords() {
            assert_eq!(a.get(coord.x, coord.y), b.get(coord.y, coord.x), "at {coord:?}");
        }
    }
}
