//! # Cellular Automaton
//!
//! Seeds the occupancy grid with random walls, then smooths it into caves.
//!
//! ## Smoothing Rule
//!
//! For each cell, count Wall cells among its 8 neighbours (outside counts as
//! Wall). More than 4 becomes Wall, fewer than 4 becomes Empty, exactly 4 is
//! left alone. Every iteration reads a snapshot of the previous grid, so the
//! result does not depend on scan order.

use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::seed::{CaveSeed, FILL_STREAM};

/// Neighbour count at which a cell keeps its state.
const STABLE_NEIGHBORS: u8 = 4;

/// Produces the initial cave grid.
#[derive(Clone, Copy, Debug)]
pub struct GridGenerator {
    seed: CaveSeed,
    fill_percent: u8,
}

impl GridGenerator {
    /// Creates a generator.
    ///
    /// `fill_percent` is the chance, in percent, that an interior cell starts
    /// as Wall. Values above 100 behave like 100.
    #[must_use]
    pub const fn new(seed: CaveSeed, fill_percent: u8) -> Self {
        Self { seed, fill_percent }
    }

    /// Fills a new `height x width` grid.
    ///
    /// Border cells are Wall unconditionally. Interior cells draw one value in
    /// `0..100` each, row-major, and become Wall when the draw is below the
    /// fill percent.
    #[must_use]
    pub fn generate(&self, height: usize, width: usize) -> Grid {
        let mut rng = self.seed.rng(FILL_STREAM);
        let mut grid = Grid::new(height, width, Cell::Wall);

        for x in 0..height {
            for y in 0..width {
                if grid.is_border(x, y) {
                    continue;
                }
                let draw: u8 = rng.gen_range(0..100);
                let cell = if draw < self.fill_percent {
                    Cell::Wall
                } else {
                    Cell::Empty
                };
                grid.set(x, y, cell);
            }
        }

        grid
    }
}

/// Applies `iterations` smoothing passes.
#[must_use]
pub fn smooth(mut grid: Grid, iterations: u32) -> Grid {
    for _ in 0..iterations {
        grid = smooth_step(&grid);
    }
    grid
}

/// One synchronous smoothing pass over `previous`.
#[must_use]
pub fn smooth_step(previous: &Grid) -> Grid {
    let mut next = previous.clone();

    for x in 0..previous.height() {
        for y in 0..previous.width() {
            let walls = previous.wall_neighbors(x, y);
            if walls > STABLE_NEIGHBORS {
                next.set(x, y, Cell::Wall);
            } else if walls < STABLE_NEIGHBORS {
                next.set(x, y, Cell::Empty);
            }
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Phase;

    #[test]
    fn test_generation_determinism() {
        let gen1 = GridGenerator::new(CaveSeed::new(42), 45);
        let gen2 = GridGenerator::new(CaveSeed::new(42), 45);

        assert_eq!(gen1.generate(40, 30).as_bytes(), gen2.generate(40, 30).as_bytes());
    }

    #[test]
    fn test_different_seeds_different_grids() {
        let a = GridGenerator::new(CaveSeed::new(1), 45).generate(40, 40);
        let b = GridGenerator::new(CaveSeed::new(2), 45).generate(40, 40);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fill_extremes() {
        let empty = GridGenerator::new(CaveSeed::new(7), 0).generate(10, 12);
        assert_eq!(empty.count(Cell::Empty), 8 * 10);

        let full = GridGenerator::new(CaveSeed::new(7), 100).generate(10, 12);
        assert_eq!(full.count(Cell::Wall), 10 * 12);
    }

    #[test]
    fn test_fill_ratio_roughly_matches() {
        let grid = GridGenerator::new(CaveSeed::new(99), 45).generate(102, 102);
        let ratio = (grid.count(Cell::Wall) - 404) as f64 / (100.0 * 100.0);
        assert!((0.40..0.50).contains(&ratio), "wall ratio {ratio}");
    }

    #[test]
    fn test_smoothing_keeps_border() {
        let grid = GridGenerator::new(CaveSeed::new(3), 60).generate(30, 25);
        let grid = smooth(grid, 6);
        assert!(grid.ensure_border(Phase::Automaton).is_ok());
    }

    #[test]
    fn test_smoothing_reads_snapshot() {
        // A single wall in an open field has 0..1 wall neighbours everywhere
        // except the border; it must vanish without affecting its neighbours.
        let mut grid = Grid::bordered(7, 7, Cell::Empty);
        grid.set(3, 3, Cell::Wall);

        let next = smooth_step(&grid);
        assert_eq!(next.get(3, 3), Cell::Empty);
        assert_eq!(next.get(3, 4), Cell::Empty);
    }

    #[test]
    fn test_smoothing_is_order_independent() {
        // Row-major in-place mutation would turn (1, 2) into Wall after (1, 1)
        // flips; the snapshot rule sees the original 4-neighbour count.
        let mut grid = Grid::bordered(5, 5, Cell::Empty);
        grid.set(2, 1, Cell::Wall);
        let next = smooth_step(&grid);

        // (1, 1): border walls (0,0) (0,1) (0,2) (1,0) (2,0) + (2,1) = 6.
        assert_eq!(next.get(1, 1), Cell::Wall);
        // (1, 2): (0,1) (0,2) (0,3) + (2,1) = 4 in the snapshot, unchanged.
        assert_eq!(next.get(1, 2), Cell::Empty);
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let grid = GridGenerator::new(CaveSeed::new(5), 50).generate(20, 20);
        assert_eq!(smooth(grid.clone(), 0), grid);
    }
}
