//! # Region Analysis
//!
//! Discovers maximal 4-connected components of one cell type.
//!
//! Regions are snapshots: any mutation of the grid invalidates every region
//! computed before it.

use std::collections::VecDeque;

use crate::error::{CaveResult, Phase};
use crate::grid::{Cell, Coord, Grid};

/// A connected component of same-state cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Every cell of the component, in discovery order.
    pub contents: Vec<Coord>,
    /// Cells of `contents` with at least one opposite-type 4-neighbour.
    pub boundary: Vec<Coord>,
    /// Largest room, the connectivity anchor.
    pub is_main: bool,
    /// Reached from the main region, directly or through corridors.
    pub is_connected_to_main: bool,
    /// Smallest squared distance between this boundary and the main boundary.
    ///
    /// `None` until computed, or when either boundary is empty.
    pub distance_from_main: Option<u64>,
}

impl Region {
    /// Creates a region from its cells.
    #[must_use]
    pub fn new(contents: Vec<Coord>) -> Self {
        Self {
            contents,
            ..Self::default()
        }
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.contents.len()
    }

    /// Fills `boundary` with the cells that touch a cell of type `other`.
    ///
    /// Only in-range neighbours are examined, on all four sides alike; the
    /// grid edge itself never makes a cell a boundary cell.
    pub fn compute_boundary(&mut self, grid: &Grid, other: Cell) {
        self.boundary = self
            .contents
            .iter()
            .copied()
            .filter(|&c| grid.orthogonal_neighbors(c).any(|n| grid.at(n) == other))
            .collect();
    }

    /// Closest pair `(mine, theirs)` between two boundaries by squared distance.
    ///
    /// Ties keep the first pair found scanning `self` then `other`.
    #[must_use]
    pub fn closest_boundary_pair(&self, other: &Self) -> Option<(Coord, Coord, u64)> {
        let mut best: Option<(Coord, Coord, u64)> = None;
        for &mine in &self.boundary {
            for &theirs in &other.boundary {
                let d = mine.distance_squared(theirs);
                if best.map_or(true, |(_, _, b)| d < b) {
                    best = Some((mine, theirs, d));
                }
            }
        }
        best
    }
}

/// Visited flags for one flood fill sweep.
#[derive(Clone, Debug, Default)]
pub struct VisitedMask {
    width: usize,
    bits: Vec<bool>,
}

impl VisitedMask {
    /// Clears the mask and sizes it for `grid`.
    pub fn reset(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.bits.clear();
        self.bits.resize(grid.height() * grid.width(), false);
    }

    /// Marks `coord`; returns true if it was not visited before.
    #[inline]
    pub fn visit(&mut self, coord: Coord) -> bool {
        let slot = &mut self.bits[coord.x * self.width + coord.y];
        !std::mem::replace(slot, true)
    }

    /// Returns true if `coord` has been visited.
    #[inline]
    #[must_use]
    pub fn is_visited(&self, coord: Coord) -> bool {
        self.bits[coord.x * self.width + coord.y]
    }
}

/// Breadth-first region finder with reusable scratch buffers.
#[derive(Debug, Default)]
pub struct RegionAnalyzer {
    visited: VisitedMask,
    queue: VecDeque<Coord>,
}

impl RegionAnalyzer {
    /// Creates an analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitions every `cell_type` cell of `grid` into regions.
    ///
    /// Cells are scanned row-major; each unvisited match seeds a flood fill
    /// over its 4-connected component. Each call starts from a fresh mask.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::BorderBreached`](crate::CaveError::BorderBreached)
    /// if the border invariant does not hold.
    pub fn find_regions(&mut self, grid: &Grid, cell_type: Cell) -> CaveResult<Vec<Region>> {
        grid.ensure_border(Phase::RegionAnalysis)?;
        self.visited.reset(grid);

        let mut regions = Vec::new();
        for start in grid.coords() {
            if grid.at(start) == cell_type && !self.visited.is_visited(start) {
                regions.push(Region::new(self.flood(grid, start, cell_type)));
            }
        }

        tracing::debug!(
            cell = ?cell_type,
            regions = regions.len(),
            "region analysis complete"
        );
        Ok(regions)
    }

    fn flood(&mut self, grid: &Grid, start: Coord, cell_type: Cell) -> Vec<Coord> {
        let mut cells = Vec::new();
        self.queue.clear();
        self.visited.visit(start);
        self.queue.push_back(start);

        while let Some(current) = self.queue.pop_front() {
            cells.push(current);
            for next in grid.orthogonal_neighbors(current) {
                if grid.at(next) == cell_type && self.visited.visit(next) {
                    self.queue.push_back(next);
                }
            }
        }

        cells
    }
}

/// Convenience wrapper around [`RegionAnalyzer::find_regions`].
///
/// # Errors
///
/// See [`RegionAnalyzer::find_regions`].
pub fn find_regions(grid: &Grid, cell_type: Cell) -> CaveResult<Vec<Region>> {
    RegionAnalyzer::new().find_regions(grid, cell_type)
}
