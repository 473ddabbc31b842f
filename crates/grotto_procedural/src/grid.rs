//! # Occupancy Grid
//!
//! The cave is a single `height x width` plane of cells, each Wall or Empty.
//!
//! ## Indexing
//!
//! Cells are addressed as `(x, y)` with `x` the row (`0..height`) and `y`
//! the column (`0..width`). Storage is row-major, which is also the scan
//! order every phase uses.
//!
//! ## Border Invariant
//!
//! Row/column `0` and `height-1`/`width-1` are Wall for the whole life of
//! a grid. Phases check it with [`Grid::ensure_border`].

use bytemuck::NoUninit;

use crate::error::{CaveError, CaveResult, Phase};

/// State of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, NoUninit)]
#[repr(u8)]
pub enum Cell {
    /// Open floor.
    #[default]
    Empty = 0,
    /// Solid rock.
    Wall = 1,
}

impl Cell {
    /// Returns the other cell state.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Empty => Self::Wall,
            Self::Wall => Self::Empty,
        }
    }

    /// Returns true for Wall.
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Grid index pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row (`0..height`).
    pub x: usize,
    /// Column (`0..width`).
    pub y: usize,
}

impl Coord {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

/// The four axis-aligned neighbour offsets, in flood fill order.
pub const ORTHOGONAL: [(i64, i64); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Binary occupancy grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    /// Cell data (indexed as `x * width + y`).
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `fill`.
    #[must_use]
    pub fn new(height: usize, width: usize, fill: Cell) -> Self {
        Self {
            height,
            width,
            cells: vec![fill; height * width],
        }
    }

    /// Creates a grid whose outer ring is Wall and whose interior is `interior`.
    #[must_use]
    pub fn bordered(height: usize, width: usize, interior: Cell) -> Self {
        let mut grid = Self::new(height, width, interior);
        for x in 0..height {
            for y in 0..width {
                if grid.is_border(x, y) {
                    grid.set(x, y, Cell::Wall);
                }
            }
        }
        grid
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    const fn index(&self, x: usize, y: usize) -> usize {
        x * self.width + y
    }

    /// Gets the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Sets the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Gets the cell at `coord`.
    #[inline]
    #[must_use]
    pub fn at(&self, coord: Coord) -> Cell {
        self.get(coord.x, coord.y)
    }

    /// Gets the cell at a signed position, `None` when out of range.
    #[inline]
    #[must_use]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<Cell> {
        if self.contains(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Returns true if the signed position lies inside the grid.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.height && (y as usize) < self.width
    }

    /// Returns true if `(x, y)` is on the outer ring.
    #[inline]
    #[must_use]
    pub const fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.height || y + 1 == self.width
    }

    /// Returns true if `(x, y)` is strictly inside the outer ring.
    #[inline]
    #[must_use]
    pub fn is_interior(&self, x: i64, y: i64) -> bool {
        x > 0 && y > 0 && (x as usize) + 1 < self.height && (y as usize) + 1 < self.width
    }

    /// In-range 4-neighbours of `coord`, in flood fill order.
    pub fn orthogonal_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        ORTHOGONAL.iter().filter_map(move |&(dx, dy)| {
            let nx = coord.x as i64 + dx;
            let ny = coord.y as i64 + dy;
            self.contains(nx, ny)
                .then(|| Coord::new(nx as usize, ny as usize))
        })
    }

    /// Counts Wall cells among the 8 neighbours of `(x, y)`.
    ///
    /// Positions outside the grid count as Wall, which keeps the border stable
    /// under smoothing.
    #[must_use]
    pub fn wall_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let cell = self
                    .get_signed(x as i64 + dx, y as i64 + dy)
                    .unwrap_or(Cell::Wall);
                if cell.is_wall() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |x| (0..width).map(move |y| Coord::new(x, y)))
    }

    /// Raw cell bytes (`0` = Empty, `1` = Wall), row-major.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Checks the border invariant.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::BorderBreached`] naming the first offending cell.
    pub fn ensure_border(&self, phase: Phase) -> CaveResult<()> {
        match self
            .coords()
            .find(|c| self.is_border(c.x, c.y) && !self.at(*c).is_wall())
        {
            Some(c) => Err(CaveError::BorderBreached {
                phase,
                x: c.x,
                y: c.y,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bordered_grid() {
        let grid = Grid::bordered(4, 5, Cell::Empty);
        assert_eq!(grid.count(Cell::Wall), 2 * 4 + 2 * 5 - 4);
        assert_eq!(grid.count(Cell::Empty), 2 * 3);
        assert!(grid.ensure_border(Phase::Automaton).is_ok());
    }

    #[test]
    fn test_breached_border_is_reported() {
        let mut grid = Grid::bordered(4, 4, Cell::Wall);
        grid.set(3, 2, Cell::Empty);

        assert_eq!(
            grid.ensure_border(Phase::Pruning),
            Err(CaveError::BorderBreached {
                phase: Phase::Pruning,
                x: 3,
                y: 2
            })
        );
    }

    #[test]
    fn test_wall_neighbors_count_outside_as_wall() {
        let grid = Grid::new(3, 3, Cell::Empty);
        // Corner: 5 out-of-range positions, 3 empty in-range neighbours.
        assert_eq!(grid.wall_neighbors(0, 0), 5);
        // Centre: all neighbours in range and empty.
        assert_eq!(grid.wall_neighbors(1, 1), 0);
    }

    #[test]
    fn test_orthogonal_neighbors_clip_to_grid() {
        let grid = Grid::new(3, 3, Cell::Empty);
        let corner: Vec<_> = grid.orthogonal_neighbors(Coord::new(0, 0)).collect();
        assert_eq!(corner, vec![Coord::new(1, 0), Coord::new(0, 1)]);
        assert_eq!(grid.orthogonal_neighbors(Coord::new(1, 1)).count(), 4);
    }

    #[test]
    fn test_as_bytes_layout() {
        let mut grid = Grid::new(2, 3, Cell::Empty);
        grid.set(1, 2, Cell::Wall);
        assert_eq!(grid.as_bytes(), &[0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(Coord::new(1, 1).distance_squared(Coord::new(4, 5)), 25);
        assert_eq!(Coord::new(4, 5).distance_squared(Coord::new(1, 1)), 25);
    }
}
