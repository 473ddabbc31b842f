//! # GROTTO
//!
//! Procedural cave levels: a wall/floor grid plus the wall surface mesh.
//!
//! ## Pipeline
//!
//! ```text
//! CaveConfig ──validate──> CaveParams
//!     │
//!     ├─ 1. fill + smooth          (GridGenerator, smooth)
//!     ├─ 2. find + prune rooms     (find_regions(Empty), prune_small -> Wall)
//!     ├─ 3. connect rooms          (connect, corridors carved)
//!     ├─ 4. find + prune walls     (find_regions(Wall), prune_small -> Empty)
//!     └─ 5. extract surface        (SurfaceMeshBuilder)
//!                │
//!                v
//!            CaveLevel { grid, mesh, rooms, corridors, stats }
//! ```
//!
//! Every phase is a plain function of its inputs, so the same configuration
//! always yields the same level.

pub use grotto_mesh as mesh;
pub use grotto_procedural as procedural;

pub use grotto_mesh::{MeshBuffer, SurfaceMeshBuilder};
pub use grotto_procedural::{
    CaveConfig, CaveError, CaveParams, CaveResult, CaveSeed, Cell, ConfigError, Coord, Corridor,
    Grid, Region, Winding,
};

use grotto_procedural::{connect, prune_small, smooth, GridGenerator, RegionAnalyzer};

/// Counts collected while a level is generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Wall cells after smoothing.
    pub walls_after_smoothing: usize,
    /// Room regions found before pruning.
    pub rooms_found: usize,
    /// Rooms filled in for being below the room threshold.
    pub rooms_pruned: usize,
    /// Corridors carved between rooms.
    pub corridors: usize,
    /// Wall regions found after connecting.
    pub wall_regions_found: usize,
    /// Wall regions cleared for being below the wall threshold.
    pub wall_regions_pruned: usize,
    /// Vertices in the final mesh.
    pub vertices: usize,
    /// Triangles in the final mesh.
    pub triangles: usize,
}

/// A finished cave.
#[derive(Clone, Debug)]
pub struct CaveLevel {
    /// Final grid.
    pub grid: Grid,
    /// Wall surface.
    pub mesh: MeshBuffer,
    /// Surviving rooms, sorted by distance from the main room.
    pub rooms: Vec<Region>,
    /// Corridors in the order they were carved.
    pub corridors: Vec<Corridor>,
    /// Per-phase counts.
    pub stats: GenerationStats,
}

/// Runs the full generation pipeline for one validated configuration.
#[derive(Debug)]
pub struct CaveGenerator {
    params: CaveParams,
    analyzer: RegionAnalyzer,
}

impl CaveGenerator {
    /// Validates `config` and prepares a generator for it.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::Config`] if any field is out of range.
    pub fn new(config: &CaveConfig) -> CaveResult<Self> {
        Ok(Self::from_params(config.validate()?))
    }

    /// Creates a generator for already validated parameters.
    #[must_use]
    pub fn from_params(params: CaveParams) -> Self {
        Self {
            params,
            analyzer: RegionAnalyzer::new(),
        }
    }

    /// Parameters this generator runs with.
    #[must_use]
    pub fn params(&self) -> &CaveParams {
        &self.params
    }

    /// Generates the level.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::BorderBreached`] if a phase left an open cell on
    /// the outer ring.
    pub fn generate(&mut self) -> CaveResult<CaveLevel> {
        let p = &self.params;
        let mut stats = GenerationStats::default();

        let grid = GridGenerator::new(p.seed, p.fill_percent).generate(p.height, p.width);
        let mut grid = smooth(grid, p.smooth_iterations);
        stats.walls_after_smoothing = grid.count(Cell::Wall);

        let rooms = self.analyzer.find_regions(&grid, Cell::Empty)?;
        stats.rooms_found = rooms.len();
        let mut rooms = prune_small(&mut grid, rooms, p.clear_room_threshold, Cell::Wall)?;
        stats.rooms_pruned = stats.rooms_found - rooms.len();

        let corridors = connect(&mut grid, &mut rooms)?;
        stats.corridors = corridors.len();

        let walls = self.analyzer.find_regions(&grid, Cell::Wall)?;
        stats.wall_regions_found = walls.len();
        let kept = prune_small(&mut grid, walls, p.clear_wall_threshold, Cell::Empty)?;
        stats.wall_regions_pruned = stats.wall_regions_found - kept.len();

        let mesh = SurfaceMeshBuilder::new(p.winding).build(&grid)?;
        stats.vertices = mesh.vertex_count();
        stats.triangles = mesh.triangle_count();

        tracing::info!(
            height = p.height,
            width = p.width,
            seed = p.seed.value(),
            rooms = rooms.len(),
            corridors = stats.corridors,
            triangles = stats.triangles,
            "cave generated"
        );

        Ok(CaveLevel {
            grid,
            mesh,
            rooms,
            corridors,
            stats,
        })
    }
}

/// Validates `config` and generates one level.
///
/// # Errors
///
/// Returns [`CaveError::Config`] for invalid configuration, otherwise any
/// error raised by a generation phase.
pub fn generate(config: &CaveConfig) -> CaveResult<CaveLevel> {
    CaveGenerator::new(config)?.generate()
}
