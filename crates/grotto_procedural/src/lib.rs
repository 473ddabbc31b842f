//! # GROTTO Procedural Generation
//!
//! Deterministic 2D cave layouts on a fixed-size grid.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same configuration always produces the same cave
//! 2. **Sealed**: The outer ring of the grid is Wall at every phase
//! 3. **Explicit**: Each phase takes the grid as a parameter, nothing is
//!    shared between runs
//!
//! ## Core Components
//!
//! - `GridGenerator`: Seeded fill, then cellular-automaton smoothing
//! - `RegionAnalyzer`: 4-connected flood fill into regions
//! - `prune_small`: Removes regions below a size threshold
//! - `connect`: Greedy corridor carving towards the largest room
//! - `CaveConfig`: TOML configuration, validated into `CaveParams`
//!
//! ## Example
//!
//! ```rust,ignore
//! use grotto_procedural::{find_regions, smooth, Cell, CaveSeed, GridGenerator};
//!
//! let grid = GridGenerator::new(CaveSeed::new(42), 45).generate(64, 64);
//! let grid = smooth(grid, 5);
//! let rooms = find_regions(&grid, Cell::Empty)?;
//! ```

#![deny(unsafe_code)]
#![deny(clippy::perf)]
#![warn(clippy::pedantic)]

pub mod automaton;
pub mod config;
pub mod connect;
pub mod error;
pub mod grid;
pub mod prune;
pub mod region;
pub mod seed;

pub use automaton::{smooth, smooth_step, GridGenerator};
pub use config::{CaveConfig, CaveParams, Winding};
pub use connect::{carve_corridor, connect, rasterize_line, Corridor};
pub use error::{CaveError, CaveResult, ConfigError, Phase};
pub use grid::{Cell, Coord, Grid};
pub use prune::prune_small;
pub use region::{find_regions, Region, RegionAnalyzer, VisitedMask};
pub use seed::CaveSeed;
