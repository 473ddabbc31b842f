//! # Cave Configuration
//!
//! Loaded from TOML (or built in code), validated once, then turned into the
//! strongly typed [`CaveParams`] every phase consumes.
//!
//! ```toml
//! height = 64
//! width = 64
//! seed = 42
//! fill_percent = 45
//! smooth_iterations = 5
//! clear_wall_threshold = 50
//! clear_room_threshold = 50
//! winding = "double_sided"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::seed::CaveSeed;

/// How the surface mesh makes faces visible from both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    /// One outward-wound copy of each face; the host renders it double-sided.
    #[default]
    DoubleSided,
    /// Every face emitted twice, once per winding.
    Duplicated,
}

/// Raw generation options, as written by the user.
///
/// Integers are signed so that negative values are reported as
/// configuration errors rather than parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaveConfig {
    /// Grid rows.
    pub height: i64,
    /// Grid columns.
    pub width: i64,
    /// Deterministic RNG seed.
    pub seed: i64,
    /// Initial wall probability, in percent.
    pub fill_percent: i64,
    /// Cellular automaton passes.
    pub smooth_iterations: i64,
    /// Wall clusters smaller than this are cleared.
    pub clear_wall_threshold: i64,
    /// Rooms smaller than this are filled.
    pub clear_room_threshold: i64,
    /// Mesh face emission mode.
    #[serde(default)]
    pub winding: Winding,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            height: 64,
            width: 64,
            seed: 42,
            fill_percent: 45,
            smooth_iterations: 5,
            clear_wall_threshold: 50,
            clear_room_threshold: 50,
            winding: Winding::DoubleSided,
        }
    }
}

/// Validated generation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaveParams {
    /// Grid rows (at least 3).
    pub height: usize,
    /// Grid columns (at least 3).
    pub width: usize,
    /// Seed for every random stream of the run.
    pub seed: CaveSeed,
    /// Initial wall probability, `0..=100`.
    pub fill_percent: u8,
    /// Cellular automaton passes.
    pub smooth_iterations: u32,
    /// Minimum surviving wall-cluster size.
    pub clear_wall_threshold: usize,
    /// Minimum surviving room size.
    pub clear_room_threshold: usize,
    /// Mesh face emission mode.
    pub winding: Winding,
}

impl CaveConfig {
    /// Smallest accepted grid dimension.
    pub const MIN_DIMENSION: i64 = 3;

    /// Largest accepted cell count. Every cell may become a cube of 8
    /// vertices addressed by `u32` indices.
    pub const MAX_CELLS: usize = u32::MAX as usize / 8;

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed or has
    /// missing or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Serializes to a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Checks every option and converts to [`CaveParams`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking dimensions, total
    /// cell count, fill percent, iterations and thresholds in that order.
    pub fn validate(&self) -> Result<CaveParams, ConfigError> {
        let height = dimension("height", self.height)?;
        let width = dimension("width", self.width)?;
        let too_large = ConfigError::ValueTooLarge {
            field: "height * width",
            value: self.height.saturating_mul(self.width),
        };
        match height.checked_mul(width) {
            Some(cells) if cells <= Self::MAX_CELLS => {}
            _ => return Err(too_large),
        }

        if !(0..=100).contains(&self.fill_percent) {
            return Err(ConfigError::FillPercentOutOfRange(self.fill_percent));
        }

        let iterations = non_negative("smooth_iterations", self.smooth_iterations)?;
        let smooth_iterations =
            u32::try_from(iterations).map_err(|_| ConfigError::ValueTooLarge {
                field: "smooth_iterations",
                value: self.smooth_iterations,
            })?;

        Ok(CaveParams {
            height,
            width,
            seed: CaveSeed::from_signed(self.seed),
            fill_percent: self.fill_percent as u8,
            smooth_iterations,
            clear_wall_threshold: count("clear_wall_threshold", self.clear_wall_threshold)?,
            clear_room_threshold: count("clear_room_threshold", self.clear_room_threshold)?,
            winding: self.winding,
        })
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| ConfigError::Negative { field, value })
}

fn count(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(non_negative(field, value)?)
        .map_err(|_| ConfigError::ValueTooLarge { field, value })
}

fn dimension(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    if value < CaveConfig::MIN_DIMENSION {
        return Err(ConfigError::DimensionTooSmall { field, value });
    }
    count(field, value)
}
