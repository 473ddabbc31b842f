//! # Cave Error Types
//!
//! All errors that can occur while generating a cave.
//!
//! Configuration problems are reported before any generation work starts.
//! Invariant violations mean a bug in a phase, never bad user input, and
//! abort the run.

use thiserror::Error;

/// Errors raised while loading or validating a [`CaveConfig`](crate::CaveConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A grid dimension is below the minimum of 3.
    #[error("{field} must be at least 3, got {value}")]
    DimensionTooSmall {
        /// The offending option.
        field: &'static str,
        /// The value found.
        value: i64,
    },

    /// Fill percent is outside `0..=100`.
    #[error("fill_percent must be within 0..=100, got {0}")]
    FillPercentOutOfRange(i64),

    /// An iteration count or threshold is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// The offending option.
        field: &'static str,
        /// The value found.
        value: i64,
    },

    /// A value does not fit the integer type it is used as.
    #[error("{field} is too large: {value}")]
    ValueTooLarge {
        /// The offending option.
        field: &'static str,
        /// The value found.
        value: i64,
    },

    /// The TOML document could not be parsed.
    #[error("malformed configuration: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("cannot read configuration {path}: {message}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },
}

/// Pipeline phase, used to locate invariant violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Seeded fill and smoothing.
    Automaton,
    /// Flood fill region discovery.
    RegionAnalysis,
    /// Small region removal.
    Pruning,
    /// Corridor carving.
    Connection,
    /// Surface extraction.
    Meshing,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Automaton => "automaton",
            Self::RegionAnalysis => "region analysis",
            Self::Pruning => "pruning",
            Self::Connection => "connection",
            Self::Meshing => "meshing",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in the generation pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaveError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An outer-ring cell was found not to be Wall.
    #[error("border cell ({x}, {y}) is not wall during {phase}")]
    BorderBreached {
        /// Phase that observed the violation.
        phase: Phase,
        /// Row of the cell.
        x: usize,
        /// Column of the cell.
        y: usize,
    },
}

/// Result type for cave generation.
pub type CaveResult<T> = Result<T, CaveError>;
