//! # cavegen
//!
//! Generates one cave and prints a summary.
//!
//! ```bash
//! cavegen              # built-in defaults
//! cavegen cave.toml    # settings from a TOML file
//! ```

use std::path::Path;
use std::process::ExitCode;

use grotto::{CaveConfig, CaveError, CaveLevel};

fn run() -> Result<CaveLevel, CaveError> {
    let config = match std::env::args().nth(1) {
        Some(path) => CaveConfig::from_toml_file(Path::new(&path))?,
        None => CaveConfig::default(),
    };
    grotto::generate(&config)
}

fn main() -> ExitCode {
    let level = match run() {
        Ok(level) => level,
        Err(err) => {
            eprintln!("cavegen: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stats = &level.stats;
    println!("grid        {} x {}", level.grid.height(), level.grid.width());
    println!("walls       {}", level.grid.count(grotto::Cell::Wall));
    println!(
        "rooms       {} kept / {} found",
        level.rooms.len(),
        stats.rooms_found
    );
    println!("corridors   {}", stats.corridors);
    println!(
        "wall groups {} kept / {} found",
        stats.wall_regions_found - stats.wall_regions_pruned,
        stats.wall_regions_found
    );
    println!(
        "mesh        {} vertices, {} triangles{}",
        stats.vertices,
        stats.triangles,
        if level.mesh.double_sided { " (double-sided)" } else { "" }
    );
    ExitCode::SUCCESS
}
