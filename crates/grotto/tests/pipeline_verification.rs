//! # Pipeline Verification
//!
//! End-to-end runs of the generator on fixed configurations.

use std::collections::HashSet;

use grotto::procedural::find_regions;
use grotto::{generate, CaveConfig, CaveError, Cell, ConfigError, Winding};

fn config(height: i64, width: i64, fill_percent: i64, smooth_iterations: i64) -> CaveConfig {
    CaveConfig {
        height,
        width,
        seed: 42,
        fill_percent,
        smooth_iterations,
        clear_wall_threshold: 10,
        clear_room_threshold: 10,
        winding: Winding::DoubleSided,
    }
}

/// Test: Two runs of the reference configuration are identical.
#[test]
fn test_reference_scenario_is_deterministic() {
    let config = config(10, 10, 45, 3);
    let first = generate(&config).unwrap();
    let second = generate(&config).unwrap();

    assert_eq!(first.grid.as_bytes(), second.grid.as_bytes());
    assert_eq!(first.mesh.vertex_count(), second.mesh.vertex_count());
    assert_eq!(first.mesh.triangle_count(), second.mesh.triangle_count());
    assert_eq!(first.mesh, second.mesh);
    assert_eq!(first.corridors, second.corridors);
}

/// Test: Different seeds give different caves.
#[test]
fn test_seed_changes_layout() {
    let a = generate(&config(48, 48, 45, 3)).unwrap();
    let b = generate(&CaveConfig {
        seed: 43,
        ..config(48, 48, 45, 3)
    })
    .unwrap();
    assert_ne!(a.grid, b.grid);
}

/// Test: An empty interior is a single room with nothing to connect.
#[test]
fn test_open_cave_is_one_room() {
    let level = generate(&config(10, 12, 0, 0)).unwrap();

    assert_eq!(level.rooms.len(), 1);
    assert_eq!(level.rooms[0].size(), 8 * 10);
    assert!(level.rooms[0].is_main);
    assert!(level.corridors.is_empty());
    assert_eq!(level.grid.count(Cell::Wall), 10 * 12 - 8 * 10);
}

/// Test: A solid cave has no rooms and a mesh over the whole footprint.
#[test]
fn test_solid_cave_covers_footprint() {
    let level = generate(&config(10, 10, 100, 3)).unwrap();

    assert!(level.rooms.is_empty());
    assert!(level.corridors.is_empty());
    assert_eq!(level.grid.count(Cell::Empty), 0);
    assert_eq!(level.mesh.vertex_count(), 100 * 8);

    let mut covered = HashSet::new();
    for v in &level.mesh.vertices {
        covered.insert(((v[0] + 0.5) as i32, (v[2] + 0.5) as i32));
    }
    for x in -5..=5 {
        for z in -5..=5 {
            assert!(covered.contains(&(x, z)), "corner ({x}, {z}) missing");
        }
    }
}

/// Test: Generated floors are a single connected space.
#[test]
fn test_final_floor_is_connected() {
    for seed in 0..12 {
        let level = generate(&CaveConfig {
            seed,
            ..config(56, 72, 48, 5)
        })
        .unwrap();

        let floors = find_regions(&level.grid, Cell::Empty).unwrap();
        assert!(floors.len() <= 1, "seed {seed}: {} floors", floors.len());
        assert_eq!(level.corridors.len(), level.rooms.len().saturating_sub(1));
    }
}

/// Test: The mesh only references existing vertices.
#[test]
fn test_mesh_is_well_formed() {
    for winding in [Winding::DoubleSided, Winding::Duplicated] {
        let level = generate(&CaveConfig {
            winding,
            ..config(40, 40, 46, 4)
        })
        .unwrap();

        assert_eq!(level.mesh.triangles.len() % 3, 0);
        assert!(level
            .mesh
            .triangles
            .iter()
            .all(|&i| (i as usize) < level.mesh.vertex_count()));
        assert_eq!(level.mesh.double_sided, winding == Winding::DoubleSided);
    }
}

/// Test: Bad settings are refused before anything is generated.
#[test]
fn test_invalid_config_rejected() {
    let too_small = generate(&config(2, 10, 45, 3)).unwrap_err();
    assert!(matches!(
        too_small,
        CaveError::Config(ConfigError::DimensionTooSmall { .. })
    ));

    let overfull = generate(&config(10, 10, 150, 3)).unwrap_err();
    assert!(matches!(
        overfull,
        CaveError::Config(ConfigError::FillPercentOutOfRange(_))
    ));

    let negative = generate(&config(10, 10, 45, -1)).unwrap_err();
    assert!(matches!(
        negative,
        CaveError::Config(ConfigError::Negative { .. })
    ));
}

/// Test: Grids too large to index are refused instead of allocated.
#[test]
fn test_oversized_grid_rejected() {
    let huge = generate(&config(1 << 33, 1 << 33, 45, 3)).unwrap_err();
    assert!(matches!(
        huge,
        CaveError::Config(ConfigError::ValueTooLarge { field: "height * width", .. })
    ));
}

/// Test: A TOML file drives the same level as the equivalent struct.
#[test]
fn test_toml_config_matches_struct() {
    let source = r#"
        height = 10
        width = 10
        seed = 42
        fill_percent = 45
        smooth_iterations = 3
        clear_wall_threshold = 10
        clear_room_threshold = 10
    "#;
    let parsed = CaveConfig::from_toml_str(source).unwrap();
    assert_eq!(parsed, config(10, 10, 45, 3));
    assert_eq!(
        generate(&parsed).unwrap().grid,
        generate(&config(10, 10, 45, 3)).unwrap().grid
    );
}
