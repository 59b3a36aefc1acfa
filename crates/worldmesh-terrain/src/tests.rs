use std::path::PathBuf;

use worldmesh_core::constants::{HGT_VOID, INVALID_HEIGHT};
use worldmesh_core::enums::{HgtType, Interpolation};

use crate::hgt::{serialize_hgt, write_hgt};
use crate::*;

/// Fresh scratch directory per test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("worldmesh-terrain-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sloped_tile(lat: i32, lon: i32) -> HeightGrid {
    let n = HgtType::Hgt3.grid_size();
    let mut elevations = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            elevations.push((col as i16) - (row as i16) / 2);
        }
    }
    elevations[n * n / 2] = HGT_VOID;
    HeightGrid::new(lat, lon, HgtType::Hgt3, elevations).unwrap()
}

#[test]
fn test_write_then_load_tile() {
    let dir = scratch_dir("roundtrip");
    let grid = sloped_tile(-10, -45);

    let path = write_hgt(&grid, &dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "S10W045.hgt");
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 2 * 1201 * 1201);

    let loaded = load_hgt(&path).unwrap();
    assert_eq!(loaded.header, grid.header);
    assert_eq!(loaded.elevations(), grid.elevations());
    assert_eq!(loaded.header.void_count, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_then_sample() {
    let dir = scratch_dir("sample");
    let path = write_hgt(&sloped_tile(46, 15), &dir).unwrap();
    let grid = load_hgt(&path).unwrap();

    // SW corner: last row, first column.
    let sw = grid.raw_elevation(1200, 0).unwrap() as f64;
    assert_eq!(grid.height(46.0, 15.0, Interpolation::Nearest), sw);
    assert_eq!(grid.height(46.0, 15.0, Interpolation::Bilinear), sw);

    // Half way between two columns on the south edge.
    let lat = 46.0;
    let lon = 15.0 + 10.5 / 1200.0;
    let a = grid.raw_elevation(1200, 10).unwrap() as f64;
    let b = grid.raw_elevation(1200, 11).unwrap() as f64;
    let h = grid.height(lat, lon, Interpolation::Bilinear);
    assert!((h - (a + b) / 2.0).abs() < 1e-6, "{h}");

    assert_eq!(grid.height(45.5, 15.5, Interpolation::Bilinear), INVALID_HEIGHT);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_rejects_wrong_size() {
    let dir = scratch_dir("size");
    let path = dir.join("N46E015.hgt");
    std::fs::write(&path, vec![0u8; 4096]).unwrap();

    match load_hgt(&path) {
        Err(HgtError::InvalidFileSize { bytes }) => assert_eq!(bytes, 4096),
        other => panic!("expected InvalidFileSize, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_rejects_bad_name() {
    let dir = scratch_dir("name");
    let path = dir.join("tile.hgt");
    std::fs::write(&path, serialize_hgt(&sloped_tile(0, 0))).unwrap();

    assert!(matches!(load_hgt(&path), Err(HgtError::UnparsableFileName(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_missing_file() {
    let dir = scratch_dir("missing");
    let path = dir.join("N01E001.hgt");
    assert!(matches!(load_hgt(&path), Err(HgtError::Io(_))));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_lattice_heights_inside_tile() {
    let grid = sloped_tile(46, 15);
    let points = generate_lattice(46, 15, &LatticeConfig::default());
    assert!(points
        .iter()
        .all(|p| grid.height(p.x, p.y, Interpolation::Bilinear) != INVALID_HEIGHT));
}

#[test]
fn test_lattice_spacing_in_meters() {
    let config = LatticeConfig {
        extent_lat: 0.001,
        extent_lon: 0.001,
        resolution_lat: 0.001,
        resolution_lon: 0.001,
        ..LatticeConfig::default()
    };
    let points = generate_lattice(0, 0, &config);
    assert_eq!(points.len(), 4);
    // 0.001° of arc at the equator is about 111 m.
    let d = haversine_distance(points[0].x, points[0].y, points[1].x, points[1].y);
    assert!((d - 111.19).abs() < 0.1, "{d}");
}
