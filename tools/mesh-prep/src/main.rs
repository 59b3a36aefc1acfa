//! mesh-prep: triangulate lat/lon lattices over SRTM tiles.
//!
//! Usage:
//!   mesh-prep info --hgt N46E015.hgt
//!   mesh-prep height --hgt N46E015.hgt --at 46.01,15.02 --bilinear
//!   mesh-prep mesh --hgt N46E015.hgt --output mesh.json --extent 0.01
//!   mesh-prep synthetic --lat 46 --lon 15 --arcsec 3 --output tiles/

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use worldmesh_core::constants::HGT_VOID;
use worldmesh_core::enums::{HgtType, Interpolation};
use worldmesh_delaunay::triangulate;
use worldmesh_terrain::{generate_lattice, load_hgt, write_hgt, HeightGrid, LatticeConfig};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "info" => cmd_info(&args[2..]),
        "height" => cmd_height(&args[2..]),
        "mesh" => cmd_mesh(&args[2..]),
        "synthetic" => cmd_synthetic(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

/// Library diagnostics go through `tracing`; `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_usage() {
    eprintln!(
        "mesh-prep: SRTM tile inspection and lattice triangulation\n\
         \n\
         Commands:\n\
         \n\
         info      Print the header of an HGT tile\n\
         \n\
           --hgt <path>         HGT file to read\n\
         \n\
         height    Sample a single height\n\
         \n\
           --hgt <path>         HGT file to read\n\
           --at <lat,lon>       Query coordinates (degrees)\n\
           --bilinear           Interpolate instead of nearest cell\n\
         \n\
         mesh      Triangulate a lattice and write it as JSON\n\
         \n\
           --hgt <path>         HGT file providing origin and heights\n\
           --output <path>      Output .json file path\n\
           --offset <lat,lon>   Lattice offset from the SW corner (default: 0,0)\n\
           --extent <deg>       Lattice extent, both axes (default: 0.02)\n\
           --resolution <deg>   Lattice spacing, both axes (default: 0.0001)\n\
           --shuffle-seed <N>   Shuffle insertion order with this seed\n\
         \n\
         synthetic Write a synthetic HGT tile for testing/demo\n\
         \n\
           --lat <N>            SW corner latitude (whole degrees)\n\
           --lon <N>            SW corner longitude (whole degrees)\n\
           --arcsec <1|3>       Tile resolution (default: 3)\n\
           --output <dir>       Output directory (default: .)\n\
         \n\
         Examples:\n\
         \n\
           mesh-prep synthetic --lat 46 --lon 15 --output tiles\n\
           mesh-prep mesh --hgt tiles/N46E015.hgt --output mesh.json --extent 0.005\n"
    );
}

// --- Argument helpers ---

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn parse_pair(value: &str) -> Option<(f64, f64)> {
    let (a, b) = value.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

/// Parse `name`'s value, falling back to `default` when the flag is absent.
/// A present but malformed value is fatal.
fn parse_or<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    match flag_value(args, name) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid value for {name}: {raw}");
            process::exit(1);
        }),
    }
}

fn require_hgt(args: &[String]) -> HeightGrid {
    let Some(path) = flag_value(args, "--hgt") else {
        eprintln!("Error: --hgt <path> is required");
        process::exit(1);
    };
    match load_hgt(Path::new(path)) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error loading HGT file: {e}");
            process::exit(1);
        }
    }
}

// --- Info command ---

fn cmd_info(args: &[String]) {
    let grid = require_hgt(args);
    let h = &grid.header;

    println!("origin:     {}, {}", h.lat_origin, h.lon_origin);
    println!("type:       {:?} ({}\" cells)", h.hgt_type, h.hgt_type.arc_seconds());
    println!("samples:    {0} × {0}", h.grid_size());
    println!("elevation:  {}..{} m", h.min_elevation, h.max_elevation);
    println!("voids:      {}", h.void_count);
}

// --- Height command ---

fn cmd_height(args: &[String]) {
    let Some((lat, lon)) = flag_value(args, "--at").and_then(parse_pair) else {
        eprintln!("Error: --at <lat,lon> is required");
        process::exit(1);
    };
    let mode = if has_flag(args, "--bilinear") {
        Interpolation::Bilinear
    } else {
        Interpolation::Nearest
    };

    let grid = require_hgt(args);
    match grid.try_height(lat, lon, mode) {
        Some(h) => println!("{h}"),
        None => {
            eprintln!("Error: {lat},{lon} is outside the tile");
            process::exit(1);
        }
    }
}

// --- Mesh command ---

#[derive(Serialize)]
struct MeshVertex {
    id: u32,
    lat: f64,
    lon: f64,
    height: f64,
}

#[derive(Serialize)]
struct MeshFile {
    lat_origin: i32,
    lon_origin: i32,
    points: Vec<MeshVertex>,
    triangles: Vec<[u32; 3]>,
}

fn cmd_mesh(args: &[String]) {
    let output = match flag_value(args, "--output") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --output <path> is required");
            process::exit(1);
        }
    };

    let defaults = LatticeConfig::default();
    let (offset_lat, offset_lon) = match flag_value(args, "--offset") {
        None => (defaults.offset_lat, defaults.offset_lon),
        Some(raw) => parse_pair(raw).unwrap_or_else(|| {
            eprintln!("Error: invalid value for --offset: {raw}");
            process::exit(1);
        }),
    };
    let extent = parse_or(args, "--extent", defaults.extent_lat);
    let resolution = parse_or(args, "--resolution", defaults.resolution_lat);
    let config = LatticeConfig {
        offset_lat,
        offset_lon,
        extent_lat: extent,
        extent_lon: extent,
        resolution_lat: resolution,
        resolution_lon: resolution,
    };

    let grid = require_hgt(args);
    let (lat_origin, lon_origin) = (grid.header.lat_origin, grid.header.lon_origin);

    let mut points = generate_lattice(lat_origin, lon_origin, &config);
    if points.is_empty() {
        eprintln!("Error: lattice is empty (check --extent and --resolution)");
        process::exit(1);
    }
    if let Some(raw) = flag_value(args, "--shuffle-seed") {
        let seed: u64 = raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid value for --shuffle-seed: {raw}");
            process::exit(1);
        });
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        points.shuffle(&mut rng);
        eprintln!("Shuffled insertion order (seed {seed})");
    }

    eprintln!("Triangulating {} lattice points...", points.len());
    let start = Instant::now();
    let mesh = match triangulate(&points) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error triangulating lattice: {e}");
            process::exit(1);
        }
    };
    eprintln!(
        "Triangulated: {} triangles in {:.2}s",
        mesh.len(),
        start.elapsed().as_secs_f64()
    );

    let vertices: Vec<MeshVertex> = mesh
        .points()
        .iter()
        .map(|p| MeshVertex {
            id: p.id,
            lat: p.x,
            lon: p.y,
            height: grid.height(p.x, p.y, Interpolation::Bilinear),
        })
        .collect();
    let triangles = mesh
        .triangles()
        .iter()
        .map(|t| mesh.triangle_ids(t))
        .collect();

    let file = MeshFile {
        lat_origin,
        lon_origin,
        points: vertices,
        triangles,
    };

    eprintln!("Writing mesh to {}...", output.display());
    let written = serde_json::to_vec(&file)
        .map_err(std::io::Error::from)
        .and_then(|bytes| std::fs::write(&output, bytes));
    match written {
        Ok(()) => {
            let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
            eprintln!("Done! Output: {} ({} bytes)", output.display(), file_size);
        }
        Err(e) => {
            eprintln!("Error writing mesh: {e}");
            process::exit(1);
        }
    }
}

// --- Synthetic tile command ---

fn cmd_synthetic(args: &[String]) {
    let lat: i32 = parse_or(args, "--lat", 46);
    let lon: i32 = parse_or(args, "--lon", 15);
    let arcsec: u32 = parse_or(args, "--arcsec", 3);
    let Some(hgt_type) = HgtType::from_arc_seconds(arcsec) else {
        eprintln!("Error: --arcsec must be 1 or 3, got {arcsec}");
        process::exit(1);
    };
    let output = flag_value(args, "--output").map_or_else(|| PathBuf::from("."), PathBuf::from);

    let n = hgt_type.grid_size();
    eprintln!("Generating {n}×{n} synthetic tile at {lat}, {lon}...");
    let grid = match generate_synthetic_tile(lat, lon, hgt_type) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error building tile: {e}");
            process::exit(1);
        }
    };
    eprintln!(
        "Elevation range: {}..{}m, {} voids",
        grid.header.min_elevation, grid.header.max_elevation, grid.header.void_count
    );

    if let Err(e) = std::fs::create_dir_all(&output) {
        eprintln!("Error creating {}: {e}", output.display());
        process::exit(1);
    }
    match write_hgt(&grid, &output) {
        Ok(path) => eprintln!("Done! Output: {}", path.display()),
        Err(e) => {
            eprintln!("Error writing tile: {e}");
            process::exit(1);
        }
    }
}

/// Rolling hills with a lake in the middle. Lake-bottom cells are voids,
/// so downstream consumers see real no-data samples.
fn generate_synthetic_tile(
    lat: i32,
    lon: i32,
    hgt_type: HgtType,
) -> worldmesh_terrain::Result<HeightGrid> {
    let n = hgt_type.grid_size();
    let mut elevations = Vec::with_capacity(n * n);

    for row in 0..n {
        for col in 0..n {
            // Normalized coordinates (0..1)
            let nx = col as f64 / (n - 1) as f64;
            let ny = 1.0 - row as f64 / (n - 1) as f64; // 0=south, 1=north
            elevations.push(synthetic_elevation(nx, ny));
        }
    }

    HeightGrid::new(lat, lon, hgt_type, elevations)
}

/// nx: 0=west, 1=east. ny: 0=south, 1=north.
fn synthetic_elevation(nx: f64, ny: f64) -> i16 {
    let dx = nx - 0.5;
    let dy = ny - 0.5;
    let r2 = dx * dx + dy * dy;
    if r2 < 0.0004 {
        return HGT_VOID;
    }

    let base = 300.0 + 900.0 * ny;
    let hills = 120.0 * (nx * 14.0).sin() * (ny * 9.0).cos();
    let basin = 400.0 * (-r2 / 0.02).exp();
    (base + hills - basin).round() as i16
}
