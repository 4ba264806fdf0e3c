//! Command-line tool for generating, inspecting, and meshing region files.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run `voxl generate` to produce a region file, `voxl inspect` to
//! dump its index, and `voxl mesh` to extract surface statistics for a slot.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use voxl_config::{CliArgs, Config};
use voxl_mesh::{compute_visible_faces, greedy_mesh, naive_mesh};
use voxl_region::{
    CHUNK_PAYLOAD_LEN, REGION_SLOTS, Region, RegionCoord, build_region_path, read_chunk,
    read_index, serialize,
};
use voxl_terrain::{GenerationTask, GeneratorPool, TerrainGenerator, TerrainParams, build_region};
use voxl_voxel::VoxelCatalog;

#[derive(Parser, Debug)]
#[command(name = "voxl", about = "Voxel region toolbox")]
struct Cli {
    #[command(flatten)]
    overrides: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a region and write it as a region file.
    Generate {
        /// Region X coordinate.
        #[arg(long, default_value_t = 0)]
        rx: i32,
        /// Region Y coordinate.
        #[arg(long, default_value_t = 0)]
        ry: i32,
        /// Region Z coordinate.
        #[arg(long, default_value_t = 0)]
        rz: i32,
    },
    /// Print a region file's header and slot index.
    Inspect {
        /// Path to the region file.
        file: PathBuf,
        /// List every present slot.
        #[arg(long)]
        slots: bool,
    },
    /// Mesh one chunk of a region file and print surface statistics.
    Mesh {
        /// Path to the region file.
        file: PathBuf,
        /// Slot X coordinate (0-3).
        #[arg(long, default_value_t = 0)]
        sx: usize,
        /// Slot Y coordinate (0-3).
        #[arg(long, default_value_t = 0)]
        sy: usize,
        /// Slot Z coordinate (0-3).
        #[arg(long, default_value_t = 0)]
        sz: usize,
        /// Force the naive mesher instead of the configured default.
        #[arg(long)]
        naive: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Resolve config directory
    let config_dir = cli
        .overrides
        .config
        .clone()
        .unwrap_or_else(voxl_config::default_config_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&cli.overrides);

    let log_dir = config_dir.join("logs");
    voxl_log::init_logging(Some(&log_dir), Some(&config));

    if let Err(e) = run(&config, cli.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate { rx, ry, rz } => generate(config, RegionCoord::new(rx, ry, rz)),
        Command::Inspect { file, slots } => inspect(&file, slots),
        Command::Mesh {
            file,
            sx,
            sy,
            sz,
            naive,
        } => mesh(config, &file, sx, sy, sz, naive),
    }
}

fn generate(config: &Config, rc: RegionCoord) -> Result<(), Box<dyn Error>> {
    let params = TerrainParams {
        seed: config.world.seed,
        ..TerrainParams::default()
    };
    let generator = Arc::new(TerrainGenerator::new(params));

    // Warm the generator cache across worker threads, then assemble the
    // region from cache hits on this thread.
    let threads = match config.pipeline.worker_threads {
        0 => (num_cpus::get().max(2) - 1).max(1),
        n => n,
    };
    let pool = GeneratorPool::new(
        Arc::clone(&generator),
        threads,
        config.pipeline.max_concurrent,
        config.pipeline.result_capacity,
    );

    let mut queued = 0usize;
    for slot in 0..REGION_SLOTS {
        let (sx, sy, sz) = Region::slot_coords(slot);
        let coord = rc.chunk_coord(sx, sy, sz);
        let task = GenerationTask {
            coord,
            priority: slot as u64,
        };
        if pool.submit(task).is_ok() {
            queued += 1;
        } else {
            warn!(?coord, "generation queue full, falling back to inline");
            generator.generate(coord);
        }
    }

    let mut completed = 0usize;
    while completed < queued {
        let results = pool.drain_results();
        if results.is_empty() {
            if pool.in_flight_count() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
            continue;
        }
        for generated in &results {
            info!(
                coord = ?generated.coord,
                micros = generated.generation_time_us,
                "chunk generated"
            );
        }
        completed += results.len();
    }

    let region = build_region(&generator, rc);
    let bytes = serialize(&region)?;

    std::fs::create_dir_all(&config.world.world_dir)?;
    let path = build_region_path(&config.world.world_dir, rc);
    std::fs::write(&path, &bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        chunks = region.present_count(),
        "region written"
    );
    Ok(())
}

fn inspect(file: &Path, list_slots: bool) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read(file)?;
    let index = read_index(&data)?;

    println!("{}", file.display());
    println!("  file size:      {} bytes", data.len());
    println!(
        "  chunks present: {} / {}",
        index.present_count(),
        REGION_SLOTS
    );

    let payload_bytes: usize = index
        .entries()
        .iter()
        .map(|e| e.length as usize)
        .sum();
    println!("  payload bytes:  {payload_bytes}");

    if list_slots {
        for (slot, entry) in index.entries().iter().enumerate() {
            if !entry.is_present() {
                continue;
            }
            let (sx, sy, sz) = Region::slot_coords(slot);
            let kind = read_chunk(&data, &index, slot)?
                .map(|c| format!("{:?}", c.kind()))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  slot {slot:2} ({sx},{sy},{sz}): offset {:7}, length {:5}, kind {kind}",
                entry.offset, entry.length
            );
        }
    }
    Ok(())
}

fn mesh(
    config: &Config,
    file: &Path,
    sx: usize,
    sy: usize,
    sz: usize,
    force_naive: bool,
) -> Result<(), Box<dyn Error>> {
    let data = std::fs::read(file)?;
    let index = read_index(&data)?;
    let slot = Region::slot_index(sx, sy, sz);
    let Some(chunk) = read_chunk(&data, &index, slot)? else {
        return Err(format!("slot ({sx},{sy},{sz}) is empty").into());
    };

    let catalog = VoxelCatalog::standard();
    let visible = compute_visible_faces(&chunk, &catalog);
    let greedy = !force_naive && config.mesh.greedy;
    let batches = if greedy {
        greedy_mesh(&chunk, &visible)
    } else {
        naive_mesh(&chunk, &visible)
    };

    println!(
        "slot ({sx},{sy},{sz}) kind {:?}, {} payload bytes",
        chunk.kind(),
        CHUNK_PAYLOAD_LEN
    );
    println!("  mesher:        {}", if greedy { "greedy" } else { "naive" });
    println!("  quads:         {}", batches.quad_count());
    println!("  covered cells: {}", batches.covered_cells());
    println!("  vertices:      {}", batches.vertex_count());
    println!("  indices:       {}", batches.index_count());
    println!(
        "  batches:       {} opaque, {} translucent",
        batches.opaque.len(),
        batches.translucent.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.world.seed = 7;
        config.world.world_dir = dir.to_path_buf();
        config.pipeline.worker_threads = 2;
        config
    }

    #[test]
    fn test_generate_writes_full_region_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let rc = RegionCoord::new(0, 0, 0);

        generate(&config, rc).unwrap();

        let path = build_region_path(dir.path(), rc);
        let data = std::fs::read(&path).unwrap();
        let index = read_index(&data).unwrap();
        assert_eq!(index.present_count(), REGION_SLOTS);
    }

    #[test]
    fn test_generated_region_meshes() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let rc = RegionCoord::new(0, 0, 0);
        generate(&config, rc).unwrap();

        let path = build_region_path(dir.path(), rc);
        let data = std::fs::read(&path).unwrap();
        let index = read_index(&data).unwrap();
        // Slot (0,0,0) sits at the world floor and always has terrain.
        let chunk = read_chunk(&data, &index, 0).unwrap().unwrap();
        let catalog = VoxelCatalog::standard();
        let visible = compute_visible_faces(&chunk, &catalog);
        let batches = greedy_mesh(&chunk, &visible);
        assert!(!batches.is_empty());
    }

    #[test]
    fn test_inspect_reads_generated_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let rc = RegionCoord::new(1, 0, -1);
        generate(&config, rc).unwrap();

        let path = build_region_path(dir.path(), rc);
        inspect(&path, true).unwrap();
        mesh(&config, &path, 0, 0, 0, false).unwrap();
        mesh(&config, &path, 0, 0, 0, true).unwrap();
    }
}
