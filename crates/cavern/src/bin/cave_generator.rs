//! # Cave Generator
//!
//! Command-line tool that generates one cave, meshes it, and prints a
//! report.
//!
//! ```text
//! cave_generator [config.toml] [--seed <text>] [--random-seed] [--ascii]
//! ```

use std::process::ExitCode;

use cavern::{CaveConfig, CavePipeline, GeneratedCave};

/// Attempts made when pruning leaves no room.
const MAX_ATTEMPTS: u32 = 5;

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    seed: Option<String>,
    random_seed: bool,
    ascii: bool,
}

fn print_usage() {
    println!("Usage: cave_generator [config.toml] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --seed <TEXT>    Seed text (overrides the config)");
    println!("  -r, --random-seed    Seed from the system clock");
    println!("  -a, --ascii          Print the finished map");
    println!("  -h, --help           Show this help");
}

/// Returns `None` if the program should exit after printing usage.
fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut parsed = Args::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" | "-s" => {
                let seed = args
                    .get(i + 1)
                    .ok_or_else(|| "--seed needs a value".to_string())?;
                parsed.seed = Some(seed.clone());
                i += 1;
            }
            "--random-seed" | "-r" => parsed.random_seed = true,
            "--ascii" | "-a" => parsed.ascii = true,
            "--help" | "-h" => return Ok(None),
            other if other.starts_with('-') => return Err(format!("unknown option {other}")),
            path => {
                if parsed.config_path.replace(path.to_string()).is_some() {
                    return Err("only one config file may be given".to_string());
                }
            }
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn print_report(cave: &GeneratedCave, ascii: bool) {
    let map = &cave.map;
    let stats = map.stats();
    let mesh = &cave.mesh;

    println!("┌─ MAP ────────────────────────────────────────────────────────────┐");
    println!("│ Seed:               {}", cave.seed());
    println!("│ Interior:           {}x{}", map.interior().width(), map.interior().height());
    println!("│ Bordered:           {}x{}", map.grid().width(), map.grid().height());
    println!("│ Open cells:         {}", stats.open_cells);
    println!("│ Walls opened:       {} regions", stats.wall_regions_removed);
    println!("│ Pockets filled:     {} regions", stats.room_regions_removed);
    println!("│ Generation time:    {:?}", stats.elapsed);
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ ROOMS ──────────────────────────────────────────────────────────┐");
    for room in map.rooms().rooms() {
        let links: Vec<String> = room.connected().map(|id| id.to_string()).collect();
        println!(
            "│ {:<8} size={:<6} edge={:<5} {}-> [{}]",
            room.id().to_string(),
            room.size(),
            room.edge_tiles().len(),
            if room.is_main() { "MAIN " } else { "" },
            links.join(", ")
        );
    }
    println!("│ Passages:           {}", map.passages().len());
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ MESH ───────────────────────────────────────────────────────────┐");
    println!(
        "│ Floor:              {} vertices, {} triangles",
        mesh.floor.vertices.len(),
        mesh.floor.triangle_count()
    );
    println!(
        "│ Walls:              {} vertices, {} triangles",
        mesh.walls.vertices.len(),
        mesh.walls.triangle_count()
    );
    println!("│ Outlines:           {}", mesh.outlines.len());
    println!(
        "│ Buffer bytes:       {}",
        mesh.floor.vertex_bytes().len()
            + mesh.floor.index_bytes().len()
            + mesh.walls.vertex_bytes().len()
            + mesh.walls.index_bytes().len()
    );
    println!("└──────────────────────────────────────────────────────────────────┘");

    if ascii {
        println!();
        println!("{}", map.grid());
    }
}

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CAVERN CAVE GENERATOR                                    ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let raw: Vec<String> = std::env::args().collect();
    let args = match parse_args(&raw) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            println!("Error: {e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let mut config = match &args.config_path {
        Some(path) => {
            println!("Loading config: {path}");
            match CaveConfig::load(path) {
                Ok(config) => config,
                Err(e) => {
                    println!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => CaveConfig::default(),
    };

    if let Some(seed) = args.seed.as_deref() {
        config.generator = config.generator.with_seed(seed);
    }
    if args.random_seed {
        config.generator.use_random_seed = true;
    }

    let mut pipeline = match CavePipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            println!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match pipeline.generate_with_retries(MAX_ATTEMPTS) {
        Ok(cave) => {
            print_report(cave, args.ascii);
            println!();
            println!("✓ Cave generated");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("✗ {e}");
            ExitCode::FAILURE
        }
    }
}
