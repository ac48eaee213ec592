//! noisegen CLI - seeded noise image generator.
//!
//! Generates a gradient or cellular noise field and saves it as an 8-bit
//! grayscale PNG.

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use noisegen::noise::{NoiseConfig, NoiseError, NoiseKind, DEFAULT_GRID_SIZE, DEFAULT_PASSES};

/// Generate different noises with different options.
#[derive(Parser)]
#[command(name = "noisegen")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
struct Cli {
    /// The type of noise to generate (perlin, voronoi).
    #[arg(short = 't', long = "type")]
    kind: NoiseKind,

    /// Seed used by the generator (random if omitted).
    #[arg(short, long)]
    seed: Option<u32>,

    /// The width of the noise in pixels.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// The height of the noise in pixels.
    #[arg(short = 'h', long, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// The grid size: octave base divisor (perlin) or feature-point count (voronoi).
    #[arg(short, long = "grid", default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u64,

    /// The number of passes (octaves) used to generate perlin noise.
    #[arg(short, long, default_value_t = DEFAULT_PASSES)]
    passes: u32,

    /// The output file (.png). Defaults to noise_s{seed}_{w}x{h}_p{passes}_g{grid}.png.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print help.
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), NoiseError> {
    // Seed from system entropy if not provided
    let seed = cli.seed.unwrap_or_else(rand::random::<u32>);

    let config = NoiseConfig::new(cli.kind, seed, cli.width, cli.height)
        .with_passes(cli.passes)
        .with_grid_size(cli.grid_size);
    config.validate()?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(config.default_file_name()));

    println!(
        "Generating {} noise with width: {} and height: {} (seed: {})",
        config.kind, config.params.width, config.params.height, seed
    );
    let start = Instant::now();
    let generator = config.generate()?;
    println!("Noise generated in {:.2?}", start.elapsed());

    let (min, max) = generator.field().value_range();
    println!("Value range: [{:.4}, {:.4}]", min, max);

    println!("Saving {} noise to file: {}", config.kind, output.display());
    let start = Instant::now();
    generator.save(&output)?;
    println!("Noise saved in {:.2?}", start.elapsed());

    Ok(())
}
