use clap::Parser;
use silkflow::prelude::*;
use std::path::PathBuf;

/// Flowing silk ribbons over a procedural starfield.
#[derive(Parser, Debug)]
#[command(name = "silkflow", version, about)]
struct Args {
    /// JSON configuration file; values are clamped into range.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random source, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Render without a window.
    #[arg(long)]
    headless: bool,

    /// Number of frames to render in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Directory for PNG captures in headless mode.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Save every n-th frame.
    #[arg(long, default_value_t = 60)]
    every: u64,
}

fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };

    let mut simulation = Simulation::new(args.width.max(1), args.height.max(1));
    if let Some(seed) = args.seed {
        simulation = simulation.with_seed(seed);
    }

    if args.headless {
        let mut driver = Driver::with_time(simulation, Time::fixed());
        let capture = args.out.as_ref().map(|dir| Capture::new(dir, args.every));
        run_headless(&mut driver, &config, args.frames, capture.as_ref())?;
        return Ok(());
    }

    silkflow::run(Driver::new(simulation), config)
}
