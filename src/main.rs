//! Grid Snake entry point
//!
//! Reads settings, wires the level loader and high-score file into the game
//! controller and runs the terminal frontend.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::Rng;

use grid_snake::audio::AudioManager;
use grid_snake::consts::{DEFAULT_HIGH_SCORE_FILE, DEFAULT_LEVELS_DIR, DEFAULT_SETTINGS_FILE};
use grid_snake::{FileHighScoreStore, GameController, LevelLoader, Settings, platform};

#[derive(Parser)]
#[command(name = "grid-snake", version, about = "Level-based snake in the terminal")]
struct Args {
    /// Settings JSON file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Directory containing level1.txt, level2.txt, ...
    #[arg(long, default_value = DEFAULT_LEVELS_DIR)]
    levels: PathBuf,

    /// High score file
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score: PathBuf,

    /// RNG seed for food placement (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logger(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_file.as_ref())?;
    log::info!("Grid Snake starting...");

    let settings = Settings::load(&args.settings);
    let loader = LevelLoader::new(&args.levels, settings.grid_columns(), settings.grid_rows());
    let store = FileHighScoreStore::new(&args.high_score);
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());

    let mut audio = AudioManager::new(settings.music_enabled);
    let mut controller = GameController::new(settings, loader, store, seed);

    platform::run(&mut controller, &mut audio).context("terminal frontend failed")?;

    log::info!("Bye");
    Ok(())
}
