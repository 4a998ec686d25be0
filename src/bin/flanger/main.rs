//! flanger - play a test signal through the flanger from a terminal
//!
//! Run with: cargo run --bin flanger -- --source saw --frequency 110

mod app;
mod source;
mod ui;

use std::{fs::File, path::Path, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::FlangerApp;
use saavy_flanger::DEFAULT_CAPACITY_MS;
use source::Waveform;

#[derive(Debug, Parser)]
#[command(name = "flanger", about = "Play a test signal through the flanger")]
struct Args {
    /// Test signal fed into the effect
    #[arg(long, value_enum, default_value_t = Waveform::Saw)]
    source: Waveform,

    /// Pitch of the test signal in Hz
    #[arg(long, default_value_t = 110.0)]
    frequency: f32,

    /// Output level of the test signal (0.0 - 1.0)
    #[arg(long, default_value_t = 0.3)]
    level: f32,

    /// Delay line length in milliseconds
    #[arg(long, default_value_t = DEFAULT_CAPACITY_MS)]
    capacity_ms: f32,

    /// Where to write logs (the terminal belongs to the UI)
    #[arg(long, default_value = "flanger.log")]
    log_file: PathBuf,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args.log_file)?;

    FlangerApp::new(args.source, args.frequency, args.level, args.capacity_ms).run()
}

fn init_logging(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
