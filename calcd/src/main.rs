//! # Calculator Host Daemon
//!
//! Main entry point for the calculator simulator.

use calcd::{HostRuntime, HostRuntimeConfig, HostRuntimeError};
use clap::Parser;
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

/// Runs the keypad calculator firmware against a simulated keypad and LCD
#[derive(Parser, Debug)]
#[command(name = "calcd", version, about, long_about = None)]
struct Args {
    /// Key script to run
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// JSON runtime config; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum scripted inputs to run (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_steps: Option<usize>,

    /// Ticks each key is held down
    #[arg(long, value_name = "TICKS")]
    press_ticks: Option<u32>,

    /// Ticks of release after each key
    #[arg(long, value_name = "TICKS")]
    release_ticks: Option<u32>,

    /// Render the LCD after every key
    #[arg(short, long)]
    echo: bool,

    /// Print the final calculator state as JSON
    #[arg(long)]
    dump_state: bool,

    /// Enable debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::new();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.parse_default_env();
    builder.init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), HostRuntimeError> {
    let mut config = match &args.config {
        Some(path) => HostRuntimeConfig::load(path)?,
        None => HostRuntimeConfig::default(),
    };

    if let Some(path) = &args.script {
        info!("loading script {}", path.display());
        config.script = Some(fs::read_to_string(path)?);
    }
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    if let Some(ticks) = args.press_ticks {
        config.press_ticks = ticks;
    }
    if let Some(ticks) = args.release_ticks {
        config.release_ticks = ticks;
    }
    config.echo_every_key |= args.echo;

    let mut runtime = HostRuntime::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.run(&mut out)?;
    info!(
        "{} steps, {} keys dispatched, {} ticks ({} ms simulated)",
        runtime.step_count(),
        runtime.keys_dispatched(),
        runtime.ticks(),
        runtime.elapsed_ms()
    );

    if args.dump_state {
        runtime.dump_state(&mut out)?;
    }
    Ok(())
}
