//! RTL Simulation Harness CLI.
//!
//! Runs a device model under the cycle-driven simulation loop: builds the
//! context from the configuration and forwarded arguments, constructs the
//! model, ticks it until it signals completion, then finalizes it and
//! writes coverage.
//!
//! # Usage
//!
//! ```text
//! rtl-harness --config configs/default.toml --model doubler -- +sim+seed+7 +doubler+vectors=64
//! ```
//!
//! Everything after the harness's own options is forwarded untouched to the
//! simulation context, where the device model can read it.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rtl_harness::common::Result;
use rtl_harness::config::Config;
use rtl_harness::dut;
use rtl_harness::sim::{SimulationContext, SimulationLoop};

/// Command-line arguments for the simulation harness.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-driven RTL simulation harness")]
struct Args {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device model to run, overriding `model.name`.
    #[arg(short, long)]
    model: Option<String>,

    /// Directory for coverage and other run artifacts.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Suppress the statistics summary.
    #[arg(short, long)]
    quiet: bool,

    /// Arguments forwarded to the device model, plus-arguments included.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    model_args: Vec<String>,
}

/// Main entry point for the simulation harness.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and loads the TOML configuration.
/// 2. **Context**: Installs logging at the debug level the plus-arguments
///    select, then initializes the simulation context with those overrides.
/// 3. **Model**: Ensures the log directory exists and builds the model.
/// 4. **Simulation Loop**: Ticks until the model signals completion.
/// 5. **Teardown**: Prints statistics and exits 0. Any fatal error exits 1.
fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("\n[!] FATAL: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(name) = args.model {
        config.model.name = name;
    }
    if let Some(dir) = args.log_dir {
        config.paths.log_dir = dir;
    }

    init_logging(SimulationContext::startup_debug_level(
        &config.general,
        &args.model_args,
    ));
    let mut context =
        SimulationContext::initialize(&config.general, &config.coverage, args.model_args)?;

    info!("Global Configuration");
    info!("  Model:          {}", config.model.name);
    info!("  Debug Level:    {}", context.debug_level());
    info!("  Rand Reset:     {:?}", context.rand_reset());
    info!("  Seed:           {}", context.seed());
    info!("  Time Unit:      {}", context.time_unit());
    info!(
        "  Coverage:       {}",
        if context.coverage_enabled() && cfg!(feature = "coverage") {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    info!("  Log Dir:        {}", config.paths.log_dir.display());
    match config.general.max_ticks {
        Some(limit) => info!("  Max Ticks:      {}", limit),
        None => info!("  Max Ticks:      unbounded"),
    }

    fs::create_dir_all(&config.paths.log_dir)?;
    let model = dut::build(&config.model, &mut context)?;

    let mut sim = SimulationLoop::new(context, model)
        .with_coverage_path(config.coverage_path())
        .with_max_ticks(config.general.max_ticks);
    let stats = sim.run()?;

    if !args.quiet {
        stats.print();
    }
    if let Some(path) = &config.paths.stats_file {
        stats.write_json(path)?;
        info!("statistics written to {}", path.display());
    }
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over `debug_level`.
fn init_logging(debug_level: u32) {
    let default = match debug_level {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
