//! Command-line front end for the Tier interpreter.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tier::{load_directory, Engine, EngineConfig, LiteralSource, TraceFormat, TraceSink, Value};

#[derive(Parser, Debug)]
#[command(name = "tier")]
#[command(version)]
#[command(about = "Run a Tier program", long_about = None)]
struct Cli {
    /// Directory holding the program's `<id>.tier` files
    #[arg(short, long, default_value = ".")]
    directory: PathBuf,

    /// Seconds to wait between ticks
    #[arg(short, long, default_value = "0", value_parser = parse_timestep)]
    timestep: Duration,

    /// Print a trace record for every tick to stderr
    #[arg(short, long)]
    info: bool,

    /// Format of the `--info` trace
    #[arg(long, value_enum, default_value_t = TraceFormat::Text)]
    trace_format: TraceFormat,

    /// Step through the program in the terminal debugger
    #[arg(short, long)]
    visual: bool,

    /// Initial value of ts: `'12'` or `'1.5'` for numbers, anything else is text
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    set_ts: Option<String>,

    /// Seed for the random-bit instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Stop with an error after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn parse_timestep(text: &str) -> Result<Duration, String> {
    let seconds: f64 = text.parse().map_err(|e| format!("{}", e))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("{}", e))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let initial_ts = match &cli.set_ts {
        Some(text) => Value::parse_quoted(text, LiteralSource::InitialTs)
            .context("invalid --set-ts value")?,
        None => Value::ZERO,
    };
    let config = EngineConfig {
        tick_delay: cli.timestep,
        initial_ts,
        max_ticks: cli.max_ticks,
        seed: cli.seed,
    };

    let grid = load_directory(&cli.directory)
        .with_context(|| format!("failed to load {}", cli.directory.display()))?;

    #[cfg(feature = "visual")]
    let debugger = cli
        .visual
        .then(|| tier::tooling::VisualDebugger::new(grid.all_lines().clone(), cli.timestep));
    #[cfg(not(feature = "visual"))]
    if cli.visual {
        anyhow::bail!("this build has no visual debugger; rebuild with the `visual` feature");
    }

    let mut engine = Engine::with_stdio(grid, config);
    if cli.info {
        engine.attach(Box::new(TraceSink::new(io::stderr(), cli.trace_format)));
    }
    #[cfg(feature = "visual")]
    if let Some(debugger) = debugger {
        engine.attach(Box::new(debugger));
    }

    let summary = engine.run()?;
    tracing::debug!(ticks = summary.ticks, status = ?summary.status, "exit");
    Ok(())
}
