use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use clap::Parser;

use flightlog::config::RecorderConfig;
use flightlog::logging::{self, OutputSink, Severity};
use flightlog::recorder::FlightRecorder;

/// Record this process's stdout/stderr, and optionally a child command's,
/// into a flight log file
#[derive(Debug, Parser)]
#[command(name = "flightlog", version)]
struct Cli {
    /// Application identifier naming the log directory (defaults to the executable name)
    #[arg(long)]
    app_id: Option<String>,

    /// Base cache directory (defaults to the platform cache directory)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Severity to suppress; may be repeated
    #[arg(long = "suppress", value_name = "LEVEL")]
    suppress: Vec<Severity>,

    /// Send log lines to the system log instead of stdout
    #[arg(long)]
    syslog: bool,

    /// Command to run while recording; it inherits the recorded streams
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr, and into the flight log once recording starts
    logging::init_tracing().context("Failed to initialize tracing")?;

    let mut config = match cli.app_id {
        Some(app_id) => RecorderConfig::new(app_id),
        None => RecorderConfig::default(),
    };
    if let Some(cache_dir) = cli.cache_dir {
        config = config.with_cache_dir(cache_dir);
    }

    logging::set_suppressed(&cli.suppress);
    if cli.syslog {
        logging::set_sink(OutputSink::SystemLog);
    }

    let recorder = FlightRecorder::new(config);

    // Once record() succeeds the console is gone, so announce the path first
    if let Ok(paths) = recorder.session_paths() {
        Severity::Info.write(format!("Recording to {}", paths.file_path.display()));
    }
    match recorder.record() {
        Ok(path) => {
            Severity::Info.write(format!("Recording started: {}", path.display()));
        }
        Err(e) => {
            Severity::Warning.write(format!("Recording unavailable, console only: {}", e));
        }
    }

    let Some((program, args)) = cli.command.split_first() else {
        return Ok(());
    };

    Severity::Debug.write(format!("Running {} {}", program, args.join(" ")));
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run {}", program))?;

    if status.success() {
        Severity::Info.write(format!("{} exited successfully", program));
    } else {
        Severity::Error.write(format!("{} exited with {}", program, status));
    }

    std::process::exit(status.code().unwrap_or(1));
}
