//! Temperature and humidity monitor driven by operator commands.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use app::{parse_command, App, ShutdownHandle};
use clap::{Parser, Subcommand};
use looper::Looper;
use monitor::RandomReader;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Poll a simulated temperature and humidity sensor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the monitor, reading commands until interrupted.
    Run {
        /// Command file; stdin when omitted.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Seed for reproducible sensor readings.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Echo each input line with its parse result, then exit.
    StreamTest {
        /// Command file; stdin when omitted.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    match Cli::parse().command {
        Command::Run { input, seed } => run(input.as_deref(), seed),
        Command::StreamTest { input } => stream_test(input.as_deref()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the message log.
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(input: Option<&Path>, seed: Option<u64>) -> Result<()> {
    let mut looper = Looper::new();
    looper.on_error(|err| error!(%err, "loop action failed"));

    let sensor = match seed {
        Some(seed) => RandomReader::seeded(seed),
        None => RandomReader::from_entropy(),
    };
    let app = App::builder()
        .looper(looper.handle())
        .input(open_input(input)?)
        .sensor(sensor)
        .build()
        .context("failed to assemble the monitor")?;
    watch_ctrl_c(app.shutdown_handle()).context("failed to install the Ctrl+C handler")?;

    info!("monitor ready; waiting for commands");
    let summary = looper.run();
    info!(
        executed = summary.executed,
        failed = summary.failed,
        "loop finished"
    );
    drop(app);
    Ok(())
}

fn stream_test(input: Option<&Path>) -> Result<()> {
    for (idx, line) in open_input(input)?.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let verdict = match parse_command(&line) {
            Ok(command) => format!("ok {command:?}"),
            Err(err) => format!("rejected: {err}"),
        };
        println!("{:>4}: {line} -> {verdict}", idx + 1);
    }
    Ok(())
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead + Send>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Triggers `shutdown` on the first Ctrl+C.
fn watch_ctrl_c(shutdown: ShutdownHandle) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || match runtime.block_on(signal::ctrl_c()) {
            Ok(()) => {
                warn!("received Ctrl+C, shutting down");
                shutdown.trigger();
            }
            Err(err) => error!(%err, "failed to listen for Ctrl+C"),
        })?;
    Ok(())
}
