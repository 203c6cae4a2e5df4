mod config;
mod engine;
mod models;
mod parameters;
mod processor;
mod storage;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::task::spawn_blocking;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::JobSettings;
use crate::engine::{ChunkOrchestrator, LoggingRetryObserver, RunReport};
use crate::parameters::JobParameters;

struct CliArguments {
    config: Option<PathBuf>,
    log_level: LevelFilter,
    parameters: Vec<String>
}

impl CliArguments {
    fn parse<I: IntoIterator<Item = String>>(arguments: I) -> Self {
        let mut config = None;
        let mut log_level = LevelFilter::INFO;
        let mut parameters = Vec::new();

        for argument in arguments {
            if let Some(path) = argument.strip_prefix("--config=") {
                config = Some(PathBuf::from(path));
            } else if let Some(level) = argument.strip_prefix("--log-level=") {
                log_level = parse_log_level(level);
            } else {
                parameters.push(argument);
            }
        }

        Self { config, log_level, parameters }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let arguments = CliArguments::parse(std::env::args().skip(1));

    if arguments.parameters.is_empty() {
        eprintln!("Usage: billing-pipeline [--config=<path>.yaml] [--log-level=<level>] key=value[,Type]...");
        eprintln!("Parameters: input.file, output.file, data.year (Integer), data.month (Integer), skip.file (optional)");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    setup_logging(arguments.log_level);

    let settings = JobSettings::load(arguments.config.as_deref()).context("Invalid configuration")?;
    let parameters = JobParameters::from_args(&arguments.parameters).context("Invalid job parameters")?;

    let cancellation = CancellationToken::new();
    let mut orchestrator = ChunkOrchestrator::new(Arc::new(settings))
        .with_retry_observer(Arc::new(LoggingRetryObserver))
        .with_cancellation(cancellation.clone());

    let timer = Instant::now();
    let mut run = spawn_blocking(move || orchestrator.run(&parameters));

    let outcome = tokio::select! {
        outcome = &mut run => outcome,
        _ = signal::ctrl_c() => {
            warn!("Interrupt received, cancelling run");
            cancellation.cancel();
            run.await
        }
    }?;

    info!("Run finished in: {:?}", timer.elapsed());

    match outcome {
        Ok(report) => {
            write_report_to_stdout(&report)?;

            if !report.is_completed() {
                exit(1);
            }
        }
        Err(validation_error) => {
            error!("{validation_error}");
            eprintln!("{validation_error}");
            exit(1);
        }
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries the run summary, logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &RunReport) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());
    let counts = &report.counts;

    writeln!(output, "status,read,kept,dropped,skipped,chunks,rows")?;
    writeln!(
        output,
        "{:?},{},{},{},{},{},{}",
        report.status,
        counts.read,
        counts.kept,
        counts.dropped,
        counts.skipped,
        counts.chunks_committed,
        counts.rows_written
    )?;

    if let Some(failure) = &report.failure {
        writeln!(output, "cause: {failure}")?;
    }

    output.flush()?;

    Ok(())
}
