use crate::cli::args::{Cli, Commands, RunArgs};
use crate::cli::{discover, logging};
use crate::core::collect::Collected;
use crate::core::engine::{self, RunConfig, fmt_dur};
use crate::core::error::ConfigError;
use crate::report::csv::CsvSink;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::time::Instant;

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    logging::init(&args.logfile, args.log_level.level_filter())?;
    execute(&args)?;
    Ok(())
}

/// Validates the arguments, then processes every candidate file and writes the CSV.
///
/// Nothing is dispatched, and no output is created, unless the arguments are valid and the
/// input exists.
fn execute(args: &RunArgs) -> Result<Collected> {
    let t0 = Instant::now();

    let cfg = stage("preflight", || preflight(args))?;
    let paths = stage("discover", || {
        let paths = discover::candidate_paths(&args.input)?;
        Ok(discover::without_own_files(
            paths,
            &[args.output.as_path(), args.logfile.as_path()],
        ))
    })?;

    let t_open = Instant::now();
    let sink = CsvSink::create(&args.output)?;
    stage_done("output-open", t_open);

    let collected = engine::run(&paths, &cfg)?;

    let t_write = Instant::now();
    sink.write_rows(&collected.rows)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    stage_done("csv", t_write);

    info!(
        "wrote {} row(s) to {}",
        collected.rows.len(),
        args.output.display()
    );
    debug!("stage=total time={}", fmt_dur(t0.elapsed()));
    Ok(collected)
}

fn preflight(args: &RunArgs) -> Result<RunConfig> {
    let threads = positive(args.threads).ok_or(ConfigError::InvalidThreads(args.threads))?;
    let decompress_threads = positive(args.decompress_threads)
        .ok_or(ConfigError::InvalidDecompressThreads(args.decompress_threads))?;
    if !args.input.exists() {
        return Err(ConfigError::MissingInput(args.input.clone()).into());
    }
    Ok(RunConfig {
        threads,
        decompress_threads,
    })
}

fn positive(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|&v| v > 0)
}

fn stage<T, F>(name: &str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let t = Instant::now();
    let res = f();
    stage_done(name, t);
    res
}

fn stage_done(name: &str, t: Instant) {
    debug!("stage={} time={}", name, fmt_dur(t.elapsed()));
}
