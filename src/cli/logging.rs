//! Log-file setup for the `log` facade.

use crate::core::error::ConfigError;
use anyhow::{Context, Result};
use env_logger::{Env, Target};
use log::{Level, LevelFilter, Record};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Routes all log records to `logfile`, appending, at `level` or above. `RUST_LOG` still
/// overrides the level when set.
pub fn init(logfile: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logfile)
        .map_err(|source| ConfigError::LogFileUnavailable {
            path: logfile.to_path_buf(),
            source,
        })?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            let ts = buf.timestamp();
            write_line(buf, &ts, record)
        })
        .try_init()
        .context("logger already initialised")
}

/// `<timestamp> - <LEVEL>:  <message>`
pub fn write_line(out: &mut dyn Write, timestamp: &dyn Display, record: &Record) -> io::Result<()> {
    writeln!(
        out,
        "{} - {}:  {}",
        timestamp,
        level_name(record.level()),
        record.args()
    )
}

pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
