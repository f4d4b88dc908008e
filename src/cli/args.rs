use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fasta-qc",
    version,
    about = "Total length, GC%, N50 and L50 of plain or gzipped FASTA files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Run(RunArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// FASTA file, or a directory whose files are all processed (not recursive).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of files processed in parallel.
    #[arg(short, long, default_value_t = num_cpus::get() as i64, allow_negative_numbers = true)]
    pub threads: i64,

    #[arg(short, long, default_value = "output.csv")]
    pub output: PathBuf,

    /// Log file, appended to.
    #[arg(short = 'f', long, default_value = "logfile.log")]
    pub logfile: PathBuf,

    #[arg(short = 'l', long, value_enum, default_value_t = LogLevelArg::Warning)]
    pub log_level: LogLevelArg,

    /// Decompression threads per BGZF or Mgzip input.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub decompress_threads: i64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LogLevelArg {
    #[value(name = "debug")]
    Debug,
    #[value(name = "info")]
    Info,
    #[value(name = "warning")]
    Warning,
    #[value(name = "error")]
    Error,
    #[value(name = "critical")]
    Critical,
}

impl LogLevelArg {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Warning => LevelFilter::Warn,
            // `log` has nothing above error.
            LogLevelArg::Error | LogLevelArg::Critical => LevelFilter::Error,
        }
    }
}
