//! Typed errors raised by the statistics engine.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the run configuration. Any of these aborts the run before a single file is
/// dispatched.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Thread count must be higher than 0 (got {0})")]
    InvalidThreads(i64),

    #[error("Decompression thread count must be higher than 0 (got {0})")]
    InvalidDecompressThreads(i64),

    #[error("{} does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("cannot write output {}: {source}", path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open log file {}: {source}", path.display())]
    LogFileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures raised while scanning FASTA records out of a decoded stream.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("line {line}: sequence data before the first '>' header")]
    MissingHeader { line: u64 },

    #[error("line {line}: binary or non UTF-8 content")]
    Binary { line: u64 },

    #[error("line {line}: {source}")]
    Io {
        line: u64,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_threads_message() {
        let msg = format!("{}", ConfigError::InvalidThreads(-2));
        assert!(msg.contains("higher than 0"));
        assert!(msg.contains("-2"));
    }

    #[test]
    fn test_missing_input_message() {
        let msg = format!("{}", ConfigError::MissingInput(PathBuf::from("reads/asm.fa")));
        assert_eq!(msg, "reads/asm.fa does not exist");
    }

    #[test]
    fn test_scan_error_carries_line() {
        let msg = format!("{}", ScanError::MissingHeader { line: 3 });
        assert!(msg.starts_with("line 3:"));
    }
}
