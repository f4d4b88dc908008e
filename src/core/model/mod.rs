use std::path::Path;

/// Written in place of a GC percentage when a file has no recognised bases.
pub const GC_UNDEFINED: &str = "NA";

/// One FASTA record. Lives only as long as the accumulator needs it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SequenceRecord {
    pub id: String,
    pub seq: String,
}

/// Summary statistics for one successfully parsed file.
#[derive(Clone, Debug, PartialEq)]
pub struct FileStatistics {
    pub file_name: String,
    pub total_length: u64,
    /// `None` when `total_length` is zero.
    pub gc_percentage: Option<f64>,
    pub n50: u64,
    pub l50: u64,
}

impl FileStatistics {
    pub fn gc_percentage_str(&self) -> String {
        match self.gc_percentage {
            Some(pct) => format!("{pct:.2}"),
            None => GC_UNDEFINED.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    Unreadable,
    Format,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Unreadable => "unreadable file",
            FailureKind::Format => "not a plain or gzipped fasta file",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileFailure {
    pub file_name: String,
    pub kind: FailureKind,
    pub detail: String,
}

/// What a single file job produced. Exactly one per dispatched path.
#[derive(Clone, Debug, PartialEq)]
pub enum FileOutcome {
    Stats(FileStatistics),
    Failed(FileFailure),
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
