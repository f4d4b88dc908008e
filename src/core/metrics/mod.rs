use crate::core::model::{FileStatistics, SequenceRecord};
use crate::simd::{self, BaseCounts};
use log::{trace, warn};

mod contiguity;

pub use contiguity::{Contiguity, n50_l50};

/// Running per-file totals. One accumulator per file job; nothing is shared across files.
#[derive(Clone, Debug, Default)]
pub struct StatsAccumulator {
    contig_lengths: Vec<u64>,
    totals: BaseCounts,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &SequenceRecord) {
        let counts = simd::count_bases(record.seq.as_bytes());
        trace!("{}: {} bases, {} gc", record.id, counts.acgtu, counts.gc);
        self.contig_lengths.push(counts.acgtu);
        self.totals.add_assign(counts);
    }

    pub fn contigs(&self) -> usize {
        self.contig_lengths.len()
    }

    /// Produces the file's row. Logs a warning when the file has no recognised bases, or
    /// bases but no G/C.
    pub fn finish(mut self, file_name: String) -> FileStatistics {
        let total = self.totals.acgtu;
        if total == 0 {
            warn!("{file_name} has no sequence content");
        } else if self.totals.gc == 0 {
            warn!("{file_name} has no GC content");
        }
        let gc_percentage = gc_percentage(self.totals.gc, total);
        let Contiguity { n50, l50 } = n50_l50(&mut self.contig_lengths, total);
        FileStatistics {
            file_name,
            total_length: total,
            gc_percentage,
            n50,
            l50,
        }
    }
}

/// `None` when there is nothing to divide by.
pub fn gc_percentage(gc: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(gc as f64 / total as f64 * 100.0)
}
