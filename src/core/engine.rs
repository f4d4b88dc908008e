use crate::core::collect::{Collected, ResultCollector};
use crate::core::error::ConfigError;
use crate::core::fasta::FastaRecords;
use crate::core::io::open_decoded;
use crate::core::metrics::StatsAccumulator;
use crate::core::model::{FailureKind, FileFailure, FileOutcome, display_name};
use anyhow::{Context, Result, bail};
use crossbeam_channel as channel;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub threads: usize,
    pub decompress_threads: usize,
}

/// One input file bound to the decode → scan → accumulate pipeline.
#[derive(Clone, Debug)]
pub struct FileJob {
    pub index: usize,
    pub path: PathBuf,
}

impl FileJob {
    pub fn run(&self, decompress_threads: usize) -> FileOutcome {
        let file_name = display_name(&self.path);
        let input = match open_decoded(&self.path, decompress_threads) {
            Ok(input) => input,
            Err(e) => {
                return FileOutcome::Failed(FileFailure {
                    file_name,
                    kind: FailureKind::Unreadable,
                    detail: e.to_string(),
                });
            }
        };
        debug!("{file_name}: {} input", input.kind.as_str());

        let mut acc = StatsAccumulator::new();
        for record in FastaRecords::new(input.stream) {
            match record {
                Ok(record) => acc.push(&record),
                Err(e) => {
                    return FileOutcome::Failed(FileFailure {
                        file_name,
                        kind: FailureKind::Format,
                        detail: e.to_string(),
                    });
                }
            }
        }
        debug!("{file_name}: {} records", acc.contigs());
        FileOutcome::Stats(acc.finish(file_name))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub dispatched: usize,
    pub skipped: usize,
}

/// Bounded worker pool over file jobs.
pub struct Scheduler {
    threads: usize,
    decompress_threads: usize,
}

impl Scheduler {
    pub fn new(cfg: &RunConfig) -> Result<Self, ConfigError> {
        if cfg.threads == 0 {
            return Err(ConfigError::InvalidThreads(0));
        }
        if cfg.decompress_threads == 0 {
            return Err(ConfigError::InvalidDecompressThreads(0));
        }
        Ok(Self {
            threads: cfg.threads,
            decompress_threads: cfg.decompress_threads,
        })
    }

    /// Runs one job per regular file in `paths` on at most `threads` workers and hands each
    /// outcome to `sink` on the calling thread, in completion order, tagged with the path's
    /// index in `paths`. Paths that are not regular files are skipped without an outcome.
    ///
    /// Fails if a dispatched job ends without reporting an outcome.
    pub fn run<F>(&self, paths: &[PathBuf], sink: F) -> Result<RunSummary>
    where
        F: FnMut(usize, FileOutcome),
    {
        let decompress_threads = self.decompress_threads;
        self.run_with(paths, move |job: &FileJob| job.run(decompress_threads), sink)
    }

    /// Same as [`Scheduler::run`] with `work` in place of [`FileJob::run`].
    pub fn run_with<W, F>(&self, paths: &[PathBuf], work: W, mut sink: F) -> Result<RunSummary>
    where
        W: Fn(&FileJob) -> FileOutcome + Send + Sync + 'static,
        F: FnMut(usize, FileOutcome),
    {
        let jobs: Vec<FileJob> = paths
            .iter()
            .enumerate()
            .filter(|(_, path)| {
                let keep = path.is_file();
                if !keep {
                    debug!("skipping {}: not a regular file", path.display());
                }
                keep
            })
            .map(|(index, path)| FileJob {
                index,
                path: path.clone(),
            })
            .collect();
        let summary = RunSummary {
            dispatched: jobs.len(),
            skipped: paths.len() - jobs.len(),
        };
        if jobs.is_empty() {
            return Ok(summary);
        }

        let workers = self.threads.min(jobs.len());
        let (job_tx, job_rx) = channel::bounded::<FileJob>(workers * 2);
        let (result_tx, result_rx) = channel::unbounded::<(usize, FileOutcome)>();
        let work = Arc::new(work);

        let producer = thread::spawn(move || {
            for job in jobs {
                if job_tx.send(job).is_err() {
                    return;
                }
            }
        });

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let rx = job_rx.clone();
            let tx = result_tx.clone();
            let work = Arc::clone(&work);
            let handle = thread::Builder::new()
                .name(format!("fasta-qc-worker-{worker_id}"))
                .spawn(move || {
                    for job in rx.iter() {
                        let t = Instant::now();
                        let outcome = work(&job);
                        debug!(
                            "stage=file path={} time={}",
                            job.path.display(),
                            fmt_dur(t.elapsed())
                        );
                        if tx.send((job.index, outcome)).is_err() {
                            break;
                        }
                    }
                })
                .context("failed to spawn worker thread")?;
            handles.push(handle);
        }
        drop(job_rx);
        drop(result_tx);

        let mut received = 0usize;
        for (index, outcome) in result_rx.iter() {
            sink(index, outcome);
            received += 1;
        }

        let mut panicked = usize::from(producer.join().is_err());
        for handle in handles {
            if handle.join().is_err() {
                panicked += 1;
            }
        }
        if received != summary.dispatched {
            bail!(
                "{} of {} file jobs ended without a result ({} thread(s) panicked)",
                summary.dispatched - received,
                summary.dispatched,
                panicked
            );
        }
        if panicked > 0 {
            bail!("{panicked} scheduler thread(s) panicked");
        }
        Ok(summary)
    }
}

/// Runs every candidate path and collects the rows in input order.
pub fn run(paths: &[PathBuf], cfg: &RunConfig) -> Result<Collected> {
    let t = Instant::now();
    let scheduler = Scheduler::new(cfg)?;
    let mut collector = ResultCollector::new(paths.len());
    let summary = scheduler.run(paths, |index, outcome| collector.accept(index, outcome))?;
    let collected = collector.finish();
    info!(
        "processed {} candidate path(s): {} skipped, {} failed, {} row(s)",
        paths.len(),
        summary.skipped,
        collected.failures.len(),
        collected.rows.len()
    );
    debug!("stage=engine time={}", fmt_dur(t.elapsed()));
    Ok(collected)
}

pub fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
