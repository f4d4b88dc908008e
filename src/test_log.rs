//! In-process `log` sink for unit tests. Records are tagged with the emitting thread so
//! tests running in parallel only see their own diagnostics.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

pub fn install() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Runs `f` with capture installed and returns what the current thread logged at `level`.
pub fn captured<F: FnOnce()>(level: Level, f: F) -> Vec<String> {
    install();
    let me = thread::current().id();
    let start = LOGGER.records.lock().map(|r| r.len()).unwrap_or(0);
    f();
    LOGGER
        .records
        .lock()
        .map(|records| {
            records[start..]
                .iter()
                .filter(|(id, lvl, _)| *id == me && *lvl == level)
                .map(|(_, _, msg)| msg.clone())
                .collect()
        })
        .unwrap_or_default()
}
