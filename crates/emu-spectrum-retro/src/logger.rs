//! Bridge from the `log` facade to the host's log callback.
//!
//! Everything in this crate logs through `log`. Hosts that have their own
//! log sink install a [`HostLogger`] once at startup; without one, records
//! go wherever the embedding application's logger sends them.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Host log callback: level plus the formatted message.
pub type LogSink = Box<dyn Fn(Level, &str) + Send + Sync>;

/// Forwards log records at or above `level` to a host callback.
pub struct HostLogger {
    sink: LogSink,
    level: LevelFilter,
}

impl HostLogger {
    pub fn new(level: LevelFilter, sink: impl Fn(Level, &str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            level,
        }
    }
}

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            (self.sink)(record.level(), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Make `logger` the process-wide logger.
///
/// Only the first call has any effect; returns whether this one did.
pub fn install(logger: HostLogger) -> bool {
    let level = logger.level;
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
        true
    } else {
        false
    }
}
