//! Leveled, prefix-decorated logger
//!
//! A `Logger` owns its suppression mask and current sink as atomics, so a
//! single instance can be shared across threads without locking. The crate
//! keeps one process-wide default instance behind [`global`].

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use super::level::{Severity, SuppressionMask};
use super::sink::{Emit, OutputSink, StdEmitter};

/// Leveled logger with per-severity suppression
pub struct Logger {
    mask: AtomicU8,
    sink: AtomicU8,
    emitter: Arc<dyn Emit>,
}

impl Logger {
    /// Create a logger writing through the real stdout/stderr/syslog
    pub fn new() -> Self {
        Self::with_emitter(Arc::new(StdEmitter))
    }

    /// Create a logger writing through a custom emitter
    pub fn with_emitter(emitter: Arc<dyn Emit>) -> Self {
        Self {
            mask: AtomicU8::new(SuppressionMask::NONE.bits()),
            sink: AtomicU8::new(OutputSink::default().to_u8()),
            emitter,
        }
    }

    /// Emit `"<prefix> <text>"` unless `severity` is currently suppressed
    pub fn write(&self, severity: Severity, text: &str) {
        if self.suppression().suppresses(severity) {
            return;
        }
        let line = format!("{} {}", severity.prefix(), text);
        self.emitter.emit(self.sink(), severity, &line);
    }

    /// Replace the suppressed set
    ///
    /// Severities left out are un-suppressed, whatever the previous mask was.
    pub fn set_suppressed(&self, severities: &[Severity]) {
        let mask = SuppressionMask::from_severities(severities);
        self.mask.store(mask.bits(), Ordering::Relaxed);
    }

    pub fn suppression(&self) -> SuppressionMask {
        SuppressionMask::from_bits(self.mask.load(Ordering::Relaxed))
    }

    /// Currently suppressed severities, lowest first
    pub fn suppressed(&self) -> Vec<Severity> {
        self.suppression().severities()
    }

    /// Select the sink used by subsequent writes
    pub fn set_sink(&self, sink: OutputSink) {
        self.sink.store(sink.to_u8(), Ordering::Relaxed);
    }

    pub fn sink(&self) -> OutputSink {
        OutputSink::from_u8(self.sink.load(Ordering::Relaxed))
    }

    pub fn debug(&self, text: &str) {
        self.write(Severity::Debug, text);
    }

    pub fn info(&self, text: &str) {
        self.write(Severity::Info, text);
    }

    pub fn warning(&self, text: &str) {
        self.write(Severity::Warning, text);
    }

    pub fn error(&self, text: &str) {
        self.write(Severity::Error, text);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("suppressed", &self.suppressed())
            .field("sink", &self.sink())
            .finish()
    }
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The process-wide default logger
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

/// Replace the suppressed set of the default logger
pub fn set_suppressed(severities: &[Severity]) {
    global().set_suppressed(severities);
}

/// Select the sink of the default logger
pub fn set_sink(sink: OutputSink) {
    global().set_sink(sink);
}
