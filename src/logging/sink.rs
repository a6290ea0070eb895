//! Output destinations for leveled log lines

use std::io::{self, Write};

use chrono::Local;

use super::level::Severity;
use crate::config;

/// Where formatted lines are sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputSink {
    /// The process's standard output
    #[default]
    Console,
    /// The platform system log, echoed to standard error
    SystemLog,
}

impl OutputSink {
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            OutputSink::Console => 0,
            OutputSink::SystemLog => 1,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => OutputSink::SystemLog,
            _ => OutputSink::Console,
        }
    }
}

/// Delivers one formatted line to a sink
///
/// The line carries no trailing newline; implementations add one.
pub trait Emit: Send + Sync {
    fn emit(&self, sink: OutputSink, severity: Severity, line: &str);
}

/// Emitter backed by the real stdout, stderr and syslog
///
/// Write failures are swallowed. A broken console must never surface as an
/// error in application code.
#[derive(Debug, Default)]
pub struct StdEmitter;

impl Emit for StdEmitter {
    fn emit(&self, sink: OutputSink, severity: Severity, line: &str) {
        match sink {
            OutputSink::Console => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{}", line);
                let _ = out.flush();
            }
            OutputSink::SystemLog => {
                let mut err = io::stderr().lock();
                let _ = writeln!(err, "{}", system_log_line(line));
                let _ = err.flush();
                drop(err);

                #[cfg(unix)]
                syslog(severity, line);
                #[cfg(not(unix))]
                let _ = severity;
            }
        }
    }
}

/// Decorate a line the way system loggers echo to stderr:
/// `2022-10-14 15:30:45.123 program[pid] line`
fn system_log_line(line: &str) -> String {
    format!(
        "{} {}[{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        config::executable_name().unwrap_or_else(|| "unknown".to_string()),
        std::process::id(),
        line
    )
}

#[cfg(unix)]
fn syslog(severity: Severity, line: &str) {
    use std::ffi::CString;

    // Interior NULs cannot cross into C; the stderr echo already has the line.
    let Ok(message) = CString::new(line) else {
        return;
    };
    let priority = match severity {
        Severity::Debug => libc::LOG_DEBUG,
        Severity::Info => libc::LOG_INFO,
        Severity::Warning => libc::LOG_WARNING,
        Severity::Error => libc::LOG_ERR,
    };
    unsafe {
        libc::syslog(
            libc::LOG_USER | priority,
            b"%s\0".as_ptr().cast(),
            message.as_ptr(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_round_trips_through_u8() {
        for sink in [OutputSink::Console, OutputSink::SystemLog] {
            assert_eq!(OutputSink::from_u8(sink.to_u8()), sink);
        }
        assert_eq!(OutputSink::from_u8(42), OutputSink::Console);
    }

    #[test]
    fn test_default_sink_is_console() {
        assert_eq!(OutputSink::default(), OutputSink::Console);
    }

    #[test]
    fn test_system_log_line_keeps_message_as_suffix() {
        let line = system_log_line("❌ disk full");
        assert!(line.ends_with("❌ disk full"));
        assert_ne!(line, "❌ disk full");
        assert!(line.contains(&format!("[{}]", std::process::id())));
    }
}
