//! Real stdout/stderr redirection
//!
//! Lives in its own test binary because it rewires fd 1 and fd 2 of the whole
//! process. Everything runs inside a single test so no other test observes the
//! redirected streams.

#![cfg(unix)]

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use flightlog::logging::{Logger, OutputSink};
use flightlog::recorder::{session_header, FlightRecorder};
use flightlog::RecorderConfig;
use tempfile::TempDir;

/// Saves fd 1 and 2 and puts them back on drop
struct SavedStdio {
    stdout: i32,
    stderr: i32,
}

impl SavedStdio {
    fn save() -> Self {
        unsafe {
            Self {
                stdout: libc::dup(libc::STDOUT_FILENO),
                stderr: libc::dup(libc::STDERR_FILENO),
            }
        }
    }
}

impl Drop for SavedStdio {
    fn drop(&mut self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        unsafe {
            libc::dup2(self.stdout, libc::STDOUT_FILENO);
            libc::dup2(self.stderr, libc::STDERR_FILENO);
            libc::close(self.stdout);
            libc::close(self.stderr);
        }
    }
}

fn raw_write(fd: i32, bytes: &[u8]) {
    unsafe {
        libc::write(fd, bytes.as_ptr().cast(), bytes.len());
    }
}

#[test]
fn test_record_captures_stdout_and_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let config = RecorderConfig::new("com.example.app").with_cache_dir(temp_dir.path());
    let recorder = FlightRecorder::new(config);

    let path = {
        let _saved = SavedStdio::save();

        let path = recorder.record().unwrap();
        assert_eq!(recorder.record().unwrap(), path);

        io::stdout().write_all(b"Test_Print\n").unwrap();
        io::stdout().flush().unwrap();
        io::stderr().write_all(b"Test_Stderr\n").unwrap();
        raw_write(libc::STDOUT_FILENO, b"Test_Raw\n");

        let logger = Logger::new();
        logger.error("disk full");
        logger.set_sink(OutputSink::SystemLog);
        logger.warning("Test_SystemLog");

        path
    };

    let root = temp_dir.path().join("com.example.app").join("FlightLog");
    assert!(path.starts_with(&root));

    let name = path.file_stem().unwrap().to_string_lossy().into_owned();
    assert_eq!(path, root.join(&name).join(format!("{}.log", name)));
    assert!(Path::new(&path).is_file());

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        format!("{}\n", lines.next().unwrap()),
        session_header(&name)
    );
    assert_eq!(lines.next(), Some("Test_Print"));
    assert_eq!(lines.next(), Some("Test_Stderr"));
    assert_eq!(lines.next(), Some("Test_Raw"));
    assert_eq!(lines.next(), Some("❌ disk full"));

    let system_log = lines.next().unwrap();
    assert!(system_log.ends_with("⚠️ Test_SystemLog"));
    assert_ne!(system_log, "⚠️ Test_SystemLog");
    assert_eq!(lines.next(), None);
}
