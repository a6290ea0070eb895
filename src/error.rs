//! Error types for the flight recorder

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a recording session could not be started
///
/// None of these are fatal to the host process. The caller keeps running with
/// its console output untouched and may call `record()` again later.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// No application identifier was configured or it was empty
    #[error("no application identifier available for the flight log directory")]
    NoAppIdentifier,

    /// The platform has no per-user cache directory
    #[error("could not determine the platform cache directory")]
    NoCacheDir,

    /// The OS process table could not be queried for our start time
    #[error("could not read process start time: {0}")]
    ProcessStartTime(String),

    /// The log file could not be opened for writing
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// stdout/stderr could not be pointed at the log file
    #[error("failed to redirect standard streams: {0}")]
    Redirect(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_message_includes_path() {
        let err = RecorderError::OpenLogFile {
            path: PathBuf::from("/tmp/flight/x.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/flight/x.log"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_no_app_identifier_message() {
        assert_eq!(
            RecorderError::NoAppIdentifier.to_string(),
            "no application identifier available for the flight log directory"
        );
    }
}
