//! Flight recorder
//!
//! Captures everything the process writes to stdout and stderr into
//! `<cache>/<app_id>/FlightLog/<session>/<session>.log`, where the session name
//! is the process start time. Recording starts at most once per recorder and
//! lasts until the process exits.

mod fs;
mod identity;
mod path;
mod redirect;

pub use fs::{FileSystem, LogHandle, OsFileSystem, RawFd};
pub use identity::process_start_time;
pub use path::{session_header, session_name, SessionPaths};
pub use redirect::{StdioRedirector, StreamRedirector};

use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::Local;

use crate::config::RecorderConfig;
use crate::error::RecorderError;

/// An active recording
struct Session {
    paths: SessionPaths,
    // Kept open for the life of the recorder; fd 1 and 2 share its file.
    _handle: Box<dyn LogHandle>,
}

/// Records the process's standard streams into a per-process log file
pub struct FlightRecorder {
    config: RecorderConfig,
    fs: Arc<dyn FileSystem>,
    redirector: Arc<dyn StreamRedirector>,
    session: Mutex<Option<Session>>,
}

impl FlightRecorder {
    /// Create a recorder using the real filesystem and standard streams
    pub fn new(config: RecorderConfig) -> Self {
        Self::with_parts(config, Arc::new(OsFileSystem), Arc::new(StdioRedirector))
    }

    /// Create a recorder with injected filesystem and redirection capabilities
    pub fn with_parts(
        config: RecorderConfig,
        fs: Arc<dyn FileSystem>,
        redirector: Arc<dyn StreamRedirector>,
    ) -> Self {
        Self {
            config,
            fs,
            redirector,
            session: Mutex::new(None),
        }
    }

    /// Process-wide recorder built from [`RecorderConfig::default`]
    pub fn shared() -> &'static FlightRecorder {
        static SHARED: OnceLock<FlightRecorder> = OnceLock::new();
        SHARED.get_or_init(|| FlightRecorder::new(RecorderConfig::default()))
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Directory holding every session of this application
    pub fn root_dir(&self) -> Result<PathBuf, RecorderError> {
        self.config.root_dir()
    }

    /// Resolve the paths `record()` uses, without creating anything
    pub fn session_paths(&self) -> Result<SessionPaths, RecorderError> {
        let root_dir = self.config.root_dir()?;
        let start_time = process_start_time()?;
        Ok(SessionPaths::resolve(&root_dir, start_time, &Local))
    }

    /// Path of the active session, without starting one
    pub fn recorded_path(&self) -> Option<PathBuf> {
        self.lock_session()
            .as_ref()
            .map(|session| session.paths.file_path.clone())
    }

    /// Start recording, or return the path of the session already running
    ///
    /// The first successful call creates the log file and redirects stdout and
    /// stderr into it; later calls only return the cached path. On failure
    /// nothing is cached, so a later call tries again.
    pub fn record(&self) -> Result<PathBuf, RecorderError> {
        let mut session = self.lock_session();
        if let Some(active) = session.as_ref() {
            return Ok(active.paths.file_path.clone());
        }

        let started = self.start()?;
        let path = started.paths.file_path.clone();
        *session = Some(started);
        Ok(path)
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        // State is only written after a complete start, so a poisoned lock
        // still holds a consistent value.
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self) -> Result<Session, RecorderError> {
        let paths = self.session_paths()?;

        if let Err(e) = self.fs.create_dir_all(&paths.session_dir) {
            tracing::warn!(
                "Failed to create flight log directory {}: {}",
                paths.session_dir.display(),
                e
            );
        }
        if let Err(e) = self.fs.create_file(&paths.file_path) {
            tracing::warn!(
                "Failed to create flight log file {}: {}",
                paths.file_path.display(),
                e
            );
        }

        let mut handle = self
            .fs
            .open_for_writing(&paths.file_path)
            .map_err(|source| RecorderError::OpenLogFile {
                path: paths.file_path.clone(),
                source,
            })?;

        if let Err(e) = handle.seek(SeekFrom::End(0)) {
            tracing::warn!("Failed to seek to end of flight log: {}", e);
        }
        let header = paths.header();
        if let Err(e) = handle
            .write_all(header.as_bytes())
            .and_then(|_| handle.flush())
        {
            tracing::warn!("Failed to write flight log header: {}", e);
        }

        self.redirector
            .redirect(&*handle)
            .map_err(RecorderError::Redirect)?;

        tracing::info!("Recording to: {}", paths.file_path.display());

        Ok(Session {
            paths,
            _handle: handle,
        })
    }
}

impl std::fmt::Debug for FlightRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightRecorder")
            .field("config", &self.config)
            .field("recorded_path", &self.recorded_path())
            .finish()
    }
}
