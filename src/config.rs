//! Configuration for the flight recorder

use std::path::PathBuf;

use crate::error::RecorderError;

/// Name of the directory holding all sessions under `<cache>/<app_id>`
pub const FLIGHT_LOG_DIR: &str = "FlightLog";

/// Recorder configuration
///
/// Both fields are resolved lazily, at `record()` time, so a missing value is
/// reported as an error instead of aborting construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Application identifier, e.g. `com.example.app`
    pub app_id: Option<String>,

    /// Base cache directory; the platform cache directory when `None`
    pub cache_dir: Option<PathBuf>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            app_id: executable_name(),
            cache_dir: None,
        }
    }
}

impl RecorderConfig {
    /// Configuration for an explicit application identifier
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: Some(app_id.into()),
            cache_dir: None,
        }
    }

    /// Override the base cache directory
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// The non-empty application identifier
    pub fn app_id(&self) -> Result<&str, RecorderError> {
        match self.app_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(RecorderError::NoAppIdentifier),
        }
    }

    /// The base cache directory, falling back to the platform one
    pub fn cache_dir(&self) -> Result<PathBuf, RecorderError> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => try_cache_dir().ok_or(RecorderError::NoCacheDir),
        }
    }

    /// `<cache>/<app_id>/FlightLog`
    pub fn root_dir(&self) -> Result<PathBuf, RecorderError> {
        let app_id = self.app_id()?;
        Ok(self.cache_dir()?.join(app_id).join(FLIGHT_LOG_DIR))
    }
}

/// Try to get the platform cache directory, returning None if unavailable
pub fn try_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir()
}

/// File stem of the running executable
pub fn executable_name() -> Option<String> {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
}
