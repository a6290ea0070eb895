//! Session naming and log file paths

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};

/// `yyyy-MM-dd'T'HHmmssZ`, e.g. `2022-10-14T153045+0800`
const SESSION_NAME_FORMAT: &str = "%Y-%m-%dT%H%M%S%z";

/// Paths of one recording session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// `<cache>/<app_id>/FlightLog`
    pub root_dir: PathBuf,
    /// Session name derived from the process start time
    pub name: String,
    /// `<root_dir>/<name>`
    pub session_dir: PathBuf,
    /// `<session_dir>/<name>.log`
    pub file_path: PathBuf,
}

impl SessionPaths {
    /// Derive the session paths for a process started at `start_time`,
    /// formatted in the offset `tz` applies at that instant
    pub fn resolve<Tz>(root_dir: &Path, start_time: DateTime<Utc>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let name = session_name(start_time, tz);
        let session_dir = root_dir.join(&name);
        let file_path = session_dir.join(format!("{}.log", name));
        Self {
            root_dir: root_dir.to_path_buf(),
            name,
            session_dir,
            file_path,
        }
    }

    /// First line written into every session file
    pub fn header(&self) -> String {
        session_header(&self.name)
    }
}

/// Format a start time as a filesystem-safe session name
pub fn session_name<Tz>(start_time: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    start_time
        .with_timezone(tz)
        .format(SESSION_NAME_FORMAT)
        .to_string()
}

pub fn session_header(name: &str) -> String {
    format!("============= FlightLog.LogRecorder {} =============\n", name)
}
