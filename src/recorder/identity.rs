//! Process identity: the start time of the current process
//!
//! Read from the OS process table, not the wall clock, so the session name is
//! the same whenever during the process's life recording starts, and differs
//! across restarts.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use sysinfo::{ProcessesToUpdate, System};

use crate::error::RecorderError;

static START_TIME: OnceLock<DateTime<Utc>> = OnceLock::new();

/// Start time of the current process, in whole seconds
///
/// The first successful read is memoized; a failed read is reported and may be
/// retried by a later call.
pub fn process_start_time() -> Result<DateTime<Utc>, RecorderError> {
    if let Some(start) = START_TIME.get() {
        return Ok(*start);
    }
    let start = query_start_time()?;
    Ok(*START_TIME.get_or_init(|| start))
}

fn query_start_time() -> Result<DateTime<Utc>, RecorderError> {
    let pid = sysinfo::get_current_pid()
        .map_err(|e| RecorderError::ProcessStartTime(e.to_string()))?;

    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), false);

    let process = system.process(pid).ok_or_else(|| {
        RecorderError::ProcessStartTime(format!("process {} not found in process table", pid))
    })?;

    // sysinfo reports 0 when the platform did not give us a start time
    let secs = process.start_time();
    if secs == 0 {
        return Err(RecorderError::ProcessStartTime(
            "process table has no start time".to_string(),
        ));
    }

    let secs = i64::try_from(secs)
        .map_err(|_| RecorderError::ProcessStartTime(format!("start time {} out of range", secs)))?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| RecorderError::ProcessStartTime(format!("start time {} out of range", secs)))
}
