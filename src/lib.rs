//! flightlog - leveled logging and a stdout/stderr flight recorder
//!
//! [`logging`] provides a prefix-decorated logger with per-severity
//! suppression. [`recorder`] captures the whole standard output and standard
//! error stream of the process into a log file named after the process start
//! time, so crash output and third-party prints are kept for post-mortem
//! diagnosis.

pub mod config;
pub mod error;
pub mod logging;
pub mod recorder;

pub use config::RecorderConfig;
pub use error::RecorderError;
pub use logging::{Logger, OutputSink, Severity};
pub use recorder::FlightRecorder;
