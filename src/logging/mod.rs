//! Leveled logging for flightlog
//!
//! Provides the prefix-decorated [`Logger`], its process-wide default instance,
//! and the tracing setup used for the crate's own diagnostics.

mod level;
mod logger;
mod sink;

pub use level::{ParseSeverityError, Severity, SuppressionMask};
pub use logger::{global, set_sink, set_suppressed, Logger};
pub use sink::{Emit, OutputSink, StdEmitter};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_TRACING_FILTER: &str = "flightlog=info";

/// Install a tracing subscriber that writes diagnostics to stderr
///
/// Once a recording is active stderr points at the flight log, so these
/// diagnostics are captured with everything else. Returns an error if a
/// global subscriber is already installed.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_TRACING_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
}
