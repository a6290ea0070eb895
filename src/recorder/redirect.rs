//! Redirection of the process's standard streams into a log file

use std::io::{self, Write};

use super::fs::LogHandle;

/// Points stdout and stderr at a log handle
///
/// Only the recorder calls this, and only once per session.
pub trait StreamRedirector: Send + Sync {
    fn redirect(&self, handle: &dyn LogHandle) -> io::Result<()>;
}

/// Redirects the real fd 1 and fd 2 with `dup2`
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioRedirector;

impl StreamRedirector for StdioRedirector {
    #[cfg(unix)]
    fn redirect(&self, handle: &dyn LogHandle) -> io::Result<()> {
        let fd = handle.descriptor().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "log handle has no file descriptor",
            )
        })?;

        unbuffer_std_streams();

        for target in [libc::STDOUT_FILENO, libc::STDERR_FILENO] {
            if unsafe { libc::dup2(fd, target) } == -1 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn redirect(&self, _handle: &dyn LogHandle) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "standard stream redirection requires a unix platform",
        ))
    }
}

/// Flush everything pending and switch C stdio to unbuffered mode
///
/// Rust's own stdout is line buffered and cannot be switched off; the crate's
/// console emitter flushes after every line instead.
#[cfg(unix)]
fn unbuffer_std_streams() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();

    unsafe {
        libc::fflush(std::ptr::null_mut());
        #[cfg(any(target_os = "linux", target_os = "macos", target_os = "ios"))]
        {
            libc::setvbuf(c_stdio::stdout, std::ptr::null_mut(), libc::_IONBF, 0);
            libc::setvbuf(c_stdio::stderr, std::ptr::null_mut(), libc::_IONBF, 0);
        }
    }
}

#[cfg(target_os = "linux")]
#[allow(non_upper_case_globals)]
mod c_stdio {
    extern "C" {
        pub static stdout: *mut libc::FILE;
        pub static stderr: *mut libc::FILE;
    }
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
#[allow(non_upper_case_globals)]
mod c_stdio {
    extern "C" {
        #[link_name = "__stdoutp"]
        pub static stdout: *mut libc::FILE;
        #[link_name = "__stderrp"]
        pub static stderr: *mut libc::FILE;
    }
}
