//! Filesystem capabilities used by the recorder
//!
//! Kept behind a trait so tests can count calls or fail on purpose without
//! touching the real filesystem.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::fd::AsRawFd;
#[cfg(unix)]
pub use std::os::fd::RawFd;

#[cfg(not(unix))]
pub type RawFd = i32;

/// Writable handle to a session log file
pub trait LogHandle: Write + Seek + Send {
    /// Descriptor the standard streams are duplicated onto, if the handle
    /// is backed by one
    fn descriptor(&self) -> Option<RawFd>;
}

impl LogHandle for File {
    fn descriptor(&self) -> Option<RawFd> {
        #[cfg(unix)]
        {
            Some(self.as_raw_fd())
        }
        #[cfg(not(unix))]
        {
            None
        }
    }
}

/// Directory and file creation
pub trait FileSystem: Send + Sync {
    /// Create `path` and all missing parents; succeeds if it already exists
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create `path` or truncate it to zero length
    fn create_file(&self, path: &Path) -> io::Result<()>;

    /// Open an existing file for writing
    fn open_for_writing(&self, path: &Path) -> io::Result<Box<dyn LogHandle>>;
}

/// `FileSystem` backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        File::create(path).map(drop)
    }

    fn open_for_writing(&self, path: &Path) -> io::Result<Box<dyn LogHandle>> {
        let file = OpenOptions::new().write(true).open(path)?;
        Ok(Box::new(file))
    }
}
