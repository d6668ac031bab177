//! Filesystem capability used by every command.
//!
//! Commands never touch `std::fs` or the process working directory directly.
//! They go through [`FileSystem`], which owns the shell's working directory
//! and resolves relative paths against it.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

mod memory;
mod os;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: SystemTime,
}

pub trait FileSystem {
    /// Entries of a directory, sorted by name. Entries whose metadata can't
    /// be read are left out.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Creates or truncates `path` and writes `data`.
    fn write(&mut self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Creates an empty file if nothing exists at `path`. Existing content is
    /// left untouched.
    fn create_file(&mut self, path: &Path) -> io::Result<()>;

    fn set_times(&mut self, path: &Path, accessed: SystemTime, modified: SystemTime)
        -> io::Result<()>;

    /// Creates one directory. The parent must already exist.
    fn create_dir(&mut self, path: &Path) -> io::Result<()>;

    /// Removes a file or an empty directory.
    fn remove(&mut self, path: &Path) -> io::Result<()>;

    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()>;

    fn metadata(&self, path: &Path) -> io::Result<EntryInfo>;

    fn current_dir(&self) -> io::Result<PathBuf>;

    fn set_current_dir(&mut self, path: &Path) -> io::Result<()>;

    fn now(&self) -> SystemTime;

    fn env_var(&self, key: &str) -> Option<String>;
}

pub(crate) fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotADirectory,
        format!("{}: Not a directory", path.display()),
    )
}
