use std::env;
use std::fs::{self, File, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::trace;

use super::{not_a_directory, EntryInfo, FileSystem};

/// The host filesystem, with a working directory of its own.
///
/// `cd` moves this value rather than the process cwd, so several shells (or
/// tests) can live in one process.
#[derive(Debug, Clone)]
pub struct OsFileSystem {
    cwd: PathBuf,
}

impl OsFileSystem {
    /// Starts in the process's current directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            cwd: env::current_dir()?,
        })
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { cwd: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

fn entry_info(name: String, metadata: &fs::Metadata) -> EntryInfo {
    EntryInfo {
        name,
        is_dir: metadata.is_dir(),
        size: metadata.len(),
        modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
    }
}

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        let mut entries: Vec<EntryInfo> = fs::read_dir(self.resolve(path))?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                let name = entry.file_name().to_string_lossy().into_owned();
                Some(entry_info(name, &metadata))
            })
            .collect();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }

    fn write(&mut self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(self.resolve(path), data)
    }

    fn create_file(&mut self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        match fs::metadata(&target) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %target.display(), "creating empty file");
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(&target)
                    .map(drop)
            }
            Err(e) => Err(e),
        }
    }

    fn set_times(
        &mut self,
        path: &Path,
        accessed: SystemTime,
        modified: SystemTime,
    ) -> io::Result<()> {
        let file = File::open(self.resolve(path))?;
        file.set_times(
            FileTimes::new()
                .set_accessed(accessed)
                .set_modified(modified),
        )
    }

    fn create_dir(&mut self, path: &Path) -> io::Result<()> {
        fs::create_dir(self.resolve(path))
    }

    fn remove(&mut self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        if fs::symlink_metadata(&target)?.is_dir() {
            fs::remove_dir(&target)
        } else {
            fs::remove_file(&target)
        }
    }

    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(self.resolve(from), self.resolve(to))
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryInfo> {
        let target = self.resolve(path);
        let metadata = fs::metadata(&target)?;
        let name = target.file_name().map_or_else(
            || target.to_string_lossy().into_owned(),
            |n| n.to_string_lossy().into_owned(),
        );
        Ok(entry_info(name, &metadata))
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn set_current_dir(&mut self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        if !fs::metadata(&target)?.is_dir() {
            return Err(not_a_directory(path));
        }
        self.cwd = fs::canonicalize(&target)?;
        Ok(())
    }

    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
