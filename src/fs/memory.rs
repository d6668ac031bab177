use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::{not_a_directory, EntryInfo, FileSystem};

#[derive(Debug, Clone)]
enum Node {
    Dir {
        modified: SystemTime,
    },
    File {
        data: Vec<u8>,
        accessed: SystemTime,
        modified: SystemTime,
    },
}

impl Node {
    fn is_dir(&self) -> bool {
        matches!(self, Node::Dir { .. })
    }

    fn info(&self, name: String) -> EntryInfo {
        match self {
            Node::Dir { modified } => EntryInfo {
                name,
                is_dir: true,
                size: 0,
                modified: *modified,
            },
            Node::File { data, modified, .. } => EntryInfo {
                name,
                is_dir: false,
                size: data.len() as u64,
                modified: *modified,
            },
        }
    }
}

/// An in-memory tree with the same error behavior as a POSIX filesystem,
/// for exercising commands without touching the disk.
///
/// Time does not move on its own; use [`MemoryFileSystem::advance`].
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
    nodes: BTreeMap<PathBuf, Node>,
    cwd: PathBuf,
    clock: SystemTime,
    env: HashMap<String, String>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: No such file or directory", path.display()),
    )
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{}: File exists", path.display()),
    )
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::IsADirectory,
        format!("{}: Is a directory", path.display()),
    )
}

fn not_empty(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::DirectoryNotEmpty,
        format!("{}: Directory not empty", path.display()),
    )
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        let clock = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir { modified: clock });
        Self {
            nodes,
            cwd: PathBuf::from("/"),
            clock,
            env: HashMap::new(),
        }
    }

    /// Adds a file, creating any missing parent directories.
    pub fn with_file(mut self, path: impl AsRef<Path>, data: impl Into<Vec<u8>>) -> Self {
        let path = self.resolve(path.as_ref());
        self.ensure_parents(&path);
        self.nodes.insert(
            path,
            Node::File {
                data: data.into(),
                accessed: self.clock,
                modified: self.clock,
            },
        );
        self
    }

    /// Adds a directory, creating any missing parents.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = self.resolve(path.as_ref());
        self.ensure_parents(&path);
        self.nodes.insert(path, Node::Dir { modified: self.clock });
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.contains_key(&self.resolve(path.as_ref()))
    }

    fn ensure_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir {
                    modified: self.clock,
                });
        }
    }

    /// Absolute, lexically normalized form of `path`.
    fn resolve(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };

        let mut out = PathBuf::from("/");
        for component in joined.components() {
            match component {
                Component::Normal(part) => out.push(part),
                Component::ParentDir => {
                    out.pop();
                }
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        out
    }

    fn node(&self, path: &Path) -> io::Result<&Node> {
        self.nodes.get(path).ok_or_else(|| not_found(path))
    }

    /// Checks that the parent of `path` exists and is a directory.
    fn check_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            None => Ok(()),
            Some(parent) => match self.nodes.get(parent) {
                Some(node) if node.is_dir() => Ok(()),
                Some(_) => Err(not_a_directory(parent)),
                None => Err(not_found(path)),
            },
        }
    }

    fn children(&self, dir: &Path) -> impl Iterator<Item = (&PathBuf, &Node)> + '_ {
        let dir = dir.to_path_buf();
        self.nodes
            .iter()
            .filter(move |(path, _)| path.parent() == Some(dir.as_path()))
    }

    fn touch_dir(&mut self, dir: Option<&Path>) {
        if let Some(Node::Dir { modified }) = dir.and_then(|d| self.nodes.get_mut(d)) {
            *modified = self.clock;
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        let dir = self.resolve(path);
        if !self.node(&dir)?.is_dir() {
            return Err(not_a_directory(&dir));
        }

        // BTreeMap order keeps the entries sorted by name.
        Ok(self
            .children(&dir)
            .map(|(child, node)| {
                let name = child
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                node.info(name)
            })
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let target = self.resolve(path);
        match self.node(&target)? {
            Node::File { data, .. } => Ok(data.clone()),
            Node::Dir { .. } => Err(is_a_directory(&target)),
        }
    }

    fn write(&mut self, path: &Path, data: &[u8]) -> io::Result<()> {
        let target = self.resolve(path);
        let now = self.clock;
        match self.nodes.get_mut(&target) {
            Some(Node::Dir { .. }) => Err(is_a_directory(&target)),
            Some(Node::File {
                data: existing,
                modified,
                ..
            }) => {
                *existing = data.to_vec();
                *modified = now;
                Ok(())
            }
            None => {
                self.check_parent(&target)?;
                self.nodes.insert(
                    target.clone(),
                    Node::File {
                        data: data.to_vec(),
                        accessed: now,
                        modified: now,
                    },
                );
                self.touch_dir(target.parent());
                Ok(())
            }
        }
    }

    fn create_file(&mut self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        if self.nodes.contains_key(&target) {
            return Ok(());
        }
        self.write(&target, &[])
    }

    fn set_times(
        &mut self,
        path: &Path,
        accessed_at: SystemTime,
        modified_at: SystemTime,
    ) -> io::Result<()> {
        let target = self.resolve(path);
        match self.nodes.get_mut(&target) {
            Some(Node::File {
                accessed, modified, ..
            }) => {
                *accessed = accessed_at;
                *modified = modified_at;
                Ok(())
            }
            Some(Node::Dir { modified }) => {
                *modified = modified_at;
                Ok(())
            }
            None => Err(not_found(&target)),
        }
    }

    fn create_dir(&mut self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        if self.nodes.contains_key(&target) {
            return Err(already_exists(&target));
        }
        self.check_parent(&target)?;
        self.nodes.insert(
            target.clone(),
            Node::Dir {
                modified: self.clock,
            },
        );
        self.touch_dir(target.parent());
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        if self.node(&target)?.is_dir() {
            if target.parent().is_none() {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "/: Device or resource busy",
                ));
            }
            if self.children(&target).next().is_some() {
                return Err(not_empty(&target));
            }
        }
        self.nodes.remove(&target);
        self.touch_dir(target.parent());
        Ok(())
    }

    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        let source = self.resolve(from);
        let dest = self.resolve(to);
        let source_is_dir = self.node(&source)?.is_dir();
        if source == dest {
            return Ok(());
        }
        if source_is_dir && dest.starts_with(&source) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}: Invalid argument", dest.display()),
            ));
        }
        self.check_parent(&dest)?;

        if let Some(existing) = self.nodes.get(&dest) {
            match (source_is_dir, existing.is_dir()) {
                (false, true) => return Err(is_a_directory(&dest)),
                (true, false) => return Err(not_a_directory(&dest)),
                (true, true) if self.children(&dest).next().is_some() => {
                    return Err(not_empty(&dest))
                }
                _ => {}
            }
        }

        let moved: Vec<PathBuf> = self
            .nodes
            .keys()
            .filter(|path| path.starts_with(&source))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = self.nodes.remove(&old) {
                let suffix = old.strip_prefix(&source).unwrap_or(Path::new(""));
                let new = if suffix.as_os_str().is_empty() {
                    dest.clone()
                } else {
                    dest.join(suffix)
                };
                self.nodes.insert(new, node);
            }
        }

        self.touch_dir(source.parent());
        self.touch_dir(dest.parent());
        Ok(())
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryInfo> {
        let target = self.resolve(path);
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "/".to_string());
        Ok(self.node(&target)?.info(name))
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn set_current_dir(&mut self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        if !self.node(&target)?.is_dir() {
            return Err(not_a_directory(&target));
        }
        self.cwd = target;
        Ok(())
    }

    fn now(&self) -> SystemTime {
        self.clock
    }

    fn env_var(&self, key: &str) -> Option<String> {
        self.env.get(key).cloned()
    }
}
