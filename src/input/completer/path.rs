use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes path arguments, resolving relative input against the shell's
/// working directory rather than the process's.
#[derive(Clone)]
pub struct PathCompleter {
    cwd: PathBuf,
}

impl PathCompleter {
    pub fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn set_cwd(&mut self, cwd: &Path) {
        self.cwd = cwd.to_path_buf();
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = split_input(incomplete);
        let search_dir = if typed_dir.is_absolute() {
            typed_dir.clone()
        } else {
            self.cwd.join(&typed_dir)
        };

        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                Some(completion_pair(&typed_dir, &name, is_dir))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Splits typed input into the directory part as written and the name
/// prefix being completed.
fn split_input(incomplete: &str) -> (PathBuf, &str) {
    match incomplete.rfind('/') {
        Some(idx) => (PathBuf::from(&incomplete[..=idx]), &incomplete[idx + 1..]),
        None => (PathBuf::new(), incomplete),
    }
}

fn completion_pair(typed_dir: &Path, name: &str, is_dir: bool) -> Pair {
    let path = typed_dir.join(name).to_string_lossy().into_owned();
    if is_dir {
        Pair {
            display: format!("{}/", name),
            replacement: format!("{}/", path),
        }
    } else {
        Pair {
            display: name.to_string(),
            replacement: format!("{} ", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("data.txt"), "x").unwrap();
        fs::write(dir.path().join("docs").join("guide.md"), "y").unwrap();
        dir
    }

    #[test]
    fn test_split_input() {
        assert_eq!(split_input("abc"), (PathBuf::new(), "abc"));
        assert_eq!(split_input("a/b"), (PathBuf::from("a/"), "b"));
        assert_eq!(split_input("/etc/"), (PathBuf::from("/etc/"), ""));
    }

    #[test]
    fn test_completes_relative_to_cwd() {
        let dir = setup();
        let completer = PathCompleter::new(dir.path());

        let pairs = completer.complete_path("d");
        let replacements: Vec<_> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(replacements, ["data.txt ", "docs/"]);
    }

    #[test]
    fn test_completes_inside_typed_directory() {
        let dir = setup();
        let completer = PathCompleter::new(dir.path());

        let pairs = completer.complete_path("docs/g");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].display, "guide.md");
        assert_eq!(pairs[0].replacement, "docs/guide.md ");
    }

    #[test]
    fn test_follows_cwd_changes() {
        let dir = setup();
        let mut completer = PathCompleter::new(Path::new("/nonexistent-root"));
        assert!(completer.complete_path("").is_empty());

        completer.set_cwd(&dir.path().join("docs"));
        assert_eq!(completer.complete_path("").len(), 1);
    }
}
