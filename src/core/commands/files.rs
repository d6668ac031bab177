use std::io;
use std::path::Path;

use super::Context;
use crate::error::CommandError;
use crate::fs::FileSystem;

pub(super) fn cat<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage("cat <filename>"));
    }

    for filename in args {
        match ctx.fs.read(Path::new(filename)) {
            Ok(data) => ctx.out.write_all(&data)?,
            Err(e) => {
                let error = CommandError::fs(format!("Error reading file {}", filename))(e);
                ctx.report(&error);
            }
        }
    }
    Ok(())
}

/// Creates the file if needed, then stamps both times with the current time.
fn touch_one<F: FileSystem + ?Sized>(fs: &mut F, path: &Path) -> io::Result<()> {
    fs.create_file(path)?;
    let now = fs.now();
    fs.set_times(path, now, now)
}

pub(super) fn touch<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage("touch <filename>"));
    }

    for filename in args {
        if let Err(e) = touch_one(ctx.fs, Path::new(filename)) {
            let error = CommandError::fs(format!("Error touching {}", filename))(e);
            ctx.report(&error);
        }
    }
    Ok(())
}

/// Removes files and empty directories, never recursively.
pub(super) fn rm<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage("rm <filename>"));
    }

    for filename in args {
        if let Err(e) = ctx.fs.remove(Path::new(filename)) {
            let error = CommandError::fs(format!("Error removing {}", filename))(e);
            ctx.report(&error);
        }
    }
    Ok(())
}

pub(super) fn cp<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    let [source, dest] = args else {
        return Err(CommandError::Usage("cp <source> <dest>"));
    };

    let data = ctx
        .fs
        .read(Path::new(source))
        .map_err(CommandError::fs("Error reading source"))?;
    ctx.fs
        .write(Path::new(dest), &data)
        .map_err(CommandError::fs("Error writing destination"))
}

pub(super) fn mv<F: FileSystem + ?Sized>(
    args: &[String],
    ctx: &mut Context<'_, F>,
) -> Result<(), CommandError> {
    let [source, dest] = args else {
        return Err(CommandError::Usage("mv <source> <dest>"));
    };

    ctx.fs
        .rename(Path::new(source), Path::new(dest))
        .map_err(CommandError::fs("Error moving file"))
}

#[cfg(test)]
mod tests {
    use crate::core::commands::test_support::{executor, run};
    use crate::fs::{FileSystem, MemoryFileSystem};
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_cat_is_byte_exact() {
        let fs = MemoryFileSystem::new()
            .with_file("/no_newline", "abc")
            .with_file("/two", "x\ny\n");
        let mut executor = executor(fs);

        assert_eq!(run(&mut executor, "cat no_newline").out, "abc");
        assert_eq!(run(&mut executor, "cat two no_newline").out, "x\ny\nabc");
    }

    #[test]
    fn test_cat_continues_past_missing_files() {
        let fs = MemoryFileSystem::new()
            .with_file("/a", "A\n")
            .with_file("/b", "B\n");
        let mut executor = executor(fs);

        let outcome = run(&mut executor, "cat a missing b");
        assert_eq!(outcome.out, "A\nB\n");
        assert!(outcome.err.starts_with("Error reading file missing: "));
        assert_eq!(outcome.err.lines().count(), 1);
    }

    #[test]
    fn test_cat_usage() {
        let mut executor = executor(MemoryFileSystem::new());
        assert_eq!(run(&mut executor, "cat").err, "Usage: cat <filename>\n");
    }

    #[test]
    fn test_touch_creates_empty_file() {
        let mut executor = executor(MemoryFileSystem::new());

        let outcome = run(&mut executor, "touch new");
        assert!(outcome.err.is_empty());
        assert_eq!(run(&mut executor, "cat new").out, "");
        assert_eq!(run(&mut executor, "ls").out, "new\t0\n");
    }

    #[test]
    fn test_touch_keeps_content_and_refreshes_time() {
        let mut fs = MemoryFileSystem::new().with_file("/old", "keep me");
        let before = fs.metadata(Path::new("/old")).unwrap().modified;
        fs.advance(Duration::from_secs(60));
        let mut executor = executor(fs);

        run(&mut executor, "touch old");

        let info = executor.fs().metadata(Path::new("/old")).unwrap();
        assert_eq!(info.modified, before + Duration::from_secs(60));
        assert_eq!(run(&mut executor, "cat old").out, "keep me");
    }

    #[test]
    fn test_touch_continues_past_failures() {
        let mut executor = executor(MemoryFileSystem::new());
        let outcome = run(&mut executor, "touch nodir/f ok");

        assert!(outcome.err.starts_with("Error touching nodir/f: "));
        assert!(executor.fs().exists("/ok"));
    }

    #[test]
    fn test_rm_files_and_empty_dirs() {
        let fs = MemoryFileSystem::new()
            .with_file("/f", "1")
            .with_dir("/empty")
            .with_file("/full/inner", "2");
        let mut executor = executor(fs);

        let outcome = run(&mut executor, "rm f full empty");
        assert!(outcome.err.starts_with("Error removing full: "));
        assert!(!executor.fs().exists("/f"));
        assert!(!executor.fs().exists("/empty"));
        assert!(executor.fs().exists("/full/inner"));
    }

    #[test]
    fn test_rm_usage() {
        let mut executor = executor(MemoryFileSystem::new());
        assert_eq!(run(&mut executor, "rm").err, "Usage: rm <filename>\n");
    }

    #[test]
    fn test_cp_copies_and_overwrites() {
        let fs = MemoryFileSystem::new()
            .with_file("/a", "source\n")
            .with_file("/b", "old content that is longer\n");
        let mut executor = executor(fs);

        assert!(run(&mut executor, "cp a b").err.is_empty());
        assert_eq!(run(&mut executor, "cat b").out, "source\n");
        assert_eq!(run(&mut executor, "cat a").out, "source\n");
    }

    #[test]
    fn test_cp_errors() {
        let fs = MemoryFileSystem::new().with_file("/a", "x");
        let mut executor = executor(fs);

        assert_eq!(run(&mut executor, "cp a").err, "Usage: cp <source> <dest>\n");
        assert_eq!(
            run(&mut executor, "cp a b c").err,
            "Usage: cp <source> <dest>\n"
        );
        assert!(run(&mut executor, "cp missing b")
            .err
            .starts_with("Error reading source: "));
        assert!(run(&mut executor, "cp a nodir/b")
            .err
            .starts_with("Error writing destination: "));
    }

    #[test]
    fn test_mv_renames() {
        let fs = MemoryFileSystem::new().with_file("/a", "payload");
        let mut executor = executor(fs);

        assert!(run(&mut executor, "mv a b").err.is_empty());
        assert_eq!(run(&mut executor, "ls").out, "b\t7\n");
        assert_eq!(run(&mut executor, "cat b").out, "payload");
    }

    #[test]
    fn test_mv_errors() {
        let mut executor = executor(MemoryFileSystem::new());
        assert_eq!(run(&mut executor, "mv a").err, "Usage: mv <source> <dest>\n");
        assert!(run(&mut executor, "mv a b")
            .err
            .starts_with("Error moving file: "));
    }
}
